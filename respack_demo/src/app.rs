//! The layered sample application.
//!
//! Every layer reports through the same 8-bit result type. A failure deep in
//! the backend travels upwards as an aggregate, each layer appending its own
//! result on the way out:
//!
//! ```text
//! ui::retrieve_data
//!   └─► backend_access::retrieve_remote_data
//!         └─► Backend::execute_remote_query
//! ```
//!
//! With the RPC call failing, the caller ends up with three results, innermost
//! context first: the backend access error, the RPC error it wraps, and the
//! UI data retrieval error.

use clap::ValueEnum;
use respack::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

result_category! {
    /// Application layer a result comes from.
    pub struct Category: 2;
    /// Module inside the layer.
    pub struct SubCategory: 2;
}

result_type!(
    /// Application result: 2-bit category, 2-bit subcategory, 4-bit code.
    pub AppResult: u8 => Category, SubCategory
);

aggregate_result_type!(
    /// Up to four application results.
    pub AppErrors: u32 => AppResult
);

/// The positive result.
pub const OK: AppResult = AppResult::SUCCESS;

pub const UI: Category = Category(1);
pub const BACKEND: Category = Category(2);

/// Name of a category value, as shown in reports.
pub fn category_name(category: Category) -> &'static str {
    match category {
        UI => "ui",
        BACKEND => "backend",
        _ => "unknown",
    }
}

/// Name of a subcategory value within its category.
pub fn subcategory_name(category: Category, sub: SubCategory) -> &'static str {
    match (category, sub) {
        (BACKEND, backend_access::DB) => "db",
        (BACKEND, backend_access::RPC) => "rpc",
        (BACKEND, backend_access::DATA_ACCESS) => "data-access",
        (UI, ui::DATA_MODEL) => "data-model",
        _ => "unknown",
    }
}

/// Human-readable description of the well-known results.
pub fn describe(result: AppResult) -> Option<&'static str> {
    if result == OK {
        Some("ok")
    } else if result == backend_access::rpc_error() {
        Some("remote query failed")
    } else if result == backend_access::wrong_query() {
        Some("remote query rejected")
    } else if result == backend_access::backend_access_error() {
        Some("backend unreachable")
    } else if result == ui::data_retrieval_error() {
        Some("data could not be retrieved")
    } else {
        None
    }
}

pub mod backend_access {
    use super::*;

    pub const DB: SubCategory = SubCategory(1);
    pub const RPC: SubCategory = SubCategory(2);
    pub const DATA_ACCESS: SubCategory = SubCategory(3);

    /// Code shared by every data access failure.
    pub const BACKEND_ACCESS_ERROR_CODE: u8 = 2;

    pub fn rpc_error() -> AppResult {
        AppResult::make((BACKEND, RPC), 1)
    }

    pub fn wrong_query() -> AppResult {
        AppResult::make((BACKEND, DB), 1)
    }

    pub fn backend_access_error() -> AppResult {
        AppResult::make((BACKEND, DATA_ACCESS), BACKEND_ACCESS_ERROR_CODE)
    }

    /// A remote data source.
    pub trait Backend {
        /// Run the query; a single result, no context.
        fn execute_remote_query(&self) -> AppResult;
    }

    /// How a [`SimulatedBackend`] query ends.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
    #[serde(rename_all = "kebab-case")]
    pub enum BackendOutcome {
        /// The RPC transport fails.
        #[default]
        RpcFailure,
        /// The database rejects the query.
        WrongQuery,
        /// The query succeeds.
        Healthy,
    }

    /// Backend client whose every query ends in a fixed outcome.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SimulatedBackend {
        outcome: BackendOutcome,
    }

    impl SimulatedBackend {
        pub fn new(outcome: BackendOutcome) -> Self {
            Self { outcome }
        }
    }

    impl Backend for SimulatedBackend {
        fn execute_remote_query(&self) -> AppResult {
            match self.outcome {
                BackendOutcome::RpcFailure => rpc_error(),
                BackendOutcome::WrongQuery => wrong_query(),
                BackendOutcome::Healthy => OK,
            }
        }
    }

    /// Query the backend. RPC failures are wrapped in a data access error;
    /// other failures are ignored.
    pub fn retrieve_remote_data(backend: &impl Backend) -> AppErrors {
        let result = backend.execute_remote_query();
        if is_success(result) {
            return AppErrors::from(result);
        }

        if get_category::<SubCategory, _>(result) == RPC {
            debug!(?result, "rpc failure, nesting under backend access error");
            AppErrors::from_results([backend_access_error(), result])
        } else {
            warn!(?result, "ignoring backend error");
            AppErrors::from(OK)
        }
    }
}

pub mod ui {
    use super::backend_access::{Backend, retrieve_remote_data};
    use super::*;

    pub const DATA_MODEL: SubCategory = SubCategory(1);

    pub fn data_retrieval_error() -> AppResult {
        AppResult::make((UI, DATA_MODEL), 1)
    }

    /// Load the data model, adding the UI's own error on failure.
    pub fn retrieve_data(backend: &impl Backend) -> AppErrors {
        let result = retrieve_remote_data(backend);
        if is_aggregate_success(&result) {
            AppErrors::new()
        } else {
            result << data_retrieval_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::backend_access::*;
    use super::*;

    #[test]
    fn test_rpc_failure_collects_three_layers() {
        let errors = ui::retrieve_data(&SimulatedBackend::new(BackendOutcome::RpcFailure));
        let collected: Vec<AppResult> = errors.iterate_errors().collect();
        assert_eq!(
            collected,
            vec![backend_access_error(), rpc_error(), ui::data_retrieval_error()]
        );
        assert!(!errors.is_success());
    }

    #[test]
    fn test_wrong_query_is_ignored() {
        let errors = ui::retrieve_data(&SimulatedBackend::new(BackendOutcome::WrongQuery));
        assert!(is_aggregate_success(&errors));
        assert_eq!(errors.error_count(), 0);
    }

    #[test]
    fn test_healthy_backend_is_success() {
        let remote = retrieve_remote_data(&SimulatedBackend::new(BackendOutcome::Healthy));
        assert!(remote.is_success());
        assert!(ui::retrieve_data(&SimulatedBackend::new(BackendOutcome::Healthy)).is_success());
    }

    #[test]
    fn test_default_backend_fails_over_rpc() {
        let errors = ui::retrieve_data(&SimulatedBackend::default());
        assert_eq!(errors.error_count(), 3);
    }

    #[test]
    fn test_result_layout() {
        assert_eq!(AppResult::CODE_WIDTH, 4);
        assert_eq!(AppErrors::CAPACITY, 4);
        assert_eq!(rpc_error().raw(), 0b10_10_0001);
        assert_eq!(backend_access_error().raw(), 0b10_11_0010);
        assert_eq!(ui::data_retrieval_error().raw(), 0b01_01_0001);
    }

    #[test]
    fn test_names_and_descriptions() {
        assert_eq!(category_name(BACKEND), "backend");
        assert_eq!(category_name(Category(3)), "unknown");
        assert_eq!(subcategory_name(BACKEND, RPC), "rpc");
        assert_eq!(subcategory_name(UI, RPC), "unknown");
        assert_eq!(describe(rpc_error()), Some("remote query failed"));
        assert_eq!(describe(OK), Some("ok"));
        assert_eq!(describe(AppResult::from_raw(0xFF)), None);
    }
}
