//! Prelude module for common re-exports.
//!
//! Declaring and using result types usually needs nothing else:
//!
//! ```rust
//! use respack::prelude::*;
//! ```

// ─── Categories ─────────────────────────────────────────────────────
pub use crate::category::{Category, CategoryValue};

// ─── Results ────────────────────────────────────────────────────────
pub use crate::result::{HasCategory, PackedResult, ResultCode, get_category, get_code, is_success};

// ─── Aggregates ─────────────────────────────────────────────────────
pub use crate::aggregate::{AggregateResult, is_aggregate_success};
pub use crate::iter::ErrorIter;
pub use crate::placement::{AppendAtFirstFree, PlacementPolicy, ReplaceTopmost};

// ─── Runtime layouts ────────────────────────────────────────────────
pub use crate::error::LayoutError;
pub use crate::layout::{DecodedResult, FieldSpan, RuntimeLayout};

// ─── Declaration macros ─────────────────────────────────────────────
pub use crate::{aggregate_result_type, result_category, result_type};
