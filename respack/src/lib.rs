//! Respack: hierarchical result codes packed into plain unsigned integers.
//!
//! A result code is a single integer whose high bits hold an ordered list of
//! categories (subsystem, component, ...) and whose remaining low bits hold a
//! residual code. Zero means success. Several results can be packed side by
//! side into a wider integer, an *aggregate*, so an error can travel up
//! through the layers of an application collecting context on the way
//! without allocating.
//!
//! # Module Structure
//!
//! - [`bits`] - Mask and field arithmetic
//! - [`storage`] - The unsigned integers usable as storage
//! - [`category`] - Category values and the `Category` trait
//! - [`layout`] - Static category lists and the runtime layout descriptor
//! - [`result`] - `ResultCode` and its accessors
//! - [`aggregate`] - `AggregateResult`, several results in one integer
//! - [`placement`] - What an append does when slots run out
//! - [`iter`] - Iteration over the stored results
//! - [`error`] - Runtime layout errors
//! - [`consts`] - Limits
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use respack::prelude::*;
//!
//! result_category! {
//!     pub struct Layer: 2;
//!     pub struct Module: 2;
//! }
//! result_type!(pub AppResult: u8 => Layer, Module);
//! aggregate_result_type!(pub AppErrors: u32 => AppResult);
//!
//! let rpc_failed = AppResult::make((Layer(2), Module(2)), 1);
//! let access_failed = AppResult::make((Layer(2), Module(3)), 2);
//!
//! let errors = AppErrors::from(access_failed) << rpc_failed;
//! for error in &errors {
//!     assert_eq!(get_category::<Layer, _>(error), 2);
//! }
//! assert_eq!(errors.error_count(), 2);
//! ```

#[macro_use]
mod macros;

pub mod aggregate;
pub mod bits;
pub mod category;
pub mod consts;
pub mod error;
pub mod iter;
pub mod layout;
pub mod placement;
pub mod prelude;
pub mod result;
pub mod storage;

pub use aggregate::{AggregateResult, is_aggregate_success};
pub use category::{Category, CategoryValue};
pub use error::LayoutError;
pub use layout::RuntimeLayout;
pub use placement::{AppendAtFirstFree, ReplaceTopmost};
pub use result::{ResultCode, get_category, get_code, is_success};
