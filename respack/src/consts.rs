//! Library-wide limits.
//!
//! Single source of truth for the layout bounds checked by the static
//! result types and by [`RuntimeLayout`](crate::layout::RuntimeLayout).

/// Maximum number of categories in one result layout.
///
/// Matches the largest tuple arity `CategoryList` is implemented for.
pub const MAX_CATEGORIES: usize = 8;

/// Widest storage a single result code may use.
///
/// Results must leave room for at least two slots inside the widest
/// aggregate storage (`u128`).
pub const MAX_RESULT_BITS: u32 = 64;

/// Widest storage an aggregate may use.
pub const MAX_AGGREGATE_BITS: u32 = 128;

/// Widest category field.
pub const MAX_CATEGORY_BITS: u32 = 64;

/// Minimum number of slots an aggregate must provide.
pub const MIN_AGGREGATE_CAPACITY: u32 = 2;

/// Largest slot count any aggregate can have (`u128` of `u8` results).
pub const MAX_AGGREGATE_SLOTS: usize = (MAX_AGGREGATE_BITS / 8) as usize;
