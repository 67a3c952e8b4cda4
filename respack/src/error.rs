//! Error type for layouts resolved at runtime.
//!
//! Static result types never produce these: their structural checks run at
//! compile time. Only [`RuntimeLayout`](crate::layout::RuntimeLayout), which
//! is built from configuration, reports them.

use thiserror::Error;

/// Rejected layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Storage width is not 8, 16, 32 or 64 bits.
    #[error("Unsupported result storage width: {0} bits")]
    UnsupportedStorage(u32),

    /// The descriptor lists no categories.
    #[error("Layout declares no categories")]
    NoCategories,

    /// More categories than the library supports.
    #[error("Too many categories: {count} (max {max})")]
    TooManyCategories { count: usize, max: usize },

    /// A category was declared with zero width.
    #[error("Category #{index} has zero width")]
    ZeroWidthCategory { index: usize },

    /// The categories do not fit into the storage.
    #[error("Categories occupy {total} bits but storage holds only {storage}")]
    CategoriesTooWide { total: u32, storage: u32 },

    /// Wrong number of category values passed to `encode`.
    #[error("Expected {expected} category values, got {found}")]
    CategoryCountMismatch { expected: usize, found: usize },

    /// Aggregate storage unsupported or too narrow for two slots.
    #[error("Aggregate of {aggregate} bits cannot hold two {storage}-bit results")]
    AggregateTooNarrow { aggregate: u32, storage: u32 },
}
