//! Unsigned storage widths for results and aggregates.
//!
//! [`Storage`] is sealed: only the primitive unsigned integers can carry a
//! packed layout. All conversions go through a `u128` carrier, see
//! [`bits`](crate::bits).

use core::fmt::Debug;
use core::hash::Hash;

use static_assertions::const_assert;

mod private {
    pub trait Sealed {}
}

/// A primitive unsigned integer used as packed storage.
pub trait Storage: Copy + Eq + Ord + Hash + Debug + Default + private::Sealed {
    /// Width of the integer in bits.
    const BITS: u32;

    /// The all-zero pattern.
    const ZERO: Self;

    /// Zero-extend into the `u128` carrier.
    fn widen(self) -> u128;

    /// Truncate a carrier value to this width.
    fn narrow(bits: u128) -> Self;

    /// Returns true if every bit is zero.
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! impl_storage {
    ($($ty:ty),*) => {
        $(
            impl private::Sealed for $ty {}

            impl Storage for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ZERO: Self = 0;

                #[inline]
                fn widen(self) -> u128 {
                    self as u128
                }

                #[inline]
                fn narrow(bits: u128) -> Self {
                    bits as $ty
                }
            }

            const_assert!(<$ty>::BITS <= crate::bits::CARRIER_BITS);
        )*
    };
}

impl_storage!(u8, u16, u32, u64, u128);
