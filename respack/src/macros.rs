//! Declaration macros for categories, result types and aggregates.
//!
//! ```
//! use respack::prelude::*;
//!
//! result_category! {
//!     /// Top-level subsystem.
//!     pub struct Domain: 2;
//!     pub struct SubDomain: 2;
//! }
//! result_type!(pub TestResult: u8 => Domain, SubDomain);
//! aggregate_result_type!(pub TestAggregate: u32 => TestResult);
//! aggregate_result_type!(pub TopAggregate: u32 => TestResult, ReplaceTopmost);
//!
//! assert_eq!(Domain::WIDTH, 2);
//! assert_eq!(TestResult::CODE_WIDTH, 4);
//! assert_eq!(TestAggregate::CAPACITY, 4);
//! assert_eq!(TopAggregate::CAPACITY, 4);
//! ```

/// Declare one or more category newtypes.
///
/// Each `struct Name: WIDTH;` entry becomes `struct Name(pub u64)`
/// implementing [`Category`](crate::category::Category) with the given
/// width. The newtype is its own tag, so two categories of the same width are
/// still distinct types. A width outside `1..=64` fails to compile.
#[macro_export]
macro_rules! result_category {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident : $width:expr ;)+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
            $vis struct $name(pub u64);

            impl $name {
                /// Build from a raw value. No range check.
                #[inline]
                pub const fn new(value: u64) -> Self {
                    Self(value)
                }

                /// The raw value.
                #[inline]
                pub const fn value(self) -> u64 {
                    self.0
                }
            }

            impl $crate::category::Category for $name {
                const WIDTH: u32 = $crate::category::checked_width($width);

                #[inline]
                fn from_value(value: u64) -> Self {
                    Self(value)
                }

                #[inline]
                fn value(self) -> u64 {
                    self.0
                }
            }

            impl ::core::cmp::PartialEq<u64> for $name {
                #[inline]
                fn eq(&self, other: &u64) -> bool {
                    self.0 == *other
                }
            }
        )+
    };
}

/// Declare a result type: `result_type!(pub Name: u8 => Domain, SubDomain);`
///
/// Expands to an alias of [`ResultCode`](crate::result::ResultCode) and
/// checks the layout at the declaration site.
#[macro_export]
macro_rules! result_type {
    ($(#[$meta:meta])* $vis:vis $name:ident : $storage:ty => $($category:ty),+) => {
        $(#[$meta])*
        $vis type $name = $crate::result::ResultCode<$storage, ($($category,)+)>;

        const _: u32 = <$name>::CODE_WIDTH;
    };
}

/// Declare an aggregate type:
/// `aggregate_result_type!(pub Name: u32 => TestResult);`
///
/// An optional trailing placement policy replaces the default
/// [`AppendAtFirstFree`](crate::placement::AppendAtFirstFree):
/// `aggregate_result_type!(pub Name: u32 => TestResult, ReplaceTopmost);`
#[macro_export]
macro_rules! aggregate_result_type {
    ($(#[$meta:meta])* $vis:vis $name:ident : $storage:ty => $result:ty) => {
        $(#[$meta])*
        $vis type $name = $crate::aggregate::AggregateResult<$storage, $result>;

        const _: u32 = <$name>::CAPACITY;
    };
    ($(#[$meta:meta])* $vis:vis $name:ident : $storage:ty => $result:ty, $policy:ty) => {
        $(#[$meta])*
        $vis type $name = $crate::aggregate::AggregateResult<$storage, $result, $policy>;

        const _: u32 = <$name>::CAPACITY;
    };
}
