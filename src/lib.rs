//! The `chronofields` crate is a calendar and date/time value library
//! built around a composable date-time field framework.
//!
//! ```rust
//! use chronofields::fields::DateTimeField;
//! use chronofields::iso::IsoCalendar;
//!
//! let calendar = IsoCalendar::shared();
//! let fields = calendar.fields();
//!
//! // 2025-03-03 is a Monday in March.
//! let instant = calendar.instant_at(2025, 3, 3).unwrap();
//! assert_eq!(fields.month_of_year().value(instant).unwrap(), 3);
//! assert_eq!(fields.day_of_week().value(instant).unwrap(), 1);
//!
//! // Fields write as well as read: move the instant into April.
//! let moved = fields.month_of_year().set_value(instant, 4).unwrap();
//! assert_eq!(fields.month_of_year().value(moved).unwrap(), 4);
//! ```
//!
//! An [`Instant`] is a bare signed count of 100 ns ticks from the Unix
//! epoch; every calendar interpretation of it goes through a
//! [`DateTimeField`](fields::DateTimeField), which reads and writes one
//! calendar unit (month of year, hour of day, ...) and delegates its
//! arithmetic to a [`PeriodField`](fields::PeriodField). A calendar
//! system wires one field per recognized identity into a
//! [`FieldSet`](fields::FieldSet); the [`iso`] module ships the ISO
//! calendar built that way.
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod error;
pub mod fields;
pub mod instant;
pub mod iso;

#[doc(hidden)]
pub(crate) mod rounding;
#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::{ErrorKind, FieldError};
pub use instant::{Instant, TickDuration};

pub use crate::fields::{
    DateTimeField, DateTimeFieldRef, DateTimeFieldType, FieldSet, FieldSetBuilder, PeriodField,
    PeriodFieldRef, PeriodFieldType,
};
pub use crate::iso::IsoCalendar;

/// The result type for field and calendar operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// A library specific trait for unwrapping assertions.
pub(crate) trait FieldUnwrap {
    type Output;

    /// Unwraps a value that an internal invariant guarantees is
    /// present. Panics in debug builds, errors at runtime.
    fn field_unwrap(self) -> FieldResult<Self::Output>;
}

impl<T> FieldUnwrap for Option<T> {
    type Output = T;

    fn field_unwrap(self) -> FieldResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(FieldError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! field_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::FieldError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::FieldError::assert());
        }
    };
}

// Relevant numeric constants
/// Ticks per millisecond constant: 1e+4
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
/// Ticks per second constant: 1e+7
pub const TICKS_PER_SECOND: i64 = 1_000 * TICKS_PER_MILLISECOND;
/// Ticks per minute constant: 6e+8
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
/// Ticks per hour constant: 3.6e+10
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
/// Ticks per day constant: 8.64e+11
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;
