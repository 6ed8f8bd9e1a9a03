//! Tick-based instant and duration primitives.
//!
//! An [`Instant`] is a signed count of 100 ns ticks from the Unix epoch,
//! 1970-01-01T00:00:00. It carries no calendar meaning of its own; all
//! calendar interpretation goes through the field framework.

use crate::{FieldError, FieldResult};

/// A point on the time line, measured in 100 ns ticks from the Unix
/// epoch. The full `i64` range is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(pub(crate) i64);

impl Instant {
    /// The earliest representable instant.
    pub const MIN: Self = Self(i64::MIN);

    /// The latest representable instant.
    pub const MAX: Self = Self(i64::MAX);

    /// The Unix epoch, 1970-01-01T00:00:00.
    pub const EPOCH: Self = Self(0);

    /// Creates an instant from a raw tick count.
    #[inline]
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Adds a tick duration, failing on overflow.
    #[inline]
    pub fn checked_add(self, duration: TickDuration) -> FieldResult<Self> {
        self.0
            .checked_add(duration.0)
            .map(Self)
            .ok_or(FieldError::overflow().with_message("instant exceeded the valid tick range."))
    }

    /// Returns the duration elapsed from `earlier` to this instant,
    /// failing on overflow.
    #[inline]
    pub fn duration_since(self, earlier: Self) -> FieldResult<TickDuration> {
        self.0
            .checked_sub(earlier.0)
            .map(TickDuration)
            .ok_or(FieldError::overflow().with_message("duration exceeded the valid tick range."))
    }
}

impl From<i64> for Instant {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A span of time measured in 100 ns ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickDuration(pub(crate) i64);

impl TickDuration {
    /// The zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from a raw tick count.
    #[inline]
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Adds another duration, failing on overflow.
    #[inline]
    pub fn checked_add(self, other: Self) -> FieldResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(FieldError::overflow().with_message("duration exceeded the valid tick range."))
    }

    /// Scales this duration by an integer factor, failing on overflow.
    #[inline]
    pub fn checked_mul(self, factor: i64) -> FieldResult<Self> {
        self.0
            .checked_mul(factor)
            .map(Self)
            .ok_or(FieldError::overflow().with_message("duration exceeded the valid tick range."))
    }
}

impl From<i64> for TickDuration {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
