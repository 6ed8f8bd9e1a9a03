//! The period field base: units of elapsed time.

use core::fmt;

use crate::{FieldError, FieldResult, Instant, TickDuration};

use super::PeriodFieldType;

/// A unit of elapsed time, convertible to and from ticks.
///
/// Fixed-length fields convert by pure integer arithmetic independent
/// of position on the time line. Variable-length fields (months, years)
/// depend on the starting instant and refuse positionless conversions.
pub trait PeriodField: fmt::Debug + Send + Sync {
    /// Returns the unit identity of this field.
    fn field_type(&self) -> PeriodFieldType;

    /// Whether this field supports value-producing operations.
    fn is_supported(&self) -> bool {
        true
    }

    /// Whether one unit of this field always spans the same number of
    /// ticks.
    fn is_fixed_length(&self) -> bool;

    /// The tick span of one unit, or 0 for a variable-length field.
    fn unit_ticks(&self) -> i64;

    /// Returns the number of whole units in a duration, narrowed to 32
    /// bits.
    fn value(&self, duration: TickDuration) -> FieldResult<i32> {
        let value = self.value_i64(duration)?;
        i32::try_from(value)
            .map_err(|_| FieldError::overflow().with_message("unit count exceeded the 32-bit range."))
    }

    /// Returns the number of whole units in a duration, truncating
    /// toward zero.
    fn value_i64(&self, duration: TickDuration) -> FieldResult<i64>;

    /// Returns the duration spanned by the given number of units.
    fn duration_of(&self, value: i64) -> FieldResult<TickDuration>;

    /// Adds the given number of units to an instant.
    fn add(&self, instant: Instant, value: i64) -> FieldResult<Instant>;

    /// Returns the number of whole units between two instants, narrowed
    /// to 32 bits.
    fn difference(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i32> {
        let value = self.difference_i64(minuend, subtrahend)?;
        i32::try_from(value)
            .map_err(|_| FieldError::overflow().with_message("unit count exceeded the 32-bit range."))
    }

    /// Returns the number of whole units between two instants, such
    /// that adding the result to `subtrahend` never overshoots
    /// `minuend`.
    fn difference_i64(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i64>;
}

/// A fixed-length period field backed by a constant tick span per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPeriodField {
    field_type: PeriodFieldType,
    unit_ticks: i64,
}

impl FixedPeriodField {
    /// Creates a fixed-length field spanning `unit_ticks` per unit.
    pub fn new(field_type: PeriodFieldType, unit_ticks: i64) -> FieldResult<Self> {
        if unit_ticks < 1 {
            return Err(FieldError::argument()
                .with_message("a fixed-length field requires at least one tick per unit."));
        }
        Ok(Self {
            field_type,
            unit_ticks,
        })
    }
}

impl PeriodField for FixedPeriodField {
    fn field_type(&self) -> PeriodFieldType {
        self.field_type
    }

    fn is_fixed_length(&self) -> bool {
        true
    }

    fn unit_ticks(&self) -> i64 {
        self.unit_ticks
    }

    fn value_i64(&self, duration: TickDuration) -> FieldResult<i64> {
        Ok(duration.ticks() / self.unit_ticks)
    }

    fn duration_of(&self, value: i64) -> FieldResult<TickDuration> {
        value
            .checked_mul(self.unit_ticks)
            .map(TickDuration::from_ticks)
            .ok_or(FieldError::overflow().with_message("duration exceeded the valid tick range."))
    }

    fn add(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        let ticks = value
            .checked_mul(self.unit_ticks)
            .ok_or(FieldError::overflow().with_message("duration exceeded the valid tick range."))?;
        instant.checked_add(TickDuration::from_ticks(ticks))
    }

    fn difference_i64(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
        // The subtraction is widened so opposite-sign extremes cannot
        // overflow before the division.
        let diff = i128::from(minuend.ticks()) - i128::from(subtrahend.ticks());
        i64::try_from(diff / i128::from(self.unit_ticks))
            .map_err(|_| FieldError::overflow().with_message("unit count exceeded the valid range."))
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, Instant, TickDuration, TICKS_PER_MINUTE, TICKS_PER_SECOND};

    use super::{FixedPeriodField, PeriodField, PeriodFieldType};

    #[test]
    fn construction_rejects_degenerate_units() {
        assert!(FixedPeriodField::new(PeriodFieldType::Seconds, 0).is_err());
        assert!(FixedPeriodField::new(PeriodFieldType::Seconds, -5).is_err());
        assert!(FixedPeriodField::new(PeriodFieldType::Seconds, 1).is_ok());
    }

    #[test]
    fn value_truncates_toward_zero() {
        let seconds = FixedPeriodField::new(PeriodFieldType::Seconds, TICKS_PER_SECOND).unwrap();
        let forward = TickDuration::from_ticks(TICKS_PER_SECOND + 1);
        let backward = TickDuration::from_ticks(-TICKS_PER_SECOND - 1);
        assert_eq!(seconds.value_i64(forward).unwrap(), 1);
        assert_eq!(seconds.value_i64(backward).unwrap(), -1);
    }

    #[test]
    fn value_narrowing_checks_32_bit_range() {
        let ticks = FixedPeriodField::new(PeriodFieldType::Ticks, 1).unwrap();
        let wide = TickDuration::from_ticks(i64::from(i32::MAX) + 1);
        let err = ticks.value(wide).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert_eq!(ticks.value_i64(wide).unwrap(), i64::from(i32::MAX) + 1);
    }

    #[test]
    fn duration_of_checks_overflow() {
        let minutes = FixedPeriodField::new(PeriodFieldType::Minutes, TICKS_PER_MINUTE).unwrap();
        assert_eq!(
            minutes.duration_of(2).unwrap(),
            TickDuration::from_ticks(2 * TICKS_PER_MINUTE)
        );
        assert!(minutes.duration_of(i64::MAX / 2).is_err());
    }

    #[test]
    fn add_minimum_value_does_not_trap() {
        // Adding i64::MIN ticks at unit size 1 must land exactly on the
        // minimum instant rather than overflowing in a negation.
        let ticks = FixedPeriodField::new(PeriodFieldType::Ticks, 1).unwrap();
        let result = ticks.add(Instant::EPOCH, i64::MIN).unwrap();
        assert_eq!(result, Instant::MIN);
        assert!(ticks.add(Instant::from_ticks(-1), i64::MIN).is_err());
    }

    #[test]
    fn difference_is_floor_consistent_with_add() {
        let seconds = FixedPeriodField::new(PeriodFieldType::Seconds, TICKS_PER_SECOND).unwrap();
        let a = Instant::from_ticks(5 * TICKS_PER_SECOND + 123);
        let b = Instant::from_ticks(0);
        let diff = seconds.difference_i64(a, b).unwrap();
        assert_eq!(diff, 5);
        assert!(seconds.add(b, diff).unwrap() <= a);

        let diff = seconds.difference_i64(b, a).unwrap();
        assert_eq!(diff, -5);
        assert!(seconds.add(a, diff).unwrap() >= b);

        // A full-range tick difference exceeds i64 and must error.
        let ticks = FixedPeriodField::new(PeriodFieldType::Ticks, 1).unwrap();
        assert!(ticks.difference_i64(Instant::MAX, Instant::MIN).is_err());
        assert!(ticks.difference(Instant::MAX, Instant::EPOCH).is_err());
    }
}
