//! The date-time field base: calendar-relative values over instants.

use core::fmt;
use core::num::NonZeroI64;

use crate::rounding::{round_ticks, RoundingMode};
use crate::{FieldError, FieldResult, Instant, TickDuration};

use super::{DateTimeFieldType, PeriodFieldRef};

/// Interprets an instant as a calendar-relative integer value.
///
/// Arithmetic defaults delegate to the field's [period
/// field](Self::period_field); rounding partitions the tick axis into
/// unit buckets such that `round_floor(x) + remainder(x) == x`.
pub trait DateTimeField: fmt::Debug + Send + Sync {
    /// Returns the identity of this field.
    fn field_type(&self) -> DateTimeFieldType;

    /// Whether this field supports value-producing operations.
    fn is_supported(&self) -> bool {
        true
    }

    /// Whether this field accepts out-of-range values on write and
    /// wraps them instead of failing.
    fn is_lenient(&self) -> bool {
        false
    }

    /// The unit field backing this field's arithmetic.
    fn period_field(&self) -> PeriodFieldRef;

    /// The next-larger unit this field wraps within, if any.
    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        None
    }

    /// Returns the field value at an instant, narrowed to 32 bits.
    fn value(&self, instant: Instant) -> FieldResult<i32> {
        let value = self.value_i64(instant)?;
        i32::try_from(value)
            .map_err(|_| FieldError::overflow().with_message("field value exceeded the 32-bit range."))
    }

    /// Returns the field value at an instant.
    fn value_i64(&self, instant: Instant) -> FieldResult<i64>;

    /// Returns a new instant with this field set to `value`.
    ///
    /// Fails with a range error when `value` is outside
    /// [`minimum_value_at`](Self::minimum_value_at) ..=
    /// [`maximum_value_at`](Self::maximum_value_at). Smaller units that
    /// become invalid under the new value are clamped into validity.
    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant>;

    /// Adds the given number of this field's units to an instant.
    fn add(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        self.period_field().add(instant, value)
    }

    /// Returns the number of this field's units between two instants,
    /// narrowed to 32 bits.
    fn difference(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i32> {
        self.period_field().difference(minuend, subtrahend)
    }

    /// Returns the number of this field's units between two instants.
    fn difference_i64(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
        self.period_field().difference_i64(minuend, subtrahend)
    }

    /// The smallest legal value for this field.
    fn minimum_value(&self) -> FieldResult<i64>;

    /// The smallest legal value for this field at the given instant.
    fn minimum_value_at(&self, _instant: Instant) -> FieldResult<i64> {
        self.minimum_value()
    }

    /// The largest legal value for this field.
    fn maximum_value(&self) -> FieldResult<i64>;

    /// The largest legal value for this field at the given instant.
    fn maximum_value_at(&self, _instant: Instant) -> FieldResult<i64> {
        self.maximum_value()
    }

    /// Returns the latest unit boundary at or before the instant.
    fn round_floor(&self, instant: Instant) -> FieldResult<Instant>;

    /// Returns the earliest unit boundary at or after the instant.
    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        self.add(floor, 1)
    }

    /// Rounds to the nearest unit boundary; ties resolve downward.
    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        let ceiling = self.round_ceiling(instant)?;
        match distance_cmp(instant, floor, ceiling) {
            core::cmp::Ordering::Greater => Ok(ceiling),
            _ => Ok(floor),
        }
    }

    /// Rounds to the nearest unit boundary; ties resolve upward.
    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        let ceiling = self.round_ceiling(instant)?;
        match distance_cmp(instant, floor, ceiling) {
            core::cmp::Ordering::Less => Ok(floor),
            _ => Ok(ceiling),
        }
    }

    /// Rounds to the nearest unit boundary; ties resolve to the
    /// boundary with an even unit count from the epoch.
    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant>;

    /// Returns `instant - round_floor(instant)`, always non-negative.
    fn remainder(&self, instant: Instant) -> FieldResult<TickDuration> {
        let floor = self.round_floor(instant)?;
        instant.duration_since(floor)
    }

    /// Whether the unit containing the instant carries a leap
    /// adjustment (for example, February of a leap year).
    fn is_leap(&self, _instant: Instant) -> FieldResult<bool> {
        Ok(false)
    }

    /// The size of the leap adjustment at the instant, usually 0 or 1.
    fn leap_amount(&self, _instant: Instant) -> FieldResult<i64> {
        Ok(0)
    }

    /// The unit in which leap adjustments are measured, if any.
    fn leap_period_field(&self) -> Option<PeriodFieldRef> {
        None
    }
}

/// Compares an instant's distance to its floor against its distance to
/// its ceiling.
fn distance_cmp(instant: Instant, floor: Instant, ceiling: Instant) -> core::cmp::Ordering {
    let down = i128::from(instant.ticks()) - i128::from(floor.ticks());
    let up = i128::from(ceiling.ticks()) - i128::from(instant.ticks());
    down.cmp(&up)
}

/// A fixed-length date-time field that computes values by pure division
/// against its unit's tick span.
#[derive(Debug, Clone)]
pub struct PreciseDateTimeField {
    field_type: DateTimeFieldType,
    unit: PeriodFieldRef,
    range: Option<PeriodFieldRef>,
    unit_ticks: NonZeroI64,
    range_units: Option<i64>,
}

impl PreciseDateTimeField {
    /// Creates a precise field over a fixed-length unit field,
    /// optionally wrapping within a fixed-length range field.
    pub fn new(
        field_type: DateTimeFieldType,
        unit: PeriodFieldRef,
        range: Option<PeriodFieldRef>,
    ) -> FieldResult<Self> {
        if !unit.is_supported() || !unit.is_fixed_length() {
            return Err(FieldError::argument()
                .with_message("a precise field requires a supported fixed-length unit field."));
        }
        let unit_ticks = NonZeroI64::new(unit.unit_ticks())
            .filter(|t| t.get() >= 1)
            .ok_or(FieldError::argument()
                .with_message("a precise field requires at least one tick per unit."))?;
        let range_units = match &range {
            Some(range_field) => {
                if !range_field.is_supported() || !range_field.is_fixed_length() {
                    return Err(FieldError::argument()
                        .with_message("a precise field requires a fixed-length range field."));
                }
                let units = range_field.unit_ticks() / unit_ticks.get();
                if units < 2 {
                    return Err(FieldError::argument()
                        .with_message("the range field must span more than one unit."));
                }
                Some(units)
            }
            None => None,
        };
        Ok(Self {
            field_type,
            unit,
            range,
            unit_ticks,
            range_units,
        })
    }

    fn round(&self, instant: Instant, mode: RoundingMode) -> FieldResult<Instant> {
        round_ticks(instant.ticks(), self.unit_ticks, mode).map(Instant::from_ticks)
    }
}

impl DateTimeField for PreciseDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.unit.clone()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        self.range.clone()
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let units = instant.ticks().div_euclid(self.unit_ticks.get());
        match self.range_units {
            Some(range) => Ok(units.rem_euclid(range)),
            None => Ok(units),
        }
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if value < self.minimum_value()? || value > self.maximum_value()? {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let delta = value - self.value_i64(instant)?;
        let ticks = delta
            .checked_mul(self.unit_ticks.get())
            .ok_or(FieldError::overflow().with_message("instant exceeded the valid tick range."))?;
        instant.checked_add(TickDuration::from_ticks(ticks))
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        match self.range_units {
            Some(_) => Ok(0),
            None => Ok(i64::MIN / self.unit_ticks.get()),
        }
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        match self.range_units {
            Some(range) => Ok(range - 1),
            None => Ok(i64::MAX / self.unit_ticks.get()),
        }
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.round(instant, RoundingMode::Floor)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.round(instant, RoundingMode::Ceiling)
    }

    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.round(instant, RoundingMode::HalfFloor)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.round(instant, RoundingMode::HalfCeiling)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        self.round(instant, RoundingMode::HalfEven)
    }

    fn remainder(&self, instant: Instant) -> FieldResult<TickDuration> {
        Ok(TickDuration::from_ticks(
            instant.ticks().rem_euclid(self.unit_ticks.get()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::fields::{FixedPeriodField, PeriodFieldRef, PeriodFieldType};
    use crate::{ErrorKind, Instant, TICKS_PER_DAY, TICKS_PER_HOUR};

    use super::{DateTimeField, DateTimeFieldType, PreciseDateTimeField};

    fn hour_of_day() -> PreciseDateTimeField {
        let hours: PeriodFieldRef = Arc::new(
            FixedPeriodField::new(PeriodFieldType::Hours, TICKS_PER_HOUR).unwrap(),
        );
        let days: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Days, TICKS_PER_DAY).unwrap());
        PreciseDateTimeField::new(DateTimeFieldType::HourOfDay, hours, Some(days)).unwrap()
    }

    #[test]
    fn construction_validates_unit_and_range() {
        let hours: PeriodFieldRef = Arc::new(
            FixedPeriodField::new(PeriodFieldType::Hours, TICKS_PER_HOUR).unwrap(),
        );
        // A range spanning exactly one unit is degenerate.
        let same: PeriodFieldRef = Arc::new(
            FixedPeriodField::new(PeriodFieldType::Hours, TICKS_PER_HOUR).unwrap(),
        );
        let err = PreciseDateTimeField::new(DateTimeFieldType::HourOfDay, hours, Some(same))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn value_wraps_within_range() {
        let field = hour_of_day();
        assert_eq!(field.value_i64(Instant::EPOCH).unwrap(), 0);
        let five = Instant::from_ticks(5 * TICKS_PER_HOUR + 42);
        assert_eq!(field.value_i64(five).unwrap(), 5);
        // An instant before the epoch still yields an in-range value.
        let before = Instant::from_ticks(-TICKS_PER_HOUR);
        assert_eq!(field.value_i64(before).unwrap(), 23);
        assert_eq!(field.minimum_value().unwrap(), 0);
        assert_eq!(field.maximum_value().unwrap(), 23);
    }

    #[test]
    fn set_value_round_trips_and_preserves_remainder() {
        let field = hour_of_day();
        let instant = Instant::from_ticks(5 * TICKS_PER_HOUR + 42);
        let set = field.set_value(instant, 23).unwrap();
        assert_eq!(field.value_i64(set).unwrap(), 23);
        // Ticks below the unit survive the write.
        assert_eq!(set.ticks() % TICKS_PER_HOUR, 42);
        // Setting the current value is the identity.
        assert_eq!(field.set_value(instant, 5).unwrap(), instant);
        assert_eq!(
            field.set_value(instant, 24).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn floor_remainder_consistency() {
        let field = hour_of_day();
        for ticks in [0, 1, 42, TICKS_PER_HOUR, -1, -TICKS_PER_HOUR - 1, -42] {
            let instant = Instant::from_ticks(ticks);
            let floor = field.round_floor(instant).unwrap();
            let remainder = field.remainder(instant).unwrap();
            assert!(remainder.ticks() >= 0);
            assert_eq!(floor.ticks() + remainder.ticks(), ticks, "at {ticks}");
        }
    }

    #[test]
    fn rounding_modes_agree_with_unit_buckets() {
        let minutes: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Minutes, 60).unwrap());
        let hours: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Hours, 3600).unwrap());
        let field =
            PreciseDateTimeField::new(DateTimeFieldType::MinuteOfHour, minutes, Some(hours))
                .unwrap();

        let halfway = Instant::from_ticks(90);
        assert_eq!(field.round_floor(halfway).unwrap().ticks(), 60);
        assert_eq!(field.round_ceiling(halfway).unwrap().ticks(), 120);
        assert_eq!(field.round_half_floor(halfway).unwrap().ticks(), 60);
        assert_eq!(field.round_half_ceiling(halfway).unwrap().ticks(), 120);
        // 120 is the even multiple of 60.
        assert_eq!(field.round_half_even(halfway).unwrap().ticks(), 120);
        assert_eq!(field.round_half_even(Instant::from_ticks(30)).unwrap().ticks(), 0);
    }
}
