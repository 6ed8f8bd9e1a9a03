//! Decorator fields layering cross-cutting policies over inner fields.
//!
//! Each decorator forwards unmodified operations to its inner field and
//! overrides only the operations its policy touches.

use crate::{FieldError, FieldResult, Instant, TickDuration};

use super::{DateTimeField, DateTimeFieldRef, DateTimeFieldType, PeriodField, PeriodFieldRef,
    PeriodFieldType};

/// Adds a constant bias to an inner field's value on read and removes
/// it on write, shifting the legal range by the same amount.
#[derive(Debug, Clone)]
pub struct OffsetDateTimeField {
    inner: DateTimeFieldRef,
    field_type: DateTimeFieldType,
    bias: i64,
}

impl OffsetDateTimeField {
    /// Creates an offset field keeping the inner field's identity.
    pub fn new(inner: DateTimeFieldRef, bias: i64) -> FieldResult<Self> {
        let field_type = inner.field_type();
        Self::with_type(inner, field_type, bias)
    }

    /// Creates an offset field under the given identity.
    pub fn with_type(
        inner: DateTimeFieldRef,
        field_type: DateTimeFieldType,
        bias: i64,
    ) -> FieldResult<Self> {
        if !inner.is_supported() {
            return Err(FieldError::argument()
                .with_message("an offset field requires a supported inner field."));
        }
        if bias == 0 {
            return Err(FieldError::argument().with_message("the bias must be non-zero."));
        }
        Ok(Self {
            inner,
            field_type,
            bias,
        })
    }

    fn biased(&self, value: i64) -> FieldResult<i64> {
        value
            .checked_add(self.bias)
            .ok_or(FieldError::overflow().with_message("field value exceeded the valid range."))
    }
}

impl DateTimeField for OffsetDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn is_lenient(&self) -> bool {
        self.inner.is_lenient()
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.inner.period_field()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        self.inner.range_period_field()
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        self.biased(self.inner.value_i64(instant)?)
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if value < self.minimum_value_at(instant)? || value > self.maximum_value_at(instant)? {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        self.inner.set_value(instant, value - self.bias)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        self.biased(self.inner.minimum_value()?)
    }

    fn minimum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        self.biased(self.inner.minimum_value_at(instant)?)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        self.biased(self.inner.maximum_value()?)
    }

    fn maximum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        self.biased(self.inner.maximum_value_at(instant)?)
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_floor(instant)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_ceiling(instant)
    }

    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_floor(instant)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_ceiling(instant)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_even(instant)
    }

    fn remainder(&self, instant: Instant) -> FieldResult<TickDuration> {
        self.inner.remainder(instant)
    }

    fn is_leap(&self, instant: Instant) -> FieldResult<bool> {
        self.inner.is_leap(instant)
    }

    fn leap_amount(&self, instant: Instant) -> FieldResult<i64> {
        self.inner.leap_amount(instant)
    }

    fn leap_period_field(&self) -> Option<PeriodFieldRef> {
        self.inner.leap_period_field()
    }
}

/// Maps an inner field's zero to its maximum plus one, for display
/// conventions such as the 24-hour clock where midnight reads as 24.
#[derive(Debug, Clone)]
pub struct ZeroIsMaxDateTimeField {
    inner: DateTimeFieldRef,
    field_type: DateTimeFieldType,
}

impl ZeroIsMaxDateTimeField {
    pub fn new(inner: DateTimeFieldRef, field_type: DateTimeFieldType) -> FieldResult<Self> {
        if !inner.is_supported() {
            return Err(FieldError::argument()
                .with_message("a zero-is-max field requires a supported inner field."));
        }
        if inner.minimum_value()? != 0 {
            return Err(FieldError::argument()
                .with_message("a zero-is-max field requires an inner minimum of zero."));
        }
        Ok(Self { inner, field_type })
    }
}

impl DateTimeField for ZeroIsMaxDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn is_lenient(&self) -> bool {
        self.inner.is_lenient()
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.inner.period_field()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        self.inner.range_period_field()
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let value = self.inner.value_i64(instant)?;
        if value == 0 {
            return self.maximum_value_at(instant);
        }
        Ok(value)
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        let maximum = self.maximum_value_at(instant)?;
        if value < 1 || value > maximum {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let target = if value == maximum { 0 } else { value };
        self.inner.set_value(instant, target)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(1)
    }

    fn minimum_value_at(&self, _instant: Instant) -> FieldResult<i64> {
        Ok(1)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        self.inner
            .maximum_value()?
            .checked_add(1)
            .ok_or(FieldError::overflow().with_message("field value exceeded the valid range."))
    }

    fn maximum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        self.inner
            .maximum_value_at(instant)?
            .checked_add(1)
            .ok_or(FieldError::overflow().with_message("field value exceeded the valid range."))
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_floor(instant)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_ceiling(instant)
    }

    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_floor(instant)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_ceiling(instant)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_even(instant)
    }

    fn remainder(&self, instant: Instant) -> FieldResult<TickDuration> {
        self.inner.remainder(instant)
    }
}

/// Skips an inner field's zero: values at or below zero read shifted
/// down by one, for calendars whose year sequence jumps from -1 to 1.
#[derive(Debug, Clone)]
pub struct SkipZeroDateTimeField {
    inner: DateTimeFieldRef,
}

impl SkipZeroDateTimeField {
    pub fn new(inner: DateTimeFieldRef) -> FieldResult<Self> {
        if !inner.is_supported() {
            return Err(FieldError::argument()
                .with_message("a skip-zero field requires a supported inner field."));
        }
        Ok(Self { inner })
    }

    fn skip_down(value: i64) -> FieldResult<i64> {
        if value <= 0 {
            return value.checked_sub(1).ok_or(
                FieldError::overflow().with_message("field value exceeded the valid range."),
            );
        }
        Ok(value)
    }
}

impl DateTimeField for SkipZeroDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.inner.field_type()
    }

    fn is_lenient(&self) -> bool {
        self.inner.is_lenient()
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.inner.period_field()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        self.inner.range_period_field()
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        Self::skip_down(self.inner.value_i64(instant)?)
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if value == 0 {
            return Err(FieldError::argument().with_message("this field has no zero value."));
        }
        let target = if value < 0 { value + 1 } else { value };
        self.inner.set_value(instant, target)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Self::skip_down(self.inner.minimum_value()?)
    }

    fn minimum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        Self::skip_down(self.inner.minimum_value_at(instant)?)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Self::skip_down(self.inner.maximum_value()?)
    }

    fn maximum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        Self::skip_down(self.inner.maximum_value_at(instant)?)
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_floor(instant)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_ceiling(instant)
    }

    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_floor(instant)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_ceiling(instant)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        self.inner.round_half_even(instant)
    }

    fn remainder(&self, instant: Instant) -> FieldResult<TickDuration> {
        self.inner.remainder(instant)
    }

    fn is_leap(&self, instant: Instant) -> FieldResult<bool> {
        self.inner.is_leap(instant)
    }

    fn leap_amount(&self, instant: Instant) -> FieldResult<i64> {
        self.inner.leap_amount(instant)
    }

    fn leap_period_field(&self) -> Option<PeriodFieldRef> {
        self.inner.leap_period_field()
    }
}

/// Scales a fixed-length period field's unit by an integer factor
/// greater than one, for units built from smaller ones such as weeks
/// from days.
#[derive(Debug, Clone)]
pub struct ScaledPeriodField {
    inner: PeriodFieldRef,
    field_type: PeriodFieldType,
    scale: i64,
    unit_ticks: i64,
}

impl ScaledPeriodField {
    pub fn new(
        inner: PeriodFieldRef,
        field_type: PeriodFieldType,
        scale: i64,
    ) -> FieldResult<Self> {
        if !inner.is_supported() || !inner.is_fixed_length() {
            return Err(FieldError::argument()
                .with_message("a scaled field requires a supported fixed-length inner field."));
        }
        if scale < 2 {
            return Err(FieldError::argument()
                .with_message("the scale factor must be greater than one."));
        }
        let unit_ticks = inner
            .unit_ticks()
            .checked_mul(scale)
            .ok_or(FieldError::overflow().with_message("unit span exceeded the valid tick range."))?;
        Ok(Self {
            inner,
            field_type,
            scale,
            unit_ticks,
        })
    }

    fn scaled(&self, value: i64) -> FieldResult<i64> {
        value
            .checked_mul(self.scale)
            .ok_or(FieldError::overflow().with_message("unit count exceeded the valid range."))
    }
}

impl PeriodField for ScaledPeriodField {
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
        self.inner.duration_of(self.scaled(value)?)
    }

    fn add(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        self.inner.add(instant, self.scaled(value)?)
    }

    fn difference_i64(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
        Ok(self.inner.difference_i64(minuend, subtrahend)? / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::fields::{
        DateTimeField, DateTimeFieldRef, DateTimeFieldType, FixedPeriodField, PeriodField,
        PeriodFieldRef, PeriodFieldType, PreciseDateTimeField,
    };
    use crate::{ErrorKind, Instant, TICKS_PER_DAY, TICKS_PER_HOUR};

    use super::{
        OffsetDateTimeField, ScaledPeriodField, SkipZeroDateTimeField, ZeroIsMaxDateTimeField,
    };

    fn hour_of_day() -> DateTimeFieldRef {
        let hours: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Hours, TICKS_PER_HOUR).unwrap());
        let days: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Days, TICKS_PER_DAY).unwrap());
        Arc::new(
            PreciseDateTimeField::new(DateTimeFieldType::HourOfDay, hours, Some(days)).unwrap(),
        )
    }

    #[test]
    fn offset_field_biases_reads_writes_and_bounds() {
        let field = OffsetDateTimeField::new(hour_of_day(), 3).unwrap();
        let instant = Instant::from_ticks(5 * TICKS_PER_HOUR);
        assert_eq!(field.value_i64(instant).unwrap(), 8);
        assert_eq!(field.minimum_value().unwrap(), 3);
        assert_eq!(field.maximum_value().unwrap(), 26);

        let set = field.set_value(instant, 10).unwrap();
        assert_eq!(field.value_i64(set).unwrap(), 10);
        assert_eq!(set.ticks(), 7 * TICKS_PER_HOUR);
        assert_eq!(
            field.set_value(instant, 2).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn offset_field_rejects_zero_bias() {
        let err = OffsetDateTimeField::new(hour_of_day(), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn offset_field_rejects_unsupported_inner() {
        let inner = crate::fields::unsupported_date_time_field(DateTimeFieldType::HourOfDay);
        let err = OffsetDateTimeField::new(inner, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn zero_is_max_reads_midnight_as_twenty_four() {
        let field =
            ZeroIsMaxDateTimeField::new(hour_of_day(), DateTimeFieldType::ClockHourOfDay).unwrap();
        assert_eq!(field.value_i64(Instant::EPOCH).unwrap(), 24);
        let five = Instant::from_ticks(5 * TICKS_PER_HOUR);
        assert_eq!(field.value_i64(five).unwrap(), 5);
        assert_eq!(field.minimum_value().unwrap(), 1);
        assert_eq!(field.maximum_value().unwrap(), 24);

        // Setting 24 routes to the wrapped zero.
        let set = field.set_value(five, 24).unwrap();
        assert_eq!(hour_of_day().value_i64(set).unwrap(), 0);
        assert_eq!(
            field.set_value(five, 0).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn skip_zero_shifts_nonpositive_values() {
        // A rangeless unit counter takes negative values before the
        // epoch, which is what the skip policy operates on.
        let minutes: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Minutes, 60).unwrap());
        let counter: DateTimeFieldRef = Arc::new(
            PreciseDateTimeField::new(DateTimeFieldType::MinuteOfHour, minutes, None).unwrap(),
        );
        let field = SkipZeroDateTimeField::new(counter.clone()).unwrap();

        assert_eq!(field.value_i64(Instant::EPOCH).unwrap(), -1);
        assert_eq!(field.value_i64(Instant::from_ticks(60)).unwrap(), 1);
        assert_eq!(field.value_i64(Instant::from_ticks(-60)).unwrap(), -2);

        let err = field.set_value(Instant::EPOCH, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        // Writing -1 targets the wrapped zero.
        let set = field.set_value(Instant::from_ticks(120), -1).unwrap();
        assert_eq!(counter.value_i64(set).unwrap(), 0);
        let set = field.set_value(Instant::EPOCH, 2).unwrap();
        assert_eq!(counter.value_i64(set).unwrap(), 2);
    }

    #[test]
    fn scaled_field_multiplies_the_unit() {
        let days: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Days, TICKS_PER_DAY).unwrap());
        let weeks = ScaledPeriodField::new(days.clone(), PeriodFieldType::Weeks, 7).unwrap();
        assert_eq!(weeks.unit_ticks(), 7 * TICKS_PER_DAY);
        assert!(weeks.is_fixed_length());

        let start = Instant::EPOCH;
        let moved = weeks.add(start, 2).unwrap();
        assert_eq!(moved.ticks(), 14 * TICKS_PER_DAY);
        assert_eq!(weeks.difference_i64(moved, start).unwrap(), 2);
        assert_eq!(
            weeks
                .value_i64(crate::TickDuration::from_ticks(13 * TICKS_PER_DAY))
                .unwrap(),
            1
        );

        assert_eq!(
            ScaledPeriodField::new(days.clone(), PeriodFieldType::Weeks, 1)
                .unwrap_err()
                .kind(),
            ErrorKind::Type
        );
        assert_eq!(
            ScaledPeriodField::new(days, PeriodFieldType::Weeks, 0)
                .unwrap_err()
                .kind(),
            ErrorKind::Type
        );
    }
}
