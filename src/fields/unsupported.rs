//! Cached sentinel fields for identities a calendar does not provide.
//!
//! One sentinel exists per field identity. The factories hand out the
//! same shared instance on every call, so callers may compare handles
//! by pointer identity.

use std::sync::{Arc, LazyLock};

use crate::{FieldError, FieldResult, Instant, TickDuration};

use super::{
    DateTimeField, DateTimeFieldRef, DateTimeFieldType, PeriodField, PeriodFieldRef,
    PeriodFieldType,
};

const fn unsupported_error() -> FieldError {
    FieldError::unsupported().with_message("the field is unsupported.")
}

/// A period field that refuses every value-producing operation.
#[derive(Debug)]
pub struct UnsupportedPeriodField {
    field_type: PeriodFieldType,
}

impl PeriodField for UnsupportedPeriodField {
    fn field_type(&self) -> PeriodFieldType {
        self.field_type
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn is_fixed_length(&self) -> bool {
        // Trivially fixed: there is no variability to report.
        true
    }

    fn unit_ticks(&self) -> i64 {
        0
    }

    fn value_i64(&self, _duration: TickDuration) -> FieldResult<i64> {
        Err(unsupported_error())
    }

    fn duration_of(&self, _value: i64) -> FieldResult<TickDuration> {
        Err(unsupported_error())
    }

    fn add(&self, _instant: Instant, _value: i64) -> FieldResult<Instant> {
        Err(unsupported_error())
    }

    fn difference_i64(&self, _minuend: Instant, _subtrahend: Instant) -> FieldResult<i64> {
        Err(unsupported_error())
    }
}

/// Returns the shared unsupported period field for an identity.
pub fn unsupported_period_field(field_type: PeriodFieldType) -> PeriodFieldRef {
    static CACHE: LazyLock<[PeriodFieldRef; PeriodFieldType::COUNT]> = LazyLock::new(|| {
        PeriodFieldType::VALUES
            .map(|field_type| Arc::new(UnsupportedPeriodField { field_type }) as PeriodFieldRef)
    });
    CACHE[field_type as usize].clone()
}

/// A date-time field that refuses every value-producing operation.
#[derive(Debug)]
pub struct UnsupportedDateTimeField {
    field_type: DateTimeFieldType,
}

impl DateTimeField for UnsupportedDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn period_field(&self) -> PeriodFieldRef {
        unsupported_period_field(self.field_type.period_type())
    }

    fn value_i64(&self, _instant: Instant) -> FieldResult<i64> {
        Err(unsupported_error())
    }

    fn set_value(&self, _instant: Instant, _value: i64) -> FieldResult<Instant> {
        Err(unsupported_error())
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Err(unsupported_error())
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Err(unsupported_error())
    }

    fn round_floor(&self, _instant: Instant) -> FieldResult<Instant> {
        Err(unsupported_error())
    }

    fn round_half_even(&self, _instant: Instant) -> FieldResult<Instant> {
        Err(unsupported_error())
    }

    fn is_leap(&self, _instant: Instant) -> FieldResult<bool> {
        Err(unsupported_error())
    }

    fn leap_amount(&self, _instant: Instant) -> FieldResult<i64> {
        Err(unsupported_error())
    }
}

/// Returns the shared unsupported date-time field for an identity.
pub fn unsupported_date_time_field(field_type: DateTimeFieldType) -> DateTimeFieldRef {
    static CACHE: LazyLock<[DateTimeFieldRef; DateTimeFieldType::COUNT]> = LazyLock::new(|| {
        DateTimeFieldType::VALUES
            .map(|field_type| Arc::new(UnsupportedDateTimeField { field_type }) as DateTimeFieldRef)
    });
    CACHE[field_type as usize].clone()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::fields::{DateTimeFieldType, PeriodFieldType};
    use crate::{ErrorKind, Instant, TickDuration};

    use super::{unsupported_date_time_field, unsupported_period_field};

    #[test]
    fn factories_cache_per_identity() {
        let a = unsupported_period_field(PeriodFieldType::Months);
        let b = unsupported_period_field(PeriodFieldType::Months);
        assert!(Arc::ptr_eq(&a, &b));
        let c = unsupported_period_field(PeriodFieldType::Years);
        assert!(!Arc::ptr_eq(&a, &c));

        let x = unsupported_date_time_field(DateTimeFieldType::MonthOfYear);
        let y = unsupported_date_time_field(DateTimeFieldType::MonthOfYear);
        assert!(Arc::ptr_eq(&x, &y));
        let z = unsupported_date_time_field(DateTimeFieldType::Year);
        assert!(!Arc::ptr_eq(&x, &z));
    }

    #[test]
    fn identity_queries_answer_without_failure() {
        let field = unsupported_period_field(PeriodFieldType::Eras);
        assert_eq!(field.field_type(), PeriodFieldType::Eras);
        assert!(!field.is_supported());
        assert!(field.is_fixed_length());
        assert_eq!(field.unit_ticks(), 0);

        let field = unsupported_date_time_field(DateTimeFieldType::Era);
        assert_eq!(field.field_type(), DateTimeFieldType::Era);
        assert!(!field.is_supported());
        assert!(!field.is_lenient());
        assert_eq!(field.period_field().field_type(), PeriodFieldType::Eras);
    }

    #[test]
    fn value_producing_operations_fail() {
        let period = unsupported_period_field(PeriodFieldType::Months);
        let kind = |r: Result<i64, crate::FieldError>| r.unwrap_err().kind();
        assert_eq!(kind(period.value_i64(TickDuration::ZERO)), ErrorKind::Unsupported);
        assert_eq!(
            period.add(Instant::EPOCH, 1).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            period.duration_of(1).unwrap_err().kind(),
            ErrorKind::Unsupported
        );

        let field = unsupported_date_time_field(DateTimeFieldType::MonthOfYear);
        assert_eq!(
            field.value_i64(Instant::EPOCH).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            field.set_value(Instant::EPOCH, 1).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        // Arithmetic delegates to the unsupported period field.
        assert_eq!(
            field.add(Instant::EPOCH, 1).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            field.round_floor(Instant::EPOCH).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            field.round_half_ceiling(Instant::EPOCH).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            field.remainder(Instant::EPOCH).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            field.is_leap(Instant::EPOCH).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            field.minimum_value().unwrap_err().kind(),
            ErrorKind::Unsupported
        );
    }
}
