//! The date-time field framework.
//!
//! A calendar system is assembled from fields. A [`PeriodField`] knows
//! how a single unit of time (seconds, months, ...) converts to and
//! from ticks; a [`DateTimeField`] interprets an instant as a
//! calendar-relative value (month of year, hour of day, ...) and
//! delegates its arithmetic to a period field. Decorator fields layer
//! cross-cutting policies over an inner field, and a [`FieldSet`]
//! collects one field per recognized identity for a calendar system.

use core::{fmt, str::FromStr};
use std::sync::Arc;

pub mod datetime;
pub mod decorators;
pub mod period;
pub mod registry;
pub mod unsupported;

pub use datetime::{DateTimeField, PreciseDateTimeField};
pub use decorators::{
    OffsetDateTimeField, ScaledPeriodField, SkipZeroDateTimeField, ZeroIsMaxDateTimeField,
};
pub use period::{FixedPeriodField, PeriodField};
pub use registry::{FieldSet, FieldSetBuilder};
pub use unsupported::{
    unsupported_date_time_field, unsupported_period_field, UnsupportedDateTimeField,
    UnsupportedPeriodField,
};

/// A shared handle to a period field.
pub type PeriodFieldRef = Arc<dyn PeriodField>;

/// A shared handle to a date-time field.
pub type DateTimeFieldRef = Arc<dyn DateTimeField>;

/// The unit identity of a period field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodFieldType {
    /// The `Eras` unit
    Eras = 0,
    /// The `WeekYears` unit
    WeekYears,
    /// The `Years` unit
    Years,
    /// The `Months` unit
    Months,
    /// The `Weeks` unit
    Weeks,
    /// The `Days` unit
    Days,
    /// The `Hours` unit
    Hours,
    /// The `Minutes` unit
    Minutes,
    /// The `Seconds` unit
    Seconds,
    /// The `Milliseconds` unit
    Milliseconds,
    /// The `Ticks` unit
    Ticks,
}

impl PeriodFieldType {
    /// The number of recognized period field identities.
    pub(crate) const COUNT: usize = 11;

    /// All recognized period field identities, in ordinal order.
    pub const VALUES: [Self; Self::COUNT] = [
        Self::Eras,
        Self::WeekYears,
        Self::Years,
        Self::Months,
        Self::Weeks,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
        Self::Ticks,
    ];
}

/// A parsing error for `PeriodFieldType`.
#[derive(Debug, Clone, Copy)]
pub struct ParsePeriodFieldTypeError;

impl fmt::Display for ParsePeriodFieldTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid period field type")
    }
}

impl FromStr for PeriodFieldType {
    type Err = ParsePeriodFieldTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eras" => Ok(Self::Eras),
            "weekYears" => Ok(Self::WeekYears),
            "years" => Ok(Self::Years),
            "months" => Ok(Self::Months),
            "weeks" => Ok(Self::Weeks),
            "days" => Ok(Self::Days),
            "hours" => Ok(Self::Hours),
            "minutes" => Ok(Self::Minutes),
            "seconds" => Ok(Self::Seconds),
            "milliseconds" => Ok(Self::Milliseconds),
            "ticks" => Ok(Self::Ticks),
            _ => Err(ParsePeriodFieldTypeError),
        }
    }
}

impl fmt::Display for PeriodFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eras => "eras",
            Self::WeekYears => "weekYears",
            Self::Years => "years",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
            Self::Ticks => "ticks",
        }
        .fmt(f)
    }
}

/// The identity of a date-time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateTimeFieldType {
    /// The `Era` field
    Era = 0,
    /// The `YearOfEra` field
    YearOfEra,
    /// The `Year` field
    Year,
    /// The `WeekYear` field
    WeekYear,
    /// The `WeekOfWeekYear` field
    WeekOfWeekYear,
    /// The `MonthOfYear` field
    MonthOfYear,
    /// The `DayOfYear` field
    DayOfYear,
    /// The `DayOfMonth` field
    DayOfMonth,
    /// The `DayOfWeek` field
    DayOfWeek,
    /// The `HourOfDay` field
    HourOfDay,
    /// The `ClockHourOfDay` field
    ClockHourOfDay,
    /// The `MinuteOfHour` field
    MinuteOfHour,
    /// The `SecondOfMinute` field
    SecondOfMinute,
    /// The `SecondOfDay` field
    SecondOfDay,
    /// The `MillisecondOfSecond` field
    MillisecondOfSecond,
    /// The `MillisecondOfDay` field
    MillisecondOfDay,
    /// The `TickOfMillisecond` field
    TickOfMillisecond,
    /// The `TickOfSecond` field
    TickOfSecond,
    /// The `TickOfDay` field
    TickOfDay,
}

impl DateTimeFieldType {
    /// The number of recognized date-time field identities.
    pub(crate) const COUNT: usize = 19;

    /// All recognized date-time field identities, in ordinal order.
    pub const VALUES: [Self; Self::COUNT] = [
        Self::Era,
        Self::YearOfEra,
        Self::Year,
        Self::WeekYear,
        Self::WeekOfWeekYear,
        Self::MonthOfYear,
        Self::DayOfYear,
        Self::DayOfMonth,
        Self::DayOfWeek,
        Self::HourOfDay,
        Self::ClockHourOfDay,
        Self::MinuteOfHour,
        Self::SecondOfMinute,
        Self::SecondOfDay,
        Self::MillisecondOfSecond,
        Self::MillisecondOfDay,
        Self::TickOfMillisecond,
        Self::TickOfSecond,
        Self::TickOfDay,
    ];

    /// Returns the unit this field counts in.
    #[inline]
    #[must_use]
    pub fn period_type(self) -> PeriodFieldType {
        match self {
            Self::Era => PeriodFieldType::Eras,
            Self::YearOfEra | Self::Year => PeriodFieldType::Years,
            Self::WeekYear => PeriodFieldType::WeekYears,
            Self::WeekOfWeekYear => PeriodFieldType::Weeks,
            Self::MonthOfYear => PeriodFieldType::Months,
            Self::DayOfYear | Self::DayOfMonth | Self::DayOfWeek => PeriodFieldType::Days,
            Self::HourOfDay | Self::ClockHourOfDay => PeriodFieldType::Hours,
            Self::MinuteOfHour => PeriodFieldType::Minutes,
            Self::SecondOfMinute | Self::SecondOfDay => PeriodFieldType::Seconds,
            Self::MillisecondOfSecond | Self::MillisecondOfDay => PeriodFieldType::Milliseconds,
            Self::TickOfMillisecond | Self::TickOfSecond | Self::TickOfDay => {
                PeriodFieldType::Ticks
            }
        }
    }

    /// Returns the next-larger unit this field wraps within, if any.
    #[inline]
    #[must_use]
    pub fn range_type(self) -> Option<PeriodFieldType> {
        match self {
            Self::Era | Self::Year | Self::WeekYear => None,
            Self::YearOfEra => Some(PeriodFieldType::Eras),
            Self::WeekOfWeekYear => Some(PeriodFieldType::WeekYears),
            Self::MonthOfYear | Self::DayOfYear => Some(PeriodFieldType::Years),
            Self::DayOfMonth => Some(PeriodFieldType::Months),
            Self::DayOfWeek => Some(PeriodFieldType::Weeks),
            Self::HourOfDay | Self::ClockHourOfDay | Self::SecondOfDay | Self::MillisecondOfDay
            | Self::TickOfDay => Some(PeriodFieldType::Days),
            Self::MinuteOfHour => Some(PeriodFieldType::Hours),
            Self::SecondOfMinute => Some(PeriodFieldType::Minutes),
            Self::MillisecondOfSecond => Some(PeriodFieldType::Seconds),
            Self::TickOfMillisecond => Some(PeriodFieldType::Milliseconds),
            Self::TickOfSecond => Some(PeriodFieldType::Seconds),
        }
    }
}

/// A parsing error for `DateTimeFieldType`.
#[derive(Debug, Clone, Copy)]
pub struct ParseDateTimeFieldTypeError;

impl fmt::Display for ParseDateTimeFieldTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid date-time field type")
    }
}

impl FromStr for DateTimeFieldType {
    type Err = ParseDateTimeFieldTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "era" => Ok(Self::Era),
            "yearOfEra" => Ok(Self::YearOfEra),
            "year" => Ok(Self::Year),
            "weekYear" => Ok(Self::WeekYear),
            "weekOfWeekYear" => Ok(Self::WeekOfWeekYear),
            "monthOfYear" => Ok(Self::MonthOfYear),
            "dayOfYear" => Ok(Self::DayOfYear),
            "dayOfMonth" => Ok(Self::DayOfMonth),
            "dayOfWeek" => Ok(Self::DayOfWeek),
            "hourOfDay" => Ok(Self::HourOfDay),
            "clockHourOfDay" => Ok(Self::ClockHourOfDay),
            "minuteOfHour" => Ok(Self::MinuteOfHour),
            "secondOfMinute" => Ok(Self::SecondOfMinute),
            "secondOfDay" => Ok(Self::SecondOfDay),
            "millisecondOfSecond" => Ok(Self::MillisecondOfSecond),
            "millisecondOfDay" => Ok(Self::MillisecondOfDay),
            "tickOfMillisecond" => Ok(Self::TickOfMillisecond),
            "tickOfSecond" => Ok(Self::TickOfSecond),
            "tickOfDay" => Ok(Self::TickOfDay),
            _ => Err(ParseDateTimeFieldTypeError),
        }
    }
}

impl fmt::Display for DateTimeFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Era => "era",
            Self::YearOfEra => "yearOfEra",
            Self::Year => "year",
            Self::WeekYear => "weekYear",
            Self::WeekOfWeekYear => "weekOfWeekYear",
            Self::MonthOfYear => "monthOfYear",
            Self::DayOfYear => "dayOfYear",
            Self::DayOfMonth => "dayOfMonth",
            Self::DayOfWeek => "dayOfWeek",
            Self::HourOfDay => "hourOfDay",
            Self::ClockHourOfDay => "clockHourOfDay",
            Self::MinuteOfHour => "minuteOfHour",
            Self::SecondOfMinute => "secondOfMinute",
            Self::SecondOfDay => "secondOfDay",
            Self::MillisecondOfSecond => "millisecondOfSecond",
            Self::MillisecondOfDay => "millisecondOfDay",
            Self::TickOfMillisecond => "tickOfMillisecond",
            Self::TickOfSecond => "tickOfSecond",
            Self::TickOfDay => "tickOfDay",
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::{DateTimeFieldType, PeriodFieldType};

    #[test]
    fn field_type_strings_round_trip() {
        for ty in DateTimeFieldType::VALUES {
            assert_eq!(DateTimeFieldType::from_str(&ty.to_string()).unwrap(), ty);
        }
        for ty in PeriodFieldType::VALUES {
            assert_eq!(PeriodFieldType::from_str(&ty.to_string()).unwrap(), ty);
        }
        assert!(DateTimeFieldType::from_str("fortnight").is_err());
    }

    #[test]
    fn unit_and_range_mappings() {
        assert_eq!(
            DateTimeFieldType::DayOfMonth.period_type(),
            PeriodFieldType::Days
        );
        assert_eq!(
            DateTimeFieldType::DayOfMonth.range_type(),
            Some(PeriodFieldType::Months)
        );
        assert_eq!(
            DateTimeFieldType::ClockHourOfDay.period_type(),
            PeriodFieldType::Hours
        );
        assert_eq!(DateTimeFieldType::Year.range_type(), None);
        assert_eq!(
            DateTimeFieldType::YearOfEra.range_type(),
            Some(PeriodFieldType::Eras)
        );
    }

    #[test]
    fn values_match_ordinals() {
        for (i, ty) in PeriodFieldType::VALUES.iter().enumerate() {
            assert_eq!(*ty as usize, i);
        }
        for (i, ty) in DateTimeFieldType::VALUES.iter().enumerate() {
            assert_eq!(*ty as usize, i);
        }
    }
}
