//! The field registry: one named slot per recognized field identity.

use super::{
    unsupported_date_time_field, unsupported_period_field, DateTimeFieldRef, DateTimeFieldType,
    PeriodFieldRef, PeriodFieldType,
};

/// An immutable collection mapping every recognized field identity to a
/// concrete field, with unsupported sentinels in any slot a calendar
/// system leaves unset.
#[derive(Debug, Clone)]
pub struct FieldSet {
    eras: PeriodFieldRef,
    week_years: PeriodFieldRef,
    years: PeriodFieldRef,
    months: PeriodFieldRef,
    weeks: PeriodFieldRef,
    days: PeriodFieldRef,
    hours: PeriodFieldRef,
    minutes: PeriodFieldRef,
    seconds: PeriodFieldRef,
    milliseconds: PeriodFieldRef,
    ticks: PeriodFieldRef,
    era: DateTimeFieldRef,
    year_of_era: DateTimeFieldRef,
    year: DateTimeFieldRef,
    week_year: DateTimeFieldRef,
    week_of_week_year: DateTimeFieldRef,
    month_of_year: DateTimeFieldRef,
    day_of_year: DateTimeFieldRef,
    day_of_month: DateTimeFieldRef,
    day_of_week: DateTimeFieldRef,
    hour_of_day: DateTimeFieldRef,
    clock_hour_of_day: DateTimeFieldRef,
    minute_of_hour: DateTimeFieldRef,
    second_of_minute: DateTimeFieldRef,
    second_of_day: DateTimeFieldRef,
    millisecond_of_second: DateTimeFieldRef,
    millisecond_of_day: DateTimeFieldRef,
    tick_of_millisecond: DateTimeFieldRef,
    tick_of_second: DateTimeFieldRef,
    tick_of_day: DateTimeFieldRef,
}

impl FieldSet {
    /// Returns a builder with every slot unset.
    #[must_use]
    pub fn builder() -> FieldSetBuilder {
        FieldSetBuilder::default()
    }

    /// Returns the period field registered for an identity.
    pub fn period_field(&self, field_type: PeriodFieldType) -> &PeriodFieldRef {
        match field_type {
            PeriodFieldType::Eras => &self.eras,
            PeriodFieldType::WeekYears => &self.week_years,
            PeriodFieldType::Years => &self.years,
            PeriodFieldType::Months => &self.months,
            PeriodFieldType::Weeks => &self.weeks,
            PeriodFieldType::Days => &self.days,
            PeriodFieldType::Hours => &self.hours,
            PeriodFieldType::Minutes => &self.minutes,
            PeriodFieldType::Seconds => &self.seconds,
            PeriodFieldType::Milliseconds => &self.milliseconds,
            PeriodFieldType::Ticks => &self.ticks,
        }
    }

    /// Returns the date-time field registered for an identity.
    pub fn date_time_field(&self, field_type: DateTimeFieldType) -> &DateTimeFieldRef {
        match field_type {
            DateTimeFieldType::Era => &self.era,
            DateTimeFieldType::YearOfEra => &self.year_of_era,
            DateTimeFieldType::Year => &self.year,
            DateTimeFieldType::WeekYear => &self.week_year,
            DateTimeFieldType::WeekOfWeekYear => &self.week_of_week_year,
            DateTimeFieldType::MonthOfYear => &self.month_of_year,
            DateTimeFieldType::DayOfYear => &self.day_of_year,
            DateTimeFieldType::DayOfMonth => &self.day_of_month,
            DateTimeFieldType::DayOfWeek => &self.day_of_week,
            DateTimeFieldType::HourOfDay => &self.hour_of_day,
            DateTimeFieldType::ClockHourOfDay => &self.clock_hour_of_day,
            DateTimeFieldType::MinuteOfHour => &self.minute_of_hour,
            DateTimeFieldType::SecondOfMinute => &self.second_of_minute,
            DateTimeFieldType::SecondOfDay => &self.second_of_day,
            DateTimeFieldType::MillisecondOfSecond => &self.millisecond_of_second,
            DateTimeFieldType::MillisecondOfDay => &self.millisecond_of_day,
            DateTimeFieldType::TickOfMillisecond => &self.tick_of_millisecond,
            DateTimeFieldType::TickOfSecond => &self.tick_of_second,
            DateTimeFieldType::TickOfDay => &self.tick_of_day,
        }
    }

    pub fn eras(&self) -> &PeriodFieldRef {
        &self.eras
    }

    pub fn week_years(&self) -> &PeriodFieldRef {
        &self.week_years
    }

    pub fn years(&self) -> &PeriodFieldRef {
        &self.years
    }

    pub fn months(&self) -> &PeriodFieldRef {
        &self.months
    }

    pub fn weeks(&self) -> &PeriodFieldRef {
        &self.weeks
    }

    pub fn days(&self) -> &PeriodFieldRef {
        &self.days
    }

    pub fn hours(&self) -> &PeriodFieldRef {
        &self.hours
    }

    pub fn minutes(&self) -> &PeriodFieldRef {
        &self.minutes
    }

    pub fn seconds(&self) -> &PeriodFieldRef {
        &self.seconds
    }

    pub fn milliseconds(&self) -> &PeriodFieldRef {
        &self.milliseconds
    }

    pub fn ticks(&self) -> &PeriodFieldRef {
        &self.ticks
    }

    pub fn era(&self) -> &DateTimeFieldRef {
        &self.era
    }

    pub fn year_of_era(&self) -> &DateTimeFieldRef {
        &self.year_of_era
    }

    pub fn year(&self) -> &DateTimeFieldRef {
        &self.year
    }

    pub fn week_year(&self) -> &DateTimeFieldRef {
        &self.week_year
    }

    pub fn week_of_week_year(&self) -> &DateTimeFieldRef {
        &self.week_of_week_year
    }

    pub fn month_of_year(&self) -> &DateTimeFieldRef {
        &self.month_of_year
    }

    pub fn day_of_year(&self) -> &DateTimeFieldRef {
        &self.day_of_year
    }

    pub fn day_of_month(&self) -> &DateTimeFieldRef {
        &self.day_of_month
    }

    pub fn day_of_week(&self) -> &DateTimeFieldRef {
        &self.day_of_week
    }

    pub fn hour_of_day(&self) -> &DateTimeFieldRef {
        &self.hour_of_day
    }

    pub fn clock_hour_of_day(&self) -> &DateTimeFieldRef {
        &self.clock_hour_of_day
    }

    pub fn minute_of_hour(&self) -> &DateTimeFieldRef {
        &self.minute_of_hour
    }

    pub fn second_of_minute(&self) -> &DateTimeFieldRef {
        &self.second_of_minute
    }

    pub fn second_of_day(&self) -> &DateTimeFieldRef {
        &self.second_of_day
    }

    pub fn millisecond_of_second(&self) -> &DateTimeFieldRef {
        &self.millisecond_of_second
    }

    pub fn millisecond_of_day(&self) -> &DateTimeFieldRef {
        &self.millisecond_of_day
    }

    pub fn tick_of_millisecond(&self) -> &DateTimeFieldRef {
        &self.tick_of_millisecond
    }

    pub fn tick_of_second(&self) -> &DateTimeFieldRef {
        &self.tick_of_second
    }

    pub fn tick_of_day(&self) -> &DateTimeFieldRef {
        &self.tick_of_day
    }
}

/// A mutable builder with one settable slot per field identity.
///
/// Unset slots become the unsupported sentinel for their identity on
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct FieldSetBuilder {
    pub eras: Option<PeriodFieldRef>,
    pub week_years: Option<PeriodFieldRef>,
    pub years: Option<PeriodFieldRef>,
    pub months: Option<PeriodFieldRef>,
    pub weeks: Option<PeriodFieldRef>,
    pub days: Option<PeriodFieldRef>,
    pub hours: Option<PeriodFieldRef>,
    pub minutes: Option<PeriodFieldRef>,
    pub seconds: Option<PeriodFieldRef>,
    pub milliseconds: Option<PeriodFieldRef>,
    pub ticks: Option<PeriodFieldRef>,
    pub era: Option<DateTimeFieldRef>,
    pub year_of_era: Option<DateTimeFieldRef>,
    pub year: Option<DateTimeFieldRef>,
    pub week_year: Option<DateTimeFieldRef>,
    pub week_of_week_year: Option<DateTimeFieldRef>,
    pub month_of_year: Option<DateTimeFieldRef>,
    pub day_of_year: Option<DateTimeFieldRef>,
    pub day_of_month: Option<DateTimeFieldRef>,
    pub day_of_week: Option<DateTimeFieldRef>,
    pub hour_of_day: Option<DateTimeFieldRef>,
    pub clock_hour_of_day: Option<DateTimeFieldRef>,
    pub minute_of_hour: Option<DateTimeFieldRef>,
    pub second_of_minute: Option<DateTimeFieldRef>,
    pub second_of_day: Option<DateTimeFieldRef>,
    pub millisecond_of_second: Option<DateTimeFieldRef>,
    pub millisecond_of_day: Option<DateTimeFieldRef>,
    pub tick_of_millisecond: Option<DateTimeFieldRef>,
    pub tick_of_second: Option<DateTimeFieldRef>,
    pub tick_of_day: Option<DateTimeFieldRef>,
}

impl FieldSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot for a period field identity.
    pub fn set_period_field(
        &mut self,
        field_type: PeriodFieldType,
        field: PeriodFieldRef,
    ) -> &mut Self {
        let slot = match field_type {
            PeriodFieldType::Eras => &mut self.eras,
            PeriodFieldType::WeekYears => &mut self.week_years,
            PeriodFieldType::Years => &mut self.years,
            PeriodFieldType::Months => &mut self.months,
            PeriodFieldType::Weeks => &mut self.weeks,
            PeriodFieldType::Days => &mut self.days,
            PeriodFieldType::Hours => &mut self.hours,
            PeriodFieldType::Minutes => &mut self.minutes,
            PeriodFieldType::Seconds => &mut self.seconds,
            PeriodFieldType::Milliseconds => &mut self.milliseconds,
            PeriodFieldType::Ticks => &mut self.ticks,
        };
        *slot = Some(field);
        self
    }

    /// Sets the slot for a date-time field identity.
    pub fn set_date_time_field(
        &mut self,
        field_type: DateTimeFieldType,
        field: DateTimeFieldRef,
    ) -> &mut Self {
        let slot = match field_type {
            DateTimeFieldType::Era => &mut self.era,
            DateTimeFieldType::YearOfEra => &mut self.year_of_era,
            DateTimeFieldType::Year => &mut self.year,
            DateTimeFieldType::WeekYear => &mut self.week_year,
            DateTimeFieldType::WeekOfWeekYear => &mut self.week_of_week_year,
            DateTimeFieldType::MonthOfYear => &mut self.month_of_year,
            DateTimeFieldType::DayOfYear => &mut self.day_of_year,
            DateTimeFieldType::DayOfMonth => &mut self.day_of_month,
            DateTimeFieldType::DayOfWeek => &mut self.day_of_week,
            DateTimeFieldType::HourOfDay => &mut self.hour_of_day,
            DateTimeFieldType::ClockHourOfDay => &mut self.clock_hour_of_day,
            DateTimeFieldType::MinuteOfHour => &mut self.minute_of_hour,
            DateTimeFieldType::SecondOfMinute => &mut self.second_of_minute,
            DateTimeFieldType::SecondOfDay => &mut self.second_of_day,
            DateTimeFieldType::MillisecondOfSecond => &mut self.millisecond_of_second,
            DateTimeFieldType::MillisecondOfDay => &mut self.millisecond_of_day,
            DateTimeFieldType::TickOfMillisecond => &mut self.tick_of_millisecond,
            DateTimeFieldType::TickOfSecond => &mut self.tick_of_second,
            DateTimeFieldType::TickOfDay => &mut self.tick_of_day,
        };
        *slot = Some(field);
        self
    }

    /// Copies every supported field from `other` into this builder.
    ///
    /// A supported source field overwrites the destination slot even
    /// when that slot was already supported: the last source applied
    /// wins. Unsupported source fields never overwrite anything.
    pub fn with_supported_fields_from(&mut self, other: &FieldSet) -> &mut Self {
        for field_type in PeriodFieldType::VALUES {
            let field = other.period_field(field_type);
            if field.is_supported() {
                self.set_period_field(field_type, field.clone());
            }
        }
        for field_type in DateTimeFieldType::VALUES {
            let field = other.date_time_field(field_type);
            if field.is_supported() {
                self.set_date_time_field(field_type, field.clone());
            }
        }
        self
    }

    /// Produces the immutable field set, filling unset slots with
    /// unsupported sentinels.
    #[must_use]
    pub fn build(self) -> FieldSet {
        use DateTimeFieldType as D;
        use PeriodFieldType as P;

        fn period(slot: Option<PeriodFieldRef>, field_type: PeriodFieldType) -> PeriodFieldRef {
            slot.unwrap_or_else(|| unsupported_period_field(field_type))
        }

        fn date_time(
            slot: Option<DateTimeFieldRef>,
            field_type: DateTimeFieldType,
        ) -> DateTimeFieldRef {
            slot.unwrap_or_else(|| unsupported_date_time_field(field_type))
        }

        FieldSet {
            eras: period(self.eras, P::Eras),
            week_years: period(self.week_years, P::WeekYears),
            years: period(self.years, P::Years),
            months: period(self.months, P::Months),
            weeks: period(self.weeks, P::Weeks),
            days: period(self.days, P::Days),
            hours: period(self.hours, P::Hours),
            minutes: period(self.minutes, P::Minutes),
            seconds: period(self.seconds, P::Seconds),
            milliseconds: period(self.milliseconds, P::Milliseconds),
            ticks: period(self.ticks, P::Ticks),
            era: date_time(self.era, D::Era),
            year_of_era: date_time(self.year_of_era, D::YearOfEra),
            year: date_time(self.year, D::Year),
            week_year: date_time(self.week_year, D::WeekYear),
            week_of_week_year: date_time(self.week_of_week_year, D::WeekOfWeekYear),
            month_of_year: date_time(self.month_of_year, D::MonthOfYear),
            day_of_year: date_time(self.day_of_year, D::DayOfYear),
            day_of_month: date_time(self.day_of_month, D::DayOfMonth),
            day_of_week: date_time(self.day_of_week, D::DayOfWeek),
            hour_of_day: date_time(self.hour_of_day, D::HourOfDay),
            clock_hour_of_day: date_time(self.clock_hour_of_day, D::ClockHourOfDay),
            minute_of_hour: date_time(self.minute_of_hour, D::MinuteOfHour),
            second_of_minute: date_time(self.second_of_minute, D::SecondOfMinute),
            second_of_day: date_time(self.second_of_day, D::SecondOfDay),
            millisecond_of_second: date_time(self.millisecond_of_second, D::MillisecondOfSecond),
            millisecond_of_day: date_time(self.millisecond_of_day, D::MillisecondOfDay),
            tick_of_millisecond: date_time(self.tick_of_millisecond, D::TickOfMillisecond),
            tick_of_second: date_time(self.tick_of_second, D::TickOfSecond),
            tick_of_day: date_time(self.tick_of_day, D::TickOfDay),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::fields::{
        unsupported_date_time_field, unsupported_period_field, DateTimeFieldType,
        FixedPeriodField, PeriodFieldRef, PeriodFieldType,
    };
    use crate::TICKS_PER_SECOND;

    use super::FieldSet;

    fn seconds_field() -> PeriodFieldRef {
        Arc::new(FixedPeriodField::new(PeriodFieldType::Seconds, TICKS_PER_SECOND).unwrap())
    }

    #[test]
    fn unset_slots_build_to_cached_sentinels() {
        let set = FieldSet::builder().build();
        for field_type in PeriodFieldType::VALUES {
            let field = set.period_field(field_type);
            assert!(!field.is_supported());
            assert!(Arc::ptr_eq(field, &unsupported_period_field(field_type)));
        }
        for field_type in DateTimeFieldType::VALUES {
            let field = set.date_time_field(field_type);
            assert!(!field.is_supported());
            assert!(Arc::ptr_eq(field, &unsupported_date_time_field(field_type)));
        }
    }

    #[test]
    fn merge_copies_supported_fields_into_unset_slots() {
        let mut builder = FieldSet::builder();
        builder.set_period_field(PeriodFieldType::Seconds, seconds_field());
        let source = builder.build();

        let mut builder = FieldSet::builder();
        builder.with_supported_fields_from(&source);
        let merged = builder.build();

        assert!(Arc::ptr_eq(
            merged.period_field(PeriodFieldType::Seconds),
            source.period_field(PeriodFieldType::Seconds)
        ));
        // Slots unsupported in the source stay sentinels.
        assert!(!merged.period_field(PeriodFieldType::Months).is_supported());
    }

    #[test]
    fn merge_source_wins_over_supported_destination() {
        let mut builder = FieldSet::builder();
        builder.set_period_field(PeriodFieldType::Seconds, seconds_field());
        let source = builder.build();

        let mut builder = FieldSet::builder();
        builder.set_period_field(PeriodFieldType::Seconds, seconds_field());
        let original = builder.seconds.clone().unwrap();
        builder.with_supported_fields_from(&source);
        let merged = builder.build();

        // The source replaces the already-supported destination field.
        assert!(Arc::ptr_eq(
            merged.period_field(PeriodFieldType::Seconds),
            source.period_field(PeriodFieldType::Seconds)
        ));
        assert!(!Arc::ptr_eq(
            merged.period_field(PeriodFieldType::Seconds),
            &original
        ));
    }

    #[test]
    fn merge_returns_the_builder_for_chaining() {
        let source = FieldSet::builder().build();
        let mut builder = FieldSet::builder();
        builder
            .with_supported_fields_from(&source)
            .set_period_field(PeriodFieldType::Seconds, seconds_field());
        assert!(builder.seconds.is_some());
    }
}
