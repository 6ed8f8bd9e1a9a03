//! The ISO calendar system.
//!
//! [`IsoCalendar`] assembles a [`FieldSet`] for the proleptic Gregorian
//! calendar with ISO week numbering: fixed-length time-of-day fields
//! shared with any derived calendar, plus calendar-positioned month,
//! year, week-year and era fields whose arithmetic consults the civil
//! date equations.

use core::num::NonZeroI64;
use std::sync::{Arc, LazyLock};

use tinystr::{tinystr, TinyAsciiStr};

use crate::fields::{
    unsupported_period_field, DateTimeField, DateTimeFieldRef, DateTimeFieldType, FieldSet,
    FixedPeriodField, OffsetDateTimeField, PeriodField, PeriodFieldRef, PeriodFieldType,
    ScaledPeriodField, ZeroIsMaxDateTimeField,
};
use crate::rounding::{round_ticks, RoundingMode};
use crate::utils;
use crate::{
    field_assert, FieldError, FieldResult, Instant, TickDuration, TICKS_PER_DAY, TICKS_PER_HOUR,
    TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};

/// The era value for years before year one.
pub const ERA_BCE: i64 = 0;

/// The era value for year one onward.
pub const ERA_CE: i64 = 1;

const DAY_UNIT: NonZeroI64 = match NonZeroI64::new(TICKS_PER_DAY) {
    Some(unit) => unit,
    None => panic!("the day unit is non-zero"),
};

// ==== Civil date plumbing over instants ====

/// Splits an instant into its epoch day and its tick of day.
fn split(instant: Instant) -> (i64, i64) {
    let ticks = instant.ticks();
    (
        ticks.div_euclid(TICKS_PER_DAY),
        ticks.rem_euclid(TICKS_PER_DAY),
    )
}

/// Recombines an epoch day and a tick of day into an instant.
fn combine(days: i64, tick_of_day: i64) -> FieldResult<Instant> {
    let day_ticks = days
        .checked_mul(TICKS_PER_DAY)
        .ok_or(FieldError::overflow().with_message("instant exceeded the valid tick range."))?;
    Instant::from_ticks(day_ticks).checked_add(TickDuration::from_ticks(tick_of_day))
}

/// Returns the civil date containing an instant.
fn civil_at(instant: Instant) -> (i64, i64, i64) {
    let (days, _) = split(instant);
    utils::civil_from_epoch_days(days)
}

/// Replaces an instant's date, keeping its tick of day.
fn with_date(instant: Instant, year: i64, month: i64, day: i64) -> FieldResult<Instant> {
    let (_, tick_of_day) = split(instant);
    combine(utils::epoch_days_from_civil(year, month, day), tick_of_day)
}

fn check_year_arithmetic(year: i64) -> FieldResult<()> {
    if !(utils::MIN_YEAR..=utils::MAX_YEAR).contains(&year) {
        return Err(
            FieldError::overflow().with_message("instant exceeded the supported year range.")
        );
    }
    Ok(())
}

/// Clamps a day of month into the month's length, tracing when the
/// clamp fires.
fn clamp_day(year: i64, month: i64, day: i64) -> i64 {
    let limit = utils::days_in_month(year, month);
    if day > limit {
        #[cfg(feature = "log")]
        log::trace!("clamped day {day} to {limit} in {year}-{month:02}");
        return limit;
    }
    day
}

fn add_months(instant: Instant, value: i64) -> FieldResult<Instant> {
    let (days, tick_of_day) = split(instant);
    let (year, month, day) = utils::civil_from_epoch_days(days);
    let linear = year
        .checked_mul(12)
        .and_then(|months| months.checked_add(month - 1))
        .and_then(|months| months.checked_add(value))
        .ok_or(FieldError::overflow().with_message("month count exceeded the valid range."))?;
    let new_year = linear.div_euclid(12);
    let new_month = linear.rem_euclid(12) + 1;
    check_year_arithmetic(new_year)?;
    field_assert!((1..=12).contains(&new_month));
    let new_day = clamp_day(new_year, new_month, day);
    combine(
        utils::epoch_days_from_civil(new_year, new_month, new_day),
        tick_of_day,
    )
}

fn months_difference(minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
    let (y1, m1, _) = civil_at(minuend);
    let (y2, m2, _) = civil_at(subtrahend);
    let naive = (y1 * 12 + m1) - (y2 * 12 + m2);
    adjust_difference(naive, minuend, subtrahend, add_months)
}

fn add_years(instant: Instant, value: i64) -> FieldResult<Instant> {
    let (days, tick_of_day) = split(instant);
    let (year, month, day) = utils::civil_from_epoch_days(days);
    let new_year = year
        .checked_add(value)
        .ok_or(FieldError::overflow().with_message("year count exceeded the valid range."))?;
    check_year_arithmetic(new_year)?;
    let new_day = clamp_day(new_year, month, day);
    combine(
        utils::epoch_days_from_civil(new_year, month, new_day),
        tick_of_day,
    )
}

fn years_difference(minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
    let (y1, _, _) = civil_at(minuend);
    let (y2, _, _) = civil_at(subtrahend);
    adjust_difference(y1 - y2, minuend, subtrahend, add_years)
}

fn add_week_years(instant: Instant, value: i64) -> FieldResult<Instant> {
    let (days, tick_of_day) = split(instant);
    let week_year = utils::week_year(days);
    let week = utils::week_of_week_year(days);
    let weekday = utils::day_of_week(days);
    let target = week_year
        .checked_add(value)
        .ok_or(FieldError::overflow().with_message("week-year count exceeded the valid range."))?;
    check_year_arithmetic(target)?;
    // A 53rd week falls back into week 52 of a short target year.
    let new_week = week.min(utils::weeks_in_week_year(target));
    let new_days = utils::week_year_start_days(target) + (new_week - 1) * 7 + (weekday - 1);
    combine(new_days, tick_of_day)
}

fn week_years_difference(minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
    let (d1, _) = split(minuend);
    let (d2, _) = split(subtrahend);
    let naive = utils::week_year(d1) - utils::week_year(d2);
    adjust_difference(naive, minuend, subtrahend, add_week_years)
}

/// Trims a unit-count estimate so adding it to `subtrahend` never
/// overshoots `minuend`. Clamping during the add moves the landing
/// point by at most one unit.
fn adjust_difference(
    naive: i64,
    minuend: Instant,
    subtrahend: Instant,
    add: fn(Instant, i64) -> FieldResult<Instant>,
) -> FieldResult<i64> {
    if naive == 0 {
        return Ok(0);
    }
    let shifted = add(subtrahend, naive)?;
    if naive > 0 && shifted > minuend {
        return Ok(naive - 1);
    }
    if naive < 0 && shifted < minuend {
        return Ok(naive + 1);
    }
    Ok(naive)
}

/// Picks a boundary for a tied half-even rounding; non-ties resolve by
/// distance.
fn resolve_half_even(
    instant: Instant,
    floor: Instant,
    ceiling: Instant,
    floor_count_even: bool,
) -> Instant {
    let down = i128::from(instant.ticks()) - i128::from(floor.ticks());
    let up = i128::from(ceiling.ticks()) - i128::from(instant.ticks());
    if down < up {
        floor
    } else if up < down {
        ceiling
    } else if floor_count_even {
        floor
    } else {
        ceiling
    }
}

fn round_day_unit(instant: Instant, mode: RoundingMode) -> FieldResult<Instant> {
    round_ticks(instant.ticks(), DAY_UNIT, mode).map(Instant::from_ticks)
}

// ==== Variable-length period fields ====

const POSITIONLESS: &str = "a variable-length field cannot convert without a reference instant.";

/// The month unit. Its tick span depends on the month being crossed.
#[derive(Debug)]
struct IsoMonthsField;

impl PeriodField for IsoMonthsField {
    fn field_type(&self) -> PeriodFieldType {
        PeriodFieldType::Months
    }

    fn is_fixed_length(&self) -> bool {
        false
    }

    fn unit_ticks(&self) -> i64 {
        0
    }

    fn value_i64(&self, _duration: TickDuration) -> FieldResult<i64> {
        Err(FieldError::unsupported().with_message(POSITIONLESS))
    }

    fn duration_of(&self, _value: i64) -> FieldResult<TickDuration> {
        Err(FieldError::unsupported().with_message(POSITIONLESS))
    }

    fn add(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        add_months(instant, value)
    }

    fn difference_i64(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
        months_difference(minuend, subtrahend)
    }
}

/// The year unit.
#[derive(Debug)]
struct IsoYearsField;

impl PeriodField for IsoYearsField {
    fn field_type(&self) -> PeriodFieldType {
        PeriodFieldType::Years
    }

    fn is_fixed_length(&self) -> bool {
        false
    }

    fn unit_ticks(&self) -> i64 {
        0
    }

    fn value_i64(&self, _duration: TickDuration) -> FieldResult<i64> {
        Err(FieldError::unsupported().with_message(POSITIONLESS))
    }

    fn duration_of(&self, _value: i64) -> FieldResult<TickDuration> {
        Err(FieldError::unsupported().with_message(POSITIONLESS))
    }

    fn add(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        add_years(instant, value)
    }

    fn difference_i64(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
        years_difference(minuend, subtrahend)
    }
}

/// The ISO week-year unit.
#[derive(Debug)]
struct IsoWeekYearsField;

impl PeriodField for IsoWeekYearsField {
    fn field_type(&self) -> PeriodFieldType {
        PeriodFieldType::WeekYears
    }

    fn is_fixed_length(&self) -> bool {
        false
    }

    fn unit_ticks(&self) -> i64 {
        0
    }

    fn value_i64(&self, _duration: TickDuration) -> FieldResult<i64> {
        Err(FieldError::unsupported().with_message(POSITIONLESS))
    }

    fn duration_of(&self, _value: i64) -> FieldResult<TickDuration> {
        Err(FieldError::unsupported().with_message(POSITIONLESS))
    }

    fn add(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        add_week_years(instant, value)
    }

    fn difference_i64(&self, minuend: Instant, subtrahend: Instant) -> FieldResult<i64> {
        week_years_difference(minuend, subtrahend)
    }
}

// ==== Calendar date-time fields ====

#[derive(Debug)]
struct IsoEraField {
    eras: PeriodFieldRef,
}

impl DateTimeField for IsoEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Era
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.eras.clone()
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (year, _, _) = civil_at(instant);
        Ok(if year >= 1 { ERA_CE } else { ERA_BCE })
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if !(ERA_BCE..=ERA_CE).contains(&value) {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let (year, month, day) = civil_at(instant);
        if value == self.value_i64(instant)? {
            return Ok(instant);
        }
        // Mirror the year across the era boundary.
        let new_year = 1 - year;
        if !(utils::MIN_YEAR..=utils::MAX_YEAR).contains(&new_year) {
            return Err(
                FieldError::range().with_message("the mirrored year exceeds the supported range.")
            );
        }
        with_date(instant, new_year, month, clamp_day(new_year, month, day))
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(ERA_BCE)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(ERA_CE)
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        let (year, _, _) = civil_at(instant);
        if year >= 1 {
            return combine(utils::epoch_days_for_year(1), 0);
        }
        Ok(Instant::MIN)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        let (year, _, _) = civil_at(instant);
        if year < 1 {
            return combine(utils::epoch_days_for_year(1), 0);
        }
        Ok(Instant::MAX)
    }

    // With only one interior boundary, every half mode collapses to
    // the floor.
    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        self.round_floor(instant)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        self.round_floor(instant)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        self.round_floor(instant)
    }
}

#[derive(Debug)]
struct IsoYearField {
    years: PeriodFieldRef,
    days: PeriodFieldRef,
}

impl DateTimeField for IsoYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Year
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.years.clone()
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (year, _, _) = civil_at(instant);
        Ok(year)
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if !(utils::MIN_YEAR..=utils::MAX_YEAR).contains(&value) {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let (_, month, day) = civil_at(instant);
        with_date(instant, value, month, clamp_day(value, month, day))
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(utils::MIN_YEAR)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(utils::MAX_YEAR)
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        let (year, _, _) = civil_at(instant);
        combine(utils::epoch_days_for_year(year), 0)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        let ceiling = self.round_ceiling(instant)?;
        let (floor_year, _, _) = civil_at(floor);
        Ok(resolve_half_even(
            instant,
            floor,
            ceiling,
            (floor_year - 1970) % 2 == 0,
        ))
    }

    fn is_leap(&self, instant: Instant) -> FieldResult<bool> {
        let (year, _, _) = civil_at(instant);
        Ok(utils::is_leap_year(year))
    }

    fn leap_amount(&self, instant: Instant) -> FieldResult<i64> {
        Ok(i64::from(self.is_leap(instant)?))
    }

    fn leap_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.days.clone())
    }
}

#[derive(Debug)]
struct IsoYearOfEraField {
    years: PeriodFieldRef,
    eras: PeriodFieldRef,
}

impl DateTimeField for IsoYearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YearOfEra
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.years.clone()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.eras.clone())
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (year, _, _) = civil_at(instant);
        Ok(if year >= 1 { year } else { 1 - year })
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if value < 1 || value > self.maximum_value_at(instant)? {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let (year, month, day) = civil_at(instant);
        let new_year = if year >= 1 { value } else { 1 - value };
        with_date(instant, new_year, month, clamp_day(new_year, month, day))
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(1)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok((1 - utils::MIN_YEAR).max(utils::MAX_YEAR))
    }

    fn maximum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        let (year, _, _) = civil_at(instant);
        Ok(if year >= 1 {
            utils::MAX_YEAR
        } else {
            1 - utils::MIN_YEAR
        })
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        let (year, _, _) = civil_at(instant);
        combine(utils::epoch_days_for_year(year), 0)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        let ceiling = self.round_ceiling(instant)?;
        let (floor_year, _, _) = civil_at(floor);
        Ok(resolve_half_even(
            instant,
            floor,
            ceiling,
            (floor_year - 1970) % 2 == 0,
        ))
    }
}

/// The 0-based month core; the registered field wraps it with a +1
/// offset.
#[derive(Debug)]
struct IsoMonthOfYearField {
    months: PeriodFieldRef,
    years: PeriodFieldRef,
    days: PeriodFieldRef,
}

impl DateTimeField for IsoMonthOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::MonthOfYear
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.months.clone()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.years.clone())
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (_, month, _) = civil_at(instant);
        Ok(month - 1)
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if !(0..=11).contains(&value) {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let (year, _, day) = civil_at(instant);
        let month = value + 1;
        with_date(instant, year, month, clamp_day(year, month, day))
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(0)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(11)
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        let (year, month, _) = civil_at(instant);
        combine(utils::epoch_days_from_civil(year, month, 1), 0)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        let ceiling = self.round_ceiling(instant)?;
        let (floor_year, floor_month, _) = civil_at(floor);
        let months_from_epoch = (floor_year - 1970) * 12 + (floor_month - 1);
        Ok(resolve_half_even(
            instant,
            floor,
            ceiling,
            months_from_epoch % 2 == 0,
        ))
    }

    fn is_leap(&self, instant: Instant) -> FieldResult<bool> {
        let (year, month, _) = civil_at(instant);
        Ok(month == 2 && utils::is_leap_year(year))
    }

    fn leap_amount(&self, instant: Instant) -> FieldResult<i64> {
        Ok(i64::from(self.is_leap(instant)?))
    }

    fn leap_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.days.clone())
    }
}

#[derive(Debug)]
struct IsoDayOfMonthField {
    days: PeriodFieldRef,
    months: PeriodFieldRef,
}

impl DateTimeField for IsoDayOfMonthField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfMonth
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.days.clone()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.months.clone())
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (_, _, day) = civil_at(instant);
        Ok(day)
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        let (year, month, _) = civil_at(instant);
        if value < 1 || value > utils::days_in_month(year, month) {
            return Err(FieldError::range().with_message("value out of range for month."));
        }
        with_date(instant, year, month, value)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(1)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(31)
    }

    fn maximum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        let (year, month, _) = civil_at(instant);
        Ok(utils::days_in_month(year, month))
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::Floor)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::Ceiling)
    }

    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfFloor)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfCeiling)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfEven)
    }
}

#[derive(Debug)]
struct IsoDayOfYearField {
    days: PeriodFieldRef,
    years: PeriodFieldRef,
}

impl DateTimeField for IsoDayOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfYear
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.days.clone()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.years.clone())
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (days, _) = split(instant);
        let year = utils::epoch_days_to_year(days);
        Ok(days - utils::epoch_days_for_year(year) + 1)
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        let (days, tick_of_day) = split(instant);
        let year = utils::epoch_days_to_year(days);
        if value < 1 || value > utils::days_in_year(year) {
            return Err(FieldError::range().with_message("value out of range for year."));
        }
        combine(utils::epoch_days_for_year(year) + value - 1, tick_of_day)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(1)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(366)
    }

    fn maximum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        let (year, _, _) = civil_at(instant);
        Ok(utils::days_in_year(year))
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::Floor)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::Ceiling)
    }

    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfFloor)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfCeiling)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfEven)
    }
}

#[derive(Debug)]
struct IsoDayOfWeekField {
    days: PeriodFieldRef,
    weeks: PeriodFieldRef,
}

impl DateTimeField for IsoDayOfWeekField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfWeek
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.days.clone()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.weeks.clone())
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (days, _) = split(instant);
        Ok(utils::day_of_week(days))
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if !(1..=7).contains(&value) {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let (days, tick_of_day) = split(instant);
        combine(days + (value - utils::day_of_week(days)), tick_of_day)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(1)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(7)
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::Floor)
    }

    fn round_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::Ceiling)
    }

    fn round_half_floor(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfFloor)
    }

    fn round_half_ceiling(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfCeiling)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        round_day_unit(instant, RoundingMode::HalfEven)
    }
}

#[derive(Debug)]
struct IsoWeekOfWeekYearField {
    weeks: PeriodFieldRef,
    week_years: PeriodFieldRef,
}

impl DateTimeField for IsoWeekOfWeekYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::WeekOfWeekYear
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.weeks.clone()
    }

    fn range_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.week_years.clone())
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (days, _) = split(instant);
        Ok(utils::week_of_week_year(days))
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if value < 1 || value > self.maximum_value_at(instant)? {
            return Err(FieldError::range().with_message("value out of range for week-year."));
        }
        let (days, tick_of_day) = split(instant);
        let current = utils::week_of_week_year(days);
        combine(days + (value - current) * 7, tick_of_day)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(1)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(53)
    }

    fn maximum_value_at(&self, instant: Instant) -> FieldResult<i64> {
        let (days, _) = split(instant);
        Ok(utils::weeks_in_week_year(utils::week_year(days)))
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        let (days, _) = split(instant);
        combine(days - (utils::day_of_week(days) - 1), 0)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        let ceiling = self.round_ceiling(instant)?;
        // Weeks counted from the Monday of the epoch's week.
        let (floor_days, _) = split(floor);
        let week_index = (floor_days + 3).div_euclid(7);
        Ok(resolve_half_even(
            instant,
            floor,
            ceiling,
            week_index % 2 == 0,
        ))
    }
}

#[derive(Debug)]
struct IsoWeekYearField {
    week_years: PeriodFieldRef,
    weeks: PeriodFieldRef,
}

impl DateTimeField for IsoWeekYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::WeekYear
    }

    fn period_field(&self) -> PeriodFieldRef {
        self.week_years.clone()
    }

    fn value_i64(&self, instant: Instant) -> FieldResult<i64> {
        let (days, _) = split(instant);
        Ok(utils::week_year(days))
    }

    fn set_value(&self, instant: Instant, value: i64) -> FieldResult<Instant> {
        if !(utils::MIN_YEAR..=utils::MAX_YEAR).contains(&value) {
            return Err(FieldError::range().with_message("value out of range for field."));
        }
        let current = self.value_i64(instant)?;
        add_week_years(instant, value - current)
    }

    fn minimum_value(&self) -> FieldResult<i64> {
        Ok(utils::MIN_YEAR)
    }

    fn maximum_value(&self) -> FieldResult<i64> {
        Ok(utils::MAX_YEAR)
    }

    fn round_floor(&self, instant: Instant) -> FieldResult<Instant> {
        let (days, _) = split(instant);
        combine(utils::week_year_start_days(utils::week_year(days)), 0)
    }

    fn round_half_even(&self, instant: Instant) -> FieldResult<Instant> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        let ceiling = self.round_ceiling(instant)?;
        let floor_week_year = self.value_i64(floor)?;
        Ok(resolve_half_even(
            instant,
            floor,
            ceiling,
            (floor_week_year - 1970) % 2 == 0,
        ))
    }

    fn is_leap(&self, instant: Instant) -> FieldResult<bool> {
        Ok(self.leap_amount(instant)? != 0)
    }

    fn leap_amount(&self, instant: Instant) -> FieldResult<i64> {
        let (days, _) = split(instant);
        Ok(utils::weeks_in_week_year(utils::week_year(days)) - 52)
    }

    fn leap_period_field(&self) -> Option<PeriodFieldRef> {
        Some(self.weeks.clone())
    }
}

// ==== Calendar system ====

/// The ISO calendar system: the proleptic Gregorian calendar with ISO
/// week numbering and a BCE/CE era pair.
#[derive(Debug, Clone)]
pub struct IsoCalendar {
    fields: FieldSet,
}

impl IsoCalendar {
    /// Assembles a fresh ISO field set.
    pub fn try_new() -> FieldResult<Self> {
        let fields = Self::assemble()?;
        #[cfg(feature = "log")]
        log::debug!("assembled the ISO calendar field set");
        Ok(Self { fields })
    }

    /// Returns the shared process-wide instance.
    pub fn shared() -> &'static IsoCalendar {
        static INSTANCE: LazyLock<IsoCalendar> =
            LazyLock::new(|| IsoCalendar::try_new().expect("the ISO field wiring is valid"));
        &INSTANCE
    }

    fn assemble() -> FieldResult<FieldSet> {
        // Fixed-length units.
        let ticks: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Ticks, 1)?);
        let milliseconds: PeriodFieldRef = Arc::new(ScaledPeriodField::new(
            ticks.clone(),
            PeriodFieldType::Milliseconds,
            TICKS_PER_MILLISECOND,
        )?);
        let seconds: PeriodFieldRef = Arc::new(FixedPeriodField::new(
            PeriodFieldType::Seconds,
            TICKS_PER_SECOND,
        )?);
        let minutes: PeriodFieldRef = Arc::new(FixedPeriodField::new(
            PeriodFieldType::Minutes,
            TICKS_PER_MINUTE,
        )?);
        let hours: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Hours, TICKS_PER_HOUR)?);
        let days: PeriodFieldRef =
            Arc::new(FixedPeriodField::new(PeriodFieldType::Days, TICKS_PER_DAY)?);
        let weeks: PeriodFieldRef =
            Arc::new(ScaledPeriodField::new(days.clone(), PeriodFieldType::Weeks, 7)?);

        // The time-of-day base shared by any calendar over these units.
        let time = Self::assemble_time_of_day(
            &ticks,
            &milliseconds,
            &seconds,
            &minutes,
            &hours,
            &days,
            &weeks,
        )?;

        // Calendar-positioned units and fields layered over the base.
        let months: PeriodFieldRef = Arc::new(IsoMonthsField);
        let years: PeriodFieldRef = Arc::new(IsoYearsField);
        let week_years: PeriodFieldRef = Arc::new(IsoWeekYearsField);
        let eras = unsupported_period_field(PeriodFieldType::Eras);

        let mut builder = FieldSet::builder();
        builder.with_supported_fields_from(&time);
        builder.months = Some(months.clone());
        builder.years = Some(years.clone());
        builder.week_years = Some(week_years.clone());

        builder.era = Some(Arc::new(IsoEraField { eras: eras.clone() }));
        builder.year = Some(Arc::new(IsoYearField {
            years: years.clone(),
            days: days.clone(),
        }));
        builder.year_of_era = Some(Arc::new(IsoYearOfEraField {
            years: years.clone(),
            eras,
        }));

        let month_core: DateTimeFieldRef = Arc::new(IsoMonthOfYearField {
            months: months.clone(),
            years: years.clone(),
            days: days.clone(),
        });
        builder.month_of_year = Some(Arc::new(OffsetDateTimeField::new(month_core, 1)?));

        builder.day_of_month = Some(Arc::new(IsoDayOfMonthField {
            days: days.clone(),
            months,
        }));
        builder.day_of_year = Some(Arc::new(IsoDayOfYearField {
            days: days.clone(),
            years,
        }));
        builder.day_of_week = Some(Arc::new(IsoDayOfWeekField {
            days,
            weeks: weeks.clone(),
        }));
        builder.week_of_week_year = Some(Arc::new(IsoWeekOfWeekYearField {
            weeks: weeks.clone(),
            week_years: week_years.clone(),
        }));
        builder.week_year = Some(Arc::new(IsoWeekYearField { week_years, weeks }));

        Ok(builder.build())
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble_time_of_day(
        ticks: &PeriodFieldRef,
        milliseconds: &PeriodFieldRef,
        seconds: &PeriodFieldRef,
        minutes: &PeriodFieldRef,
        hours: &PeriodFieldRef,
        days: &PeriodFieldRef,
        weeks: &PeriodFieldRef,
    ) -> FieldResult<FieldSet> {
        let mut builder = FieldSet::builder();
        builder.ticks = Some(ticks.clone());
        builder.milliseconds = Some(milliseconds.clone());
        builder.seconds = Some(seconds.clone());
        builder.minutes = Some(minutes.clone());
        builder.hours = Some(hours.clone());
        builder.days = Some(days.clone());
        builder.weeks = Some(weeks.clone());

        let precise = |field_type, unit: &PeriodFieldRef, range: &PeriodFieldRef| {
            crate::fields::PreciseDateTimeField::new(field_type, unit.clone(), Some(range.clone()))
                .map(|field| Arc::new(field) as DateTimeFieldRef)
        };

        builder.tick_of_millisecond = Some(precise(
            DateTimeFieldType::TickOfMillisecond,
            ticks,
            milliseconds,
        )?);
        builder.tick_of_second = Some(precise(DateTimeFieldType::TickOfSecond, ticks, seconds)?);
        builder.tick_of_day = Some(precise(DateTimeFieldType::TickOfDay, ticks, days)?);
        builder.millisecond_of_second = Some(precise(
            DateTimeFieldType::MillisecondOfSecond,
            milliseconds,
            seconds,
        )?);
        builder.millisecond_of_day = Some(precise(
            DateTimeFieldType::MillisecondOfDay,
            milliseconds,
            days,
        )?);
        builder.second_of_minute =
            Some(precise(DateTimeFieldType::SecondOfMinute, seconds, minutes)?);
        builder.second_of_day = Some(precise(DateTimeFieldType::SecondOfDay, seconds, days)?);
        builder.minute_of_hour = Some(precise(DateTimeFieldType::MinuteOfHour, minutes, hours)?);

        let hour_of_day = precise(DateTimeFieldType::HourOfDay, hours, days)?;
        builder.hour_of_day = Some(hour_of_day.clone());
        builder.clock_hour_of_day = Some(Arc::new(ZeroIsMaxDateTimeField::new(
            hour_of_day,
            DateTimeFieldType::ClockHourOfDay,
        )?));

        Ok(builder.build())
    }

    /// Returns this calendar's field set.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Returns the instant at midnight of a civil date.
    pub fn instant_at(&self, year: i64, month: i64, day: i64) -> FieldResult<Instant> {
        self.instant_at_time(year, month, day, 0)
    }

    /// Returns the instant at a civil date and a tick of day.
    pub fn instant_at_time(
        &self,
        year: i64,
        month: i64,
        day: i64,
        tick_of_day: i64,
    ) -> FieldResult<Instant> {
        if !(utils::MIN_YEAR..=utils::MAX_YEAR).contains(&year) {
            return Err(FieldError::range().with_message("year is out of the supported range."));
        }
        if !(1..=12).contains(&month) {
            return Err(FieldError::range().with_message("month must be between 1 and 12."));
        }
        if day < 1 || day > utils::days_in_month(year, month) {
            return Err(FieldError::range().with_message("day is out of range for month."));
        }
        if !(0..TICKS_PER_DAY).contains(&tick_of_day) {
            return Err(FieldError::range().with_message("tick of day is out of range."));
        }
        combine(utils::epoch_days_from_civil(year, month, day), tick_of_day)
    }

    /// Determines whether a year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self, year: i64) -> bool {
        utils::is_leap_year(year)
    }

    /// Returns the number of days in a year.
    #[must_use]
    pub fn days_in_year(&self, year: i64) -> i64 {
        utils::days_in_year(year)
    }

    /// Returns the number of days in a month.
    pub fn days_in_month(&self, year: i64, month: i64) -> FieldResult<i64> {
        if !(1..=12).contains(&month) {
            return Err(FieldError::range().with_message("month must be between 1 and 12."));
        }
        Ok(utils::days_in_month(year, month))
    }

    /// Returns the number of ISO weeks in a week-year.
    #[must_use]
    pub fn weeks_in_week_year(&self, year: i64) -> i64 {
        utils::weeks_in_week_year(year)
    }

    /// Returns the era code for an era field value.
    #[must_use]
    pub fn era_code(&self, era: i64) -> Option<TinyAsciiStr<16>> {
        match era {
            ERA_BCE => Some(tinystr!(16, "bce")),
            ERA_CE => Some(tinystr!(16, "ce")),
            _ => None,
        }
    }

    /// Returns the month code for a 1-based month value.
    #[must_use]
    pub fn month_code(&self, month: i64) -> Option<TinyAsciiStr<4>> {
        match month {
            1 => Some(tinystr!(4, "M01")),
            2 => Some(tinystr!(4, "M02")),
            3 => Some(tinystr!(4, "M03")),
            4 => Some(tinystr!(4, "M04")),
            5 => Some(tinystr!(4, "M05")),
            6 => Some(tinystr!(4, "M06")),
            7 => Some(tinystr!(4, "M07")),
            8 => Some(tinystr!(4, "M08")),
            9 => Some(tinystr!(4, "M09")),
            10 => Some(tinystr!(4, "M10")),
            11 => Some(tinystr!(4, "M11")),
            12 => Some(tinystr!(4, "M12")),
            _ => None,
        }
    }
}
