//! Utility date equations for the ISO calendar.
//!
//! All equations work on whole epoch days, counted from 1970-01-01.
//! Months are 0-based here; the field layer applies its own numbering.

/// The earliest year whose every instant fits the `i64` tick range.
pub(crate) const MIN_YEAR: i64 = -27_256;

/// The latest year whose every instant fits the `i64` tick range.
pub(crate) const MAX_YEAR: i64 = 31_196;

/// Determines whether a year is a leap year.
pub(crate) fn is_leap_year(y: i64) -> bool {
    if y % 4 != 0 {
        false
    } else if y % 100 != 0 {
        true
    } else {
        y % 400 == 0
    }
}

pub(crate) fn days_in_year(y: i64) -> i64 {
    if is_leap_year(y) {
        366
    } else {
        365
    }
}

pub(crate) fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + i64::from(is_leap_year(year)),
        _ => unreachable!("days_in_month panicking is an implementation error."),
    }
}

/// Returns the epoch day number of January 1 of the given year.
pub(crate) fn epoch_days_for_year(y: i64) -> i64 {
    365 * (y - 1970) + (y - 1969).div_euclid(4) - (y - 1901).div_euclid(100)
        + (y - 1601).div_euclid(400)
}

/// Returns the year containing the given epoch day.
pub(crate) fn epoch_days_to_year(days: i64) -> i64 {
    // Estimate with a 365-day year, then refine. The estimate lands
    // within a few years of the answer on either side.
    let mut year = days / 365 + 1970;
    while epoch_days_for_year(year) > days {
        year -= 1;
    }
    while epoch_days_for_year(year + 1) <= days {
        year += 1;
    }

    year
}

/// Returns the 0-based month containing a 0-based day of year.
pub(crate) fn month_from_day_of_year(day: i64, in_leap_year: bool) -> i64 {
    const DAYS: [i64; 11] = [30, 58, 89, 119, 150, 180, 211, 242, 272, 303, 333];
    const LEAP_DAYS: [i64; 11] = [30, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let result = if in_leap_year {
        LEAP_DAYS.binary_search(&day)
    } else {
        DAYS.binary_search(&day)
    };

    match result {
        Ok(i) | Err(i) => i as i64,
    }
}

/// Returns the number of days before the given 0-based month.
pub(crate) fn month_start_day(month: i64, in_leap_year: bool) -> i64 {
    let leap_day = i64::from(in_leap_year);

    match month {
        0 => 0,
        1 => 31,
        2 => 59 + leap_day,
        3 => 90 + leap_day,
        4 => 120 + leap_day,
        5 => 151 + leap_day,
        6 => 181 + leap_day,
        7 => 212 + leap_day,
        8 => 243 + leap_day,
        9 => 273 + leap_day,
        10 => 304 + leap_day,
        11 => 334 + leap_day,
        _ => unreachable!("month_start_day panicking is an implementation error."),
    }
}

/// Converts an epoch day to a civil `(year, month, day)` date, with
/// 1-based month and day.
pub(crate) fn civil_from_epoch_days(days: i64) -> (i64, i64, i64) {
    let year = epoch_days_to_year(days);
    let day_of_year = days - epoch_days_for_year(year);
    let leap = is_leap_year(year);
    let month = month_from_day_of_year(day_of_year, leap);
    let day = day_of_year - month_start_day(month, leap) + 1;
    (year, month + 1, day)
}

/// Converts a civil `(year, month, day)` date, 1-based month and day,
/// to an epoch day.
pub(crate) fn epoch_days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    epoch_days_for_year(year) + month_start_day(month - 1, is_leap_year(year)) + day - 1
}

/// Returns the ISO day of week for an epoch day, 1 = Monday through
/// 7 = Sunday. 1970-01-01 was a Thursday.
pub(crate) fn day_of_week(days: i64) -> i64 {
    (days + 3).rem_euclid(7) + 1
}

/// Returns the number of ISO weeks in a week-year, 52 or 53.
pub(crate) fn weeks_in_week_year(year: i64) -> i64 {
    let jan1 = day_of_week(epoch_days_for_year(year));
    // A week-year is long when it starts on Thursday, or on Wednesday
    // in a leap year.
    if jan1 == 4 || (jan1 == 3 && is_leap_year(year)) {
        53
    } else {
        52
    }
}

/// Returns the ISO week-year containing the given epoch day.
pub(crate) fn week_year(days: i64) -> i64 {
    let year = epoch_days_to_year(days);
    let day_of_year = days - epoch_days_for_year(year) + 1;
    let week = (day_of_year - day_of_week(days) + 10).div_euclid(7);
    if week < 1 {
        year - 1
    } else if week > weeks_in_week_year(year) {
        year + 1
    } else {
        year
    }
}

/// Returns the epoch day of the Monday starting week 1 of a week-year.
pub(crate) fn week_year_start_days(year: i64) -> i64 {
    // Week 1 is the week containing January 4.
    let jan4 = epoch_days_for_year(year) + 3;
    jan4 - (day_of_week(jan4) - 1)
}

/// Returns the ISO week of week-year containing the given epoch day.
pub(crate) fn week_of_week_year(days: i64) -> i64 {
    (days - week_year_start_days(week_year(days))).div_euclid(7) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_chain() {
        assert!(is_leap_year(2020));
        assert!(!is_leap_year(2021));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(0));
        assert!(!is_leap_year(-1));
        assert!(is_leap_year(-4));
    }

    #[test]
    fn civil_round_trips() {
        let cases = [
            (1970, 1, 1, 0),
            (1969, 12, 31, -1),
            (2000, 2, 29, 11_016),
            (2000, 3, 1, 11_017),
            (2020, 2, 29, 18_321),
            (1, 1, 1, -719_162),
            (0, 12, 31, -719_163),
            (-1, 1, 1, -719_893),
        ];
        for (y, m, d, days) in cases {
            assert_eq!(epoch_days_from_civil(y, m, d), days, "{y}-{m}-{d}");
            assert_eq!(civil_from_epoch_days(days), (y, m, d), "day {days}");
        }
    }

    #[test]
    fn month_lookup_matches_start_days() {
        for &leap in &[false, true] {
            let total = if leap { 366 } else { 365 };
            for day in 0..total {
                let month = month_from_day_of_year(day, leap);
                assert!(month_start_day(month, leap) <= day);
                if month < 11 {
                    assert!(day < month_start_day(month + 1, leap));
                }
            }
        }
    }

    #[test]
    fn day_of_week_anchors() {
        // 1970-01-01 was a Thursday.
        assert_eq!(day_of_week(0), 4);
        // 2024-01-01 was a Monday.
        assert_eq!(day_of_week(epoch_days_from_civil(2024, 1, 1)), 1);
        // 2000-02-29 was a Tuesday.
        assert_eq!(day_of_week(epoch_days_from_civil(2000, 2, 29)), 2);
    }

    #[test]
    fn iso_week_edges() {
        // 2005-01-01 belongs to 2004-W53.
        let d = epoch_days_from_civil(2005, 1, 1);
        assert_eq!(week_year(d), 2004);
        assert_eq!(week_of_week_year(d), 53);

        // 2007-12-31 belongs to 2008-W01.
        let d = epoch_days_from_civil(2007, 12, 31);
        assert_eq!(week_year(d), 2008);
        assert_eq!(week_of_week_year(d), 1);

        // 2010-01-03 belongs to 2009-W53.
        let d = epoch_days_from_civil(2010, 1, 3);
        assert_eq!(week_year(d), 2009);
        assert_eq!(week_of_week_year(d), 53);

        assert_eq!(weeks_in_week_year(2004), 53);
        assert_eq!(weeks_in_week_year(2009), 53);
        assert_eq!(weeks_in_week_year(2015), 53);
        assert_eq!(weeks_in_week_year(2021), 52);
    }

    #[test]
    fn year_range_fits_ticks() {
        let max_days = epoch_days_from_civil(MAX_YEAR, 12, 31);
        let min_days = epoch_days_from_civil(MIN_YEAR, 1, 1);
        assert!(max_days.checked_mul(crate::TICKS_PER_DAY).is_some());
        assert!(min_days.checked_mul(crate::TICKS_PER_DAY).is_some());
    }
}
