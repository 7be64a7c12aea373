/*!
Calendar math shared by the civil types and the field balancer.

Everything here is `const` and operates on plain primitives so that the
`Date::constant`-style constructors can use it as well. Conversions between
dates and epoch day counts use the algorithms from Howard Hinnant's
`chrono`-compatible [date algorithms], which are exact over the entire
proleptic Gregorian calendar.

[date algorithms]: https://howardhinnant.github.io/date_algorithms.html
*/

/// The number of nanoseconds in one civil 24 hour day.
pub(crate) const NANOS_PER_DAY: i64 = 86_400 * NANOS_PER_SECOND;

/// The number of nanoseconds in one hour.
pub(crate) const NANOS_PER_HOUR: i64 = 3_600 * NANOS_PER_SECOND;

/// The number of nanoseconds in one minute.
pub(crate) const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;

/// The number of nanoseconds in one second.
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Returns true if and only if the given year is a leap year.
///
/// The proleptic Gregorian rule is applied uniformly, including to years
/// before 1 (which use astronomical numbering, so year 0 exists and is a
/// leap year).
#[inline]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given year: 365, or 366 for a leap
/// year.
#[inline]
pub(crate) const fn days_in_year(year: i32) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the number of days in the given year and month.
///
/// This correctly returns `29` when the year is a leap year and the month
/// is February.
///
/// # Panics
///
/// When the month is not in the range `1..=12`.
#[inline]
pub(crate) const fn days_in_month(year: i32, month: i8) -> i8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => panic!("invalid month"),
    }
}

/// Clamps the given day into the number of days in the given year and
/// month. Days below `1` are clamped to `1`.
#[inline]
pub(crate) const fn saturate_day_in_month(
    year: i32,
    month: i8,
    day: i8,
) -> i8 {
    let max = days_in_month(year, month);
    if day > max {
        max
    } else if day < 1 {
        1
    } else {
        day
    }
}

/// Converts a valid Gregorian date to a count of days since the Unix epoch,
/// `1970-01-01`.
#[inline]
pub(crate) const fn to_epoch_days(year: i32, month: i8, day: i8) -> i64 {
    let year = year as i64;
    let month = month as i64;
    let day = day as i64;
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year.rem_euclid(400);
    let adjusted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * adjusted_month + 2) / 5 + day - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Converts a count of days since the Unix epoch to a Gregorian
/// `(year, month, day)` triple. The inverse of [`to_epoch_days`].
#[inline]
pub(crate) const fn from_epoch_days(days: i64) -> (i32, i8, i8) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days.rem_euclid(146_097);
    let year_of_era = (day_of_era - day_of_era / 1_460 + day_of_era / 36_524
        - day_of_era / 146_096)
        / 365;
    let year = year_of_era + era * 400;
    let day_of_year =
        day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let adjusted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * adjusted_month + 2) / 5 + 1;
    let month =
        if adjusted_month < 10 { adjusted_month + 3 } else { adjusted_month - 9 };
    let year = if month <= 2 { year + 1 } else { year };
    (year as i32, month as i8, day as i8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2025));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(1800));
        assert!(is_leap_year(1600));
        assert!(is_leap_year(0));
        assert!(!is_leap_year(-1));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(29, days_in_month(2024, 2));
        assert_eq!(28, days_in_month(2023, 2));
        assert_eq!(28, days_in_month(-9999, 2));
        assert_eq!(31, days_in_month(2024, 1));
        assert_eq!(30, days_in_month(2024, 4));
        assert_eq!(31, days_in_month(2024, 12));
    }

    #[test]
    fn epoch_day_conversion() {
        assert_eq!(0, to_epoch_days(1970, 1, 1));
        assert_eq!(-1, to_epoch_days(1969, 12, 31));
        assert_eq!(19_723, to_epoch_days(2024, 1, 1));
        assert_eq!((1970, 1, 1), from_epoch_days(0));
        assert_eq!((1969, 12, 31), from_epoch_days(-1));

        // Exhaustively round trip a few centuries around the epoch,
        // including the 1900/2000 leap year exceptions.
        let mut days = to_epoch_days(1890, 1, 1);
        let mut date = (1890, 1, 1);
        while date.0 < 2110 {
            assert_eq!(date, {
                let (y, m, d) = from_epoch_days(days);
                (y, m as i32, d as i32)
            });
            assert_eq!(days, to_epoch_days(date.0, date.1 as i8, date.2 as i8));
            days += 1;
            date.2 += 1;
            if date.2 > i32::from(days_in_month(date.0, date.1 as i8)) {
                date.2 = 1;
                date.1 += 1;
                if date.1 > 12 {
                    date.1 = 1;
                    date.0 += 1;
                }
            }
        }
    }
}
