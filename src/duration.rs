use core::str::FromStr;

use crate::{
    error::{err, Error, ErrorContext},
    fmt::temporal::{DEFAULT_DURATION_PARSER, DEFAULT_DURATION_PRINTER},
    round::Unit,
    util::common,
};

/// A signed span of time represented via a mixture of calendar and clock
/// units.
///
/// A duration has ten fields: years, months, weeks, days, hours, minutes,
/// seconds, milliseconds, microseconds and nanoseconds. Durations are the
/// inputs to routines like [`Date::checked_add`](crate::civil::Date) and
/// the outputs of routines like [`DateTime::until`](crate::civil::DateTime).
///
/// # Uniform sign
///
/// All fields of a duration must have the same sign: either every field is
/// non-negative or every field is non-positive. Attempting to construct a
/// mixed-sign duration is an error (or a panic, for the infallible builder
/// methods).
///
/// ```
/// use tempora::ToDuration;
///
/// let duration = 1.year().months(2).days(3);
/// assert_eq!(duration.to_string(), "P1Y2M3D");
/// assert!(duration.try_hours(-5).is_err());
/// assert_eq!((-duration).to_string(), "-P1Y2M3D");
/// ```
///
/// # Sub-second normalization
///
/// The millisecond, microsecond and nanosecond fields are always kept
/// below `1000` in magnitude, with any excess carried into the next larger
/// field at construction time:
///
/// ```
/// use tempora::Duration;
///
/// let duration = Duration::from_fields(0, 0, 0, 0, 0, 0, 1, 1_500, 0, 0)?;
/// assert_eq!(duration.get_seconds(), 2);
/// assert_eq!(duration.get_milliseconds(), 500);
/// # Ok::<(), tempora::Error>(())
/// ```
///
/// # Building durations
///
/// A zero duration can be extended field by field via the builder methods,
/// but the terser way is the [`ToDuration`] extension trait on integers:
///
/// ```
/// use tempora::{Duration, ToDuration};
///
/// assert_eq!(Duration::new().days(5).hours(8), 5.days().hours(8));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Duration {
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
    microseconds: i64,
    nanoseconds: i64,
}

/// The maximum absolute value for each field, keeping negation and
/// sub-second normalization free of `i64` overflow while comfortably
/// covering the span between the minimum and maximum supported datetimes.
const MAX_YEARS: i64 = 600_000;
const MAX_MONTHS: i64 = 7_200_000;
const MAX_WEEKS: i64 = 28_600_000;
const MAX_DAYS: i64 = 200_000_002;
const MAX_HOURS: i64 = 4_800_000_048;
const MAX_MINUTES: i64 = 288_000_002_880;
const MAX_SECONDS: i64 = 17_280_000_172_800;
const MAX_MILLISECONDS: i64 = 17_280_000_172_800_000;
const MAX_MICROSECONDS: i64 = i64::MAX;
const MAX_NANOSECONDS: i64 = i64::MAX;

impl Duration {
    /// A duration of zero time.
    pub const ZERO: Duration = Duration {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
        microseconds: 0,
        nanoseconds: 0,
    };

    /// Creates a new duration from all ten fields.
    ///
    /// The fields given may be unbalanced (e.g., `hours=25`), except that
    /// the sub-second fields are normalized to below `1000` in magnitude
    /// by carrying into the next larger field.
    ///
    /// # Errors
    ///
    /// When the fields do not all share the same sign, or when any field is
    /// outside its supported range.
    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        years: i64,
        months: i64,
        weeks: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        microseconds: i64,
        nanoseconds: i64,
    ) -> Result<Duration, Error> {
        let duration = Duration {
            years,
            months,
            weeks,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        };
        duration.check_uniform_sign()?;
        for (unit, value) in duration.fields() {
            range_check(unit, value)?;
        }
        duration.normalized()
    }

    /// Creates a new zero duration.
    ///
    /// This is equivalent to [`Duration::ZERO`]. It exists so that the
    /// builder methods have a natural starting point.
    pub fn new() -> Duration {
        Duration::ZERO
    }
}

/// Infallible and fallible builder methods, one pair per field.
///
/// The infallible methods panic where the fallible ones error: when the
/// value is out of range or would give the duration mixed signs.
macro_rules! duration_builder {
    ($field:ident, $try_set:ident, $unit:expr) => {
        impl Duration {
            #[doc = concat!(
                "Returns a new duration with the ",
                stringify!($field),
                " field set to the given value.\n\n\
                 # Panics\n\n\
                 When the value is out of range or its sign conflicts \
                 with the other fields. Use the `try_` variant for a \
                 fallible version."
            )]
            pub fn $field(self, $field: i64) -> Duration {
                self.$try_set($field).expect("invalid duration field")
            }

            #[doc = concat!(
                "Returns a new duration with the ",
                stringify!($field),
                " field set to the given value, or an error if the value \
                 is out of range or its sign conflicts with the other \
                 fields."
            )]
            pub fn $try_set(self, $field: i64) -> Result<Duration, Error> {
                range_check($unit, $field)?;
                let duration = Duration { $field, ..self };
                duration.check_uniform_sign()?;
                duration.normalized()
            }
        }
    };
}

duration_builder!(years, try_years, Unit::Year);
duration_builder!(months, try_months, Unit::Month);
duration_builder!(weeks, try_weeks, Unit::Week);
duration_builder!(days, try_days, Unit::Day);
duration_builder!(hours, try_hours, Unit::Hour);
duration_builder!(minutes, try_minutes, Unit::Minute);
duration_builder!(seconds, try_seconds, Unit::Second);
duration_builder!(milliseconds, try_milliseconds, Unit::Millisecond);
duration_builder!(microseconds, try_microseconds, Unit::Microsecond);
duration_builder!(nanoseconds, try_nanoseconds, Unit::Nanosecond);

impl Duration {
    /// Returns the number of years in this duration.
    pub fn get_years(&self) -> i64 {
        self.years
    }

    /// Returns the number of months in this duration.
    pub fn get_months(&self) -> i64 {
        self.months
    }

    /// Returns the number of weeks in this duration.
    pub fn get_weeks(&self) -> i64 {
        self.weeks
    }

    /// Returns the number of days in this duration.
    pub fn get_days(&self) -> i64 {
        self.days
    }

    /// Returns the number of hours in this duration.
    pub fn get_hours(&self) -> i64 {
        self.hours
    }

    /// Returns the number of minutes in this duration.
    pub fn get_minutes(&self) -> i64 {
        self.minutes
    }

    /// Returns the number of seconds in this duration.
    pub fn get_seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the number of milliseconds in this duration.
    pub fn get_milliseconds(&self) -> i64 {
        self.milliseconds
    }

    /// Returns the number of microseconds in this duration.
    pub fn get_microseconds(&self) -> i64 {
        self.microseconds
    }

    /// Returns the number of nanoseconds in this duration.
    pub fn get_nanoseconds(&self) -> i64 {
        self.nanoseconds
    }

    /// Returns this duration with every field negated.
    ///
    /// ```
    /// use tempora::ToDuration;
    ///
    /// assert_eq!(1.day().hours(2).negate(), (-1).day().hours(-2));
    /// ```
    pub fn negate(self) -> Duration {
        // Negation can't overflow because every field is bounded in
        // magnitude by a cap below `i64::MAX`.
        Duration {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
            milliseconds: -self.milliseconds,
            microseconds: -self.microseconds,
            nanoseconds: -self.nanoseconds,
        }
    }

    /// Returns the absolute value of this duration.
    pub fn abs(self) -> Duration {
        if self.is_negative() {
            self.negate()
        } else {
            self
        }
    }

    /// Returns the sign of this duration: `-1`, `0` or `1`.
    ///
    /// Because of the uniform sign invariant, this is the sign of any
    /// non-zero field.
    pub fn signum(&self) -> i8 {
        for (_, value) in self.fields() {
            if value != 0 {
                return value.signum() as i8;
            }
        }
        0
    }

    /// Returns true when every field of this duration is zero.
    pub fn is_zero(&self) -> bool {
        self.signum() == 0
    }

    /// Returns true when this duration is non-zero and its fields are
    /// positive.
    pub fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    /// Returns true when this duration is non-zero and its fields are
    /// negative.
    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// Adds two durations field-wise and re-normalizes the result.
    ///
    /// The calendar fields (years, months, weeks, days) are added
    /// independently. The clock fields are combined via their total
    /// nanosecond value and re-balanced starting from the largest clock
    /// unit present in either input.
    ///
    /// # Errors
    ///
    /// When a field overflows its supported range, or when the sum has
    /// calendar and clock portions of opposite signs (which cannot be
    /// reconciled without a relative datetime).
    pub fn checked_add(self, other: Duration) -> Result<Duration, Error> {
        let add = |what, a: i64, b: i64| {
            let sum = a.checked_add(b).ok_or_else(|| {
                err!("adding {b} {what} to {a} {what} overflows")
            })?;
            Ok::<i64, Error>(sum)
        };
        let years = add("years", self.years, other.years)?;
        let months = add("months", self.months, other.months)?;
        let weeks = add("weeks", self.weeks, other.weeks)?;
        let days = add("days", self.days, other.days)?;

        let largest_time_unit = self
            .largest_unit()
            .max(other.largest_unit())
            .min(Unit::Hour);
        let time_nanos = self
            .time_nanoseconds()
            .checked_add(other.time_nanoseconds())
            .ok_or_else(|| err!("adding durations overflows"))?;
        let time = Duration::from_time_nanoseconds(
            largest_time_unit,
            time_nanos,
        )?;
        Duration::from_fields(
            years,
            months,
            weeks,
            days,
            time.hours,
            time.minutes,
            time.seconds,
            time.milliseconds,
            time.microseconds,
            time.nanoseconds,
        )
        .context(err!("failed to add {self} to {other}"))
    }

    /// Subtracts `other` from this duration. Equivalent to
    /// `self.checked_add(other.negate())`.
    pub fn checked_sub(self, other: Duration) -> Result<Duration, Error> {
        self.checked_add(other.negate())
    }
}

impl Duration {
    /// The largest non-zero unit in this duration, or `Unit::Nanosecond`
    /// when the duration is zero.
    pub(crate) fn largest_unit(&self) -> Unit {
        for (unit, value) in self.fields() {
            if value != 0 {
                return unit;
            }
        }
        Unit::Nanosecond
    }

    /// The total number of nanoseconds in the clock portion (hours and
    /// smaller) of this duration.
    pub(crate) fn time_nanoseconds(&self) -> i128 {
        let mut nanos = i128::from(self.hours)
            * i128::from(common::NANOS_PER_HOUR);
        nanos += i128::from(self.minutes)
            * i128::from(common::NANOS_PER_MINUTE);
        nanos += i128::from(self.seconds)
            * i128::from(common::NANOS_PER_SECOND);
        nanos += i128::from(self.milliseconds) * 1_000_000;
        nanos += i128::from(self.microseconds) * 1_000;
        nanos += i128::from(self.nanoseconds);
        nanos
    }

    /// Decomposes a total number of nanoseconds into a clock-only duration
    /// whose largest non-zero unit is at most `largest`.
    ///
    /// # Errors
    ///
    /// When a field doesn't fit. This can only happen when `largest` is
    /// small (e.g., expressing several centuries in nanoseconds alone).
    pub(crate) fn from_time_nanoseconds(
        largest: Unit,
        nanos: i128,
    ) -> Result<Duration, Error> {
        debug_assert!(largest.is_time_unit() || largest == Unit::Day);
        let largest = if largest == Unit::Day { Unit::Hour } else { largest };
        let mut duration = Duration::ZERO;
        let mut rest = nanos;
        let units = [
            Unit::Hour,
            Unit::Minute,
            Unit::Second,
            Unit::Millisecond,
            Unit::Microsecond,
            Unit::Nanosecond,
        ];
        for unit in units {
            if unit > largest {
                continue;
            }
            let (value, leftover) = if unit == Unit::Nanosecond {
                (rest, 0)
            } else {
                let unit_nanos = i128::from(unit.nanoseconds());
                (rest / unit_nanos, rest % unit_nanos)
            };
            let value = i64::try_from(value).map_err(|_| {
                err!(
                    "duration of {nanos} nanoseconds overflows the \
                     {unit} field",
                    unit = unit.plural(),
                )
            })?;
            range_check(unit, value)?;
            rest = leftover;
            duration = match unit {
                Unit::Hour => Duration { hours: value, ..duration },
                Unit::Minute => Duration { minutes: value, ..duration },
                Unit::Second => Duration { seconds: value, ..duration },
                Unit::Millisecond => {
                    Duration { milliseconds: value, ..duration }
                }
                Unit::Microsecond => {
                    Duration { microseconds: value, ..duration }
                }
                Unit::Nanosecond => {
                    Duration { nanoseconds: value, ..duration }
                }
                _ => unreachable!(),
            };
        }
        debug_assert_eq!(rest, 0);
        Ok(duration)
    }

    /// Returns only the calendar portion (years, months, weeks, days) of
    /// this duration.
    pub(crate) fn date_part(&self) -> Duration {
        Duration {
            years: self.years,
            months: self.months,
            weeks: self.weeks,
            days: self.days,
            ..Duration::ZERO
        }
    }

    /// Returns only the clock portion (hours and smaller) of this
    /// duration.
    pub(crate) fn time_part(&self) -> Duration {
        Duration {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            milliseconds: self.milliseconds,
            microseconds: self.microseconds,
            nanoseconds: self.nanoseconds,
            ..Duration::ZERO
        }
    }

    /// Returns an error when this duration has a non-zero field bigger
    /// than hours. Used by operations on types without a calendar
    /// component.
    pub(crate) fn expect_time_only(
        &self,
        what: &'static str,
    ) -> Result<(), Error> {
        let biggest = self.largest_unit();
        if biggest.is_time_unit() {
            return Ok(());
        }
        Err(Error::duration(format_args!(
            "operation on {what} requires a duration with units of hours \
             or smaller, but it has non-zero {unit}",
            unit = biggest.plural(),
        )))
    }

    /// Returns the value of the given field.
    pub(crate) fn get(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Year => self.years,
            Unit::Month => self.months,
            Unit::Week => self.weeks,
            Unit::Day => self.days,
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
            Unit::Second => self.seconds,
            Unit::Millisecond => self.milliseconds,
            Unit::Microsecond => self.microseconds,
            Unit::Nanosecond => self.nanoseconds,
        }
    }

    /// Returns a copy of this duration with the given field replaced,
    /// bypassing normalization. The caller is responsible for keeping the
    /// uniform sign invariant.
    pub(crate) fn set(&self, unit: Unit, value: i64) -> Duration {
        let mut duration = *self;
        match unit {
            Unit::Year => duration.years = value,
            Unit::Month => duration.months = value,
            Unit::Week => duration.weeks = value,
            Unit::Day => duration.days = value,
            Unit::Hour => duration.hours = value,
            Unit::Minute => duration.minutes = value,
            Unit::Second => duration.seconds = value,
            Unit::Millisecond => duration.milliseconds = value,
            Unit::Microsecond => duration.microseconds = value,
            Unit::Nanosecond => duration.nanoseconds = value,
        }
        duration
    }

    /// All ten fields, from the largest unit down to the smallest.
    pub(crate) fn fields(&self) -> [(Unit, i64); 10] {
        [
            (Unit::Year, self.years),
            (Unit::Month, self.months),
            (Unit::Week, self.weeks),
            (Unit::Day, self.days),
            (Unit::Hour, self.hours),
            (Unit::Minute, self.minutes),
            (Unit::Second, self.seconds),
            (Unit::Millisecond, self.milliseconds),
            (Unit::Microsecond, self.microseconds),
            (Unit::Nanosecond, self.nanoseconds),
        ]
    }

    fn check_uniform_sign(&self) -> Result<(), Error> {
        let mut sign = 0i64;
        for (unit, value) in self.fields() {
            if value == 0 {
                continue;
            }
            if sign == 0 {
                sign = value.signum();
            } else if sign != value.signum() {
                return Err(Error::duration(format_args!(
                    "duration fields must all have the same sign, \
                     but {value} {unit} conflicts with a \
                     {found} larger field",
                    unit = unit.plural(),
                    found = if sign > 0 { "positive" } else { "negative" },
                )));
            }
        }
        Ok(())
    }

    /// Carries sub-second overflow upward so that the millisecond,
    /// microsecond and nanosecond fields are each below 1000 in magnitude.
    fn normalized(mut self) -> Result<Duration, Error> {
        let carry = self.nanoseconds / 1_000;
        self.nanoseconds %= 1_000;
        self.microseconds = self
            .microseconds
            .checked_add(carry)
            .ok_or_else(|| err!("sub-second normalization overflows"))?;
        let carry = self.microseconds / 1_000;
        self.microseconds %= 1_000;
        self.milliseconds = self
            .milliseconds
            .checked_add(carry)
            .ok_or_else(|| err!("sub-second normalization overflows"))?;
        let carry = self.milliseconds / 1_000;
        self.milliseconds %= 1_000;
        self.seconds = self
            .seconds
            .checked_add(carry)
            .ok_or_else(|| err!("sub-second normalization overflows"))?;
        range_check(Unit::Second, self.seconds)?;
        range_check(Unit::Millisecond, self.milliseconds)?;
        Ok(self)
    }
}

fn range_check(unit: Unit, value: i64) -> Result<(), Error> {
    let max = match unit {
        Unit::Year => MAX_YEARS,
        Unit::Month => MAX_MONTHS,
        Unit::Week => MAX_WEEKS,
        Unit::Day => MAX_DAYS,
        Unit::Hour => MAX_HOURS,
        Unit::Minute => MAX_MINUTES,
        Unit::Second => MAX_SECONDS,
        Unit::Millisecond => MAX_MILLISECONDS,
        Unit::Microsecond => MAX_MICROSECONDS,
        Unit::Nanosecond => MAX_NANOSECONDS,
    };
    if value < -max || value > max {
        return Err(Error::range(unit.plural(), value, -max, max));
    }
    Ok(())
}

/// A trait for concisely building durations from integer literals.
///
/// ```
/// use tempora::ToDuration;
///
/// let duration = 5.days().hours(8).minutes(1);
/// assert_eq!(duration.to_string(), "P5DT8H1M");
/// ```
pub trait ToDuration: Sized {
    fn years(self) -> Duration;
    fn months(self) -> Duration;
    fn weeks(self) -> Duration;
    fn days(self) -> Duration;
    fn hours(self) -> Duration;
    fn minutes(self) -> Duration;
    fn seconds(self) -> Duration;
    fn milliseconds(self) -> Duration;
    fn microseconds(self) -> Duration;
    fn nanoseconds(self) -> Duration;

    fn year(self) -> Duration {
        self.years()
    }

    fn month(self) -> Duration {
        self.months()
    }

    fn week(self) -> Duration {
        self.weeks()
    }

    fn day(self) -> Duration {
        self.days()
    }

    fn hour(self) -> Duration {
        self.hours()
    }

    fn minute(self) -> Duration {
        self.minutes()
    }

    fn second(self) -> Duration {
        self.seconds()
    }

    fn millisecond(self) -> Duration {
        self.milliseconds()
    }

    fn microsecond(self) -> Duration {
        self.microseconds()
    }

    fn nanosecond(self) -> Duration {
        self.nanoseconds()
    }
}

macro_rules! impl_to_duration {
    ($ty:ty) => {
        impl ToDuration for $ty {
            fn years(self) -> Duration {
                Duration::ZERO.years(i64::from(self))
            }
            fn months(self) -> Duration {
                Duration::ZERO.months(i64::from(self))
            }
            fn weeks(self) -> Duration {
                Duration::ZERO.weeks(i64::from(self))
            }
            fn days(self) -> Duration {
                Duration::ZERO.days(i64::from(self))
            }
            fn hours(self) -> Duration {
                Duration::ZERO.hours(i64::from(self))
            }
            fn minutes(self) -> Duration {
                Duration::ZERO.minutes(i64::from(self))
            }
            fn seconds(self) -> Duration {
                Duration::ZERO.seconds(i64::from(self))
            }
            fn milliseconds(self) -> Duration {
                Duration::ZERO.milliseconds(i64::from(self))
            }
            fn microseconds(self) -> Duration {
                Duration::ZERO.microseconds(i64::from(self))
            }
            fn nanoseconds(self) -> Duration {
                Duration::ZERO.nanoseconds(i64::from(self))
            }
        }
    };
}

impl_to_duration!(i8);
impl_to_duration!(i16);
impl_to_duration!(i32);
impl_to_duration!(i64);

impl core::ops::Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        self.negate()
    }
}

/// Adds two durations.
///
/// # Panics
///
/// When [`Duration::checked_add`] fails.
impl core::ops::Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        self.checked_add(rhs).expect("duration addition failed")
    }
}

/// Subtracts two durations.
///
/// # Panics
///
/// When [`Duration::checked_sub`] fails.
impl core::ops::Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        self.checked_sub(rhs).expect("duration subtraction failed")
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Duration({self})")
    }
}

/// Prints this duration in the canonical ISO 8601 format, e.g.,
/// `P1Y2M3DT4H5M6.007S`.
impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;
        DEFAULT_DURATION_PRINTER
            .print_duration(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

/// Parses an ISO 8601 duration string, e.g., `P1y2m3dT4h5m6.007s`. The
/// designators are matched case insensitively.
impl FromStr for Duration {
    type Err = Error;

    fn from_str(string: &str) -> Result<Duration, Error> {
        DEFAULT_DURATION_PARSER.parse_duration(string.as_bytes())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        let sign = if bool::arbitrary(g) { 1 } else { -1 };
        let field = |g: &mut quickcheck::Gen, max: i64| {
            sign * (i64::arbitrary(g).rem_euclid(max))
        };
        Duration::from_fields(
            field(g, 10_000),
            field(g, 12),
            field(g, 5),
            field(g, 31),
            field(g, 24),
            field(g, 60),
            field(g, 60),
            field(g, 1_000),
            field(g, 1_000),
            field(g, 1_000),
        )
        .unwrap()
    }
}
