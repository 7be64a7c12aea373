use core::str::FromStr;

use crate::{
    civil::{date::round_calendar_duration, Date, Overflow, Time},
    duration::Duration,
    error::{err, Error, ErrorContext},
    fmt::temporal::{DEFAULT_DATETIME_PARSER, DEFAULT_DATETIME_PRINTER},
    round::{self, RoundMode, Unit},
    util::common,
};

/// A calendar date paired with a wall-clock time, with no attached time
/// zone.
///
/// A `DateTime` names a civil moment like `2024-06-15T09:30:00`. It is
/// the input to time zone resolution (see
/// [`TimeZone::to_ambiguous`](crate::tz::TimeZone::to_ambiguous)) and the
/// result of localizing an [`Instant`](crate::Instant).
///
/// # Arithmetic
///
/// Durations are applied calendar-units-first: years and months shift the
/// date (clamping the day), then weeks, days and the clock portion are
/// added exactly, carrying across midnight as needed:
///
/// ```
/// use tempora::{civil::DateTime, ToDuration};
///
/// let dt = DateTime::constant(2020, 2, 28, 23, 0, 0, 0);
/// assert_eq!(
///     dt.checked_add(2.hours())?,
///     DateTime::constant(2020, 2, 29, 1, 0, 0, 0),
/// );
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// The minimum supported datetime, `-271821-04-19T00:00:00`.
    pub const MIN: DateTime =
        DateTime { date: Date::MIN, time: Time::MIN };

    /// The maximum supported datetime, `275760-09-13T23:59:59.999999999`.
    pub const MAX: DateTime =
        DateTime { date: Date::MAX, time: Time::MAX };

    /// Creates a datetime from its components, in `const` context.
    ///
    /// # Panics
    ///
    /// When any component is out of range. Use [`DateTime::new`] for a
    /// fallible constructor.
    pub const fn constant(
        year: i32,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> DateTime {
        DateTime {
            date: Date::constant(year, month, day),
            time: Time::constant(hour, minute, second, subsec_nanosecond),
        }
    }

    /// Creates a datetime from its components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Result<DateTime, Error> {
        Ok(DateTime {
            date: Date::new(year, month, day)?,
            time: Time::new(hour, minute, second, subsec_nanosecond)?,
        })
    }

    /// Combines a date and a time into a datetime.
    pub fn from_parts(date: Date, time: Time) -> DateTime {
        DateTime { date, time }
    }

    /// Creates a datetime from possibly out-of-range components, resolved
    /// according to the given [`Overflow`] strategy.
    ///
    /// The date and time components are resolved by [`Date::from_fields`]
    /// and [`Time::from_fields`] respectively. Under [`Overflow::Balance`],
    /// whole days spilled by the time components carry into the date:
    ///
    /// ```
    /// use tempora::civil::{DateTime, Overflow};
    ///
    /// let dt = DateTime::from_fields(
    ///     2024, 2, 28, 25, 0, 0, 0, Overflow::Balance,
    /// )?;
    /// assert_eq!(dt, DateTime::constant(2024, 2, 29, 1, 0, 0, 0));
    /// # Ok::<(), tempora::Error>(())
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        year: i32,
        month: i8,
        day: i8,
        hour: i64,
        minute: i64,
        second: i64,
        subsec_nanosecond: i64,
        overflow: Overflow,
    ) -> Result<DateTime, Error> {
        let (time, days) = Time::from_fields(
            hour,
            minute,
            second,
            subsec_nanosecond,
            overflow,
        )?;
        let mut date = Date::from_fields(year, month, day, overflow)?;
        if days != 0 {
            date = Date::from_epoch_days(
                date.to_epoch_days()
                    .checked_add(days)
                    .ok_or_else(|| err!("day overflows date range"))?,
            )?;
        }
        Ok(DateTime { date, time })
    }

    /// Returns the date component.
    pub fn date(self) -> Date {
        self.date
    }

    /// Returns the time component.
    pub fn time(self) -> Time {
        self.time
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.date.year()
    }

    /// Returns the month, in `1..=12`.
    pub fn month(self) -> i8 {
        self.date.month()
    }

    /// Returns the day of the month.
    pub fn day(self) -> i8 {
        self.date.day()
    }

    /// Returns the hour, in `0..=23`.
    pub fn hour(self) -> i8 {
        self.time.hour()
    }

    /// Returns the minute, in `0..=59`.
    pub fn minute(self) -> i8 {
        self.time.minute()
    }

    /// Returns the second, in `0..=59`.
    pub fn second(self) -> i8 {
        self.time.second()
    }

    /// Returns everything below a second as nanoseconds.
    pub fn subsec_nanosecond(self) -> i32 {
        self.time.subsec_nanosecond()
    }

    /// Returns this datetime with the time set to midnight.
    pub fn start_of_day(self) -> DateTime {
        DateTime { date: self.date, time: Time::midnight() }
    }

    /// Returns the number of nanoseconds between this civil datetime and
    /// the civil Unix epoch, `1970-01-01T00:00:00`.
    ///
    /// This is a civil quantity, ignorant of time zones.
    pub(crate) fn to_nanosecond(self) -> i128 {
        i128::from(self.date.to_epoch_days())
            * i128::from(common::NANOS_PER_DAY)
            + i128::from(self.time.to_nanosecond())
    }

    /// Creates a datetime from a number of civil nanoseconds since the
    /// civil Unix epoch.
    pub(crate) fn from_nanosecond(nanos: i128) -> Result<DateTime, Error> {
        let day_nanos = i128::from(common::NANOS_PER_DAY);
        let days = i64::try_from(nanos.div_euclid(day_nanos))
            .map_err(|_| err!("civil nanosecond count out of range"))?;
        let time_nanos = nanos.rem_euclid(day_nanos) as i64;
        Ok(DateTime {
            date: Date::from_epoch_days(days)?,
            time: Time::from_nanosecond(time_nanos),
        })
    }

    /// Adds the given duration to this datetime.
    ///
    /// # Errors
    ///
    /// When the result falls outside the supported datetime range.
    pub fn checked_add(self, duration: Duration) -> Result<DateTime, Error> {
        self.checked_add_with(duration, Overflow::Constrain)
    }

    /// Adds the given duration to this datetime, resolving a clamped day
    /// of month according to the given [`Overflow`] strategy.
    pub fn checked_add_with(
        self,
        duration: Duration,
        overflow: Overflow,
    ) -> Result<DateTime, Error> {
        let (time, spilled_days) = self.time.overflowing_add(duration);
        let days = duration
            .get_days()
            .checked_add(spilled_days)
            .ok_or_else(|| err!("day count in duration overflows"))?;
        let date_duration = duration.date_part().try_days(days)?;
        let date = self.date.checked_add_with(date_duration, overflow)?;
        Ok(DateTime { date, time })
    }

    /// Subtracts the given duration from this datetime.
    pub fn checked_sub(self, duration: Duration) -> Result<DateTime, Error> {
        self.checked_add(duration.negate())
    }

    /// Adds the given duration, clamping to [`DateTime::MIN`] or
    /// [`DateTime::MAX`] instead of erroring.
    pub fn saturating_add(self, duration: Duration) -> DateTime {
        self.checked_add(duration).unwrap_or_else(|_| {
            if duration.is_negative() {
                DateTime::MIN
            } else {
                DateTime::MAX
            }
        })
    }

    /// Subtracts the given duration, clamping to the supported range.
    pub fn saturating_sub(self, duration: Duration) -> DateTime {
        self.saturating_add(duration.negate())
    }

    /// Returns the duration from this datetime to the given datetime.
    ///
    /// Pass a [`DateTime`] for the default behavior (a duration of whole
    /// days plus a clock portion), or a [`DateTimeDifference`] to
    /// configure units and rounding. The unrounded result satisfies
    /// `dt1.checked_add(dt1.until(dt2)) == dt2`.
    ///
    /// ```
    /// use tempora::{civil::DateTime, ToDuration, Unit};
    ///
    /// let dt1 = DateTime::constant(2020, 1, 31, 22, 0, 0, 0);
    /// let dt2 = DateTime::constant(2020, 3, 1, 1, 30, 0, 0);
    /// assert_eq!(
    ///     dt1.until((Unit::Month, dt2))?,
    ///     1.month().hours(3).minutes(30),
    /// );
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn until<A: Into<DateTimeDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: DateTimeDifference = other.into();
        args.until_from(self)
    }

    /// Returns the duration from the given datetime to this datetime.
    ///
    /// `a.since(b)` is precisely `b.until(a)`.
    pub fn since<A: Into<DateTimeDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: DateTimeDifference = other.into();
        let flipped = DateTimeDifference { datetime: self, ..args };
        flipped.until_from(args.datetime)
    }

    /// Rounds this datetime to the given unit, increment and mode.
    ///
    /// Pass a [`Unit`] or a [`DateTimeRound`]. The largest permitted unit
    /// is [`Unit::Day`], which rounds to the nearest midnight.
    pub fn round<A: Into<DateTimeRound>>(
        self,
        options: A,
    ) -> Result<DateTime, Error> {
        let options: DateTimeRound = options.into();
        options.round(self)
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "DateTime({self})")
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;
        DEFAULT_DATETIME_PRINTER
            .print_datetime(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<DateTime, Error> {
        DEFAULT_DATETIME_PARSER.parse_datetime(string.as_bytes())
    }
}

impl Default for DateTime {
    fn default() -> DateTime {
        DateTime::from_parts(Date::default(), Time::default())
    }
}

/// Options for [`DateTime::until`] and [`DateTime::since`].
///
/// The default largest unit is [`Unit::Day`], the default smallest unit
/// is [`Unit::Nanosecond`], the default increment is `1` and the default
/// rounding mode is [`RoundMode::Trunc`].
#[derive(Clone, Copy, Debug)]
pub struct DateTimeDifference {
    datetime: DateTime,
    largest: Option<Unit>,
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl DateTimeDifference {
    /// Creates options for computing the duration until the given
    /// datetime.
    pub fn new(datetime: DateTime) -> DateTimeDifference {
        DateTimeDifference {
            datetime,
            largest: None,
            smallest: Unit::Nanosecond,
            mode: RoundMode::Trunc,
            increment: 1,
        }
    }

    /// Sets the largest allowed unit in the result.
    pub fn largest(self, unit: Unit) -> DateTimeDifference {
        DateTimeDifference { largest: Some(unit), ..self }
    }

    /// Sets the smallest allowed unit in the result.
    pub fn smallest(self, unit: Unit) -> DateTimeDifference {
        DateTimeDifference { smallest: unit, ..self }
    }

    /// Sets the rounding mode applied to the smallest unit.
    pub fn mode(self, mode: RoundMode) -> DateTimeDifference {
        DateTimeDifference { mode, ..self }
    }

    /// Sets the rounding increment for the smallest unit.
    pub fn increment(self, increment: i64) -> DateTimeDifference {
        DateTimeDifference { increment, ..self }
    }

    fn effective_largest(&self) -> Unit {
        self.largest.unwrap_or_else(|| self.smallest.max(Unit::Day))
    }

    fn until_from(&self, from: DateTime) -> Result<Duration, Error> {
        let largest = self.effective_largest();
        if largest < self.smallest {
            return Err(Error::option(format_args!(
                "largest unit ({largest}) must not be smaller than the \
                 smallest unit ({smallest})",
                largest = largest.plural(),
                smallest = self.smallest.plural(),
            )));
        }
        round::increment(self.smallest, self.increment)?;
        let unrounded = until_with_largest_unit(largest, from, self.datetime)?;
        if self.mode == RoundMode::Trunc
            && self.increment == 1
            && self.smallest == Unit::Nanosecond
        {
            return Ok(unrounded);
        }
        if self.smallest >= Unit::Day {
            return round_calendar_duration(
                unrounded,
                self.smallest,
                self.mode,
                self.increment,
                largest,
                |d| {
                    let landed = from.checked_add(d)?;
                    Ok(self.datetime.to_nanosecond() - landed.to_nanosecond())
                },
            );
        }
        round_time_portion(
            unrounded,
            self.smallest,
            self.mode,
            self.increment,
            largest,
        )
    }
}

impl From<DateTime> for DateTimeDifference {
    fn from(datetime: DateTime) -> DateTimeDifference {
        DateTimeDifference::new(datetime)
    }
}

impl From<(Unit, DateTime)> for DateTimeDifference {
    fn from((largest, datetime): (Unit, DateTime)) -> DateTimeDifference {
        DateTimeDifference::new(datetime).largest(largest)
    }
}

/// Computes the balanced duration from `dt1` to `dt2` with the given
/// largest unit and no rounding.
fn until_with_largest_unit(
    largest: Unit,
    dt1: DateTime,
    dt2: DateTime,
) -> Result<Duration, Error> {
    if largest.is_time_unit() {
        let nanos = dt2.to_nanosecond() - dt1.to_nanosecond();
        return Duration::from_time_nanoseconds(largest, nanos);
    }
    let sign = match dt2.cmp(&dt1) {
        core::cmp::Ordering::Equal => return Ok(Duration::ZERO),
        core::cmp::Ordering::Greater => 1,
        core::cmp::Ordering::Less => -1,
    };
    let mut date2 = dt2.date();
    let mut time_nanos =
        dt2.time().to_nanosecond() - dt1.time().to_nanosecond();
    // When the wall-clock delta opposes the overall direction, borrow one
    // civil day from the date delta.
    if time_nanos != 0 && i64::from(time_nanos.signum()) != i64::from(sign) {
        if sign > 0 {
            date2 = date2.yesterday()?;
            time_nanos += common::NANOS_PER_DAY;
        } else {
            date2 = date2.tomorrow()?;
            time_nanos -= common::NANOS_PER_DAY;
        }
    }
    let date_part = dt1.date().until_with_largest_unit(largest, date2)?;
    let time_part =
        Duration::from_time_nanoseconds(Unit::Hour, i128::from(time_nanos))?;
    Duration::from_fields(
        date_part.get_years(),
        date_part.get_months(),
        date_part.get_weeks(),
        date_part.get_days(),
        time_part.get_hours(),
        time_part.get_minutes(),
        time_part.get_seconds(),
        time_part.get_milliseconds(),
        time_part.get_microseconds(),
        time_part.get_nanoseconds(),
    )
}

/// Rounds the clock portion of a balanced duration at a clock unit,
/// carrying a full day of rounded-up time into the day field.
///
/// A civil day is invariantly 24 hours, so the carry is exact and no
/// calendar re-bracketing is needed.
fn round_time_portion(
    duration: Duration,
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
    largest: Unit,
) -> Result<Duration, Error> {
    let increment = round::increment(smallest, increment)?
        * i128::from(smallest.nanoseconds());
    let time_nanos = duration.time_nanoseconds();
    let rounded = round::round_by(mode, time_nanos, increment);
    let day_nanos = i128::from(common::NANOS_PER_DAY);
    let (extra_days, rounded) = if rounded.abs() >= day_nanos {
        let days = i64::try_from(rounded / day_nanos)
            .map_err(|_| err!("rounded duration overflows"))?;
        (days, rounded % day_nanos)
    } else {
        (0, rounded)
    };
    let time_largest = if largest.is_time_unit() { largest } else { Unit::Hour };
    let time = Duration::from_time_nanoseconds(time_largest, rounded)?;
    let days = duration
        .get_days()
        .checked_add(extra_days)
        .ok_or_else(|| err!("rounded duration overflows"))?;
    Duration::from_fields(
        duration.get_years(),
        duration.get_months(),
        duration.get_weeks(),
        days,
        time.get_hours(),
        time.get_minutes(),
        time.get_seconds(),
        time.get_milliseconds(),
        time.get_microseconds(),
        time.get_nanoseconds(),
    )
}

/// Options for [`DateTime::round`].
///
/// The default smallest unit is [`Unit::Nanosecond`] (a no-op), the
/// default increment is `1` and the default mode is
/// [`RoundMode::Nearest`].
#[derive(Clone, Copy, Debug)]
pub struct DateTimeRound {
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl DateTimeRound {
    /// Creates rounding options with the defaults described above.
    pub fn new() -> DateTimeRound {
        DateTimeRound {
            smallest: Unit::Nanosecond,
            mode: RoundMode::Nearest,
            increment: 1,
        }
    }

    /// Sets the unit to round to. At most [`Unit::Day`].
    pub fn smallest(self, unit: Unit) -> DateTimeRound {
        DateTimeRound { smallest: unit, ..self }
    }

    /// Sets the rounding mode.
    pub fn mode(self, mode: RoundMode) -> DateTimeRound {
        DateTimeRound { mode, ..self }
    }

    /// Sets the rounding increment.
    pub fn increment(self, increment: i64) -> DateTimeRound {
        DateTimeRound { increment, ..self }
    }

    fn round(&self, datetime: DateTime) -> Result<DateTime, Error> {
        if self.smallest > Unit::Day {
            return Err(Error::option(format_args!(
                "rounding a datetime requires a unit of days or smaller, \
                 but got {unit}",
                unit = self.smallest.plural(),
            )));
        }
        if self.smallest == Unit::Day {
            if self.increment != 1 {
                return Err(Error::option(format_args!(
                    "rounding a datetime to days requires an increment \
                     of 1, but got {increment}",
                    increment = self.increment,
                )));
            }
            let rounded = round::round_by(
                self.mode,
                i128::from(datetime.time().to_nanosecond()),
                i128::from(common::NANOS_PER_DAY),
            );
            let date = if rounded == 0 {
                datetime.date()
            } else {
                datetime.date().tomorrow().context(err!(
                    "rounding {datetime} to days overflows",
                ))?
            };
            return Ok(date.to_datetime(Time::midnight()));
        }
        let increment = round::increment(self.smallest, self.increment)?
            * i128::from(self.smallest.nanoseconds());
        let time_nanos = i128::from(datetime.time().to_nanosecond());
        let rounded = round::round_by(self.mode, time_nanos, increment);
        // Clock increments divide evenly into a day, so the only possible
        // spill is exactly one day.
        if rounded >= i128::from(common::NANOS_PER_DAY) {
            let date = datetime.date().tomorrow().context(err!(
                "rounding {datetime} overflows",
            ))?;
            return Ok(date.to_datetime(Time::midnight()));
        }
        let time = Time::from_nanosecond(rounded as i64);
        Ok(datetime.date().to_datetime(time))
    }
}

impl Default for DateTimeRound {
    fn default() -> DateTimeRound {
        DateTimeRound::new()
    }
}

impl From<Unit> for DateTimeRound {
    fn from(unit: Unit) -> DateTimeRound {
        DateTimeRound::new().smallest(unit)
    }
}

impl From<(Unit, i64)> for DateTimeRound {
    fn from((unit, increment): (Unit, i64)) -> DateTimeRound {
        DateTimeRound::new().smallest(unit).increment(increment)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        DateTime::from_parts(Date::arbitrary(g), Time::arbitrary(g))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::ToDuration;

    use super::*;

    #[test]
    fn from_fields_balances_into_date() {
        let dt = DateTime::from_fields(
            2023, 12, 31, 23, 59, 61, 0, Overflow::Balance,
        )
        .unwrap();
        assert_eq!(dt, DateTime::constant(2024, 1, 1, 0, 0, 1, 0));

        let dt = DateTime::from_fields(
            2024, 2, 30, 23, 0, 0, 0, Overflow::Constrain,
        )
        .unwrap();
        assert_eq!(dt, DateTime::constant(2024, 2, 29, 23, 0, 0, 0));

        let err = DateTime::from_fields(
            2024, 2, 30, 0, 0, 0, 0, Overflow::Reject,
        )
        .unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn add_carries_across_midnight() {
        let dt = DateTime::constant(2020, 2, 28, 23, 0, 0, 0);
        assert_eq!(
            dt.checked_add(2.hours()).unwrap(),
            DateTime::constant(2020, 2, 29, 1, 0, 0, 0),
        );
        assert_eq!(
            dt.checked_sub(1.day().nanoseconds(1)).unwrap(),
            DateTime::constant(2020, 2, 27, 22, 59, 59, 999_999_999),
        );
    }

    #[test]
    fn add_calendar_units_first() {
        let dt = DateTime::constant(2020, 1, 31, 12, 0, 0, 0);
        // One month clamps to Feb 29 before the clock portion applies.
        assert_eq!(
            dt.checked_add(1.month().hours(13)).unwrap(),
            DateTime::constant(2020, 3, 1, 1, 0, 0, 0),
        );
    }

    #[test]
    fn add_out_of_range() {
        assert!(DateTime::MAX.checked_add(1.nanosecond()).is_err());
        assert!(DateTime::MIN.checked_sub(1.nanosecond()).is_err());
        assert_eq!(
            DateTime::MAX.saturating_add(1.hour()),
            DateTime::MAX,
        );
        assert_eq!(
            DateTime::MIN.saturating_sub(1.hour()),
            DateTime::MIN,
        );
    }

    #[test]
    fn until_default_days() {
        let dt1 = DateTime::constant(2020, 1, 31, 22, 0, 0, 0);
        let dt2 = DateTime::constant(2020, 3, 1, 1, 30, 0, 0);
        let got = dt1.until(dt2).unwrap();
        assert_eq!(got, 29.days().hours(3).minutes(30));
        assert_eq!(dt1.checked_add(got).unwrap(), dt2);
    }

    #[test]
    fn until_borrows_a_day() {
        // The wall-clock delta is negative while the overall difference
        // is positive, so a day is borrowed from the date delta.
        let dt1 = DateTime::constant(2020, 1, 1, 22, 0, 0, 0);
        let dt2 = DateTime::constant(2020, 1, 3, 1, 0, 0, 0);
        assert_eq!(dt1.until(dt2).unwrap(), 1.day().hours(3));
        assert_eq!(dt2.until(dt1).unwrap(), (-1).day().hours(-3));
    }

    #[test]
    fn until_months() {
        let dt1 = DateTime::constant(2020, 1, 31, 22, 0, 0, 0);
        let dt2 = DateTime::constant(2020, 3, 1, 1, 30, 0, 0);
        let got = dt1.until((Unit::Month, dt2)).unwrap();
        assert_eq!(got, 1.month().hours(3).minutes(30));
        assert_eq!(dt1.checked_add(got).unwrap(), dt2);
    }

    #[test]
    fn until_time_largest() {
        let dt1 = DateTime::constant(2020, 1, 1, 0, 0, 0, 0);
        let dt2 = DateTime::constant(2020, 1, 3, 12, 0, 0, 0);
        assert_eq!(dt1.until((Unit::Hour, dt2)).unwrap(), 60.hours());
        assert_eq!(
            dt1.until((Unit::Minute, dt2)).unwrap(),
            3600.minutes(),
        );
    }

    #[test]
    fn until_rounds_time_with_day_carry() {
        let dt1 = DateTime::constant(2020, 1, 1, 0, 0, 0, 0);
        let dt2 = DateTime::constant(2020, 1, 2, 23, 40, 0, 0);
        let got = dt1
            .until(
                DateTimeDifference::new(dt2)
                    .smallest(Unit::Hour)
                    .mode(RoundMode::Nearest),
            )
            .unwrap();
        assert_eq!(got, 2.days());
    }

    #[test]
    fn until_rounds_calendar_units() {
        let dt1 = DateTime::constant(2019, 1, 8, 0, 0, 0, 0);
        let dt2 = DateTime::constant(2021, 9, 7, 12, 0, 0, 0);
        let years = |mode| {
            dt1.until(
                DateTimeDifference::new(dt2)
                    .smallest(Unit::Year)
                    .mode(mode),
            )
            .unwrap()
        };
        assert_eq!(years(RoundMode::Nearest), 3.years());
        assert_eq!(years(RoundMode::Trunc), 2.years());
    }

    #[test]
    fn since_mirrors_until() {
        let dt1 = DateTime::constant(2020, 1, 31, 22, 0, 0, 0);
        let dt2 = DateTime::constant(2020, 3, 1, 1, 30, 0, 0);
        assert_eq!(dt2.since(dt1).unwrap(), dt1.until(dt2).unwrap());
    }

    #[test]
    fn round_to_minutes() {
        let dt = DateTime::constant(2024, 6, 15, 13, 37, 31, 0);
        assert_eq!(
            dt.round(Unit::Minute).unwrap(),
            DateTime::constant(2024, 6, 15, 13, 38, 0, 0),
        );
        assert_eq!(
            dt.round((Unit::Minute, 30)).unwrap(),
            DateTime::constant(2024, 6, 15, 13, 30, 0, 0),
        );
    }

    #[test]
    fn round_carries_into_next_day() {
        let dt = DateTime::constant(2020, 2, 28, 23, 59, 59, 999_999_999);
        assert_eq!(
            dt.round(Unit::Second).unwrap(),
            DateTime::constant(2020, 2, 29, 0, 0, 0, 0),
        );
        assert_eq!(
            dt.round(Unit::Day).unwrap(),
            DateTime::constant(2020, 2, 29, 0, 0, 0, 0),
        );
        assert_eq!(
            DateTime::constant(2020, 2, 28, 11, 0, 0, 0)
                .round(Unit::Day)
                .unwrap(),
            DateTime::constant(2020, 2, 28, 0, 0, 0, 0),
        );
    }

    #[test]
    fn round_rejects_calendar_units() {
        let dt = DateTime::constant(2024, 6, 15, 12, 0, 0, 0);
        assert!(dt.round(Unit::Month).is_err());
        assert!(dt.round((Unit::Day, 2)).is_err());
    }

    #[test]
    fn civil_nanosecond_round_trip() {
        let dt = DateTime::constant(2024, 6, 15, 13, 37, 31, 123_456_789);
        assert_eq!(
            DateTime::from_nanosecond(dt.to_nanosecond()).unwrap(),
            dt,
        );
        assert_eq!(DateTime::default().to_nanosecond(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(
            "2024-06-15T09:30:00",
            DateTime::constant(2024, 6, 15, 9, 30, 0, 0).to_string(),
        );
        assert_eq!(
            "2020-02-29T23:59:59.999999999",
            DateTime::constant(2020, 2, 29, 23, 59, 59, 999_999_999)
                .to_string(),
        );
    }

    quickcheck::quickcheck! {
        fn prop_until_then_add_is_identity(
            dt1: DateTime,
            dt2: DateTime
        ) -> bool {
            let duration = dt1.until((Unit::Year, dt2)).unwrap();
            dt1.checked_add(duration).unwrap() == dt2
        }

        fn prop_nanosecond_round_trip(dt: DateTime) -> bool {
            DateTime::from_nanosecond(dt.to_nanosecond()).unwrap() == dt
        }

        fn prop_add_then_sub_is_identity(
            dt: DateTime,
            duration: crate::Duration
        ) -> bool {
            // Clamping makes calendar arithmetic non-invertible, so only
            // exercise the exact fields.
            let d = duration.time_part().days(duration.get_days());
            match dt.checked_add(d) {
                Ok(shifted) => shifted.checked_sub(d).unwrap() == dt,
                Err(_) => true,
            }
        }
    }
}
