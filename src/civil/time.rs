use core::str::FromStr;

use crate::{
    civil::Overflow,
    duration::Duration,
    error::{err, Error},
    fmt::temporal::{DEFAULT_DATETIME_PARSER, DEFAULT_DATETIME_PRINTER},
    round::{self, RoundMode, Unit},
    util::common,
};

/// A wall-clock time with nanosecond precision.
///
/// A `Time` names a time of day like `09:30:00.000000001`, with no
/// attached date or time zone. Every value from `00:00:00` through
/// `23:59:59.999999999` is representable; leap seconds are not.
///
/// # Arithmetic
///
/// Clock arithmetic comes in two flavors. [`Time::wrapping_add`] wraps
/// around midnight and always succeeds, while [`Time::checked_add`]
/// errors when the result would land on a different day:
///
/// ```
/// use tempora::{civil::Time, ToDuration};
///
/// let time = Time::constant(23, 30, 0, 0);
/// assert_eq!(time.wrapping_add(1.hour()), Time::constant(0, 30, 0, 0));
/// assert!(time.checked_add(1.hour()).is_err());
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time {
    hour: i8,
    minute: i8,
    second: i8,
    millisecond: i16,
    microsecond: i16,
    nanosecond: i16,
}

impl Time {
    /// The earliest representable time, `00:00:00`.
    pub const MIN: Time = Time::midnight();

    /// The latest representable time, `23:59:59.999999999`.
    pub const MAX: Time = Time {
        hour: 23,
        minute: 59,
        second: 59,
        millisecond: 999,
        microsecond: 999,
        nanosecond: 999,
    };

    /// Returns `00:00:00`, the first moment of a civil day.
    pub const fn midnight() -> Time {
        Time {
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
            microsecond: 0,
            nanosecond: 0,
        }
    }

    /// Creates a time from its components, in `const` context.
    ///
    /// The `subsec_nanosecond` component covers everything below a
    /// second, in `0..=999_999_999`.
    ///
    /// # Panics
    ///
    /// When any component is out of range. Use [`Time::new`] for a
    /// fallible constructor.
    pub const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Time {
        assert!(0 <= hour && hour <= 23, "hour out of range");
        assert!(0 <= minute && minute <= 59, "minute out of range");
        assert!(0 <= second && second <= 59, "second out of range");
        assert!(
            0 <= subsec_nanosecond && subsec_nanosecond <= 999_999_999,
            "subsecond nanosecond out of range",
        );
        Time {
            hour,
            minute,
            second,
            millisecond: (subsec_nanosecond / 1_000_000) as i16,
            microsecond: ((subsec_nanosecond / 1_000) % 1_000) as i16,
            nanosecond: (subsec_nanosecond % 1_000) as i16,
        }
    }

    /// Creates a time from its components.
    ///
    /// # Errors
    ///
    /// When any component is out of range.
    pub fn new(
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Result<Time, Error> {
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0..=999_999_999).contains(&subsec_nanosecond) {
            return Err(Error::range(
                "subsecond nanosecond",
                subsec_nanosecond,
                0,
                999_999_999,
            ));
        }
        Ok(Time::constant(hour, minute, second, subsec_nanosecond))
    }

    /// Creates a time from possibly out-of-range components, resolved
    /// according to the given [`Overflow`] strategy.
    ///
    /// The second value returned is the number of whole civil days the
    /// components spilled over, for the caller to add into a date. It is
    /// non-zero only under [`Overflow::Balance`], which carries excess
    /// nanoseconds into seconds, seconds into minutes and so on.
    /// [`Overflow::Constrain`] clamps each component into its range and
    /// [`Overflow::Reject`] is equivalent to [`Time::new`].
    ///
    /// ```
    /// use tempora::civil::{Overflow, Time};
    ///
    /// let (time, days) =
    ///     Time::from_fields(23, 0, 65, 0, Overflow::Balance)?;
    /// assert_eq!(time, Time::constant(23, 1, 5, 0));
    /// assert_eq!(days, 0);
    ///
    /// let (time, days) =
    ///     Time::from_fields(25, 0, 0, 0, Overflow::Balance)?;
    /// assert_eq!(time, Time::constant(1, 0, 0, 0));
    /// assert_eq!(days, 1);
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn from_fields(
        hour: i64,
        minute: i64,
        second: i64,
        subsec_nanosecond: i64,
        overflow: Overflow,
    ) -> Result<(Time, i64), Error> {
        match overflow {
            Overflow::Reject => {
                let hour = i8::try_from(hour)
                    .map_err(|_| Error::range("hour", hour, 0, 23))?;
                let minute = i8::try_from(minute)
                    .map_err(|_| Error::range("minute", minute, 0, 59))?;
                let second = i8::try_from(second)
                    .map_err(|_| Error::range("second", second, 0, 59))?;
                let subsec =
                    i32::try_from(subsec_nanosecond).map_err(|_| {
                        Error::range(
                            "subsecond nanosecond",
                            subsec_nanosecond,
                            0,
                            999_999_999,
                        )
                    })?;
                Ok((Time::new(hour, minute, second, subsec)?, 0))
            }
            Overflow::Constrain => {
                let time = Time::constant(
                    hour.clamp(0, 23) as i8,
                    minute.clamp(0, 59) as i8,
                    second.clamp(0, 59) as i8,
                    subsec_nanosecond.clamp(0, 999_999_999) as i32,
                );
                Ok((time, 0))
            }
            Overflow::Balance => {
                let nanos = i128::from(hour)
                    * i128::from(common::NANOS_PER_HOUR)
                    + i128::from(minute)
                        * i128::from(common::NANOS_PER_MINUTE)
                    + i128::from(second)
                        * i128::from(common::NANOS_PER_SECOND)
                    + i128::from(subsec_nanosecond);
                let day_nanos = i128::from(common::NANOS_PER_DAY);
                let days =
                    i64::try_from(nanos.div_euclid(day_nanos)).map_err(
                        |_| err!("time components overflow the day count"),
                    )?;
                let time =
                    Time::from_nanosecond(nanos.rem_euclid(day_nanos) as i64);
                Ok((time, days))
            }
        }
    }

    /// Returns the hour, in `0..=23`.
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the minute, in `0..=59`.
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the second, in `0..=59`.
    pub fn second(self) -> i8 {
        self.second
    }

    /// Returns the millisecond component, in `0..=999`.
    pub fn millisecond(self) -> i16 {
        self.millisecond
    }

    /// Returns the microsecond component, in `0..=999`.
    pub fn microsecond(self) -> i16 {
        self.microsecond
    }

    /// Returns the nanosecond component, in `0..=999`.
    pub fn nanosecond(self) -> i16 {
        self.nanosecond
    }

    /// Returns everything below a second as a number of nanoseconds, in
    /// `0..=999_999_999`.
    pub fn subsec_nanosecond(self) -> i32 {
        i32::from(self.millisecond) * 1_000_000
            + i32::from(self.microsecond) * 1_000
            + i32::from(self.nanosecond)
    }

    /// Returns this time as a number of nanoseconds since midnight, in
    /// `0..NANOS_PER_DAY`.
    pub(crate) fn to_nanosecond(self) -> i64 {
        i64::from(self.hour) * common::NANOS_PER_HOUR
            + i64::from(self.minute) * common::NANOS_PER_MINUTE
            + i64::from(self.second) * common::NANOS_PER_SECOND
            + i64::from(self.subsec_nanosecond())
    }

    /// Creates a time from a number of nanoseconds since midnight.
    ///
    /// The caller must ensure `0 <= nanos < NANOS_PER_DAY`.
    pub(crate) fn from_nanosecond(nanos: i64) -> Time {
        debug_assert!((0..common::NANOS_PER_DAY).contains(&nanos));
        let hour = (nanos / common::NANOS_PER_HOUR) as i8;
        let minute = ((nanos / common::NANOS_PER_MINUTE) % 60) as i8;
        let second = ((nanos / common::NANOS_PER_SECOND) % 60) as i8;
        let subsec = (nanos % common::NANOS_PER_SECOND) as i32;
        Time::constant(hour, minute, second, subsec)
    }

    /// Adds the clock portion of a duration to this time, wrapping around
    /// midnight in both directions. Calendar units are ignored.
    pub fn wrapping_add(self, duration: Duration) -> Time {
        let (time, _) = self.overflowing_add(duration);
        time
    }

    /// Subtracts the clock portion of a duration from this time, wrapping
    /// around midnight.
    pub fn wrapping_sub(self, duration: Duration) -> Time {
        self.wrapping_add(duration.negate())
    }

    /// Adds the clock portion of a duration to this time, returning both
    /// the wrapped time and the number of whole civil days the addition
    /// spilled over (negative when wrapping backwards).
    pub(crate) fn overflowing_add(self, duration: Duration) -> (Time, i64) {
        let nanos = i128::from(self.to_nanosecond())
            + duration.time_nanoseconds();
        let day_nanos = i128::from(common::NANOS_PER_DAY);
        let days = nanos.div_euclid(day_nanos);
        let time_nanos = nanos.rem_euclid(day_nanos);
        // The time-of-day remainder always fits in i64; the day count
        // fits because duration clock fields are bounded.
        (
            Time::from_nanosecond(time_nanos as i64),
            i64::try_from(days).expect("day overflow within duration limits"),
        )
    }

    /// Adds the given duration to this time.
    ///
    /// # Errors
    ///
    /// When the duration has non-zero calendar units (days or bigger), or
    /// when the result would cross a day boundary. Use
    /// [`Time::wrapping_add`] for arithmetic that wraps at midnight.
    pub fn checked_add(self, duration: Duration) -> Result<Time, Error> {
        duration.expect_time_only("a wall-clock time")?;
        let (time, days) = self.overflowing_add(duration);
        if days != 0 {
            return Err(err!(
                "adding {duration} to {self} crosses a day boundary",
            ));
        }
        Ok(time)
    }

    /// Subtracts the given duration from this time, with the same
    /// restrictions as [`Time::checked_add`].
    pub fn checked_sub(self, duration: Duration) -> Result<Time, Error> {
        self.checked_add(duration.negate())
    }

    /// Returns the duration from this time to the given time within a
    /// single civil day.
    ///
    /// Pass a [`Time`] for the default behavior (hours as the largest
    /// unit), or a [`TimeDifference`] for explicit unit and rounding
    /// control.
    ///
    /// ```
    /// use tempora::{civil::Time, ToDuration};
    ///
    /// let t1 = Time::constant(8, 30, 0, 0);
    /// let t2 = Time::constant(14, 0, 30, 0);
    /// assert_eq!(t1.until(t2)?, 5.hours().minutes(30).seconds(30));
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn until<A: Into<TimeDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: TimeDifference = other.into();
        args.until_from(self)
    }

    /// Returns the duration from the given time to this time.
    ///
    /// `a.since(b)` is precisely `b.until(a)`.
    pub fn since<A: Into<TimeDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: TimeDifference = other.into();
        let flipped = TimeDifference { time: self, ..args };
        flipped.until_from(args.time)
    }

    /// Rounds this time to the given unit, increment and mode.
    ///
    /// Pass a [`Unit`] for the common case of rounding to an increment of
    /// one with the default [`RoundMode::Nearest`], or a [`TimeRound`]
    /// for full control.
    ///
    /// # Errors
    ///
    /// When the options are invalid, or when rounding would advance past
    /// `23:59:59.999999999` (times never wrap into the next day).
    pub fn round<A: Into<TimeRound>>(self, options: A) -> Result<Time, Error> {
        let options: TimeRound = options.into();
        options.round(self)
    }
}

impl core::fmt::Debug for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Time({self})")
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;
        DEFAULT_DATETIME_PRINTER
            .print_time(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(string: &str) -> Result<Time, Error> {
        DEFAULT_DATETIME_PARSER.parse_time(string.as_bytes())
    }
}

impl Default for Time {
    fn default() -> Time {
        Time::midnight()
    }
}

/// Options for [`Time::until`] and [`Time::since`].
///
/// The default largest unit is [`Unit::Hour`], the default smallest unit
/// is [`Unit::Nanosecond`], the default increment is `1` and the default
/// rounding mode is [`RoundMode::Trunc`].
#[derive(Clone, Copy, Debug)]
pub struct TimeDifference {
    time: Time,
    largest: Unit,
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl TimeDifference {
    /// Creates options for computing the duration until the given time.
    pub fn new(time: Time) -> TimeDifference {
        TimeDifference {
            time,
            largest: Unit::Hour,
            smallest: Unit::Nanosecond,
            mode: RoundMode::Trunc,
            increment: 1,
        }
    }

    /// Sets the largest allowed unit in the result. Must be a clock unit.
    pub fn largest(self, unit: Unit) -> TimeDifference {
        TimeDifference { largest: unit, ..self }
    }

    /// Sets the smallest allowed unit in the result.
    pub fn smallest(self, unit: Unit) -> TimeDifference {
        TimeDifference { smallest: unit, ..self }
    }

    /// Sets the rounding mode applied to the smallest unit.
    pub fn mode(self, mode: RoundMode) -> TimeDifference {
        TimeDifference { mode, ..self }
    }

    /// Sets the rounding increment for the smallest unit.
    pub fn increment(self, increment: i64) -> TimeDifference {
        TimeDifference { increment, ..self }
    }

    fn until_from(&self, from: Time) -> Result<Duration, Error> {
        for unit in [self.largest, self.smallest] {
            if !unit.is_time_unit() {
                return Err(Error::option(format_args!(
                    "unit for a wall-clock time difference must be hours \
                     or smaller, but got {unit}",
                    unit = unit.plural(),
                )));
            }
        }
        if self.largest < self.smallest {
            return Err(Error::option(format_args!(
                "largest unit ({largest}) must not be smaller than the \
                 smallest unit ({smallest})",
                largest = self.largest.plural(),
                smallest = self.smallest.plural(),
            )));
        }
        let increment = round::increment(self.smallest, self.increment)?;
        let nanos = i128::from(
            self.time.to_nanosecond() - from.to_nanosecond(),
        );
        let rounded = round::round_by(
            self.mode,
            nanos,
            increment * i128::from(self.smallest.nanoseconds()),
        );
        Duration::from_time_nanoseconds(self.largest, rounded)
    }
}

impl From<Time> for TimeDifference {
    fn from(time: Time) -> TimeDifference {
        TimeDifference::new(time)
    }
}

impl From<(Unit, Time)> for TimeDifference {
    fn from((largest, time): (Unit, Time)) -> TimeDifference {
        TimeDifference::new(time).largest(largest)
    }
}

/// Options for [`Time::round`].
///
/// The default smallest unit is [`Unit::Nanosecond`] (a no-op), the
/// default increment is `1` and the default mode is
/// [`RoundMode::Nearest`].
#[derive(Clone, Copy, Debug)]
pub struct TimeRound {
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl TimeRound {
    /// Creates rounding options with the defaults described above.
    pub fn new() -> TimeRound {
        TimeRound {
            smallest: Unit::Nanosecond,
            mode: RoundMode::Nearest,
            increment: 1,
        }
    }

    /// Sets the unit to round to.
    pub fn smallest(self, unit: Unit) -> TimeRound {
        TimeRound { smallest: unit, ..self }
    }

    /// Sets the rounding mode.
    pub fn mode(self, mode: RoundMode) -> TimeRound {
        TimeRound { mode, ..self }
    }

    /// Sets the rounding increment.
    pub fn increment(self, increment: i64) -> TimeRound {
        TimeRound { increment, ..self }
    }

    pub(crate) fn round(&self, time: Time) -> Result<Time, Error> {
        if !self.smallest.is_time_unit() {
            return Err(Error::option(format_args!(
                "rounding a wall-clock time requires a unit of hours or \
                 smaller, but got {unit}",
                unit = self.smallest.plural(),
            )));
        }
        let increment = round::increment(self.smallest, self.increment)?;
        let nanos = i128::from(time.to_nanosecond());
        let rounded = round::round_by(
            self.mode,
            nanos,
            increment * i128::from(self.smallest.nanoseconds()),
        );
        if rounded >= i128::from(common::NANOS_PER_DAY) {
            return Err(err!(
                "rounding {time} to the next increment of \
                 {increment} {unit} crosses into the next day",
                increment = self.increment,
                unit = self.smallest.plural(),
            ));
        }
        Ok(Time::from_nanosecond(rounded as i64))
    }
}

impl Default for TimeRound {
    fn default() -> TimeRound {
        TimeRound::new()
    }
}

impl From<Unit> for TimeRound {
    fn from(unit: Unit) -> TimeRound {
        TimeRound::new().smallest(unit)
    }
}

impl From<(Unit, i64)> for TimeRound {
    fn from((unit, increment): (Unit, i64)) -> TimeRound {
        TimeRound::new().smallest(unit).increment(increment)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Time {
    fn arbitrary(g: &mut quickcheck::Gen) -> Time {
        Time::constant(
            i8::arbitrary(g).rem_euclid(24),
            i8::arbitrary(g).rem_euclid(60),
            i8::arbitrary(g).rem_euclid(60),
            i32::arbitrary(g).rem_euclid(1_000_000_000),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::ToDuration;

    use super::*;

    #[test]
    fn component_validation() {
        assert!(Time::new(24, 0, 0, 0).is_err());
        assert!(Time::new(0, 60, 0, 0).is_err());
        assert!(Time::new(0, 0, 60, 0).is_err());
        assert!(Time::new(0, 0, 0, 1_000_000_000).is_err());
        let time = Time::new(23, 59, 59, 999_999_999).unwrap();
        assert_eq!(time, Time::MAX);
    }

    #[test]
    fn from_fields_strategies() {
        let (time, days) =
            Time::from_fields(1, 2, 3, 4, Overflow::Reject).unwrap();
        assert_eq!(time, Time::constant(1, 2, 3, 4));
        assert_eq!(days, 0);
        assert!(Time::from_fields(24, 0, 0, 0, Overflow::Reject).is_err());

        let (time, days) = Time::from_fields(
            30,
            -5,
            100,
            2_000_000_000,
            Overflow::Constrain,
        )
        .unwrap();
        assert_eq!(time, Time::constant(23, 0, 59, 999_999_999));
        assert_eq!(days, 0);

        let (time, days) =
            Time::from_fields(0, 0, 65, 0, Overflow::Balance).unwrap();
        assert_eq!(time, Time::constant(0, 1, 5, 0));
        assert_eq!(days, 0);
        let (time, days) =
            Time::from_fields(-1, 0, 0, 0, Overflow::Balance).unwrap();
        assert_eq!(time, Time::constant(23, 0, 0, 0));
        assert_eq!(days, -1);
    }

    #[test]
    fn subsec_split() {
        let time = Time::constant(0, 0, 0, 123_456_789);
        assert_eq!(time.millisecond(), 123);
        assert_eq!(time.microsecond(), 456);
        assert_eq!(time.nanosecond(), 789);
        assert_eq!(time.subsec_nanosecond(), 123_456_789);
    }

    #[test]
    fn nanosecond_round_trip() {
        let time = Time::constant(13, 37, 11, 987_654_321);
        assert_eq!(Time::from_nanosecond(time.to_nanosecond()), time);
        assert_eq!(Time::MAX.to_nanosecond(), common::NANOS_PER_DAY - 1);
    }

    #[test]
    fn wrapping_arithmetic() {
        let time = Time::constant(23, 30, 0, 0);
        assert_eq!(time.wrapping_add(1.hour()), Time::constant(0, 30, 0, 0));
        assert_eq!(
            Time::midnight().wrapping_sub(1.nanosecond()),
            Time::MAX,
        );
        // Calendar fields are ignored by wrapping arithmetic.
        assert_eq!(time.wrapping_add(5.days()), time);
        // Multi-day wraps report the day spill.
        let (got, days) = time.overflowing_add(49.hours());
        assert_eq!(got, Time::constant(0, 30, 0, 0));
        assert_eq!(days, 3);
        let (got, days) = Time::midnight().overflowing_add((-1).hour());
        assert_eq!(got, Time::constant(23, 0, 0, 0));
        assert_eq!(days, -1);
    }

    #[test]
    fn checked_arithmetic() {
        let time = Time::constant(23, 30, 0, 0);
        assert!(time.checked_add(1.hour()).is_err());
        assert_eq!(
            time.checked_add(29.minutes()).unwrap(),
            Time::constant(23, 59, 0, 0),
        );
        let err = time.checked_add(1.day()).unwrap_err();
        assert!(err.is_invalid_duration());
    }

    #[test]
    fn until_basic() {
        let t1 = Time::constant(8, 30, 0, 0);
        let t2 = Time::constant(14, 0, 30, 0);
        assert_eq!(
            t1.until(t2).unwrap(),
            5.hours().minutes(30).seconds(30),
        );
        assert_eq!(
            t2.until(t1).unwrap(),
            (-5).hours().minutes(-30).seconds(-30),
        );
        assert_eq!(t2.since(t1).unwrap(), t1.until(t2).unwrap());
    }

    #[test]
    fn until_units_and_rounding() {
        let t1 = Time::constant(8, 30, 0, 0);
        let t2 = Time::constant(14, 0, 30, 0);
        assert_eq!(
            t1.until((Unit::Minute, t2)).unwrap(),
            330.minutes().seconds(30),
        );
        let got = t1
            .until(
                TimeDifference::new(t2)
                    .smallest(Unit::Hour)
                    .mode(RoundMode::Nearest),
            )
            .unwrap();
        assert_eq!(got, 6.hours());
        let got = t1
            .until(TimeDifference::new(t2).smallest(Unit::Hour))
            .unwrap();
        assert_eq!(got, 5.hours());
    }

    #[test]
    fn round_basic() {
        let time = Time::constant(13, 37, 31, 123_456_789);
        assert_eq!(
            time.round(Unit::Minute).unwrap(),
            Time::constant(13, 38, 0, 0),
        );
        assert_eq!(
            time.round(Unit::Microsecond).unwrap(),
            Time::constant(13, 37, 31, 123_457_000),
        );
        assert_eq!(
            time.round((Unit::Minute, 15)).unwrap(),
            Time::constant(13, 45, 0, 0),
        );
    }

    #[test]
    fn round_cannot_wrap() {
        let time = Time::constant(23, 59, 59, 999_999_999);
        assert!(time.round(Unit::Second).is_err());
        assert_eq!(
            time.round(TimeRound::new()
                .smallest(Unit::Second)
                .mode(RoundMode::Trunc))
                .unwrap(),
            Time::constant(23, 59, 59, 0),
        );
    }

    #[test]
    fn invalid_increments() {
        let time = Time::constant(1, 0, 0, 0);
        // 45 does not divide evenly into 60.
        assert!(time.round((Unit::Second, 45)).is_err());
        assert!(time.round((Unit::Second, 0)).is_err());
        assert!(time.round((Unit::Hour, 24)).is_err());
        assert!(time.round((Unit::Second, 30)).is_ok());
    }

    #[test]
    fn display() {
        assert_eq!("00:00:00", Time::midnight().to_string());
        assert_eq!(
            "13:37:31.12345",
            Time::constant(13, 37, 31, 123_450_000).to_string(),
        );
        assert_eq!("23:59:59.999999999", Time::MAX.to_string());
    }

    quickcheck::quickcheck! {
        fn prop_nanosecond_round_trip(time: Time) -> bool {
            Time::from_nanosecond(time.to_nanosecond()) == time
        }

        fn prop_wrapping_add_sub_inverse(
            time: Time,
            duration: crate::Duration
        ) -> bool {
            let d = duration.time_part();
            time.wrapping_add(d).wrapping_sub(d) == time
        }

        fn prop_until_then_add_is_identity(t1: Time, t2: Time) -> bool {
            let duration = t1.until(t2).unwrap();
            t1.wrapping_add(duration) == t2
        }
    }
}
