use core::str::FromStr;

use crate::{
    duration::Duration,
    error::{err, Error, ErrorContext},
    fmt::temporal::{DEFAULT_DATETIME_PARSER, DEFAULT_DATETIME_PRINTER},
    round::{self, RoundMode, Unit},
};

/// The range of supported instants, as nanoseconds since the Unix epoch.
///
/// This covers one hundred million days on either side of the epoch,
/// which lines up with the civil date range at any supported offset.
const MIN_NANOSECOND: i128 = -8_640_000_000_000_000_000_000;
const MAX_NANOSECOND: i128 = 8_640_000_000_000_000_000_000;

/// An exact moment on the absolute timeline, with nanosecond precision.
///
/// An `Instant` is a count of nanoseconds since the Unix epoch,
/// `1970-01-01T00:00:00Z`. Unlike the civil types, it identifies one
/// physical moment unambiguously: every time zone agrees on it, and two
/// instants can always be compared or subtracted.
///
/// Instants have no calendar. Adding a [`Duration`] to one is exact
/// nanosecond arithmetic, and so only clock units (hours and smaller) are
/// allowed. To do calendar arithmetic on a moment in time, localize it
/// first: convert to a civil [`DateTime`](crate::civil::DateTime) through
/// a [`TimeZone`](crate::tz::TimeZone), operate there, then resolve back.
///
/// ```
/// use tempora::{Instant, ToDuration};
///
/// let instant: Instant = "2020-02-29T12:30:00Z".parse()?;
/// let later = instant.checked_add(36.hours())?;
/// assert_eq!(later.to_string(), "2020-03-02T00:30:00Z");
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instant {
    /// Milliseconds since the Unix epoch, rounded toward negative
    /// infinity.
    millisecond: i64,
    /// The sub-millisecond remainder, always in `0..1_000_000`.
    ///
    /// Keeping the remainder non-negative makes the derived lexicographic
    /// ordering agree with timeline order.
    nanosecond: i32,
}

const NANOS_PER_MILLI: i128 = 1_000_000;

impl Instant {
    /// The earliest supported instant, `-271821-04-20T00:00:00Z`.
    pub const MIN: Instant =
        Instant { millisecond: -8_640_000_000_000_000, nanosecond: 0 };

    /// The latest supported instant, `275760-09-13T00:00:00Z`.
    pub const MAX: Instant =
        Instant { millisecond: 8_640_000_000_000_000, nanosecond: 0 };

    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Instant = Instant { millisecond: 0, nanosecond: 0 };

    /// Creates an instant from a number of seconds since the Unix epoch.
    pub fn from_second(second: i64) -> Result<Instant, Error> {
        Instant::from_nanosecond(i128::from(second) * 1_000_000_000)
    }

    /// Creates an instant from a number of milliseconds since the Unix
    /// epoch.
    pub fn from_millisecond(millisecond: i64) -> Result<Instant, Error> {
        Instant::from_nanosecond(i128::from(millisecond) * NANOS_PER_MILLI)
    }

    /// Creates an instant from a number of microseconds since the Unix
    /// epoch.
    pub fn from_microsecond(microsecond: i128) -> Result<Instant, Error> {
        let nanos = microsecond
            .checked_mul(1_000)
            .ok_or_else(|| {
                Error::range(
                    "microseconds since the Unix epoch",
                    microsecond,
                    MIN_NANOSECOND / 1_000,
                    MAX_NANOSECOND / 1_000,
                )
            })?;
        Instant::from_nanosecond(nanos)
    }

    /// Creates an instant from a number of nanoseconds since the Unix
    /// epoch.
    ///
    /// # Errors
    ///
    /// When the count lies outside the supported range of roughly
    /// ±8.64×10²¹ nanoseconds.
    pub fn from_nanosecond(nanosecond: i128) -> Result<Instant, Error> {
        if !(MIN_NANOSECOND..=MAX_NANOSECOND).contains(&nanosecond) {
            return Err(Error::range(
                "nanoseconds since the Unix epoch",
                nanosecond,
                MIN_NANOSECOND,
                MAX_NANOSECOND,
            ));
        }
        let millisecond = nanosecond.div_euclid(NANOS_PER_MILLI) as i64;
        let nanosecond = nanosecond.rem_euclid(NANOS_PER_MILLI) as i32;
        Ok(Instant { millisecond, nanosecond })
    }

    /// Returns the number of whole seconds since the Unix epoch, rounded
    /// toward negative infinity.
    pub fn as_second(self) -> i64 {
        self.millisecond.div_euclid(1_000)
    }

    /// Returns the number of whole milliseconds since the Unix epoch,
    /// rounded toward negative infinity.
    pub fn as_millisecond(self) -> i64 {
        self.millisecond
    }

    /// Returns the number of whole microseconds since the Unix epoch,
    /// rounded toward negative infinity.
    pub fn as_microsecond(self) -> i128 {
        self.as_nanosecond().div_euclid(1_000)
    }

    /// Returns the number of nanoseconds since the Unix epoch.
    pub fn as_nanosecond(self) -> i128 {
        i128::from(self.millisecond) * NANOS_PER_MILLI
            + i128::from(self.nanosecond)
    }

    /// Returns the sub-second portion of this instant as non-negative
    /// nanoseconds, in `0..1_000_000_000`.
    pub fn subsec_nanosecond(self) -> i32 {
        (self.as_nanosecond().rem_euclid(1_000_000_000)) as i32
    }

    /// Adds the given duration to this instant.
    ///
    /// # Errors
    ///
    /// When the duration has non-zero calendar units (days or bigger), or
    /// when the result falls outside the supported range. Calendar units
    /// have no fixed length on the absolute timeline; apply them through
    /// a [`TimeZone`](crate::tz::TimeZone) instead.
    pub fn checked_add(self, duration: Duration) -> Result<Instant, Error> {
        duration.expect_time_only("an instant")?;
        let nanos = self.as_nanosecond() + duration.time_nanoseconds();
        Instant::from_nanosecond(nanos)
            .with_context(|| err!("failed to add {duration} to {self}"))
    }

    /// Subtracts the given duration from this instant.
    pub fn checked_sub(self, duration: Duration) -> Result<Instant, Error> {
        self.checked_add(duration.negate())
    }

    /// Adds the given duration, clamping to [`Instant::MIN`] or
    /// [`Instant::MAX`] instead of erroring when the result is out of
    /// range. Calendar units still error.
    pub fn saturating_add(self, duration: Duration) -> Result<Instant, Error> {
        duration.expect_time_only("an instant")?;
        Ok(self.checked_add(duration).unwrap_or_else(|_| {
            if duration.is_negative() {
                Instant::MIN
            } else {
                Instant::MAX
            }
        }))
    }

    /// Subtracts the given duration, clamping to the supported range.
    pub fn saturating_sub(self, duration: Duration) -> Result<Instant, Error> {
        self.saturating_add(duration.negate())
    }

    /// Returns the duration from this instant to the given instant.
    ///
    /// Pass an [`Instant`] for the default behavior (seconds as the
    /// largest unit), or an [`InstantDifference`] for explicit unit and
    /// rounding control. Only clock units are permitted.
    ///
    /// ```
    /// use tempora::{Instant, ToDuration, Unit};
    ///
    /// let i1: Instant = "2020-02-29T12:30:00Z".parse()?;
    /// let i2: Instant = "2020-03-01T18:00:00Z".parse()?;
    /// assert_eq!(i1.until(i2)?, 106_200.seconds());
    /// assert_eq!(i1.until((Unit::Hour, i2))?, 29.hours().minutes(30));
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn until<A: Into<InstantDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: InstantDifference = other.into();
        args.until_from(self)
    }

    /// Returns the duration from the given instant to this instant.
    ///
    /// `a.since(b)` is precisely `b.until(a)`.
    pub fn since<A: Into<InstantDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: InstantDifference = other.into();
        let flipped = InstantDifference { instant: self, ..args };
        flipped.until_from(args.instant)
    }

    /// Rounds this instant to the given clock unit, increment and mode.
    ///
    /// ```
    /// use tempora::{Instant, Unit};
    ///
    /// let instant: Instant = "2020-02-29T12:30:31Z".parse()?;
    /// assert_eq!(
    ///     instant.round(Unit::Minute)?.to_string(),
    ///     "2020-02-29T12:31:00Z",
    /// );
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn round<A: Into<InstantRound>>(
        self,
        options: A,
    ) -> Result<Instant, Error> {
        let options: InstantRound = options.into();
        options.round(self)
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Instant({self})")
    }
}

/// Prints this instant in ISO 8601 format with a `Z` offset designator,
/// e.g., `2020-02-29T12:30:00Z`.
impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;
        DEFAULT_DATETIME_PRINTER
            .print_instant(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

/// Parses an ISO 8601 datetime with a required offset designator, e.g.,
/// `2020-02-29T12:30:00Z` or `2020-02-29T07:30:00-05:00`. The offset is
/// applied to produce the absolute instant and then discarded.
impl FromStr for Instant {
    type Err = Error;

    fn from_str(string: &str) -> Result<Instant, Error> {
        DEFAULT_DATETIME_PARSER.parse_instant(string.as_bytes())
    }
}

impl Default for Instant {
    fn default() -> Instant {
        Instant::UNIX_EPOCH
    }
}

/// Options for [`Instant::until`] and [`Instant::since`].
///
/// The default largest unit is [`Unit::Second`], the default smallest
/// unit is [`Unit::Nanosecond`], the default increment is `1` and the
/// default rounding mode is [`RoundMode::Trunc`].
#[derive(Clone, Copy, Debug)]
pub struct InstantDifference {
    instant: Instant,
    largest: Unit,
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl InstantDifference {
    /// Creates options for computing the duration until the given
    /// instant.
    pub fn new(instant: Instant) -> InstantDifference {
        InstantDifference {
            instant,
            largest: Unit::Second,
            smallest: Unit::Nanosecond,
            mode: RoundMode::Trunc,
            increment: 1,
        }
    }

    /// Sets the largest allowed unit in the result. Must be a clock unit.
    pub fn largest(self, unit: Unit) -> InstantDifference {
        InstantDifference { largest: unit, ..self }
    }

    /// Sets the smallest allowed unit in the result.
    pub fn smallest(self, unit: Unit) -> InstantDifference {
        InstantDifference { smallest: unit, ..self }
    }

    /// Sets the rounding mode applied to the smallest unit.
    pub fn mode(self, mode: RoundMode) -> InstantDifference {
        InstantDifference { mode, ..self }
    }

    /// Sets the rounding increment for the smallest unit.
    pub fn increment(self, increment: i64) -> InstantDifference {
        InstantDifference { increment, ..self }
    }

    fn until_from(&self, from: Instant) -> Result<Duration, Error> {
        for unit in [self.largest, self.smallest] {
            if !unit.is_time_unit() {
                return Err(Error::option(format_args!(
                    "unit for an instant difference must be hours or \
                     smaller, but got {unit}",
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
        let nanos = self.instant.as_nanosecond() - from.as_nanosecond();
        let rounded = round::round_by(
            self.mode,
            nanos,
            increment * i128::from(self.smallest.nanoseconds()),
        );
        Duration::from_time_nanoseconds(self.largest, rounded)
    }
}

impl From<Instant> for InstantDifference {
    fn from(instant: Instant) -> InstantDifference {
        InstantDifference::new(instant)
    }
}

impl From<(Unit, Instant)> for InstantDifference {
    fn from((largest, instant): (Unit, Instant)) -> InstantDifference {
        InstantDifference::new(instant).largest(largest)
    }
}

/// Options for [`Instant::round`].
///
/// The default smallest unit is [`Unit::Nanosecond`] (a no-op), the
/// default increment is `1` and the default mode is
/// [`RoundMode::Nearest`].
#[derive(Clone, Copy, Debug)]
pub struct InstantRound {
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl InstantRound {
    /// Creates rounding options with the defaults described above.
    pub fn new() -> InstantRound {
        InstantRound {
            smallest: Unit::Nanosecond,
            mode: RoundMode::Nearest,
            increment: 1,
        }
    }

    /// Sets the unit to round to. Must be a clock unit.
    pub fn smallest(self, unit: Unit) -> InstantRound {
        InstantRound { smallest: unit, ..self }
    }

    /// Sets the rounding mode.
    pub fn mode(self, mode: RoundMode) -> InstantRound {
        InstantRound { mode, ..self }
    }

    /// Sets the rounding increment.
    pub fn increment(self, increment: i64) -> InstantRound {
        InstantRound { increment, ..self }
    }

    fn round(&self, instant: Instant) -> Result<Instant, Error> {
        if !self.smallest.is_time_unit() {
            return Err(Error::option(format_args!(
                "rounding an instant requires a unit of hours or smaller, \
                 but got {unit}",
                unit = self.smallest.plural(),
            )));
        }
        let increment = round::increment(self.smallest, self.increment)?;
        let rounded = round::round_by(
            self.mode,
            instant.as_nanosecond(),
            increment * i128::from(self.smallest.nanoseconds()),
        );
        Instant::from_nanosecond(rounded)
    }
}

impl Default for InstantRound {
    fn default() -> InstantRound {
        InstantRound::new()
    }
}

impl From<Unit> for InstantRound {
    fn from(unit: Unit) -> InstantRound {
        InstantRound::new().smallest(unit)
    }
}

impl From<(Unit, i64)> for InstantRound {
    fn from((unit, increment): (Unit, i64)) -> InstantRound {
        InstantRound::new().smallest(unit).increment(increment)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        // Cluster around a few thousand years of the epoch.
        let millisecond =
            i64::arbitrary(g).rem_euclid(200_000_000_000_000)
                - 100_000_000_000_000;
        let nanosecond = i32::arbitrary(g).rem_euclid(1_000_000);
        Instant { millisecond, nanosecond }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::ToDuration;

    use super::*;

    #[test]
    fn representation_is_floor_normalized() {
        let instant = Instant::from_nanosecond(-1).unwrap();
        assert_eq!(instant.millisecond, -1);
        assert_eq!(instant.nanosecond, 999_999);
        assert_eq!(instant.as_nanosecond(), -1);
        assert_eq!(instant.as_second(), -1);
        assert_eq!(instant.subsec_nanosecond(), 999_999_999);
    }

    #[test]
    fn ordering_matches_timeline() {
        let before = Instant::from_nanosecond(-1).unwrap();
        let after = Instant::from_nanosecond(1).unwrap();
        assert!(before < Instant::UNIX_EPOCH);
        assert!(Instant::UNIX_EPOCH < after);
        assert!(Instant::MIN < Instant::MAX);
    }

    #[test]
    fn unit_conversions() {
        let instant = Instant::from_second(1_500_000_000).unwrap();
        assert_eq!(instant.as_second(), 1_500_000_000);
        assert_eq!(instant.as_millisecond(), 1_500_000_000_000);
        assert_eq!(instant.as_microsecond(), 1_500_000_000_000_000);
        assert_eq!(instant.as_nanosecond(), 1_500_000_000_000_000_000);
    }

    #[test]
    fn range_limits() {
        assert_eq!(Instant::MIN.as_nanosecond(), MIN_NANOSECOND);
        assert_eq!(Instant::MAX.as_nanosecond(), MAX_NANOSECOND);
        assert!(Instant::from_nanosecond(MIN_NANOSECOND - 1).is_err());
        assert!(Instant::from_nanosecond(MAX_NANOSECOND + 1).is_err());
        let err =
            Instant::from_nanosecond(MAX_NANOSECOND + 1).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn checked_add_rejects_calendar_units() {
        let instant = Instant::UNIX_EPOCH;
        let err = instant.checked_add(1.day()).unwrap_err();
        assert!(err.is_invalid_duration());
        let err = instant.checked_add(1.month()).unwrap_err();
        assert!(err.is_invalid_duration());
        assert!(instant.checked_add(24.hours()).is_ok());
    }

    #[test]
    fn checked_arithmetic() {
        let instant = Instant::from_second(1_000).unwrap();
        let later = instant.checked_add(90.minutes()).unwrap();
        assert_eq!(later.as_second(), 1_000 + 5_400);
        assert_eq!(later.checked_sub(90.minutes()).unwrap(), instant);
        assert!(Instant::MAX.checked_add(1.nanosecond()).is_err());
        assert_eq!(
            Instant::MAX.saturating_add(1.hour()).unwrap(),
            Instant::MAX,
        );
    }

    #[test]
    fn until_defaults_to_seconds() {
        let i1 = Instant::from_second(1_000).unwrap();
        let i2 = Instant::from_nanosecond(1_500_000_000_500).unwrap();
        assert_eq!(
            i1.until(i2).unwrap(),
            500.seconds().nanoseconds(500),
        );
        assert_eq!(i2.since(i1).unwrap(), i1.until(i2).unwrap());
        assert_eq!(
            i2.until(i1).unwrap(),
            (-500).seconds().nanoseconds(-500),
        );
    }

    #[test]
    fn until_rejects_calendar_units() {
        let i1 = Instant::UNIX_EPOCH;
        let i2 = Instant::from_second(86_400).unwrap();
        let err = i1.until((Unit::Day, i2)).unwrap_err();
        assert!(err.is_invalid_option());
        assert_eq!(i1.until((Unit::Hour, i2)).unwrap(), 24.hours());
    }

    #[test]
    fn until_rounding() {
        let i1 = Instant::UNIX_EPOCH;
        let i2 = Instant::from_second(5_430).unwrap();
        let got = i1
            .until(
                InstantDifference::new(i2)
                    .largest(Unit::Hour)
                    .smallest(Unit::Hour)
                    .mode(RoundMode::Nearest),
            )
            .unwrap();
        assert_eq!(got, 2.hours());
    }

    #[test]
    fn round() {
        let instant = Instant::from_nanosecond(1_499_999_999).unwrap();
        assert_eq!(
            instant.round(Unit::Second).unwrap(),
            Instant::from_second(1).unwrap(),
        );
        assert_eq!(
            instant.round((Unit::Millisecond, 10)).unwrap(),
            Instant::from_millisecond(1_500).unwrap(),
        );
        let trunc = instant
            .round(InstantRound::new()
                .smallest(Unit::Second)
                .mode(RoundMode::Trunc))
            .unwrap();
        assert_eq!(trunc, Instant::from_second(1).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(
            "1970-01-01T00:00:00Z",
            Instant::UNIX_EPOCH.to_string(),
        );
        assert_eq!(
            "1969-12-31T23:59:59.999999999Z",
            Instant::from_nanosecond(-1).unwrap().to_string(),
        );
    }

    quickcheck::quickcheck! {
        fn prop_nanosecond_round_trip(instant: Instant) -> bool {
            Instant::from_nanosecond(instant.as_nanosecond()).unwrap()
                == instant
        }

        fn prop_until_then_add_is_identity(
            i1: Instant,
            i2: Instant
        ) -> bool {
            let duration = i1.until((Unit::Hour, i2)).unwrap();
            i1.checked_add(duration).unwrap() == i2
        }
    }
}
