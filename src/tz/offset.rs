use crate::{
    civil::DateTime,
    error::{err, Error, ErrorContext},
    instant::Instant,
};

/// The maximum offset magnitude, one second shy of 26 hours.
///
/// Real-world offsets stay within ±14 hours, but historical local mean
/// time entries reach further, so the cap is generous.
const MAX_SECOND: i32 = 93_599;

/// A fixed signed offset from UTC, with second precision.
///
/// An offset is the sole ingredient needed to convert between an
/// [`Instant`] and a civil [`DateTime`]: local time is UTC plus the
/// offset. Positive offsets are east of the prime meridian.
///
/// ```
/// use tempora::{civil::DateTime, tz::Offset};
///
/// let offset = Offset::constant(-5);
/// let instant = "2024-06-15T12:00:00Z".parse()?;
/// assert_eq!(
///     offset.to_datetime(instant)?,
///     DateTime::constant(2024, 6, 15, 7, 0, 0, 0),
/// );
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Offset {
    second: i32,
}

impl Offset {
    /// The offset of UTC itself, zero.
    pub const UTC: Offset = Offset { second: 0 };

    /// The minimum supported offset, `-25:59:59`.
    pub const MIN: Offset = Offset { second: -MAX_SECOND };

    /// The maximum supported offset, `+25:59:59`.
    pub const MAX: Offset = Offset { second: MAX_SECOND };

    /// Creates an offset from a whole number of hours, in `const`
    /// context.
    ///
    /// # Panics
    ///
    /// When the number of hours exceeds 25 in magnitude.
    pub const fn constant(hours: i8) -> Offset {
        assert!(-25 <= hours && hours <= 25, "offset hours out of range");
        Offset { second: hours as i32 * 3_600 }
    }

    /// Creates an offset from a number of seconds east of UTC.
    pub fn from_seconds(second: i32) -> Result<Offset, Error> {
        if second < -MAX_SECOND || second > MAX_SECOND {
            return Err(Error::range(
                "offset seconds",
                second,
                -MAX_SECOND,
                MAX_SECOND,
            ));
        }
        Ok(Offset { second })
    }

    /// Returns this offset as a number of seconds east of UTC.
    pub fn seconds(self) -> i32 {
        self.second
    }

    /// Returns true when this offset is west of UTC.
    pub fn is_negative(self) -> bool {
        self.second < 0
    }

    /// Returns this offset with its sign flipped.
    pub fn negate(self) -> Offset {
        Offset { second: -self.second }
    }

    /// Localizes an instant: returns the civil datetime that a clock set
    /// to this offset shows at that moment.
    ///
    /// # Errors
    ///
    /// When the shifted datetime falls outside the supported civil range.
    /// This can only happen within an offset's width of the instant
    /// range's endpoints.
    pub fn to_datetime(self, instant: Instant) -> Result<DateTime, Error> {
        let nanos = instant.as_nanosecond()
            + i128::from(self.second) * 1_000_000_000;
        DateTime::from_nanosecond(nanos).with_context(|| {
            err!("localizing {instant} to offset {self} is out of range")
        })
    }

    /// Resolves a civil datetime read at this offset to the instant it
    /// names.
    ///
    /// # Errors
    ///
    /// When the resulting instant falls outside the supported range.
    pub fn to_instant(self, datetime: DateTime) -> Result<Instant, Error> {
        let nanos = datetime.to_nanosecond()
            - i128::from(self.second) * 1_000_000_000;
        Instant::from_nanosecond(nanos).with_context(|| {
            err!("instant for {datetime} at offset {self} is out of range")
        })
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Offset({self})")
    }
}

/// Prints this offset as `±HH:MM` or, when it has a seconds component,
/// `±HH:MM:SS`. Zero prints as `+00:00`.
impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.second < 0 { '-' } else { '+' };
        let total = self.second.unsigned_abs();
        let hours = total / 3_600;
        let minutes = (total / 60) % 60;
        let seconds = total % 60;
        if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}

impl core::ops::Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        self.negate()
    }
}

impl core::str::FromStr for Offset {
    type Err = Error;

    fn from_str(string: &str) -> Result<Offset, Error> {
        let parsed =
            crate::fmt::offset::Parser::new().parse(string.as_bytes())?;
        parsed.into_full("offset")
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn seconds_round_trip() {
        let offset = Offset::from_seconds(19_800).unwrap();
        assert_eq!(offset.seconds(), 19_800);
        assert_eq!(offset.to_string(), "+05:30");
        assert!(Offset::from_seconds(MAX_SECOND + 1).is_err());
        assert!(Offset::from_seconds(-MAX_SECOND - 1).is_err());
    }

    #[test]
    fn display() {
        assert_eq!("+00:00", Offset::UTC.to_string());
        assert_eq!("-05:00", Offset::constant(-5).to_string());
        assert_eq!("+05:45", Offset::from_seconds(20_700).unwrap().to_string());
        assert_eq!(
            "-00:25:21",
            Offset::from_seconds(-1_521).unwrap().to_string(),
        );
    }

    #[test]
    fn localize_and_resolve() {
        let offset = Offset::constant(2);
        let instant = Instant::from_second(0).unwrap();
        let local = offset.to_datetime(instant).unwrap();
        assert_eq!(local, DateTime::constant(1970, 1, 1, 2, 0, 0, 0));
        assert_eq!(offset.to_instant(local).unwrap(), instant);
    }

    #[test]
    fn resolve_out_of_range() {
        let offset = Offset::constant(-1);
        let local = Offset::UTC.to_datetime(Instant::MAX).unwrap();
        // Reading the maximum instant's UTC wall time at a negative
        // offset points one hour past the end of the timeline.
        assert!(offset.to_instant(local).is_err());
    }

    #[test]
    fn parse() {
        let offset: Offset = "+05:30".parse().unwrap();
        assert_eq!(offset.seconds(), 19_800);
        let offset: Offset = "-08".parse().unwrap();
        assert_eq!(offset.seconds(), -28_800);
        let offset: Offset = "Z".parse().unwrap();
        assert_eq!(offset, Offset::UTC);
        assert!("5:30".parse::<Offset>().is_err());
    }
}
