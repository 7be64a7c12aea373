use core::str::FromStr;

use crate::{error::Error, util::common};

/// A granularity of time, from nanoseconds up to years.
///
/// Units are totally ordered from smallest to largest, so
/// `Unit::Nanosecond < Unit::Year`. A unit is used to select the largest
/// and smallest components of a [`Duration`](crate::Duration) computed by
/// the `until`/`since` family of routines, and to select the granularity
/// that such a duration is rounded to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Unit {
    Nanosecond = 0,
    Microsecond = 1,
    Millisecond = 2,
    Second = 3,
    Minute = 4,
    Hour = 5,
    Day = 6,
    Week = 7,
    Month = 8,
    Year = 9,
}

impl Unit {
    /// Returns true when this is a calendar unit. Calendar units are days
    /// and anything bigger.
    pub fn is_date_unit(self) -> bool {
        self >= Unit::Day
    }

    /// Returns true when this is a clock unit, i.e., hours or smaller.
    pub fn is_time_unit(self) -> bool {
        self <= Unit::Hour
    }

    /// The exact number of nanoseconds in this unit.
    ///
    /// # Panics
    ///
    /// When called on a unit bigger than days, since weeks, months and
    /// years have no invariant nanosecond length.
    pub(crate) fn nanoseconds(self) -> i64 {
        match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => 1_000,
            Unit::Millisecond => 1_000_000,
            Unit::Second => common::NANOS_PER_SECOND,
            Unit::Minute => common::NANOS_PER_MINUTE,
            Unit::Hour => common::NANOS_PER_HOUR,
            Unit::Day => common::NANOS_PER_DAY,
            _ => unreachable!("variable length unit has no nanoseconds"),
        }
    }

    /// A singular human readable name for this unit, used in error
    /// messages and option parsing.
    pub fn singular(self) -> &'static str {
        match self {
            Unit::Nanosecond => "nanosecond",
            Unit::Microsecond => "microsecond",
            Unit::Millisecond => "millisecond",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }

    /// The plural form of [`Unit::singular`].
    pub fn plural(self) -> &'static str {
        match self {
            Unit::Nanosecond => "nanoseconds",
            Unit::Microsecond => "microseconds",
            Unit::Millisecond => "milliseconds",
            Unit::Second => "seconds",
            Unit::Minute => "minutes",
            Unit::Hour => "hours",
            Unit::Day => "days",
            Unit::Week => "weeks",
            Unit::Month => "months",
            Unit::Year => "years",
        }
    }

    /// The number of this unit that make up exactly one of the next larger
    /// clock unit, when such a relationship is invariant.
    ///
    /// Rounding increments for clock units must divide evenly into (and be
    /// less than) this value. Calendar units have no such constraint.
    fn increment_limit(self) -> Option<i64> {
        match self {
            Unit::Nanosecond | Unit::Microsecond | Unit::Millisecond => {
                Some(1_000)
            }
            Unit::Second | Unit::Minute => Some(60),
            Unit::Hour => Some(24),
            Unit::Day | Unit::Week | Unit::Month | Unit::Year => None,
        }
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(string: &str) -> Result<Unit, Error> {
        static ALL: &[Unit] = &[
            Unit::Nanosecond,
            Unit::Microsecond,
            Unit::Millisecond,
            Unit::Second,
            Unit::Minute,
            Unit::Hour,
            Unit::Day,
            Unit::Week,
            Unit::Month,
            Unit::Year,
        ];
        for &unit in ALL {
            if string == unit.singular() || string == unit.plural() {
                return Ok(unit);
            }
        }
        Err(Error::option(format_args!(
            "unrecognized unit name {string:?}",
        )))
    }
}

/// The mode for rounding a duration to a configured smallest unit.
///
/// The default mode for the `until`/`since` family of routines is
/// [`RoundMode::Trunc`], since it never rounds a duration past the point
/// being measured to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RoundMode {
    /// Rounds to the nearest allowed value, with ties broken away from
    /// zero.
    Nearest,
    /// Rounds toward positive infinity.
    Ceil,
    /// Rounds toward negative infinity.
    Floor,
    /// Rounds toward zero.
    #[default]
    Trunc,
}

impl FromStr for RoundMode {
    type Err = Error;

    fn from_str(string: &str) -> Result<RoundMode, Error> {
        match string {
            "nearest" => Ok(RoundMode::Nearest),
            "ceil" => Ok(RoundMode::Ceil),
            "floor" => Ok(RoundMode::Floor),
            "trunc" => Ok(RoundMode::Trunc),
            _ => Err(Error::option(format_args!(
                "unrecognized rounding mode {string:?}",
            ))),
        }
    }
}

/// Validates a rounding increment for the given smallest unit and returns
/// it widened for nanosecond arithmetic.
///
/// Clock unit increments must divide evenly into the next larger unit so
/// that rounded values stay expressible in balanced fields (for example,
/// rounding seconds by 45 would permit `:45` but make `1:30` unreachable).
pub(crate) fn increment(unit: Unit, increment: i64) -> Result<i128, Error> {
    if increment < 1 {
        return Err(Error::option(format_args!(
            "rounding increment {increment} for {unit} is not positive",
            unit = unit.plural(),
        )));
    }
    if let Some(limit) = unit.increment_limit() {
        if increment >= limit || limit % increment != 0 {
            return Err(Error::option(format_args!(
                "rounding increment {increment} for {unit} must be less \
                 than and divide evenly into {limit}",
                unit = unit.plural(),
            )));
        }
    }
    Ok(i128::from(increment))
}

/// Rounds `quantity` to a multiple of `increment` using the given mode.
///
/// The increment must be positive. Ties under [`RoundMode::Nearest`] are
/// broken away from zero.
pub(crate) fn round_by(
    mode: RoundMode,
    quantity: i128,
    increment: i128,
) -> i128 {
    debug_assert!(increment > 0);
    let remainder = quantity % increment;
    let truncated = quantity - remainder;
    match mode {
        RoundMode::Trunc => truncated,
        RoundMode::Floor => {
            if remainder < 0 {
                truncated - increment
            } else {
                truncated
            }
        }
        RoundMode::Ceil => {
            if remainder > 0 {
                truncated + increment
            } else {
                truncated
            }
        }
        RoundMode::Nearest => {
            if 2 * remainder.abs() >= increment {
                truncated + increment * quantity.signum()
            } else {
                truncated
            }
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.plural())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Unit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Unit {
        *g.choose(&[
            Unit::Nanosecond,
            Unit::Microsecond,
            Unit::Millisecond,
            Unit::Second,
            Unit::Minute,
            Unit::Hour,
            Unit::Day,
            Unit::Week,
            Unit::Month,
            Unit::Year,
        ])
        .unwrap()
    }
}
