/*!
Civil (or "plain") datetimes: calendar dates and wall-clock times with no
attached time zone.

The types in this module represent what a wall calendar and a wall clock
show. They are the right representation for things like "April 3rd at
09:30" when the reader's time zone is implied or irrelevant. To pin a
civil datetime to a precise moment in time, resolve it through a
[`TimeZone`](crate::tz::TimeZone) to get an [`Instant`](crate::Instant).
*/

pub use self::{
    date::{Date, DateDifference},
    datetime::{DateTime, DateTimeDifference, DateTimeRound},
    time::{Time, TimeDifference, TimeRound},
};

mod date;
mod datetime;
mod time;

/// The strategy for dealing with out-of-range calendar components.
///
/// When a date is built from components, or shifted by a duration, the
/// result may name a day that doesn't exist (e.g., `2023-02-30`, or
/// `2020-01-31` plus one month). This option controls what happens then.
///
/// ```
/// use tempora::civil::{Date, Overflow};
///
/// let date = Date::from_fields(2023, 2, 30, Overflow::Constrain)?;
/// assert_eq!(date, Date::constant(2023, 2, 28));
/// assert!(Date::from_fields(2023, 2, 30, Overflow::Reject).is_err());
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Overflow {
    /// Clamp the day to the last day of the named month.
    ///
    /// This is the default, and the behavior of most calendar software:
    /// one month after January 31st is the end of February.
    #[default]
    Constrain,
    /// Return an error for any component outside its valid range.
    Reject,
    /// Carry overflowing components into the next larger one, so that
    /// `2023-01-32` becomes `2023-02-01`.
    ///
    /// Only supported where balancing has an unambiguous meaning, i.e.,
    /// when building from components. Arithmetic never balances.
    Balance,
}

impl core::str::FromStr for Overflow {
    type Err = crate::Error;

    fn from_str(string: &str) -> Result<Overflow, crate::Error> {
        match string {
            "constrain" => Ok(Overflow::Constrain),
            "reject" => Ok(Overflow::Reject),
            "balance" => Ok(Overflow::Balance),
            _ => Err(crate::error::Error::option(format_args!(
                "unrecognized overflow strategy {string:?}",
            ))),
        }
    }
}
