use core::str::FromStr;

use crate::{
    civil::{DateTime, Overflow, Time},
    duration::Duration,
    error::{err, Error, ErrorContext},
    fmt::temporal::{DEFAULT_DATETIME_PARSER, DEFAULT_DATETIME_PRINTER},
    round::{self, RoundMode, Unit},
    util::common,
};

/// The minimum supported year.
const MIN_YEAR: i32 = -271_821;
/// The maximum supported year.
const MAX_YEAR: i32 = 275_760;

/// The range of supported days since the Unix epoch.
///
/// This matches the instant range of roughly nine million years centered
/// on the epoch, widened by one day at the bottom so that every instant's
/// local date is representable at any offset.
const MIN_EPOCH_DAYS: i64 = -100_000_001;
const MAX_EPOCH_DAYS: i64 = 100_000_000;

/// A date in the proleptic Gregorian calendar.
///
/// A `Date` names a civil calendar day like `2024-02-29`. It says nothing
/// about the time of day or the time zone. The supported range is
/// `-271821-04-19` through `275760-09-13`.
///
/// # Construction
///
/// [`Date::new`] validates its components strictly. [`Date::from_fields`]
/// additionally accepts an [`Overflow`] strategy for clamping or balancing
/// out-of-range components. [`Date::constant`] is a `const` constructor
/// that panics on invalid input, for dates known at compile time.
///
/// # Arithmetic
///
/// Adding a [`Duration`] applies calendar units first (years, then
/// months), clamping the day into the target month, and then adds weeks,
/// days and any clock portion:
///
/// ```
/// use tempora::{civil::Date, ToDuration};
///
/// let date = Date::constant(2020, 1, 31);
/// assert_eq!(date.checked_add(1.month())?, Date::constant(2020, 2, 29));
/// # Ok::<(), tempora::Error>(())
/// ```
///
/// The difference between two dates is computed by [`Date::until`] and
/// [`Date::since`], with configurable largest/smallest units and rounding.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date {
    year: i32,
    month: i8,
    day: i8,
}

impl Date {
    /// The minimum supported date, `-271821-04-19`.
    pub const MIN: Date = Date { year: -271_821, month: 4, day: 19 };

    /// The maximum supported date, `275760-09-13`.
    pub const MAX: Date = Date { year: 275_760, month: 9, day: 13 };

    /// The Unix epoch, `1970-01-01`.
    pub const UNIX_EPOCH: Date = Date { year: 1970, month: 1, day: 1 };

    /// Creates a date from a year, month and day, in `const` context.
    ///
    /// # Panics
    ///
    /// When the components do not name a real calendar day in the
    /// supported range. Use [`Date::new`] for a fallible constructor.
    pub const fn constant(year: i32, month: i8, day: i8) -> Date {
        assert!(MIN_YEAR <= year && year <= MAX_YEAR, "year out of range");
        assert!(1 <= month && month <= 12, "month out of range");
        assert!(
            1 <= day && day <= common::days_in_month(year, month),
            "day out of range for month",
        );
        let date = Date { year, month, day };
        let epoch_days = common::to_epoch_days(year, month, day);
        assert!(
            MIN_EPOCH_DAYS <= epoch_days && epoch_days <= MAX_EPOCH_DAYS,
            "date out of range",
        );
        date
    }

    /// Creates a date from a year, month and day.
    ///
    /// # Errors
    ///
    /// When the components do not name a real calendar day in the
    /// supported range.
    pub fn new(year: i32, month: i8, day: i8) -> Result<Date, Error> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(Error::range("year", year, MIN_YEAR, MAX_YEAR));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let last = common::days_in_month(year, month);
        if day < 1 || day > last {
            return Err(Error::range("day", day, 1, last));
        }
        let date = Date { year, month, day };
        let epoch_days = date.to_epoch_days();
        if !(MIN_EPOCH_DAYS..=MAX_EPOCH_DAYS).contains(&epoch_days) {
            return Err(err!(
                "date {year:04}-{month:02}-{day:02} is outside the \
                 supported range of {min} to {max}",
                min = Date::MIN,
                max = Date::MAX,
            ));
        }
        Ok(date)
    }

    /// Creates a date from possibly out-of-range components, resolved
    /// according to the given [`Overflow`] strategy.
    ///
    /// Under [`Overflow::Constrain`], the month is clamped into `1..=12`
    /// and the day into the resulting month. Under [`Overflow::Balance`],
    /// excess months carry into years and excess days walk into following
    /// months. [`Overflow::Reject`] is equivalent to [`Date::new`].
    pub fn from_fields(
        year: i32,
        month: i8,
        day: i8,
        overflow: Overflow,
    ) -> Result<Date, Error> {
        match overflow {
            Overflow::Reject => Date::new(year, month, day),
            Overflow::Constrain => {
                let month = month.clamp(1, 12);
                let day = common::saturate_day_in_month(year, month, day);
                Date::new(year, month, day)
            }
            Overflow::Balance => {
                let month0 = i64::from(month) - 1;
                let year = i32::try_from(
                    i64::from(year) + month0.div_euclid(12),
                )
                .map_err(|_| {
                    Error::range("year", year, MIN_YEAR, MAX_YEAR)
                })?;
                let month = month0.rem_euclid(12) as i8 + 1;
                let first = Date::new(year, month, 1)?;
                Date::from_epoch_days(
                    first
                        .to_epoch_days()
                        .checked_add(i64::from(day) - 1)
                        .ok_or_else(|| err!("day overflows date range"))?,
                )
            }
        }
    }

    /// Returns the year. Negative years are BCE in the proleptic
    /// Gregorian calendar (year 0 is 1 BCE).
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month, in `1..=12`.
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the day of the month, in `1..=31`.
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the ordinal day of the year, in `1..=366`.
    pub fn day_of_year(self) -> i16 {
        let start = common::to_epoch_days(self.year, 1, 1);
        (self.to_epoch_days() - start) as i16 + 1
    }

    /// Returns the number of days in this date's month.
    pub fn days_in_month(self) -> i8 {
        common::days_in_month(self.year, self.month)
    }

    /// Returns the number of days in this date's year.
    pub fn days_in_year(self) -> i16 {
        common::days_in_year(self.year)
    }

    /// Returns true when this date's year is a leap year.
    pub fn in_leap_year(self) -> bool {
        common::is_leap_year(self.year)
    }

    /// Returns the first day of this date's month.
    pub fn first_of_month(self) -> Date {
        Date { day: 1, ..self }
    }

    /// Returns the last day of this date's month.
    pub fn last_of_month(self) -> Date {
        Date { day: self.days_in_month(), ..self }
    }

    /// Returns the day after this date.
    ///
    /// # Errors
    ///
    /// When this date is [`Date::MAX`].
    pub fn tomorrow(self) -> Result<Date, Error> {
        Date::from_epoch_days(self.to_epoch_days() + 1)
            .context(err!("no day after {self}"))
    }

    /// Returns the day before this date.
    ///
    /// # Errors
    ///
    /// When this date is [`Date::MIN`].
    pub fn yesterday(self) -> Result<Date, Error> {
        Date::from_epoch_days(self.to_epoch_days() - 1)
            .context(err!("no day before {self}"))
    }

    /// Returns the number of days since the Unix epoch (`1970-01-01` is
    /// day `0`; earlier dates are negative).
    pub fn to_epoch_days(self) -> i64 {
        common::to_epoch_days(self.year, self.month, self.day)
    }

    /// Creates a date from a number of days since the Unix epoch.
    ///
    /// # Errors
    ///
    /// When the day count is outside the supported range.
    pub fn from_epoch_days(days: i64) -> Result<Date, Error> {
        if !(MIN_EPOCH_DAYS..=MAX_EPOCH_DAYS).contains(&days) {
            return Err(Error::range(
                "days since the Unix epoch",
                days,
                MIN_EPOCH_DAYS,
                MAX_EPOCH_DAYS,
            ));
        }
        let (year, month, day) = common::from_epoch_days(days);
        Ok(Date { year, month, day })
    }

    /// Combines this date with the given wall-clock time.
    pub fn to_datetime(self, time: Time) -> DateTime {
        DateTime::from_parts(self, time)
    }

    /// Combines this date with a time built from the given components.
    ///
    /// # Panics
    ///
    /// When the time components are invalid. Use
    /// [`Date::to_datetime`] with [`Time::new`] for a fallible version.
    pub fn at(
        self,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> DateTime {
        DateTime::from_parts(
            self,
            Time::constant(hour, minute, second, subsec_nanosecond),
        )
    }

    /// Adds the given duration to this date.
    ///
    /// Years and months are applied first with the day clamped into the
    /// target month, then weeks and days. Any clock portion of the
    /// duration is truncated toward zero to whole days.
    ///
    /// # Errors
    ///
    /// When the result falls outside the supported date range.
    pub fn checked_add(self, duration: Duration) -> Result<Date, Error> {
        self.checked_add_with(duration, Overflow::Constrain)
    }

    /// Adds the given duration to this date, resolving a clamped day of
    /// month according to the given [`Overflow`] strategy.
    ///
    /// [`Overflow::Reject`] errors when the target month is too short for
    /// this date's day (e.g., `2020-01-31` plus one month).
    /// [`Overflow::Balance`] is not meaningful for arithmetic and behaves
    /// like `Constrain`.
    pub fn checked_add_with(
        self,
        duration: Duration,
        overflow: Overflow,
    ) -> Result<Date, Error> {
        let overflow = match overflow {
            Overflow::Reject => Overflow::Reject,
            Overflow::Constrain | Overflow::Balance => Overflow::Constrain,
        };
        let months = duration
            .get_years()
            .checked_mul(12)
            .and_then(|m| m.checked_add(duration.get_months()))
            .ok_or_else(|| err!("month count in duration overflows"))?;
        let shifted = self.checked_add_months(months, overflow)?;
        let days = duration
            .get_weeks()
            .checked_mul(7)
            .and_then(|d| d.checked_add(duration.get_days()))
            .and_then(|d| {
                let time_days = duration.time_nanoseconds()
                    / i128::from(common::NANOS_PER_DAY);
                d.checked_add(i64::try_from(time_days).ok()?)
            })
            .ok_or_else(|| err!("day count in duration overflows"))?;
        let epoch_days = shifted
            .to_epoch_days()
            .checked_add(days)
            .ok_or_else(|| err!("day count in duration overflows"))?;
        Date::from_epoch_days(epoch_days)
            .context(err!("failed to add {duration} to {self}"))
    }

    /// Subtracts the given duration from this date. Equivalent to
    /// `self.checked_add(duration.negate())`.
    pub fn checked_sub(self, duration: Duration) -> Result<Date, Error> {
        self.checked_add(duration.negate())
    }

    /// Adds the given duration, clamping to [`Date::MIN`] or
    /// [`Date::MAX`] instead of erroring when the result is out of range.
    pub fn saturating_add(self, duration: Duration) -> Date {
        self.checked_add(duration).unwrap_or_else(|_| {
            if duration.is_negative() {
                Date::MIN
            } else {
                Date::MAX
            }
        })
    }

    /// Subtracts the given duration, clamping to the supported range
    /// instead of erroring.
    pub fn saturating_sub(self, duration: Duration) -> Date {
        self.saturating_add(duration.negate())
    }

    fn checked_add_months(
        self,
        months: i64,
        overflow: Overflow,
    ) -> Result<Date, Error> {
        if months == 0 {
            return Ok(self);
        }
        let month0 = i64::from(self.month) - 1 + months;
        let year = i32::try_from(i64::from(self.year) + month0.div_euclid(12))
            .map_err(|_| {
                err!("adding {months} months to {self} overflows")
            })?;
        let month = month0.rem_euclid(12) as i8 + 1;
        match overflow {
            Overflow::Reject => Date::new(year, month, self.day),
            _ => Date::new(
                year,
                month,
                common::saturate_day_in_month(year, month, self.day),
            ),
        }
    }

    /// Returns the duration from this date to the given date.
    ///
    /// Pass a [`Date`] for the default behavior (a duration of whole
    /// days), or a [`DateDifference`] to configure the largest and
    /// smallest units, the rounding increment and the rounding mode:
    ///
    /// ```
    /// use tempora::{civil::Date, RoundMode, ToDuration, Unit};
    ///
    /// let d1 = Date::constant(2019, 1, 8);
    /// let d2 = Date::constant(2021, 9, 7);
    /// assert_eq!(d1.until(d2)?, 973.days());
    /// assert_eq!(d1.until((Unit::Year, d2))?, 2.years().months(7).days(30));
    /// # Ok::<(), tempora::Error>(())
    /// ```
    ///
    /// The unrounded result satisfies `d1.checked_add(d1.until(d2)) == d2`.
    pub fn until<A: Into<DateDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: DateDifference = other.into();
        let duration = args.until_with_largest_unit(self)?;
        if args.rounding_may_change_duration() {
            return args.round(self, duration);
        }
        Ok(duration)
    }

    /// Returns the duration from the given date to this date.
    ///
    /// `a.since(b)` is precisely `b.until(a)`. In particular,
    /// `b.checked_add(a.since(b)) == a` for the unrounded result.
    pub fn since<A: Into<DateDifference>>(
        self,
        other: A,
    ) -> Result<Duration, Error> {
        let args: DateDifference = other.into();
        let flipped = DateDifference { date: self, ..args };
        flipped.date_until_from(args.date)
    }

    pub(crate) fn until_with_largest_unit(
        self,
        largest: Unit,
        other: Date,
    ) -> Result<Duration, Error> {
        let day_diff = other.to_epoch_days() - self.to_epoch_days();
        match largest {
            Unit::Day => return Duration::new().try_days(day_diff),
            Unit::Week => {
                return Duration::new()
                    .try_weeks(day_diff / 7)?
                    .try_days(day_diff % 7);
            }
            Unit::Month | Unit::Year => {}
            _ => {
                return Err(Error::option(format_args!(
                    "largest unit for a date difference must be days or \
                     bigger, but got {unit}",
                    unit = largest.plural(),
                )));
            }
        }
        if day_diff == 0 {
            return Ok(Duration::ZERO);
        }
        let sign = i64::from(day_diff.signum());
        let years = i64::from(other.year) - i64::from(self.year);
        let months = i64::from(other.month) - i64::from(self.month);
        let mut months_total = years * 12 + months;
        let mut intermediate =
            self.checked_add_months(months_total, Overflow::Constrain)?;
        let mut days = other.to_epoch_days() - intermediate.to_epoch_days();
        // When the candidate month shift overshoots the target, borrow
        // one month and measure the remaining days from there. One borrow
        // always suffices: the previous candidate lands in the month
        // before the target's.
        if days != 0 && days.signum() != sign {
            months_total -= sign;
            intermediate =
                self.checked_add_months(months_total, Overflow::Constrain)?;
            days = other.to_epoch_days() - intermediate.to_epoch_days();
        }
        debug_assert!(days == 0 || days.signum() == sign);
        // Truncating division keeps the year and month parts on the same
        // side of zero as the whole.
        let years = months_total / 12;
        let months = months_total % 12;
        let duration = match largest {
            Unit::Year => Duration::new()
                .try_years(years)?
                .try_months(months)?
                .try_days(days)?,
            Unit::Month => Duration::new()
                .try_months(months_total)?
                .try_days(days)?,
            _ => unreachable!(),
        };
        Ok(duration)
    }
}

impl Date {
    /// Parses a date from an ISO 8601 string like `2024-02-29`.
    ///
    /// This is a convenience for the [`FromStr`] impl that accepts bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Date, Error> {
        DEFAULT_DATETIME_PARSER.parse_date(bytes)
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;
        DEFAULT_DATETIME_PRINTER
            .print_date(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(string: &str) -> Result<Date, Error> {
        DEFAULT_DATETIME_PARSER.parse_date(string.as_bytes())
    }
}

impl Default for Date {
    fn default() -> Date {
        Date::UNIX_EPOCH
    }
}

/// Options for [`Date::until`] and [`Date::since`].
///
/// Convertible from a plain [`Date`] (all defaults) or a `(Unit, Date)`
/// pair (setting the largest unit). The default largest unit is
/// [`Unit::Day`], the default smallest unit is also [`Unit::Day`], the
/// default rounding increment is `1` and the default rounding mode is
/// [`RoundMode::Trunc`].
#[derive(Clone, Copy, Debug)]
pub struct DateDifference {
    date: Date,
    largest: Option<Unit>,
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl DateDifference {
    /// Creates options for computing the duration until the given date.
    pub fn new(date: Date) -> DateDifference {
        DateDifference {
            date,
            largest: None,
            smallest: Unit::Day,
            mode: RoundMode::Trunc,
            increment: 1,
        }
    }

    /// Sets the largest allowed unit in the result.
    pub fn largest(self, unit: Unit) -> DateDifference {
        DateDifference { largest: Some(unit), ..self }
    }

    /// Sets the smallest allowed unit in the result. Units below it are
    /// rounded away according to the mode and increment.
    pub fn smallest(self, unit: Unit) -> DateDifference {
        DateDifference { smallest: unit, ..self }
    }

    /// Sets the rounding mode applied to the smallest unit.
    pub fn mode(self, mode: RoundMode) -> DateDifference {
        DateDifference { mode, ..self }
    }

    /// Sets the rounding increment, a multiple of the smallest unit that
    /// the result is rounded to.
    pub fn increment(self, increment: i64) -> DateDifference {
        DateDifference { increment, ..self }
    }

    fn rounding_may_change_duration(&self) -> bool {
        self.mode != RoundMode::Trunc
            || self.increment > 1
            || self.smallest > Unit::Day
    }

    fn effective_largest(&self) -> Unit {
        self.largest.unwrap_or_else(|| self.smallest.max(Unit::Day))
    }

    fn check(&self) -> Result<(), Error> {
        if !self.smallest.is_date_unit() {
            return Err(Error::option(format_args!(
                "smallest unit for a date difference must be days or \
                 bigger, but got {unit}",
                unit = self.smallest.plural(),
            )));
        }
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
        Ok(())
    }

    fn until_with_largest_unit(&self, from: Date) -> Result<Duration, Error> {
        self.check()?;
        from.until_with_largest_unit(self.effective_largest(), self.date)
    }

    fn date_until_from(&self, from: Date) -> Result<Duration, Error> {
        let duration = self.until_with_largest_unit(from)?;
        if self.rounding_may_change_duration() {
            return self.round(from, duration);
        }
        Ok(duration)
    }

    fn round(
        &self,
        anchor: Date,
        duration: Duration,
    ) -> Result<Duration, Error> {
        round_calendar_duration(
            duration,
            self.smallest,
            self.mode,
            self.increment,
            self.effective_largest(),
            |d| {
                let landed = anchor.checked_add(d)?;
                let gap =
                    self.date.to_epoch_days() - landed.to_epoch_days();
                Ok(i128::from(gap))
            },
        )
    }
}

impl From<Date> for DateDifference {
    fn from(date: Date) -> DateDifference {
        DateDifference::new(date)
    }
}

impl From<(Unit, Date)> for DateDifference {
    fn from((largest, date): (Unit, Date)) -> DateDifference {
        DateDifference::new(date).largest(largest)
    }
}

/// Rounds a balanced calendar duration at `smallest` by bracketing the
/// target between two candidate durations.
///
/// Calendar units have no invariant length, so a fractional remainder in
/// the smallest unit can only be judged by actually applying the two
/// nearest whole candidates to the anchor. `remaining` reports how far
/// the target lies past `anchor + candidate`, in a linear unit (days for
/// dates, nanoseconds for datetimes); a result of zero means the
/// candidate lands exactly on the target.
pub(crate) fn round_calendar_duration<E>(
    duration: Duration,
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
    largest: Unit,
    mut remaining: E,
) -> Result<Duration, Error>
where
    E: FnMut(Duration) -> Result<i128, Error>,
{
    let increment = round::increment(smallest, increment)?;
    let sign = i128::from(duration.signum());
    if sign == 0 {
        return Ok(duration);
    }
    // Truncate the duration at the smallest unit: round its field down to
    // the increment and zero everything below it.
    let truncated_field = {
        let value = i128::from(duration.get(smallest));
        let rounded = round::round_by(RoundMode::Trunc, value, increment);
        i64::try_from(rounded).expect("truncation cannot grow a field")
    };
    let mut lower = duration.set(smallest, truncated_field);
    for (unit, _) in duration.fields() {
        if unit < smallest {
            lower = lower.set(unit, 0);
        }
    }
    let bumped = i128::from(truncated_field) + increment * sign;
    let bumped = i64::try_from(bumped)
        .map_err(|_| err!("rounded duration overflows"))?;
    let upper = lower.set(smallest, bumped);

    let lower_gap = remaining(lower)?;
    if lower_gap == 0 {
        return balance_calendar_duration(lower, largest);
    }
    let upper_gap = remaining(upper)?;
    debug_assert!(lower_gap.signum() == sign);
    let chosen = match mode {
        RoundMode::Trunc => lower,
        RoundMode::Ceil => {
            if sign > 0 {
                upper
            } else {
                lower
            }
        }
        RoundMode::Floor => {
            if sign < 0 {
                upper
            } else {
                lower
            }
        }
        RoundMode::Nearest => {
            // The span between the candidates, in the linear unit.
            let den = lower_gap - upper_gap;
            if 2 * lower_gap.abs() >= den.abs() {
                upper
            } else {
                lower
            }
        }
    };
    trace!(
        "rounding {duration:?} at {smallest:?} chose between \
         {lower:?} (gap {lower_gap}) and {upper:?} (gap {upper_gap})",
    );
    balance_calendar_duration(chosen, largest)
}

/// Carries an overfull month field (from a rounding bump) into years when
/// the largest unit permits it. Adding `y` years and `m` months is
/// equivalent to adding `12y + m` months, so this rebalancing is exact.
fn balance_calendar_duration(
    duration: Duration,
    largest: Unit,
) -> Result<Duration, Error> {
    if largest != Unit::Year || duration.get_months().abs() < 12 {
        return Ok(duration);
    }
    let months = duration.get_months();
    duration
        .try_months(months % 12)?
        .try_years(duration.get_years() + months / 12)
}

#[cfg(test)]
impl quickcheck::Arbitrary for Date {
    fn arbitrary(g: &mut quickcheck::Gen) -> Date {
        let year = i32::arbitrary(g).rem_euclid(9999) + 1;
        let month = i8::arbitrary(g).rem_euclid(12) + 1;
        let day = i8::arbitrary(g).rem_euclid(31) + 1;
        let day = common::saturate_day_in_month(year, month, day);
        Date::new(year, month, day).unwrap()
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Date>> {
        let copy = *self;
        alloc::boxed::Box::new(
            (1..copy.day)
                .rev()
                .map(move |day| Date { day, ..copy })
                .chain(
                    (copy.year.signum()..copy.year)
                        .rev()
                        .take(3)
                        .map(move |year| {
                            Date::from_fields(
                                year,
                                copy.month,
                                copy.day,
                                crate::civil::Overflow::Constrain,
                            )
                            .unwrap()
                        }),
                ),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::ToDuration;

    use super::*;

    #[test]
    fn min_max_round_trip() {
        assert_eq!(Date::MIN.to_epoch_days(), MIN_EPOCH_DAYS);
        assert_eq!(Date::MAX.to_epoch_days(), MAX_EPOCH_DAYS);
        assert_eq!(Date::UNIX_EPOCH.to_epoch_days(), 0);
        assert_eq!(Date::from_epoch_days(MIN_EPOCH_DAYS).unwrap(), Date::MIN);
        assert_eq!(Date::from_epoch_days(MAX_EPOCH_DAYS).unwrap(), Date::MAX);
        assert!(Date::from_epoch_days(MAX_EPOCH_DAYS + 1).is_err());
    }

    #[test]
    fn overflow_strategies() {
        let constrained =
            Date::from_fields(2023, 2, 30, Overflow::Constrain).unwrap();
        assert_eq!(constrained, Date::constant(2023, 2, 28));

        let err = Date::from_fields(2023, 2, 30, Overflow::Reject)
            .unwrap_err();
        assert!(err.is_out_of_range());

        let balanced =
            Date::from_fields(2023, 1, 32, Overflow::Balance).unwrap();
        assert_eq!(balanced, Date::constant(2023, 2, 1));
        let balanced =
            Date::from_fields(2023, 13, 1, Overflow::Balance).unwrap();
        assert_eq!(balanced, Date::constant(2024, 1, 1));
        let balanced =
            Date::from_fields(2023, 0, 1, Overflow::Balance).unwrap();
        assert_eq!(balanced, Date::constant(2022, 12, 1));
    }

    #[test]
    fn add_months_clamps() {
        let jan31 = Date::constant(2020, 1, 31);
        assert_eq!(
            jan31.checked_add(1.month()).unwrap(),
            Date::constant(2020, 2, 29),
        );
        assert_eq!(
            Date::constant(2023, 1, 31).checked_add(1.month()).unwrap(),
            Date::constant(2023, 2, 28),
        );
        let err = jan31
            .checked_add_with(1.month(), Overflow::Reject)
            .unwrap_err();
        assert!(err.is_out_of_range());
        // Leap day plus a year clamps too.
        assert_eq!(
            Date::constant(2020, 2, 29).checked_add(1.year()).unwrap(),
            Date::constant(2021, 2, 28),
        );
    }

    #[test]
    fn add_mixed_units() {
        let date = Date::constant(2019, 1, 8);
        let got = date.checked_add(1.year().months(2).days(3)).unwrap();
        assert_eq!(got, Date::constant(2020, 3, 11));
        // Clock portions below a full day are dropped.
        let got = date.checked_add(23.hours()).unwrap();
        assert_eq!(got, date);
        let got = date.checked_add(36.hours()).unwrap();
        assert_eq!(got, Date::constant(2019, 1, 9));
    }

    #[test]
    fn add_sub_inverse() {
        let date = Date::constant(2024, 6, 15);
        let duration = 2.years().months(3).days(10);
        let there = date.checked_add(duration).unwrap();
        assert_eq!(there.checked_sub(duration).unwrap(), date);
    }

    #[test]
    fn until_days_default() {
        let d1 = Date::constant(2019, 1, 8);
        let d2 = Date::constant(2021, 9, 7);
        assert_eq!(d1.until(d2).unwrap(), 973.days());
        assert_eq!(d2.until(d1).unwrap(), (-973).days());
        assert_eq!(d1.until(d1).unwrap(), Duration::ZERO);
    }

    #[test]
    fn until_largest_units() {
        let d1 = Date::constant(2019, 1, 8);
        let d2 = Date::constant(2021, 9, 7);
        assert_eq!(
            d1.until((Unit::Year, d2)).unwrap(),
            2.years().months(7).days(30),
        );
        assert_eq!(
            d1.until((Unit::Month, d2)).unwrap(),
            31.months().days(30),
        );
        assert_eq!(
            d1.until((Unit::Week, d2)).unwrap(),
            139.weeks().days(0),
        );
    }

    #[test]
    fn until_whole_years_in_days() {
        let days = |y1: i32, y2: i32| {
            Date::constant(y1, 1, 1)
                .until(Date::constant(y2, 1, 1))
                .unwrap()
        };
        assert_eq!(days(2019, 2020), 365.days());
        assert_eq!(days(2020, 2021), 366.days());
    }

    #[test]
    fn until_borrows_through_short_months() {
        let d1 = Date::constant(2020, 1, 31);
        let d2 = Date::constant(2020, 3, 30);
        let got = d1.until((Unit::Month, d2)).unwrap();
        assert_eq!(got, 1.month().days(30));
        // The defining invariant: adding the difference lands on target.
        assert_eq!(d1.checked_add(got).unwrap(), d2);

        let got = d2.until((Unit::Month, d1)).unwrap();
        assert_eq!(d2.checked_add(got).unwrap(), d1);
    }

    #[test]
    fn until_rounding_modes() {
        let d1 = Date::constant(2019, 1, 8);
        let d2 = Date::constant(2021, 9, 7);
        // 2y7m30d is just shy of 2y8m; floor/trunc keep 2, nearest sees
        // more than half of the third year elapsed.
        let years = |mode| {
            d1.until(
                DateDifference::new(d2)
                    .smallest(Unit::Year)
                    .mode(mode),
            )
            .unwrap()
        };
        assert_eq!(years(RoundMode::Nearest), 3.years());
        assert_eq!(years(RoundMode::Floor), 2.years());
        assert_eq!(years(RoundMode::Trunc), 2.years());
        assert_eq!(years(RoundMode::Ceil), 3.years());
    }

    #[test]
    fn until_rounding_negative() {
        let d1 = Date::constant(2021, 9, 7);
        let d2 = Date::constant(2019, 1, 8);
        let years = |mode| {
            d1.until(
                DateDifference::new(d2)
                    .smallest(Unit::Year)
                    .mode(mode),
            )
            .unwrap()
        };
        assert_eq!(years(RoundMode::Nearest), (-3).years());
        assert_eq!(years(RoundMode::Floor), (-3).years());
        assert_eq!(years(RoundMode::Trunc), (-2).years());
        assert_eq!(years(RoundMode::Ceil), (-2).years());
    }

    #[test]
    fn until_rounding_balances_months() {
        // 2020-01-15 to 2021-12-20 is 1y11m5d; rounding up at months
        // must carry into years when years are allowed.
        let d1 = Date::constant(2020, 1, 15);
        let d2 = Date::constant(2021, 12, 20);
        let got = d1
            .until(
                DateDifference::new(d2)
                    .largest(Unit::Year)
                    .smallest(Unit::Month)
                    .mode(RoundMode::Ceil),
            )
            .unwrap();
        assert_eq!(got, 2.years());
    }

    #[test]
    fn since_mirrors_until() {
        let d1 = Date::constant(2019, 1, 8);
        let d2 = Date::constant(2021, 9, 7);
        assert_eq!(d2.since(d1).unwrap(), d1.until(d2).unwrap());
        assert_eq!(
            d2.since((Unit::Year, d1)).unwrap(),
            d1.until((Unit::Year, d2)).unwrap(),
        );
    }

    #[test]
    fn tomorrow_yesterday() {
        assert_eq!(
            Date::constant(2020, 2, 28).tomorrow().unwrap(),
            Date::constant(2020, 2, 29),
        );
        assert_eq!(
            Date::constant(2021, 3, 1).yesterday().unwrap(),
            Date::constant(2021, 2, 28),
        );
        assert!(Date::MAX.tomorrow().is_err());
        assert!(Date::MIN.yesterday().is_err());
    }

    #[test]
    fn day_of_year() {
        assert_eq!(Date::constant(2023, 1, 1).day_of_year(), 1);
        assert_eq!(Date::constant(2023, 12, 31).day_of_year(), 365);
        assert_eq!(Date::constant(2020, 12, 31).day_of_year(), 366);
    }

    #[test]
    fn display() {
        assert_eq!("2024-02-29", Date::constant(2024, 2, 29).to_string());
        assert_eq!("0000-01-01", Date::constant(0, 1, 1).to_string());
        assert_eq!("-000001-12-31", Date::constant(-1, 12, 31).to_string());
        assert_eq!("+275760-09-13", Date::MAX.to_string());
    }

    quickcheck::quickcheck! {
        fn prop_epoch_days_round_trip(date: Date) -> bool {
            Date::from_epoch_days(date.to_epoch_days()).unwrap() == date
        }

        fn prop_until_then_add_is_identity(d1: Date, d2: Date) -> bool {
            let duration = d1.until((Unit::Year, d2)).unwrap();
            d1.checked_add(duration).unwrap() == d2
        }

        fn prop_until_is_antisymmetric(d1: Date, d2: Date) -> bool {
            let forward = d1.until(d2).unwrap();
            let backward = d2.until(d1).unwrap();
            forward == backward.negate()
        }
    }
}
