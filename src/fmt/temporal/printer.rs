use crate::{
    civil::{Date, DateTime, Time},
    duration::Duration,
    error::Error,
    fmt::{
        util::{DecimalFormatter, FractionalFormatter},
        Write,
    },
    instant::Instant,
    tz::Offset,
};

/// A printer for the ISO 8601 formats of dates, times, datetimes and
/// instants.
///
/// Like [`DateTimeParser`](super::DateTimeParser), this has no
/// configuration; the `Display` impls on the corresponding types route
/// through a shared `static` printer.
#[derive(Debug)]
pub struct DateTimePrinter {
    _private: (),
}

impl DateTimePrinter {
    /// Creates a new printer.
    pub const fn new() -> DateTimePrinter {
        DateTimePrinter { _private: () }
    }

    /// Prints a civil date like `2024-06-15`.
    ///
    /// Years outside `0000..=9999` are printed with an explicit sign and
    /// six digits, e.g., `+275760-09-13`.
    pub fn print_date<W: Write>(
        &self,
        date: &Date,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);
        static FMT_YEAR: DecimalFormatter = DecimalFormatter::new().padding(4);
        static FMT_YEAR_WIDE: DecimalFormatter =
            DecimalFormatter::new().padding(6);

        let year = i64::from(date.year());
        if (0..=9999).contains(&year) {
            wtr.write_str(FMT_YEAR.format(year).as_str())?;
        } else {
            wtr.write_char(if year < 0 { '-' } else { '+' })?;
            wtr.write_str(FMT_YEAR_WIDE.format(year.abs()).as_str())?;
        }
        wtr.write_char('-')?;
        wtr.write_str(FMT_TWO.format(i64::from(date.month())).as_str())?;
        wtr.write_char('-')?;
        wtr.write_str(FMT_TWO.format(i64::from(date.day())).as_str())?;
        Ok(())
    }

    /// Prints a wall-clock time like `13:37:31.123`, with any fraction
    /// trimmed of trailing zeros and omitted entirely when zero.
    pub fn print_time<W: Write>(
        &self,
        time: &Time,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);
        static FMT_FRACTION: FractionalFormatter = FractionalFormatter::new();

        wtr.write_str(FMT_TWO.format(i64::from(time.hour())).as_str())?;
        wtr.write_char(':')?;
        wtr.write_str(FMT_TWO.format(i64::from(time.minute())).as_str())?;
        wtr.write_char(':')?;
        wtr.write_str(FMT_TWO.format(i64::from(time.second())).as_str())?;
        let fraction =
            FMT_FRACTION.format(i64::from(time.subsec_nanosecond()));
        if !fraction.is_empty() {
            wtr.write_char('.')?;
            wtr.write_str(fraction.as_str())?;
        }
        Ok(())
    }

    /// Prints a civil datetime like `2024-06-15T13:37:31`.
    pub fn print_datetime<W: Write>(
        &self,
        datetime: &DateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_date(&datetime.date(), &mut wtr)?;
        wtr.write_char('T')?;
        self.print_time(&datetime.time(), &mut wtr)
    }

    /// Prints an instant as its UTC reading with a `Z` designator, like
    /// `2024-06-15T11:37:31Z`.
    pub fn print_instant<W: Write>(
        &self,
        instant: &Instant,
        mut wtr: W,
    ) -> Result<(), Error> {
        let datetime = Offset::UTC.to_datetime(*instant)?;
        self.print_datetime(&datetime, &mut wtr)?;
        wtr.write_char('Z')
    }
}

impl Default for DateTimePrinter {
    fn default() -> DateTimePrinter {
        DateTimePrinter::new()
    }
}

/// A printer for the ISO 8601 duration format.
///
/// Durations print in canonical uppercase form with their fields as
/// stored, without rebalancing: `90.minutes()` prints as `PT90M`, not
/// `PT1H30M`. The sub-second fields are folded into a fraction on the
/// seconds component.
#[derive(Debug)]
pub struct DurationPrinter {
    _private: (),
}

impl DurationPrinter {
    /// Creates a new printer.
    pub const fn new() -> DurationPrinter {
        DurationPrinter { _private: () }
    }

    /// Prints the given duration.
    pub fn print_duration<W: Write>(
        &self,
        duration: &Duration,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT: DecimalFormatter = DecimalFormatter::new();
        static FMT_FRACTION: FractionalFormatter = FractionalFormatter::new();

        if duration.is_negative() {
            wtr.write_char('-')?;
        }
        wtr.write_char('P')?;
        let date_units = [
            (duration.get_years(), 'Y'),
            (duration.get_months(), 'M'),
            (duration.get_weeks(), 'W'),
            (duration.get_days(), 'D'),
        ];
        let mut printed = false;
        for (value, designator) in date_units {
            if value == 0 {
                continue;
            }
            wtr.write_str(FMT.format(value.abs()).as_str())?;
            wtr.write_char(designator)?;
            printed = true;
        }
        // Normalization keeps every sub-second field below 1000 in
        // magnitude, so the combined fraction is below one second.
        let subsec_nanos = duration.get_milliseconds().abs() * 1_000_000
            + duration.get_microseconds().abs() * 1_000
            + duration.get_nanoseconds().abs();
        let seconds = duration.get_seconds().abs();
        let time_units = [
            (duration.get_hours().abs(), 'H'),
            (duration.get_minutes().abs(), 'M'),
        ];
        let has_time = time_units.iter().any(|&(value, _)| value != 0);
        // The seconds component also prints when nothing else would, so
        // that the zero duration renders as `PT0S`.
        let print_seconds = seconds != 0
            || subsec_nanos != 0
            || (!printed && !has_time);
        if has_time || print_seconds {
            wtr.write_char('T')?;
        }
        for (value, designator) in time_units {
            if value == 0 {
                continue;
            }
            wtr.write_str(FMT.format(value).as_str())?;
            wtr.write_char(designator)?;
        }
        if print_seconds {
            wtr.write_str(FMT.format(seconds).as_str())?;
            let fraction = FMT_FRACTION.format(subsec_nanos);
            if !fraction.is_empty() {
                wtr.write_char('.')?;
                wtr.write_str(fraction.as_str())?;
            }
            wtr.write_char('S')?;
        }
        Ok(())
    }
}

impl Default for DurationPrinter {
    fn default() -> DurationPrinter {
        DurationPrinter::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use crate::ToDuration;

    use super::*;

    #[test]
    fn print_date() {
        let printer = DateTimePrinter::new();
        let print = |date: Date| {
            let mut buf = String::new();
            printer.print_date(&date, &mut buf).unwrap();
            buf
        };
        assert_eq!(print(Date::constant(2024, 6, 15)), "2024-06-15");
        assert_eq!(print(Date::constant(0, 1, 1)), "0000-01-01");
        assert_eq!(print(Date::constant(-1, 12, 31)), "-000001-12-31");
        assert_eq!(print(Date::MAX), "+275760-09-13");
        assert_eq!(print(Date::MIN), "-271821-04-19");
    }

    #[test]
    fn print_time() {
        let printer = DateTimePrinter::new();
        let print = |time: Time| {
            let mut buf = String::new();
            printer.print_time(&time, &mut buf).unwrap();
            buf
        };
        assert_eq!(print(Time::midnight()), "00:00:00");
        assert_eq!(print(Time::constant(13, 37, 31, 123_450_000)), "13:37:31.12345");
        assert_eq!(print(Time::MAX), "23:59:59.999999999");
    }

    #[test]
    fn print_instant() {
        let printer = DateTimePrinter::new();
        let mut buf = String::new();
        printer.print_instant(&Instant::UNIX_EPOCH, &mut buf).unwrap();
        assert_eq!(buf, "1970-01-01T00:00:00Z");
    }

    #[test]
    fn print_duration() {
        let printer = DurationPrinter::new();
        let print = |duration: Duration| {
            let mut buf = String::new();
            printer.print_duration(&duration, &mut buf).unwrap();
            buf
        };
        assert_eq!(print(Duration::ZERO), "PT0S");
        assert_eq!(print(1.year().months(2).days(3)), "P1Y2M3D");
        assert_eq!(print(1.hour().minutes(2).seconds(3)), "PT1H2M3S");
        assert_eq!(print(-5.days()), "-P5D");
        assert_eq!(print(500.milliseconds()), "PT0.5S");
        assert_eq!(print(1.week()), "P1W");
        assert_eq!(print(90.minutes()), "PT90M");
        assert_eq!(print(2.hours()), "PT2H");
        assert_eq!(print(1.day().hours(5)), "P1DT5H");
        assert_eq!(
            print(1.second().milliseconds(123).microseconds(456).nanoseconds(789)),
            "PT1.123456789S",
        );
    }

    #[test]
    fn round_trips_with_parser() {
        use crate::fmt::temporal::{
            DEFAULT_DATETIME_PARSER, DEFAULT_DURATION_PARSER,
        };

        let dt = DateTime::constant(2020, 2, 29, 23, 59, 59, 999_999_999);
        assert_eq!(
            DEFAULT_DATETIME_PARSER
                .parse_datetime(dt.to_string())
                .unwrap(),
            dt,
        );
        let duration = (-3).years().months(-11).hours(-4).nanoseconds(-1);
        assert_eq!(
            DEFAULT_DURATION_PARSER
                .parse_duration(duration.to_string())
                .unwrap(),
            duration,
        );
    }
}
