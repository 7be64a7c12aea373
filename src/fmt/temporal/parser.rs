use crate::{
    civil::{Date, DateTime, Time},
    duration::Duration,
    error::{err, parse_err, Error, ErrorContext},
    fmt::{offset, Parsed},
    instant::Instant,
    round::Unit,
    tz::{Disambiguation, TimeZone, TimeZoneDatabase},
    util::{escape, parse},
};

/// A parser for the ISO 8601 formats of dates, times, datetimes and
/// instants.
///
/// A parser can be stored in a `static` and shared:
///
/// ```
/// use tempora::{civil::Date, fmt::temporal::DateTimeParser};
///
/// static PARSER: DateTimeParser = DateTimeParser::new();
///
/// let date = PARSER.parse_date("2024-06-15")?;
/// assert_eq!(date, Date::constant(2024, 6, 15));
/// # Ok::<(), tempora::Error>(())
/// ```
///
/// The only knob is [`DateTimeParser::validate_offset`], which controls
/// what happens when an input carries both a numeric UTC offset and a
/// bracketed zone annotation that disagree.
#[derive(Debug)]
pub struct DateTimeParser {
    validate_offset: bool,
}

impl DateTimeParser {
    /// Creates a new parser.
    pub const fn new() -> DateTimeParser {
        DateTimeParser { validate_offset: false }
    }

    /// When enabled, a numeric UTC offset accompanied by a bracketed zone
    /// annotation must be an offset that zone actually uses at that
    /// moment; a disagreement is an offset mismatch error. When disabled
    /// (the default), the bracketed name wins and the numeric offset is
    /// ignored.
    ///
    /// This only affects [`DateTimeParser::parse_instant_in`].
    pub const fn validate_offset(self, yes: bool) -> DateTimeParser {
        DateTimeParser { validate_offset: yes }
    }

    /// Parses a civil date like `2024-06-15`.
    ///
    /// Years outside `0000..=9999` require a sign and six digits, e.g.,
    /// `+275760-09-13`.
    pub fn parse_date<I: AsRef<[u8]>>(&self, input: I) -> Result<Date, Error> {
        self.parse_date_spec(input.as_ref())?.into_full("date")
    }

    /// Parses a wall-clock time like `13:37:31.123`.
    pub fn parse_time<I: AsRef<[u8]>>(&self, input: I) -> Result<Time, Error> {
        self.parse_time_spec(input.as_ref())?.into_full("time")
    }

    /// Parses a civil datetime like `2024-06-15T13:37:31`. The time may
    /// be omitted, in which case it defaults to midnight.
    pub fn parse_datetime<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<DateTime, Error> {
        self.parse_datetime_spec(input.as_ref())?.into_full("datetime")
    }

    /// Parses an instant from a datetime with a required offset
    /// designator, like `2024-06-15T18:37:31Z` or
    /// `2024-06-15T13:37:31-05:00`.
    ///
    /// A trailing bracketed zone annotation is accepted and ignored,
    /// since an instant has no time zone.
    pub fn parse_instant<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Instant, Error> {
        let input = input.as_ref();
        let datetime = self.parse_datetime_spec(input)?;
        let offset = offset::Parser::new()
            .parse(datetime.input)
            .context(err!("instant requires a UTC offset designator"))?;
        let dt = datetime.value;
        let instant = offset.value.to_instant(dt)?;
        let annotation = self.parse_annotation(offset.input)?;
        Parsed { value: instant, input: annotation.input }
            .into_full("instant")
    }

    /// Parses an instant by resolving a civil datetime against the given
    /// time zone.
    ///
    /// When the input carries an offset designator, the offset must be
    /// one that the zone actually uses at that moment; otherwise an
    /// offset mismatch error is returned. When the input has no offset,
    /// the wall time is resolved with the given disambiguation policy.
    pub fn parse_instant_with<I: AsRef<[u8]>>(
        &self,
        tz: &TimeZone,
        disambiguation: Disambiguation,
        input: I,
    ) -> Result<Instant, Error> {
        let input = input.as_ref();
        let datetime = self.parse_datetime_spec(input)?;
        let dt = datetime.value;
        let rest = datetime.input;
        if rest.is_empty() {
            return tz.to_instant_with(dt, disambiguation);
        }
        let offset = offset::Parser::new().parse(rest)?;
        let instant = offset.value.to_instant(dt)?;
        let annotation = self.parse_annotation(offset.input)?;
        Parsed { value: instant, input: annotation.input }
            .into_full("instant")?;
        if tz.to_offset(instant) != offset.value {
            return Err(Error::offset_mismatch(format_args!(
                "offset {offset} is not used by {tz:?} at {dt}",
                offset = offset.value,
            )));
        }
        Ok(instant)
    }

    /// Parses an instant from a datetime carrying a numeric offset, a
    /// bracketed zone annotation like `[America/New_York]`, or both, with
    /// named zones looked up in the given database.
    ///
    /// The bracketed name takes precedence: by default, when both are
    /// present the civil datetime is resolved through the named zone and
    /// the numeric offset is ignored. With
    /// [`validate_offset`](DateTimeParser::validate_offset) enabled, the
    /// numeric offset is used instead (which pins down the intended
    /// reading of a folded wall time) and a disagreement with the zone is
    /// an offset mismatch error.
    pub fn parse_instant_in<I: AsRef<[u8]>>(
        &self,
        db: &TimeZoneDatabase,
        disambiguation: Disambiguation,
        input: I,
    ) -> Result<Instant, Error> {
        let input = input.as_ref();
        let datetime = self.parse_datetime_spec(input)?;
        let dt = datetime.value;
        let mut rest = datetime.input;
        let offset = match rest.first() {
            Some(&b'+') | Some(&b'-') | Some(&b'Z') | Some(&b'z') => {
                let parsed = offset::Parser::new().parse(rest)?;
                rest = parsed.input;
                Some(parsed.value)
            }
            _ => None,
        };
        let annotation = self.parse_annotation(rest)?;
        if !annotation.input.is_empty() {
            return Err(parse_err!(
                "unparsed input {input:?} after instant",
                input = escape::Bytes(annotation.input),
            ));
        }
        let Some(name) = annotation.value else {
            let Some(offset) = offset else {
                return Err(parse_err!(
                    "instant requires a UTC offset designator or a \
                     bracketed zone annotation",
                ));
            };
            return offset.to_instant(dt);
        };
        let tz = db.get(name)?;
        let Some(offset) = offset else {
            return tz.to_instant_with(dt, disambiguation);
        };
        if !self.validate_offset {
            // The bracketed name wins over the numeric offset.
            return tz.to_instant_with(dt, disambiguation);
        }
        let instant = offset.to_instant(dt)?;
        if tz.to_offset(instant) != offset {
            return Err(Error::offset_mismatch(format_args!(
                "offset {offset} is not used by {tz:?} at {dt}",
            )));
        }
        Ok(instant)
    }

    /// Parses an optional bracketed zone annotation like
    /// `[America/New_York]` or `[!UTC]` (the critical flag is accepted
    /// and ignored).
    fn parse_annotation<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Option<&'i str>>, Error> {
        let Some((&b'[', rest)) = input.split_first() else {
            return Ok(Parsed { value: None, input });
        };
        let rest = match rest.split_first() {
            Some((&b'!', rest)) => rest,
            _ => rest,
        };
        let is_name_byte = |b: u8| {
            b.is_ascii_alphanumeric()
                || matches!(b, b'/' | b'_' | b'+' | b'-' | b'.')
        };
        let len = rest.iter().take_while(|&&b| is_name_byte(b)).count();
        if len == 0 {
            return Err(parse_err!(
                "expected a zone name in bracketed annotation, \
                 found {input:?}",
                input = escape::Bytes(rest),
            ));
        }
        let (name, rest) = rest.split_at(len);
        let Some((&b']', rest)) = rest.split_first() else {
            return Err(parse_err!(
                "unclosed bracketed annotation for zone name {name:?}",
                name = escape::Bytes(name),
            ));
        };
        // Only ASCII bytes are accepted above.
        let name = core::str::from_utf8(name).expect("ASCII zone name");
        Ok(Parsed { value: Some(name), input: rest })
    }

    fn parse_date_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Date>, Error> {
        let (sign, input) = match input.first() {
            Some(&b'+') => (1i32, &input[1..]),
            Some(&b'-') if input.len() > 4 && input[1].is_ascii_digit() => {
                // A leading `-` introduces a six digit year; a bare four
                // digit year never has one.
                (-1, &input[1..])
            }
            _ => (0, input),
        };
        let year_digits = if sign == 0 { 4 } else { 6 };
        let (year, input) = parse::split(input, year_digits, "year")?;
        let year = parse::i64(year).context(err!("failed to parse year"))?;
        let year = i32::try_from(year).expect("at most six digits");
        let year = if sign < 0 { -year } else { year };
        let (input, extended) = match input.first() {
            Some(&b'-') => (&input[1..], true),
            _ => (input, false),
        };
        let (month, input) = parse::split(input, 2, "month")?;
        let month = parse::i64(month).context(err!("failed to parse month"))?;
        let input = if extended {
            let Some((&b'-', rest)) = input.split_first() else {
                return Err(parse_err!(
                    "expected {sep:?} between month and day",
                    sep = escape::Byte(b'-'),
                ));
            };
            rest
        } else {
            input
        };
        let (day, input) = parse::split(input, 2, "day")?;
        let day = parse::i64(day).context(err!("failed to parse day"))?;
        let date = Date::new(year, month as i8, day as i8)
            .context(err!("parsed date is invalid"))?;
        Ok(Parsed { value: date, input })
    }

    fn parse_time_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Time>, Error> {
        let (hour, input) = parse::split(input, 2, "hour")?;
        let hour = parse::i64(hour).context(err!("failed to parse hour"))?;
        let (input, extended) = match input.first() {
            Some(&b':') => (&input[1..], true),
            _ => (input, false),
        };
        let mut minute = 0;
        let mut second = 0;
        let mut subsec = 0;
        let mut input = input;
        if extended || input.first().map_or(false, u8::is_ascii_digit) {
            let (mm, rest) = parse::split(input, 2, "minute")?;
            minute =
                parse::i64(mm).context(err!("failed to parse minute"))?;
            input = rest;
            let has_second = if extended {
                match input.first() {
                    Some(&b':') => {
                        input = &input[1..];
                        true
                    }
                    _ => false,
                }
            } else {
                input.first().map_or(false, u8::is_ascii_digit)
            };
            if has_second {
                let (ss, rest) = parse::split(input, 2, "second")?;
                second =
                    parse::i64(ss).context(err!("failed to parse second"))?;
                input = rest;
                // A leap second reading is clamped to the last
                // representable nanosecond-free second.
                if second == 60 {
                    second = 59;
                }
                if let Some((&point, rest)) = input.split_first() {
                    if point == b'.' || point == b',' {
                        let digits = rest
                            .iter()
                            .take_while(|b| b.is_ascii_digit())
                            .count();
                        subsec = parse::fraction(&rest[..digits])?;
                        input = &rest[digits..];
                    }
                }
            }
        }
        let time = Time::new(hour as i8, minute as i8, second as i8, subsec)
            .context(err!("parsed time is invalid"))?;
        Ok(Parsed { value: time, input })
    }

    fn parse_datetime_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, DateTime>, Error> {
        let date = self.parse_date_spec(input)?;
        let input = date.input;
        let (time, input) = match input.first() {
            Some(&b'T') | Some(&b't') | Some(&b' ') => {
                let time = self.parse_time_spec(&input[1..])?;
                (time.value, time.input)
            }
            _ => (Time::midnight(), input),
        };
        Ok(Parsed { value: DateTime::from_parts(date.value, time), input })
    }
}

impl Default for DateTimeParser {
    fn default() -> DateTimeParser {
        DateTimeParser::new()
    }
}

/// A parser for ISO 8601 durations like `P1y2m3dT4h5m6.007s`.
///
/// Unit designators are matched case insensitively. A fraction is only
/// permitted on the seconds component.
#[derive(Debug)]
pub struct DurationParser {
    _private: (),
}

impl DurationParser {
    /// Creates a new parser.
    pub const fn new() -> DurationParser {
        DurationParser { _private: () }
    }

    /// Parses a duration from the entire input given.
    pub fn parse_duration<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Duration, Error> {
        let input = input.as_ref();
        let (sign, input) = match input.first() {
            Some(&b'+') => (1i64, &input[1..]),
            Some(&b'-') => (-1, &input[1..]),
            _ => (1, input),
        };
        let input = match input.first() {
            Some(&b'P') | Some(&b'p') => &input[1..],
            _ => {
                return Err(parse_err!(
                    "duration must start with {p:?} \
                     (after an optional sign)",
                    p = escape::Byte(b'P'),
                ));
            }
        };
        let (date_part, input) = self.parse_units(
            input,
            &[
                (b'Y', Unit::Year),
                (b'M', Unit::Month),
                (b'W', Unit::Week),
                (b'D', Unit::Day),
            ],
        )?;
        let (time_part, subsec, input) = match input.first() {
            Some(&b'T') | Some(&b't') => {
                let input = &input[1..];
                let (values, subsec, input) = self.parse_time_units(input)?;
                if values.is_empty() {
                    return Err(parse_err!(
                        "expected at least one unit after the time \
                         designator",
                    ));
                }
                (values, subsec, input)
            }
            _ => (alloc::vec::Vec::new(), 0, input),
        };
        if !input.is_empty() {
            return Err(parse_err!(
                "unparsed input {input:?} after duration",
                input = escape::Bytes(input),
            ));
        }
        if date_part.is_empty() && time_part.is_empty() {
            return Err(parse_err!(
                "duration requires at least one unit component",
            ));
        }
        let mut duration = Duration::ZERO;
        for &(unit, value) in date_part.iter().chain(time_part.iter()) {
            duration = duration.set(unit, sign * value);
        }
        let nanos = i64::from(subsec);
        duration = duration
            .set(Unit::Millisecond, sign * (nanos / 1_000_000))
            .set(Unit::Microsecond, sign * ((nanos / 1_000) % 1_000))
            .set(Unit::Nanosecond, sign * (nanos % 1_000));
        // Round-trip through the constructor to apply range checks.
        let [y, mo, w, d, h, mi, s, ms, us, ns] =
            duration.fields().map(|(_, value)| value);
        Duration::from_fields(y, mo, w, d, h, mi, s, ms, us, ns)
    }

    /// Parses `<number><designator>` components in the given order, each
    /// optional.
    fn parse_units<'i>(
        &self,
        mut input: &'i [u8],
        designators: &[(u8, Unit)],
    ) -> Result<(alloc::vec::Vec<(Unit, i64)>, &'i [u8]), Error> {
        let mut values = alloc::vec::Vec::new();
        let mut next = 0;
        while input.first().map_or(false, u8::is_ascii_digit) {
            let digits =
                input.iter().take_while(|b| b.is_ascii_digit()).count();
            let value = parse::i64(&input[..digits])?;
            input = &input[digits..];
            let Some(&designator) = input.first() else {
                return Err(parse_err!(
                    "number {value} in duration has no unit designator",
                ));
            };
            let upper = designator.to_ascii_uppercase();
            let Some(position) = designators[next..]
                .iter()
                .position(|&(d, _)| d == upper)
            else {
                return Err(parse_err!(
                    "unexpected unit designator {designator:?} \
                     (wrong position or not valid here)",
                    designator = escape::Byte(designator),
                ));
            };
            let (_, unit) = designators[next + position];
            next += position + 1;
            values.push((unit, value));
            input = &input[1..];
        }
        Ok((values, input))
    }

    /// Parses the clock components after `T`, allowing a fraction on the
    /// seconds component only.
    fn parse_time_units<'i>(
        &self,
        mut input: &'i [u8],
    ) -> Result<(alloc::vec::Vec<(Unit, i64)>, i32, &'i [u8]), Error> {
        let designators = [
            (b'H', Unit::Hour),
            (b'M', Unit::Minute),
            (b'S', Unit::Second),
        ];
        let mut values = alloc::vec::Vec::new();
        let mut subsec = 0;
        let mut next = 0;
        while input.first().map_or(false, u8::is_ascii_digit) {
            let digits =
                input.iter().take_while(|b| b.is_ascii_digit()).count();
            let value = parse::i64(&input[..digits])?;
            input = &input[digits..];
            let mut fraction = 0;
            if let Some((&point, rest)) = input.split_first() {
                if point == b'.' || point == b',' {
                    let fraction_digits = rest
                        .iter()
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    fraction = parse::fraction(&rest[..fraction_digits])?;
                    input = &rest[fraction_digits..];
                }
            }
            let Some(&designator) = input.first() else {
                return Err(parse_err!(
                    "number {value} in duration has no unit designator",
                ));
            };
            let upper = designator.to_ascii_uppercase();
            let Some(position) = designators[next..]
                .iter()
                .position(|&(d, _)| d == upper)
            else {
                return Err(parse_err!(
                    "unexpected unit designator {designator:?} \
                     (wrong position or not valid here)",
                    designator = escape::Byte(designator),
                ));
            };
            let (_, unit) = designators[next + position];
            if fraction != 0 && unit != Unit::Second {
                return Err(parse_err!(
                    "fractions in durations are only supported on the \
                     seconds component",
                ));
            }
            next += position + 1;
            values.push((unit, value));
            subsec = fraction;
            input = &input[1..];
        }
        Ok((values, subsec, input))
    }
}

impl Default for DurationParser {
    fn default() -> DurationParser {
        DurationParser::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::ToDuration;

    use super::*;

    fn parser() -> &'static DateTimeParser {
        &super::super::DEFAULT_DATETIME_PARSER
    }

    #[test]
    fn parse_date() {
        let p = parser();
        assert_eq!(
            p.parse_date("2024-06-15").unwrap(),
            Date::constant(2024, 6, 15),
        );
        assert_eq!(
            p.parse_date("20240615").unwrap(),
            Date::constant(2024, 6, 15),
        );
        assert_eq!(
            p.parse_date("+275760-09-13").unwrap(),
            Date::MAX,
        );
        assert_eq!(
            p.parse_date("-000001-12-31").unwrap(),
            Date::constant(-1, 12, 31),
        );
        assert!(p.parse_date("2024-6-15").is_err());
        assert!(p.parse_date("2024-06-15T12:00").is_err());
        assert!(p.parse_date("2024-0615").is_err());
        let err = p.parse_date("2024-02-30").unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn parse_time() {
        let p = parser();
        assert_eq!(
            p.parse_time("13:37:31").unwrap(),
            Time::constant(13, 37, 31, 0),
        );
        assert_eq!(
            p.parse_time("13:37:31.123").unwrap(),
            Time::constant(13, 37, 31, 123_000_000),
        );
        assert_eq!(
            p.parse_time("13:37:31,123").unwrap(),
            Time::constant(13, 37, 31, 123_000_000),
        );
        assert_eq!(
            p.parse_time("133731").unwrap(),
            Time::constant(13, 37, 31, 0),
        );
        assert_eq!(p.parse_time("13:37").unwrap(), Time::constant(13, 37, 0, 0));
        // Leap second readings clamp.
        assert_eq!(
            p.parse_time("23:59:60").unwrap(),
            Time::constant(23, 59, 59, 0),
        );
        assert!(p.parse_time("24:00:00").is_err());
        assert!(p.parse_time("13:37:31.").is_err());
        assert!(p.parse_time("13:37:31.1234567891").is_err());
    }

    #[test]
    fn parse_datetime() {
        let p = parser();
        assert_eq!(
            p.parse_datetime("2024-06-15T13:37:31").unwrap(),
            DateTime::constant(2024, 6, 15, 13, 37, 31, 0),
        );
        assert_eq!(
            p.parse_datetime("2024-06-15 13:37:31").unwrap(),
            DateTime::constant(2024, 6, 15, 13, 37, 31, 0),
        );
        assert_eq!(
            p.parse_datetime("2024-06-15t13:37:31.5").unwrap(),
            DateTime::constant(2024, 6, 15, 13, 37, 31, 500_000_000),
        );
        assert_eq!(
            p.parse_datetime("2024-06-15").unwrap(),
            DateTime::constant(2024, 6, 15, 0, 0, 0, 0),
        );
        assert!(p.parse_datetime("2024-06-15T13:37:31Z").is_err());
    }

    #[test]
    fn parse_instant() {
        let p = parser();
        let instant = p.parse_instant("1970-01-01T00:00:00Z").unwrap();
        assert_eq!(instant, Instant::UNIX_EPOCH);
        let instant = p.parse_instant("1970-01-01T02:00:00+02:00").unwrap();
        assert_eq!(instant, Instant::UNIX_EPOCH);
        let instant = p.parse_instant("1969-12-31T19:00:00-05:00").unwrap();
        assert_eq!(instant, Instant::UNIX_EPOCH);
        // The offset designator is required.
        let err = p.parse_instant("1970-01-01T00:00:00").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn parse_instant_with_zone() {
        use crate::tz::{Offset, Transition};

        let tz = TimeZone::from_transitions(
            "Test/Spring",
            Offset::constant(1),
            [Transition {
                at: "2024-03-31T01:00:00Z".parse().unwrap(),
                offset: Offset::constant(2),
            }],
        )
        .unwrap();
        let p = parser();
        let instant = p
            .parse_instant_with(
                &tz,
                Disambiguation::Earlier,
                "2024-06-15T14:00:00",
            )
            .unwrap();
        assert_eq!(instant.to_string(), "2024-06-15T12:00:00Z");
        // A matching explicit offset is accepted.
        let instant = p
            .parse_instant_with(
                &tz,
                Disambiguation::Earlier,
                "2024-06-15T14:00:00+02:00",
            )
            .unwrap();
        assert_eq!(instant.to_string(), "2024-06-15T12:00:00Z");
        // An offset the zone does not use at that moment is rejected.
        let err = p
            .parse_instant_with(
                &tz,
                Disambiguation::Earlier,
                "2024-06-15T14:00:00+01:00",
            )
            .unwrap_err();
        assert!(err.is_offset_mismatch());
    }

    #[test]
    fn parse_instant_ignores_annotation() {
        let p = parser();
        let instant = p.parse_instant("1970-01-01T00:00:00Z[UTC]").unwrap();
        assert_eq!(instant, Instant::UNIX_EPOCH);
        let instant = p
            .parse_instant("1970-01-01T02:00:00+02:00[!Example/Zone]")
            .unwrap();
        assert_eq!(instant, Instant::UNIX_EPOCH);
        assert!(p.parse_instant("1970-01-01T00:00:00Z[UTC").is_err());
        assert!(p.parse_instant("1970-01-01T00:00:00Z[]").is_err());
    }

    #[test]
    fn parse_instant_in_database() {
        use crate::tz::{Offset, TimeZoneDatabase, Transition};

        let mut db = TimeZoneDatabase::new();
        db.add(
            TimeZone::from_transitions(
                "Test/Spring",
                Offset::constant(1),
                [Transition {
                    at: "2024-03-31T01:00:00Z".parse().unwrap(),
                    offset: Offset::constant(2),
                }],
            )
            .unwrap(),
        )
        .unwrap();
        let p = parser();
        let parse = |input: &str| {
            p.parse_instant_in(&db, Disambiguation::Earlier, input)
        };

        // Named zone alone resolves the wall time.
        let instant = parse("2024-06-15T14:00:00[Test/Spring]").unwrap();
        assert_eq!(instant.to_string(), "2024-06-15T12:00:00Z");
        // A numeric offset alone is used as given.
        let instant = parse("2024-06-15T14:00:00+02:00").unwrap();
        assert_eq!(instant.to_string(), "2024-06-15T12:00:00Z");
        // With both, the bracketed name wins by default, even when the
        // numeric offset disagrees.
        let instant = parse("2024-06-15T14:00:00+05:00[Test/Spring]").unwrap();
        assert_eq!(instant.to_string(), "2024-06-15T12:00:00Z");
        // Neither is an error.
        assert!(parse("2024-06-15T14:00:00").is_err());
        // Unknown names fail at zone lookup.
        let err = parse("2024-06-15T14:00:00[Test/Missing]").unwrap_err();
        assert!(err.is_unknown_time_zone());

        // Validation flips the precedence and checks consistency.
        let strict = DateTimeParser::new().validate_offset(true);
        let instant = strict
            .parse_instant_in(
                &db,
                Disambiguation::Earlier,
                "2024-06-15T14:00:00+02:00[Test/Spring]",
            )
            .unwrap();
        assert_eq!(instant.to_string(), "2024-06-15T12:00:00Z");
        let err = strict
            .parse_instant_in(
                &db,
                Disambiguation::Earlier,
                "2024-06-15T14:00:00+05:00[Test/Spring]",
            )
            .unwrap_err();
        assert!(err.is_offset_mismatch());
    }

    #[test]
    fn parse_duration() {
        let p = &super::super::DEFAULT_DURATION_PARSER;
        assert_eq!(
            p.parse_duration("P1Y2M3DT4H5M6S").unwrap(),
            1.year().months(2).days(3).hours(4).minutes(5).seconds(6),
        );
        assert_eq!(
            p.parse_duration("p1y2m3dT4h5m6s").unwrap(),
            1.year().months(2).days(3).hours(4).minutes(5).seconds(6),
        );
        assert_eq!(p.parse_duration("PT0S").unwrap(), Duration::ZERO);
        assert_eq!(p.parse_duration("P1W").unwrap(), 1.week());
        assert_eq!(
            p.parse_duration("-P1DT0.5S").unwrap(),
            (-1).day().milliseconds(-500),
        );
        assert_eq!(
            p.parse_duration("PT1.123456789S").unwrap(),
            1.second()
                .milliseconds(123)
                .microseconds(456)
                .nanoseconds(789),
        );
        // Unbalanced values are fine; sub-second fractions normalize.
        assert_eq!(p.parse_duration("PT90M").unwrap(), 90.minutes());
    }

    #[test]
    fn parse_duration_invalid() {
        let p = &super::super::DEFAULT_DURATION_PARSER;
        assert!(p.parse_duration("P").is_err());
        assert!(p.parse_duration("PT").is_err());
        assert!(p.parse_duration("1Y").is_err());
        // Wrong unit order.
        assert!(p.parse_duration("P1M2Y").is_err());
        // Fractions only on seconds.
        assert!(p.parse_duration("PT1.5H").is_err());
        assert!(p.parse_duration("P1Y rest").is_err());
    }
}
