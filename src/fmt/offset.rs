/*!
Parsing for UTC offset designators.

Accepts `Z` (case insensitive) and numeric offsets in extended
(`±HH[:MM[:SS]]`) or basic (`±HH[MM[SS]]`) form.
*/

use crate::{
    error::{err, parse_err, Error, ErrorContext},
    fmt::Parsed,
    tz::Offset,
    util::{escape, parse},
};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Parser {
    // Whether `Z` is an acceptable designator. It is for instants, but
    // not when an offset stands alone.
    zulu: bool,
}

impl Parser {
    pub(crate) const fn new() -> Parser {
        Parser { zulu: true }
    }

    pub(crate) const fn zulu(self, yes: bool) -> Parser {
        Parser { zulu: yes }
    }

    pub(crate) fn parse<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Offset>, Error> {
        match input.first() {
            None => Err(parse_err!("expected UTC offset, but found end of input")),
            Some(&b'Z') | Some(&b'z') if self.zulu => {
                Ok(Parsed { value: Offset::UTC, input: &input[1..] })
            }
            Some(&b'+') | Some(&b'-') => self.parse_numeric(input),
            Some(&byte) => Err(parse_err!(
                "expected UTC offset to start with a sign, \
                 but found {byte:?}",
                byte = escape::Byte(byte),
            )),
        }
    }

    fn parse_numeric<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Offset>, Error> {
        let sign: i32 = if input[0] == b'-' { -1 } else { 1 };
        let mut input = &input[1..];
        let (hours, rest) = parse::split(input, 2, "offset hours")?;
        let hours = parse::i64(hours)
            .context(err!("failed to parse offset hours"))?;
        if hours > 25 {
            return Err(Error::range("offset hours", hours, 0, 25));
        }
        input = rest;
        let extended = input.first() == Some(&b':');
        if extended {
            input = &input[1..];
        }
        let mut minutes = 0;
        let mut seconds = 0;
        if input.first().map_or(false, u8::is_ascii_digit) {
            let (mm, rest) = parse::split(input, 2, "offset minutes")?;
            minutes = parse::i64(mm)
                .context(err!("failed to parse offset minutes"))?;
            if minutes > 59 {
                return Err(Error::range("offset minutes", minutes, 0, 59));
            }
            input = rest;
            let has_seconds = if extended {
                if input.first() == Some(&b':') {
                    input = &input[1..];
                    true
                } else {
                    false
                }
            } else {
                input.first().map_or(false, u8::is_ascii_digit)
            };
            if has_seconds {
                let (ss, rest) = parse::split(input, 2, "offset seconds")?;
                seconds = parse::i64(ss)
                    .context(err!("failed to parse offset seconds"))?;
                if seconds > 59 {
                    return Err(Error::range(
                        "offset seconds",
                        seconds,
                        0,
                        59,
                    ));
                }
                input = rest;
            }
        } else if extended {
            return Err(parse_err!(
                "expected offset minutes after {sep:?}",
                sep = escape::Byte(b':'),
            ));
        }
        let total = (hours * 3_600 + minutes * 60 + seconds) as i32;
        let offset = Offset::from_seconds(sign * total)?;
        Ok(Parsed { value: offset, input })
    }
}
