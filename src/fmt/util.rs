/*!
Small integer-to-ASCII formatters used by the printers.

Formatting goes through fixed stack buffers rather than `format!` so the
printers stay allocation free.
*/

/// Formats signed integers with optional zero padding.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DecimalFormatter {
    padding: u8,
}

impl DecimalFormatter {
    pub(crate) const fn new() -> DecimalFormatter {
        DecimalFormatter { padding: 0 }
    }

    /// Zero-pads the formatted integer to at least the given number of
    /// digits (not counting any sign).
    pub(crate) const fn padding(self, digits: u8) -> DecimalFormatter {
        DecimalFormatter { padding: digits }
    }

    pub(crate) fn format(&self, value: i64) -> Decimal {
        let mut decimal = Decimal { buf: [0; Decimal::MAX_LEN], start: 0 };
        let mut pos = Decimal::MAX_LEN;
        let negative = value < 0;
        // Work on the unsigned magnitude to dodge `i64::MIN` negation.
        let mut magnitude = value.unsigned_abs();
        loop {
            pos -= 1;
            decimal.buf[pos] = b'0' + (magnitude % 10) as u8;
            magnitude /= 10;
            if magnitude == 0 {
                break;
            }
        }
        while Decimal::MAX_LEN - pos < usize::from(self.padding) {
            pos -= 1;
            decimal.buf[pos] = b'0';
        }
        if negative {
            pos -= 1;
            decimal.buf[pos] = b'-';
        }
        decimal.start = pos as u8;
        decimal
    }
}

/// A formatted decimal number. Get at it via `as_str`.
pub(crate) struct Decimal {
    buf: [u8; Decimal::MAX_LEN],
    start: u8,
}

impl Decimal {
    /// Sign plus a zero-padded `i64::MIN`.
    const MAX_LEN: usize = 20;

    pub(crate) fn as_str(&self) -> &str {
        // Only ASCII digits and `-` are ever written.
        core::str::from_utf8(&self.buf[usize::from(self.start)..])
            .expect("decimal buffer is ASCII")
    }
}

/// Formats a nanosecond fraction of a second, trimming trailing zeros.
///
/// The input is a number of nanoseconds in `0..=999_999_999`, printed as
/// the digits after a decimal point: `123_000_000` becomes `123` and
/// `500` becomes `0000005`. Zero formats as the empty string.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FractionalFormatter;

impl FractionalFormatter {
    pub(crate) const fn new() -> FractionalFormatter {
        FractionalFormatter
    }

    pub(crate) fn format(&self, nanoseconds: i64) -> Fractional {
        debug_assert!((0..=999_999_999).contains(&nanoseconds));
        let mut fractional = Fractional { buf: [0; 9], end: 9 };
        let mut value = nanoseconds;
        for pos in (0..9).rev() {
            fractional.buf[pos] = b'0' + (value % 10) as u8;
            value /= 10;
        }
        while fractional.end > 0 && fractional.buf[fractional.end - 1] == b'0'
        {
            fractional.end -= 1;
        }
        fractional
    }
}

/// A formatted fraction. Get at it via `as_str`.
pub(crate) struct Fractional {
    buf: [u8; 9],
    end: usize,
}

impl Fractional {
    pub(crate) fn is_empty(&self) -> bool {
        self.end == 0
    }

    pub(crate) fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.end])
            .expect("fraction buffer is ASCII")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        let f = DecimalFormatter::new();
        assert_eq!("0", f.format(0).as_str());
        assert_eq!("42", f.format(42).as_str());
        assert_eq!("-42", f.format(-42).as_str());
        assert_eq!(
            "-9223372036854775808",
            f.format(i64::MIN).as_str(),
        );

        let f = DecimalFormatter::new().padding(4);
        assert_eq!("0000", f.format(0).as_str());
        assert_eq!("0042", f.format(42).as_str());
        assert_eq!("-0042", f.format(-42).as_str());
        assert_eq!("12345", f.format(12345).as_str());
    }

    #[test]
    fn fractional() {
        let f = FractionalFormatter::new();
        assert!(f.format(0).is_empty());
        assert_eq!("123", f.format(123_000_000).as_str());
        assert_eq!("0000005", f.format(500).as_str());
        assert_eq!("123456789", f.format(123_456_789).as_str());
        assert_eq!("5", f.format(500_000_000).as_str());
    }
}
