/*!
Helpers for parsing integers out of byte slices.

These exist because parsing happens on `&[u8]` (so that an error can quote
the raw offending input) and because the standard library's `from_str_radix`
is both `str`-based and more permissive than the ISO 8601 grammar allows
(it accepts a leading `+`, for example).
*/

use crate::{
    error::Error,
    util::escape::{Byte, Bytes},
};

/// Parses an unsigned decimal integer from the entire byte slice given.
///
/// The slice must be non-empty and contain only ASCII digits. This is used
/// for fixed-width fields (like a two digit month) where the caller has
/// already carved out the exact digits, and for variable-width duration
/// components where the caller has already consumed any sign.
pub(crate) fn i64(bytes: &[u8]) -> Result<i64, Error> {
    if bytes.is_empty() {
        return Err(Error::parse(format_args!(
            "invalid number, no digits found",
        )));
    }
    let mut number: i64 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(Error::parse(format_args!(
                "invalid digit {byte:?} in number {number:?}",
                byte = Byte(byte),
                number = Bytes(bytes),
            )));
        }
        number = number
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(byte - b'0')))
            .ok_or_else(|| {
                Error::parse(format_args!(
                    "number {number:?} too big to parse into a \
                     64-bit integer",
                    number = Bytes(bytes),
                ))
            })?;
    }
    Ok(number)
}

/// Parses a fractional component of 1 to 9 ASCII digits into a number of
/// nanoseconds.
///
/// The digits given are interpreted as the most significant digits of the
/// fraction. That is, `5` becomes `500_000_000` nanoseconds and
/// `123456789` becomes `123_456_789`.
pub(crate) fn fraction(bytes: &[u8]) -> Result<i32, Error> {
    if bytes.is_empty() {
        return Err(Error::parse(format_args!(
            "invalid fraction, no digits found after decimal point",
        )));
    }
    if bytes.len() > 9 {
        return Err(Error::parse(format_args!(
            "invalid fraction {fraction:?}, \
             at most 9 digits are supported",
            fraction = Bytes(bytes),
        )));
    }
    let mut nanoseconds: i32 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(Error::parse(format_args!(
                "invalid digit {byte:?} in fraction {fraction:?}",
                byte = Byte(byte),
                fraction = Bytes(bytes),
            )));
        }
        nanoseconds = nanoseconds * 10 + i32::from(byte - b'0');
    }
    // Zero-pad on the right up to nanosecond precision.
    for _ in bytes.len()..9 {
        nanoseconds *= 10;
    }
    Ok(nanoseconds)
}

/// Splits the given input at `at`, returning an error if the input is too
/// short. Used for fixed-width fields.
pub(crate) fn split<'i>(
    input: &'i [u8],
    at: usize,
    what: &'static str,
) -> Result<(&'i [u8], &'i [u8]), Error> {
    if input.len() < at {
        return Err(Error::parse(format_args!(
            "expected at least {at} bytes for {what}, \
             but found only {len} in {input:?}",
            len = input.len(),
            input = Bytes(input),
        )));
    }
    Ok(input.split_at(at))
}
