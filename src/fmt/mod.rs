/*!
Parsing and printing for the ISO 8601 interchange formats.

The entry points live in [`temporal`]: a [`DateTimeParser`] and
[`DateTimePrinter`](temporal::DateTimePrinter) for dates, times,
datetimes and instants, and a corresponding pair for durations. The
`Display` and `FromStr` impls on the main types route through these with
default configurations.

[`DateTimeParser`]: temporal::DateTimeParser
*/

use crate::error::{err, parse_err, Error};

pub(crate) mod offset;
#[cfg(feature = "serde")]
pub(crate) mod serde;
pub mod temporal;
pub(crate) mod util;

/// The result of parsing one value out of a byte slice: the value itself
/// and the input that remains after it.
#[derive(Debug)]
pub(crate) struct Parsed<'i, V> {
    /// The parsed value.
    pub(crate) value: V,
    /// The unparsed remainder of the input.
    pub(crate) input: &'i [u8],
}

impl<'i, V: core::fmt::Display> Parsed<'i, V> {
    /// Returns the parsed value, erroring if any input remains.
    pub(crate) fn into_full(self, what: &'static str) -> Result<V, Error> {
        if !self.input.is_empty() {
            return Err(parse_err!(
                "unparsed input {input:?} after {what} {value}",
                input = crate::util::escape::Bytes(self.input),
                value = self.value,
            ));
        }
        Ok(self.value)
    }
}

/// A sink for formatted output.
///
/// This is like [`core::fmt::Write`], except that errors carry this
/// crate's [`Error`] type. Implementations are provided for `String` and,
/// via the [`StdFmtWrite`] adapter, anything implementing
/// [`core::fmt::Write`].
pub trait Write {
    /// Writes the given string to this sink.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Writes the given character to this sink.
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for alloc::string::String {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl<W: Write + ?Sized> Write for &mut W {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter from [`core::fmt::Write`] to this crate's [`Write`].
///
/// Errors from the underlying writer are converted into opaque adhoc
/// errors, since `core::fmt::Error` carries no detail.
#[derive(Debug)]
pub struct StdFmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for StdFmtWrite<W> {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0
            .write_str(string)
            .map_err(|_| err!("an error occurred while writing"))
    }
}

/// An adapter from [`std::io::Write`] to this crate's [`Write`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct StdIoWrite<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Write for StdIoWrite<W> {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0
            .write_all(string.as_bytes())
            .map_err(|e| err!("failed to write to I/O sink: {e}"))
    }
}
