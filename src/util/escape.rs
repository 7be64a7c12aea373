/*!
Convenience wrappers for printing raw input bytes in error messages.

Parse errors quote the offending input. Since parsing operates on `&[u8]`,
the input may not be valid UTF-8, so these wrappers render any invalid
bytes as hex escapes instead of panicking or lossily replacing them.
*/

/// Provides `Display` and `Debug` impls for a single byte, rendered as
/// ASCII when printable and as a hex escape otherwise.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let byte = self.0;
        if byte.is_ascii_graphic() || byte == b' ' {
            write!(f, "{}", char::from(byte))
        } else {
            write!(f, "\\x{byte:02X}")
        }
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Provides `Display` and `Debug` impls for a slice of bytes that is
/// expected, but not required, to be valid UTF-8.
#[derive(Clone, Copy)]
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        loop {
            match core::str::from_utf8(bytes) {
                Ok(string) => return f.write_str(string),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // OK because split at `valid_up_to` is guaranteed to
                    // be valid UTF-8.
                    f.write_str(core::str::from_utf8(valid).unwrap())?;
                    match rest.first() {
                        None => return Ok(()),
                        Some(&byte) => write!(f, "\\x{byte:02x}")?,
                    }
                    bytes = &rest[1..];
                }
            }
        }
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
