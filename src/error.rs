use alloc::{boxed::Box, string::ToString, sync::Arc};

/// An error that can occur in this crate.
///
/// This crate follows the "one error type" pattern: every fallible operation
/// returns this type, and the specific category of failure is exposed through
/// predicates like [`Error::is_out_of_range`]. Finer grained error types were
/// considered, but they compose poorly across operations that can fail for
/// several unrelated reasons (for example, parsing a zoned instant can fail
/// in the grammar, in field validation or in time zone resolution).
///
/// The categories correspond to the failure modes of the datetime model:
///
/// * A value or computed result is out of its supported range.
/// * A duration is malformed (mixed signs) or contains units that are not
/// allowed in the context in which it was used.
/// * ISO 8601 text is malformed.
/// * A civil datetime is ambiguous or non-existent in a particular time zone
/// and the caller asked for strict resolution.
/// * A time zone identifier could not be resolved.
/// * An option value (unit, rounding mode, disambiguation policy or an
/// invalid largest/smallest unit combination) is not valid.
/// * A parsed UTC offset disagrees with a parsed time zone annotation.
///
/// An `Error` is cheap to clone. It carries a chain of messages, where the
/// last message in the chain is the root cause. The `Display` impl prints
/// the full chain.
#[derive(Clone)]
pub struct Error {
    /// The representation is boxed behind an `Arc` so that an `Error` is one
    /// word big and cloning it never copies message text.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

/// The underlying kind of an [`Error`].
#[derive(Debug)]
enum ErrorKind {
    /// An ad hoc message used to contextualize another error. Never a root
    /// cause of a failure on its own, except for internal invariant
    /// violations that have no better category.
    Adhoc(Box<str>),
    /// A field or computed result violates its canonical bounds.
    Range(RangeError),
    /// Mixed-sign duration fields, or duration units disallowed in context.
    Duration(Box<str>),
    /// Malformed or incomplete ISO 8601 text.
    Parse(Box<str>),
    /// Zero or two instant candidates under strict zone resolution.
    AmbiguousLocalTime(Box<str>),
    /// A time zone identifier that isn't in the database and isn't a valid
    /// fixed offset literal.
    UnknownTimeZone(Box<str>),
    /// An unrecognized or inconsistent option value.
    Option(Box<str>),
    /// A UTC offset inconsistent with its time zone annotation.
    OffsetMismatch(Box<str>),
}

/// A range error for a specific parameter.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl Error {
    /// Returns true when this error is the result of a field value or a
    /// computed result being outside its supported range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::Range(_))
    }

    /// Returns true when this error is the result of an invalid duration:
    /// either mixed-sign fields, or units that aren't allowed in the
    /// operation attempted.
    pub fn is_invalid_duration(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::Duration(_))
    }

    /// Returns true when this error is the result of malformed ISO 8601
    /// text.
    pub fn is_parse(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::Parse(_))
    }

    /// Returns true when this error is the result of a civil datetime that
    /// is ambiguous or non-existent in a time zone, under strict
    /// disambiguation.
    pub fn is_ambiguous_local_time(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::AmbiguousLocalTime(_))
    }

    /// Returns true when this error is the result of a time zone identifier
    /// that could not be resolved.
    pub fn is_unknown_time_zone(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::UnknownTimeZone(_))
    }

    /// Returns true when this error is the result of an invalid option
    /// value or option combination.
    pub fn is_invalid_option(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::Option(_))
    }

    /// Returns true when this error is the result of a parsed UTC offset
    /// that disagrees with the time zone it was parsed with.
    pub fn is_offset_mismatch(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::OffsetMismatch(_))
    }
}

impl Error {
    fn new(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn adhoc(message: core::fmt::Arguments<'_>) -> Error {
        Error::new(ErrorKind::Adhoc(message.to_string().into()))
    }

    /// Creates a new error indicating that a `given` value is outside the
    /// `min..=max` range. The `what` label names the offending parameter in
    /// the error message (e.g., `"day"`).
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::new(ErrorKind::Range(RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }))
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn duration(message: core::fmt::Arguments<'_>) -> Error {
        Error::new(ErrorKind::Duration(message.to_string().into()))
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn parse(message: core::fmt::Arguments<'_>) -> Error {
        Error::new(ErrorKind::Parse(message.to_string().into()))
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn ambiguous(message: core::fmt::Arguments<'_>) -> Error {
        Error::new(ErrorKind::AmbiguousLocalTime(message.to_string().into()))
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn unknown_time_zone(name: &str) -> Error {
        Error::new(ErrorKind::UnknownTimeZone(name.into()))
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn option(message: core::fmt::Arguments<'_>) -> Error {
        Error::new(ErrorKind::Option(message.to_string().into()))
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn offset_mismatch(
        message: core::fmt::Arguments<'_>,
    ) -> Error {
        Error::new(ErrorKind::OffsetMismatch(message.to_string().into()))
    }

    /// Contextualizes this error with `consequent` as the new head of the
    /// error chain. `self` becomes the cause of `consequent`.
    pub(crate) fn context(self, mut consequent: Error) -> Error {
        // OK because the consequent error was just created by the caller
        // and thus its Arc has exactly one reference.
        let inner = Arc::get_mut(&mut consequent.inner)
            .expect("context error must be uniquely owned");
        assert!(inner.cause.is_none(), "cause of consequent must be None");
        inner.cause = Some(self);
        consequent
    }

    /// Returns the root error in this chain. That is, the error closest to
    /// the point where something actually went wrong.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self.kind(), f)?;
        let mut cause = self.inner.cause.as_ref();
        while let Some(err) = cause {
            write!(f, ": {}", err.kind())?;
            cause = err.inner.cause.as_ref();
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::Adhoc(ref msg) => write!(f, "{msg}"),
            ErrorKind::Range(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Duration(ref msg) => {
                write!(f, "invalid duration: {msg}")
            }
            ErrorKind::Parse(ref msg) => write!(f, "{msg}"),
            ErrorKind::AmbiguousLocalTime(ref msg) => write!(f, "{msg}"),
            ErrorKind::UnknownTimeZone(ref name) => {
                write!(
                    f,
                    "failed to resolve time zone identifier {name:?}: \
                     not present in the time zone database and not a \
                     valid fixed offset",
                )
            }
            ErrorKind::Option(ref msg) => write!(f, "{msg}"),
            ErrorKind::OffsetMismatch(ref msg) => write!(f, "{msg}"),
        }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A convenience macro for constructing an ad hoc `Error` from format
/// arguments.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::adhoc(format_args!($($tt)*))
    }}
}

pub(crate) use err;

/// Like `err!`, but for malformed input text, so that the error reports
/// itself as a parse failure.
macro_rules! parse_err {
    ($($tt:tt)*) => {{
        crate::error::Error::parse(format_args!($($tt)*))
    }}
}

pub(crate) use parse_err;

/// A simple trait for attaching extra context to an error.
///
/// The context given is pushed on to the head of the error chain, so the
/// original error remains the root cause for the `Error::is_*` predicates.
pub(crate) trait ErrorContext {
    fn context(self, consequent: Error) -> Self;
    fn with_context<F: FnOnce() -> Error>(self, consequent: F) -> Self;
}

impl<T> ErrorContext for Result<T, Error> {
    fn context(self, consequent: Error) -> Result<T, Error> {
        self.map_err(|err| err.context(consequent))
    }

    fn with_context<F: FnOnce() -> Error>(
        self,
        consequent: F,
    ) -> Result<T, Error> {
        self.map_err(|err| err.context(consequent()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_keeps_root_kind() {
        let err: Result<(), Error> =
            Err(Error::range("day", 32, 1, 31)).with_context(|| {
                err!("while validating 2024-01-32")
            });
        let err = err.unwrap_err();
        assert!(err.is_out_of_range());
        assert!(!err.is_parse());
        let displayed = err.to_string();
        assert!(displayed.starts_with("while validating"), "{displayed}");
        assert!(displayed.contains("1..=31"), "{displayed}");
    }

    #[test]
    fn error_is_small() {
        assert_eq!(
            core::mem::size_of::<Error>(),
            core::mem::size_of::<usize>()
        );
    }
}
