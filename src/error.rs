//! The error type for field and calendar operations.

use core::fmt;

/// The kind of a [`FieldError`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A generic error, when the error does not fit any other kind.
    #[default]
    Generic,
    /// A value fell outside the legal range of a field.
    Range,
    /// An intermediate or final value exceeded the representable
    /// integer range.
    Overflow,
    /// An operation was invoked on a field that does not support it.
    Unsupported,
    /// An argument was invalid at construction time.
    Type,
    /// An internal invariant did not hold.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Overflow => "OverflowError",
            Self::Unsupported => "UnsupportedError",
            Self::Type => "TypeError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error returned by fallible field and calendar operations.
///
/// Errors are created with a kind constructor and optionally refined
/// with a message:
///
/// ```rust
/// use chronofields::error::{ErrorKind, FieldError};
///
/// let err = FieldError::range().with_message("value out of range for field.");
/// assert_eq!(err.kind(), ErrorKind::Range);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    kind: ErrorKind,
    msg: &'static str,
}

impl FieldError {
    const fn new(kind: ErrorKind) -> Self {
        Self { kind, msg: "" }
    }

    /// Creates a generic error.
    #[must_use]
    pub const fn general() -> Self {
        Self::new(ErrorKind::Generic)
    }

    /// Creates a range error.
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Creates an arithmetic overflow error.
    #[must_use]
    pub const fn overflow() -> Self {
        Self::new(ErrorKind::Overflow)
    }

    /// Creates an unsupported-operation error.
    #[must_use]
    pub const fn unsupported() -> Self {
        Self::new(ErrorKind::Unsupported)
    }

    /// Creates an invalid-argument error.
    #[must_use]
    pub const fn argument() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Creates an assertion error. Asserts should be reachable only by
    /// an implementation bug.
    #[must_use]
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Attaches a message to this error.
    #[must_use]
    pub const fn with_message(mut self, msg: &'static str) -> Self {
        self.msg = msg;
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns this error's message, which may be empty.
    #[inline]
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.msg
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}
