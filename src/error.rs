use thiserror::Error;

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// An authority was found but its host is empty.
    ///
    /// The error index points to where the host should have started.
    #[error("empty host")]
    EmptyHost,
    /// The port is longer than five characters, not numeric,
    /// or greater than 65535.
    ///
    /// The error index points to the first character of the port.
    #[error("invalid port")]
    InvalidPort,
}

/// An error occurred when splitting a string into URI components.
///
/// Malformed input is an expected condition for a normalizer fed with
/// arbitrary strings, so [`Normalizer::set_url`] reports it as `false`
/// instead of an error.
///
/// [`Normalizer::set_url`]: crate::Normalizer::set_url
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// The string could not be decomposed into a scheme/authority/path structure.
    #[error("unparseable URI: {kind} at index {index}")]
    Unparseable {
        /// Byte offset into the whitespace-trimmed input.
        index: usize,
        /// What went wrong.
        kind: ParseErrorKind,
    },
}

impl ParseError {
    pub(crate) fn new(index: usize, kind: ParseErrorKind) -> Self {
        Self::Unparseable { index, kind }
    }

    /// Returns the byte offset into the whitespace-trimmed input at which
    /// splitting gave up.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Unparseable { index, .. } => *index,
        }
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::Unparseable { kind, .. } => *kind,
        }
    }
}

/// An error returned when parsing a [`Mode`] from a string fails.
///
/// [`Mode`]: crate::Mode
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown normalization mode {0:?}, expected \"standard\" or \"safe-browsing\"")]
pub struct ParseModeError(pub(crate) String);
