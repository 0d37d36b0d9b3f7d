//! Normalization configuration.

use crate::error::ParseModeError;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The canonicalization variant a [`Normalizer`](crate::Normalizer) applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Mode {
    /// Syntax-based and scheme-based normalization from
    /// [Section 6.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-6.2).
    #[default]
    Standard,
    /// The stricter canonicalization used for block-list matching.
    ///
    /// On top of the standard rules this mode defaults the scheme to `http`,
    /// repairs obfuscated hosts (percent-encoded, trailing dots, decimal IPv4),
    /// decodes the path to a fixed point before re-escaping it and drops the
    /// fragment.
    SafeBrowsing,
}

impl Mode {
    /// Returns the canonical name of the mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::SafeBrowsing => "safe-browsing",
        }
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Parses a mode name.
    ///
    /// `"normal"` and `"safebrowsing"` are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "normal" => Ok(Self::Standard),
            "safe-browsing" | "safebrowsing" | "safe_browsing" => Ok(Self::SafeBrowsing),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}

/// Configuration captured by a [`Normalizer`](crate::Normalizer) at construction.
///
/// # Examples
///
/// ```
/// use uri_canon::{Mode, NormalizationConfig};
///
/// let config = NormalizationConfig::new()
///     .sort_query_params(true)
///     .mode(Mode::SafeBrowsing);
///
/// assert!(config.sorts_query_params());
/// assert!(!config.removes_empty_delimiters());
/// assert_eq!(config.get_mode(), Mode::SafeBrowsing);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[must_use]
pub struct NormalizationConfig {
    remove_empty_delimiters: bool,
    sort_query_params: bool,
    mode: Mode,
}

impl NormalizationConfig {
    /// Creates a new `NormalizationConfig` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to drop a bare `'?'` or `'#'` whose component is empty.
    ///
    /// This defaults to `false`, which keeps `http://example.com/?` as is.
    pub fn remove_empty_delimiters(mut self, value: bool) -> Self {
        self.remove_empty_delimiters = value;
        self
    }

    /// Sets whether to sort query parameters by key, byte-wise.
    ///
    /// This defaults to `false`, which keeps the first-seen order.
    pub fn sort_query_params(mut self, value: bool) -> Self {
        self.sort_query_params = value;
        self
    }

    /// Sets the canonicalization mode.
    ///
    /// This defaults to [`Mode::Standard`].
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks whether bare empty delimiters are dropped.
    #[must_use]
    pub fn removes_empty_delimiters(&self) -> bool {
        self.remove_empty_delimiters
    }

    /// Checks whether query parameters are sorted.
    #[must_use]
    pub fn sorts_query_params(&self) -> bool {
        self.sort_query_params
    }

    /// Returns the canonicalization mode.
    #[must_use]
    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn is_safe_browsing(&self) -> bool {
        self.mode == Mode::SafeBrowsing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!("standard".parse(), Ok(Mode::Standard));
        assert_eq!("normal".parse(), Ok(Mode::Standard));
        assert_eq!("SafeBrowsing".parse(), Ok(Mode::SafeBrowsing));
        assert_eq!("safe-browsing".parse(), Ok(Mode::SafeBrowsing));
        assert!("strict".parse::<Mode>().is_err());

        for mode in [Mode::Standard, Mode::SafeBrowsing] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    fn defaults() {
        let config = NormalizationConfig::default();
        assert!(!config.removes_empty_delimiters());
        assert!(!config.sorts_query_params());
        assert_eq!(config.get_mode(), Mode::Standard);
    }
}
