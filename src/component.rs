//! URI components.

use crate::pct_enc::table;
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use uri_canon::component::Scheme;
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Scheme::new("HTTP").unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the default port of the scheme, if known.
    ///
    /// Only `http` and `https` have entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_canon::component::Scheme;
    ///
    /// assert_eq!(Scheme::new_or_panic("HTTPS").default_port(), Some(443));
    /// assert_eq!(Scheme::new_or_panic("ftp").default_port(), None);
    /// ```
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        const DEFAULT_PORTS: &[(&Scheme, u16)] = &[
            (Scheme::new_or_panic("http"), 80),
            (Scheme::new_or_panic("https"), 443),
        ];
        DEFAULT_PORTS
            .iter()
            .find(|(scheme, _)| *scheme == self)
            .map(|&(_, port)| port)
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

/// The components of a URI, as split from a raw string.
///
/// Every field is empty when the component is absent. The scheme is stored
/// without its trailing `':'`, the query without its leading `'?'` and the
/// fragment without its leading `'#'`; whether those delimiters appeared
/// is tracked separately so that an empty query or fragment can be kept.
///
/// The [`Display`](std::fmt::Display) implementation writes the components
/// back out with their delimiters, without any normalization.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UriComponents {
    pub(crate) scheme: String,
    pub(crate) user: String,
    pub(crate) pass: String,
    pub(crate) host: String,
    pub(crate) port: String,
    pub(crate) path: String,
    pub(crate) query: String,
    pub(crate) fragment: String,
    pub(crate) had_query_delimiter: bool,
    pub(crate) had_fragment_delimiter: bool,
}

impl UriComponents {
    /// Returns the scheme without its trailing colon.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the scheme as a [`Scheme`], or `None` if it is empty or invalid.
    #[must_use]
    pub fn scheme_parsed(&self) -> Option<&Scheme> {
        Scheme::new(&self.scheme)
    }

    /// Returns the user name of the userinfo.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the password of the userinfo.
    #[must_use]
    pub fn pass(&self) -> &str {
        &self.pass
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query without its leading question mark.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the fragment without its leading number sign.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Checks whether the source string contained a `'?'` starting the query,
    /// even if the query is empty.
    #[must_use]
    pub fn had_query_delimiter(&self) -> bool {
        self.had_query_delimiter
    }

    /// Checks whether the source string contained a `'#'` starting the fragment,
    /// even if the fragment is empty.
    #[must_use]
    pub fn had_fragment_delimiter(&self) -> bool {
        self.had_fragment_delimiter
    }

    /// Checks whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_validation() {
        assert!(Scheme::new("http").is_some());
        assert!(Scheme::new("svn+ssh").is_some());
        assert!(Scheme::new("").is_none());
        assert!(Scheme::new("1http").is_none());
        assert!(Scheme::new("ht tp").is_none());
    }

    #[test]
    fn default_ports() {
        assert_eq!(Scheme::new_or_panic("http").default_port(), Some(80));
        assert_eq!(Scheme::new_or_panic("HtTpS").default_port(), Some(443));
        assert_eq!(Scheme::new_or_panic("example").default_port(), None);
    }

    #[test]
    fn empty_components() {
        assert!(UriComponents::default().is_empty());
        let c = UriComponents {
            had_query_delimiter: true,
            ..UriComponents::default()
        };
        assert!(!c.is_empty());
    }
}
