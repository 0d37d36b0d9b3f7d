//! Splitting raw strings into URI components.
//!
//! Strings fed to a normalizer are often not valid URIs: they may contain
//! spaces, raw non-ASCII text, stray percent signs or reserved characters
//! where the grammar does not allow them. Splitting happens in three stages
//! so that none of these get in the way:
//!
//! 1. *Protect*: every byte that is neither reserved nor unreserved is
//!    percent-encoded, leaving the generic splitter a string made only of
//!    URI characters.
//! 2. *Split*: the protected string is cut into components.
//! 3. *Restore*: each component is percent-decoded once, which yields
//!    exactly its original text.

use crate::{
    component::UriComponents,
    error::{ParseError, ParseErrorKind},
    pct_enc::{self, table},
};
use std::borrow::Cow;

/// Splits a raw string into URI components.
///
/// Leading and trailing whitespace (ASCII control characters and space)
/// is ignored.
///
/// # Errors
///
/// Returns `Err` if an authority is found but its host is empty, or if its
/// port is invalid. The path-looking `"/test:2/"` fails this way since
/// `":2"` reads as a port.
///
/// # Examples
///
/// ```
/// use uri_canon::parse;
///
/// let c = parse("HTTP://user:pw@Example.com:8080/a b?q=1#top")?;
/// assert_eq!(c.scheme(), "HTTP");
/// assert_eq!(c.user(), "user");
/// assert_eq!(c.pass(), "pw");
/// assert_eq!(c.host(), "Example.com");
/// assert_eq!(c.port(), "8080");
/// assert_eq!(c.path(), "/a b");
/// assert_eq!(c.query(), "q=1");
/// assert_eq!(c.fragment(), "top");
///
/// assert!(parse("/test:2/").is_err());
/// # Ok::<_, uri_canon::ParseError>(())
/// ```
pub fn parse(raw: &str) -> Result<UriComponents, ParseError> {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_control() || c == ' ');
    let protected = protect(trimmed);

    match split(&protected) {
        Ok(parts) => Ok(parts.restore()),
        Err((index, kind)) => Err(ParseError::new(
            original_index(trimmed.as_bytes(), index),
            kind,
        )),
    }
}

fn protect(s: &str) -> Cow<'_, str> {
    if table::SPLITTABLE.validate(s.as_bytes()) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(pct_enc::encode(s.as_bytes(), table::SPLITTABLE))
    }
}

fn restore(s: &str) -> String {
    // Splitting only happens at ASCII delimiters, so the bytes of every
    // protected multi-byte character stay together and decode to valid UTF-8.
    match pct_enc::decode(s) {
        Cow::Borrowed(_) => s.to_owned(),
        Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// Maps an index into the protected string back to the original one.
fn original_index(original: &[u8], protected_index: usize) -> usize {
    let mut len = 0;
    for (i, &x) in original.iter().enumerate() {
        if len >= protected_index {
            return i;
        }
        len += if table::SPLITTABLE.allows(x) { 1 } else { 3 };
    }
    original.len()
}

#[derive(Default)]
struct Parts<'a> {
    scheme: Option<&'a str>,
    user: Option<&'a str>,
    pass: Option<&'a str>,
    host: Option<&'a str>,
    port: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl Parts<'_> {
    fn restore(self) -> UriComponents {
        let restore_opt = |s: Option<&str>| s.map(restore).unwrap_or_default();
        UriComponents {
            scheme: restore_opt(self.scheme),
            user: restore_opt(self.user),
            pass: restore_opt(self.pass),
            host: restore_opt(self.host),
            port: restore_opt(self.port),
            path: restore(self.path),
            query: restore_opt(self.query),
            fragment: restore_opt(self.fragment),
            had_query_delimiter: self.query.is_some(),
            had_fragment_delimiter: self.fragment.is_some(),
        }
    }
}

type SplitResult<'a> = Result<Parts<'a>, (usize, ParseErrorKind)>;

/// Splits a protected string, which contains only reserved and unreserved
/// characters and `'%'`.
fn split(s: &str) -> SplitResult<'_> {
    let mut parts = Parts::default();

    let Some(colon) = s.find(':') else {
        return if s.starts_with("//") {
            split_authority(s, 2, parts)
        } else {
            Ok(split_path(s, 0, parts))
        };
    };

    let (prefix, after) = (&s[..colon], &s[colon + 1..]);

    if !prefix.is_empty() && table::SCHEME.validate(prefix.as_bytes()) {
        if after.is_empty() {
            parts.scheme = Some(prefix);
            return Ok(parts);
        }
        if !after.starts_with('/') {
            // "example.com:80" is a host and a port, not a scheme and a path.
            if is_port_like(after) {
                return split_authority(s, 0, parts);
            }
            parts.scheme = Some(prefix);
            return Ok(split_path(s, colon + 1, parts));
        }
        parts.scheme = Some(prefix);
        return if after.starts_with("//") {
            split_authority(s, colon + 3, parts)
        } else {
            Ok(split_path(s, colon + 1, parts))
        };
    }

    let before_query = !prefix.contains(['?', '#']);
    if before_query && is_port_like(after) {
        let start = if s.starts_with("//") { 2 } else { 0 };
        split_authority(s, start, parts)
    } else if s.starts_with("//") {
        split_authority(s, 2, parts)
    } else {
        Ok(split_path(s, 0, parts))
    }
}

/// Checks whether the string starts with one to five digits that are
/// followed by a delimiter ending the authority, or by nothing.
pub(crate) fn is_port_like(s: &str) -> bool {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    (1..=5).contains(&digits)
        && matches!(s.as_bytes().get(digits), None | Some(b'/' | b'?' | b'#'))
}

fn split_authority<'a>(s: &'a str, start: usize, mut parts: Parts<'a>) -> SplitResult<'a> {
    let end = s[start..]
        .find(['/', '?', '#'])
        .map_or(s.len(), |i| start + i);
    let authority = &s[start..end];

    let mut host_start = start;
    if let Some(at) = authority.rfind('@') {
        let userinfo = &authority[..at];
        match userinfo.split_once(':') {
            Some((user, pass)) => {
                parts.user = Some(user);
                parts.pass = Some(pass);
            }
            None => parts.user = Some(userinfo),
        }
        host_start = start + at + 1;
    }

    let host_port = &s[host_start..end];
    let is_ip_literal = host_port.starts_with('[') && host_port.ends_with(']');
    let (host, port) = match host_port.rfind(':') {
        Some(i) if !is_ip_literal => {
            let port_start = host_start + i + 1;
            (&host_port[..i], Some((port_start, &host_port[i + 1..])))
        }
        _ => (host_port, None),
    };

    if let Some((port_start, port)) = port {
        if !port.is_empty() {
            let valid = port.len() <= 5
                && port.bytes().all(|x| x.is_ascii_digit())
                && port.parse::<u16>().is_ok();
            if !valid {
                return Err((port_start, ParseErrorKind::InvalidPort));
            }
            parts.port = Some(port);
        }
    }

    if host.is_empty() {
        return Err((host_start, ParseErrorKind::EmptyHost));
    }
    parts.host = Some(host);

    Ok(split_path(s, end, parts))
}

fn split_path<'a>(s: &'a str, start: usize, mut parts: Parts<'a>) -> Parts<'a> {
    let mut rest = &s[start..];
    if let Some((before, fragment)) = rest.split_once('#') {
        parts.fragment = Some(fragment);
        rest = before;
    }
    if let Some((before, query)) = rest.split_once('?') {
        parts.query = Some(query);
        rest = before;
    }
    parts.path = rest;
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(c: &UriComponents) -> [&str; 8] {
        [
            c.scheme(),
            c.user(),
            c.pass(),
            c.host(),
            c.port(),
            c.path(),
            c.query(),
            c.fragment(),
        ]
    }

    #[test]
    fn split_rules() {
        let cases = [
            (
                "http://example.com/a/b?c=d#e",
                ["http", "", "", "example.com", "", "/a/b", "c=d", "e"],
            ),
            (
                "mailto:mail@example.com",
                ["mailto", "", "", "", "", "mail@example.com", "", ""],
            ),
            ("example.com:80", ["", "", "", "example.com", "80", "", "", ""]),
            (
                "example.com:8080/x",
                ["", "", "", "example.com", "8080", "/x", "", ""],
            ),
            ("foo:", ["foo", "", "", "", "", "", "", ""]),
            ("foo:/bar", ["foo", "", "", "", "", "/bar", "", ""]),
            (
                "//example.com:81/",
                ["", "", "", "example.com", "81", "/", "", ""],
            ),
            ("www.google.com/", ["", "", "", "", "", "www.google.com/", "", ""]),
            ("/path?x=1:2", ["", "", "", "", "", "/path", "x=1:2", ""]),
            (
                "http://[::1]/",
                ["http", "", "", "[::1]", "", "/", "", ""],
            ),
            (
                "http://[::1]:8080/",
                ["http", "", "", "[::1]", "8080", "/", "", ""],
            ),
            (
                "http://a@b@host/",
                ["http", "a@b", "", "host", "", "/", "", ""],
            ),
            ("http://host:/", ["http", "", "", "host", "", "/", "", ""]),
        ];
        for (input, expected) in cases {
            let c = parse(input).unwrap();
            assert_eq!(fields(&c), expected, "{input}");
        }
    }

    #[test]
    fn reserved_characters_are_tolerated() {
        let c = parse("http://www.example.com/!$&'()*+,;=/?array[key]=value").unwrap();
        assert_eq!(c.path(), "/!$&'()*+,;=/");
        assert_eq!(c.query(), "array[key]=value");
    }

    #[test]
    fn components_are_restored_verbatim() {
        let c = parse("http://www.Яндекс.РФ/a%2Fb c/%%41?x=%25").unwrap();
        assert_eq!(c.host(), "www.Яндекс.РФ");
        assert_eq!(c.path(), "/a%2Fb c/%%41");
        assert_eq!(c.query(), "x=%25");
    }

    #[test]
    fn delimiters_are_recorded() {
        let c = parse("http://example.com/?").unwrap();
        assert!(c.had_query_delimiter());
        assert!(!c.had_fragment_delimiter());
        assert_eq!(c.query(), "");

        let c = parse("http://example.com/#").unwrap();
        assert!(!c.had_query_delimiter());
        assert!(c.had_fragment_delimiter());

        let c = parse("http://example.com/").unwrap();
        assert!(!c.had_query_delimiter());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let c = parse("  http://www.google.com/  ").unwrap();
        assert_eq!(c.scheme(), "http");
        assert_eq!(c.path(), "/");

        let c = parse("http:// leadingspace.com/").unwrap();
        assert_eq!(c.host(), " leadingspace.com");
    }

    #[test]
    fn failures() {
        let e = parse("/test:2/").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::EmptyHost);
        assert_eq!(e.index(), 0);

        let e = parse("http://:80/").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::EmptyHost);
        assert_eq!(e.index(), 7);

        let e = parse("http://host:99999/").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::InvalidPort);
        assert_eq!(e.index(), 12);

        let e = parse("http://host:12ab/").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::InvalidPort);

        let e = parse("http://user@/").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::EmptyHost);
    }

    #[test]
    fn error_index_points_into_original_text() {
        // "é" is protected as six bytes, the space as three.
        let e = parse("/é :1/").unwrap_err();
        assert_eq!(e.index(), 0);

        let e = parse("http://é@:1/").unwrap_err();
        assert_eq!(e.index(), "http://é@".len());
    }
}
