//! Path canonicalization.

use crate::{
    config::Mode,
    pct_enc::{self, table},
};

/// Canonicalizes a path.
///
/// In order: tab, CR and LF are removed, runs of `'/'` are collapsed,
/// dot segments are removed and percent-encoding is normalized the way
/// the mode requires. Decoding can surface new separators or dot segments
/// (`%2F`, `%2E`), so the whole sequence runs once more over its own output,
/// after which it is stable.
///
/// # Examples
///
/// ```
/// use uri_canon::{canonicalize_path, Mode};
///
/// assert_eq!(canonicalize_path("//a/./b/../b/%63/%7bfoo%7d", Mode::Standard), "/a/b/c/%7Bfoo%7D");
/// assert_eq!(canonicalize_path("/%2525252525252525", Mode::SafeBrowsing), "/%25");
/// ```
#[must_use]
pub fn canonicalize_path(path: &str, mode: Mode) -> String {
    let once = canonicalize_once(path, mode);
    canonicalize_once(&once, mode)
}

fn canonicalize_once(path: &str, mode: Mode) -> String {
    let path = path.replace(['\t', '\r', '\n'], "");
    let path = collapse_slashes(&path);
    let path = remove_dot_segments(&path);
    match mode {
        Mode::Standard => decode_sub_delims(&decode_unreserved(&path)),
        Mode::SafeBrowsing => pct_enc::encode(
            &pct_enc::unescape_fully(path.as_bytes()),
            table::SAFE_BROWSING_PATH,
        ),
    }
}

/// Collapses every run of `'/'` into a single `'/'`.
fn collapse_slashes(path: &str) -> String {
    let mut buf = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch == '/' && buf.ends_with('/') {
            continue;
        }
        buf.push(ch);
    }
    buf
}

/// Removes dot segments from a path, following the algorithm of
/// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4).
///
/// The rules are tried in order and the first match wins. Each one consumes
/// input, so the loop runs at most once per segment and dot.
///
/// # Examples
///
/// ```
/// use uri_canon::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/foo/bar/../../../baz"), "/baz");
/// assert_eq!(remove_dot_segments(".."), "");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        // A
        if let Some(rem) = input
            .strip_prefix("../")
            .or_else(|| input.strip_prefix("./"))
        {
            input = rem;
        }
        // B: "/./" and "/." become "/", which is the tail of "/./" or "/.".
        else if input.starts_with("/./") || input == "/." {
            input = &input[2..];
            if input.is_empty() {
                input = "/";
            }
        }
        // C
        else if input.starts_with("/../") || input == "/.." {
            input = &input[3..];
            if input.is_empty() {
                input = "/";
            }
            pop_segment(&mut output);
        }
        // D
        else if input == "." || input == ".." {
            input = "";
        }
        // E
        else {
            let from = usize::from(input.starts_with('/'));
            let seg_end = input[from..].find('/').map_or(input.len(), |i| i + from);
            output.push_str(&input[..seg_end]);
            input = &input[seg_end..];
        }
    }
    output
}

/// Removes the last segment and its preceding `'/'`, if any, from the buffer.
fn pop_segment(buf: &mut String) {
    let i = buf.rfind('/').unwrap_or(0);
    buf.truncate(i);
}

/// Upper-cases percent-encoded octets and decodes those that stand for
/// unreserved characters, `'/'`, `':'` or `'@'`.
///
/// Every valid octet is decoded once and the result is re-encoded so that
/// only unreserved characters and `/ : @` are left bare; anything else,
/// including a stray `'%'`, comes out as an upper-case triplet.
///
/// # Examples
///
/// ```
/// use uri_canon::decode_unreserved;
///
/// assert_eq!(decode_unreserved("%63/%7b"), "c/%7B");
/// assert_eq!(decode_unreserved("a%c2%b1b"), "a%C2%B1b");
/// assert_eq!(decode_unreserved("%7Eusername%3A"), "~username:");
/// ```
#[must_use]
pub fn decode_unreserved(s: &str) -> String {
    const KEEP: table::Table = table::UNRESERVED.or(table::Table::new(b"/:@"));
    pct_enc::encode(&pct_enc::decode(s), KEEP)
}

/// Decodes percent-encoded sub-delimiters (`! $ & ' ( ) * + , ; =`).
///
/// Other octets are left encoded, with upper-case hex digits. The
/// replacement cannot create a new octet, so a single pass suffices.
///
/// # Examples
///
/// ```
/// use uri_canon::decode_sub_delims;
///
/// assert_eq!(decode_sub_delims("%21%24%26%27%28%29%2A%2B%2C%3B%3D"), "!$&'()*+,;=");
/// assert_eq!(decode_sub_delims("%2525%7b"), "%2525%7B");
/// ```
#[must_use]
pub fn decode_sub_delims(s: &str) -> String {
    pct_enc::decode_allowed(s, table::SUB_DELIMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_segments() {
        let cases = [
            ("../", ""),
            ("./", ""),
            ("/./", "/"),
            ("/.", "/"),
            ("/a/b/c/./../../g", "/a/g"),
            ("mid/content=5/../6", "mid/6"),
            ("/foo/bar/.", "/foo/bar/"),
            ("/foo/bar/./", "/foo/bar/"),
            ("/foo/bar/..", "/foo/"),
            ("/foo/bar/../", "/foo/"),
            ("/foo/bar/../baz", "/foo/baz"),
            ("/foo/bar/../..", "/"),
            ("/foo/bar/../../", "/"),
            ("/foo/bar/../../baz", "/baz"),
            ("a/./b/../b/", "a/b/"),
            (".", ""),
            ("..", ""),
            ("/..", "/"),
            ("/../a", "/a"),
            ("../../a/b", "a/b"),
            ("/a/.b/..c/", "/a/.b/..c/"),
            ("é/../ü", "/ü"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(remove_dot_segments(input), expected, "{input}");
        }
    }

    #[test]
    fn slash_collapse() {
        assert_eq!(collapse_slashes("//foo///bar"), "/foo/bar");
        assert_eq!(collapse_slashes("/////"), "/");
        assert_eq!(collapse_slashes("a/b"), "a/b");
    }

    #[test]
    fn standard_percent_normalization() {
        let cases = [
            ("/%7Eusername/", "/~username/"),
            ("/a%c2%b1b", "/a%C2%B1b"),
            ("/%a1", "/%A1"),
            ("/!$&'()*+,;=/", "/!$&'()*+,;=/"),
            ("/%21%3d", "/!="),
            ("/100%", "/100%25"),
            ("/a[1]", "/a%5B1%5D"),
            ("/foo\tbar\rbaz\n2", "/foobarbaz2"),
            ("/a%2F%2Fb", "/a/b"),
            ("/a/%2E%2E/b", "/b"),
        ];
        for (input, expected) in cases {
            assert_eq!(canonicalize_path(input, Mode::Standard), expected, "{input}");
        }
    }

    #[test]
    fn safe_browsing_percent_normalization() {
        let cases = [
            ("/%25%32%35", "/%25"),
            ("/%25%32%35%25%32%35", "/%25%25"),
            ("/%2525252525252525", "/%25"),
            ("/asdf%25%32%35asd", "/asdf%25asd"),
            ("/%%%25%32%35asd%%", "/%25%25%25asd%25%25"),
            ("/ab%23cd", "/ab%23cd"),
            ("/a%3Fb", "/a%3Fb"),
            (
                "/%257Ea%2521b%2540c%2523d%2524e%25f%255E00%252611%252A22%252833%252944_55%252B",
                "/~a!b@c%23d$e%25f^00&11*22(33)44_55+",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(
                canonicalize_path(input, Mode::SafeBrowsing),
                expected,
                "{input}"
            );
        }
    }

    #[test]
    fn canonical_paths_are_stable() {
        for mode in [Mode::Standard, Mode::SafeBrowsing] {
            for input in ["/a/%2e%2E/%2F/b", "/%%2541%zz", "/é/ü?", "//./../x/"] {
                let once = canonicalize_path(input, mode);
                assert_eq!(canonicalize_path(&once, mode), once, "{input}");
            }
        }
    }
}
