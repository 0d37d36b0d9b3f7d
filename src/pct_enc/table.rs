//! Byte pattern tables from RFC 3986.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234] where the RFC defines the rule.
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

/// A table specifying the ASCII bytes that may appear unencoded in a string.
///
/// Any byte not allowed by a table is percent-encoded by [`encode`](super::encode).
/// Non-ASCII bytes are never allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, b'%' | 128..),
                "cannot allow non-ASCII byte or %"
            );
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Creates a table that allows every byte in `lo..=hi` except `b'%'`.
    ///
    /// # Panics
    ///
    /// Panics if `hi` is not ASCII.
    #[must_use]
    pub const fn range(lo: u8, hi: u8) -> Self {
        assert!(hi < 128, "cannot allow non-ASCII byte");
        let mut table = 0u128;
        let mut x = lo;
        while x <= hi {
            if x != b'%' {
                table |= 1u128 << x;
            }
            x += 1;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// by `self` but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the given unencoded byte is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether every byte of `s` is allowed by the table.
    #[must_use]
    pub const fn validate(self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            if !self.allows(s[i]) {
                return false;
            }
            i += 1;
        }
        true
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

// Rules from RFC 3986:

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

// Canonical forms used by the normalizer:

/// Bytes the splitter leaves in place before splitting: every
/// reserved or unreserved character.
pub const SPLITTABLE: Table = RESERVED.or(UNRESERVED);

/// Bytes left unencoded in canonical query keys and values.
pub const QUERY: Table = UNRESERVED.or(new(b"/;?"));

/// Bytes left unencoded in a canonical fragment.
pub const FRAGMENT: Table = UNRESERVED;

/// Printable ASCII except `"#"` and `"%"`: the bytes block-list
/// canonicalization leaves unescaped.
pub const SAFE_BROWSING: Table = Table::range(0x21, 0x7e).sub(new(b"#"));

/// [`SAFE_BROWSING`] without `"?"`, so a decoded path never grows a query.
pub const SAFE_BROWSING_PATH: Table = SAFE_BROWSING.sub(new(b"?"));

/// [`SAFE_BROWSING`] without the delimiters that would end a host.
pub const SAFE_BROWSING_HOST: Table = SAFE_BROWSING.sub(new(b"/?@:"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_skips_percent() {
        assert!(SAFE_BROWSING.allows(b'!'));
        assert!(SAFE_BROWSING.allows(b'~'));
        assert!(!SAFE_BROWSING.allows(b'%'));
        assert!(!SAFE_BROWSING.allows(b'#'));
        assert!(!SAFE_BROWSING.allows(b' '));
        assert!(!SAFE_BROWSING.allows(0x7f));
        assert!(!SAFE_BROWSING.allows(0x80));
    }

    #[test]
    fn scheme_table() {
        assert!(SCHEME.validate(b"svn+ssh"));
        assert!(SCHEME.validate(b"x-y.z"));
        assert!(!SCHEME.validate(b"/test"));
        assert!(!SCHEME.validate(b"ht%20tp"));
    }

    #[test]
    fn splittable_excludes_percent_and_space() {
        assert!(SPLITTABLE.validate(b"http://a@b:1/c?d=e&f#g[h]"));
        assert!(!SPLITTABLE.allows(b'%'));
        assert!(!SPLITTABLE.allows(b' '));
        assert!(!SPLITTABLE.allows(b'"'));
    }
}
