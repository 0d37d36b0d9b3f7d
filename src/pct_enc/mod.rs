//! Percent-encoding utilities.
//!
//! Decoding here is lenient: a `'%'` that does not begin a valid
//! percent-encoded octet is passed through as a literal byte, the way URIs
//! in the wild are written. Encoding always emits upper-case hexadecimal
//! digits, which is the canonical form of [Section 6.2.2.1 of RFC 3986].
//!
//! [Section 6.2.2.1 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#section-6.2.2.1

pub mod table;

pub use table::Table;

use std::{borrow::Cow, iter::FusedIterator, str};

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(is_hexdig_pair(hi, lo));
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// Checks whether both bytes are hexadecimal digits.
#[inline]
pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    table::HEXDIG.allows(hi) && table::HEXDIG.allows(lo)
}

/// Returns the index of the first valid percent-encoded octet in `s`.
fn find_octet(s: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i + 2 < s.len() {
        if s[i] == b'%' && is_hexdig_pair(s[i + 1], s[i + 2]) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Checks whether `s` contains at least one valid percent-encoded octet.
#[must_use]
pub fn has_octet(s: &[u8]) -> bool {
    find_octet(s).is_some()
}

/// Percent-encodes a byte as an upper-case triplet.
///
/// # Examples
///
/// ```
/// use uri_canon::pct_enc::encode_byte;
///
/// assert_eq!(encode_byte(b'{'), "%7B");
/// assert_eq!(encode_byte(0xff), "%FF");
/// ```
#[must_use]
pub fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// An iterator used to decode a byte string.
///
/// This struct is created by [`Decode::new`]. Normally you'll use [`decode`]
/// instead, unless you need to treat decoded and unencoded bytes differently.
///
/// See the [`DecodedChunk`] type for documentation of the items yielded by this iterator.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Decode<'a> {
    source: &'a [u8],
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedChunk<'a> {
    /// An unencoded subslice, possibly containing stray `'%'` bytes.
    Unencoded(&'a [u8]),
    /// A percent-encoded octet, decoded (for example, `"%20"` decoded as `0x20`).
    PctDecoded(u8),
}

impl<'a> Decode<'a> {
    /// Creates a decoding iterator over the given bytes.
    pub fn new(source: &'a [u8]) -> Self {
        Self { source }
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            return None;
        }
        match find_octet(self.source) {
            Some(0) => {
                let (s, rem) = self.source.split_at(3);
                self.source = rem;
                Some(DecodedChunk::PctDecoded(decode_octet(s[1], s[2])))
            }
            Some(i) => {
                let (s, rem) = self.source.split_at(i);
                self.source = rem;
                Some(DecodedChunk::Unencoded(s))
            }
            None => {
                let s = self.source;
                self.source = &[];
                Some(DecodedChunk::Unencoded(s))
            }
        }
    }
}

impl FusedIterator for Decode<'_> {}

/// Decodes every valid percent-encoded octet in the string once.
///
/// This function allocates only when the string contains any percent-encoded octet.
///
/// # Examples
///
/// ```
/// use uri_canon::pct_enc::decode;
///
/// assert_eq!(*decode("%C2%A1Hola%21"), *"¡Hola!".as_bytes());
/// // Stray percent signs are kept.
/// assert_eq!(*decode("100%"), *b"100%");
/// // Only one layer is removed.
/// assert_eq!(*decode("%2541"), *b"%41");
/// ```
#[must_use]
pub fn decode(s: &str) -> Cow<'_, [u8]> {
    decode_bytes(s.as_bytes())
}

/// Decodes every valid percent-encoded octet in the bytes once.
#[must_use]
pub fn decode_bytes(s: &[u8]) -> Cow<'_, [u8]> {
    let Some(first) = find_octet(s) else {
        return Cow::Borrowed(s);
    };

    let mut buf = Vec::with_capacity(s.len());
    buf.extend_from_slice(&s[..first]);
    for chunk in Decode::new(&s[first..]) {
        match chunk {
            DecodedChunk::Unencoded(s) => buf.extend_from_slice(s),
            DecodedChunk::PctDecoded(x) => buf.push(x),
        }
    }
    Cow::Owned(buf)
}

/// Decodes the bytes repeatedly until no percent-encoded octet remains.
///
/// Every pass that finds an octet shortens the bytes by two, so
/// this always terminates.
///
/// # Examples
///
/// ```
/// use uri_canon::pct_enc::unescape_fully;
///
/// assert_eq!(unescape_fully(b"%2525252525252525"), b"%");
/// assert_eq!(unescape_fully(b"%25%32%35"), b"%");
/// assert_eq!(unescape_fully(b"%%%25%32%35asd%%"), b"%%%asd%%");
/// ```
#[must_use]
pub fn unescape_fully(s: &[u8]) -> Vec<u8> {
    let mut buf = s.to_vec();
    while has_octet(&buf) {
        buf = decode_bytes(&buf).into_owned();
    }
    buf
}

/// Percent-encodes every byte not allowed by the table, appending to `buf`.
pub fn encode_to(buf: &mut String, s: &[u8], table: Table) {
    for &x in s {
        if table.allows(x) {
            buf.push(x as char);
        } else {
            buf.push_str(encode_byte(x));
        }
    }
}

/// Percent-encodes every byte not allowed by the table.
///
/// # Examples
///
/// ```
/// use uri_canon::pct_enc::{encode, table};
///
/// assert_eq!(encode("a b[1]".as_bytes(), table::QUERY), "a%20b%5B1%5D");
/// assert_eq!(encode("é".as_bytes(), table::UNRESERVED), "%C3%A9");
/// ```
#[must_use]
pub fn encode(s: &[u8], table: Table) -> String {
    let mut buf = String::with_capacity(s.len());
    encode_to(&mut buf, s, table);
    buf
}

/// Escapes every byte `<= 0x20`, `>= 0x7F`, `'#'` and `'%'`, as block-list
/// URL canonicalization requires.
///
/// # Examples
///
/// ```
/// use uri_canon::pct_enc::escape_safe_browsing;
///
/// assert_eq!(escape_safe_browsing(b"%%%asd%%"), "%25%25%25asd%25%25");
/// assert_eq!(escape_safe_browsing(b"c#d $e"), "c%23d%20$e");
/// ```
#[must_use]
pub fn escape_safe_browsing(s: &[u8]) -> String {
    encode(s, table::SAFE_BROWSING)
}

/// Re-encodes the percent-encoded octets of `s` with upper-case hex digits,
/// leaving every other byte untouched.
pub(crate) fn uppercase_octets(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let needs_fix = (0..bytes.len().saturating_sub(2)).any(|i| {
        bytes[i] == b'%'
            && is_hexdig_pair(bytes[i + 1], bytes[i + 2])
            && (bytes[i + 1].is_ascii_lowercase() || bytes[i + 2].is_ascii_lowercase())
    });
    if !needs_fix {
        return Cow::Borrowed(s);
    }

    let mut buf = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = find_octet(rest.as_bytes()) {
        buf.push_str(&rest[..i]);
        buf.push('%');
        buf.push(rest.as_bytes()[i + 1].to_ascii_uppercase() as char);
        buf.push(rest.as_bytes()[i + 2].to_ascii_uppercase() as char);
        rest = &rest[i + 3..];
    }
    buf.push_str(rest);
    Cow::Owned(buf)
}

/// Decodes the percent-encoded octets of `s` that the table allows and
/// upper-cases the rest. Unencoded bytes, stray `'%'` included, are kept.
pub(crate) fn decode_allowed(s: &str, table: Table) -> String {
    let mut buf = String::with_capacity(s.len());
    for chunk in Decode::new(s.as_bytes()) {
        match chunk {
            DecodedChunk::Unencoded(s) => buf.push_str(&String::from_utf8_lossy(s)),
            DecodedChunk::PctDecoded(x) if table.allows(x) => buf.push(x as char),
            DecodedChunk::PctDecoded(x) => buf.push_str(encode_byte(x)),
        }
    }
    buf
}
