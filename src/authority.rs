//! Scheme, host and port canonicalization.

use crate::{
    component::Scheme,
    config::Mode,
    pct_enc::{self, table},
};
use std::net::Ipv4Addr;

/// Lower-cases a scheme.
pub(crate) fn canonicalize_scheme(scheme: &str) -> String {
    scheme.to_ascii_lowercase()
}

/// Canonicalizes a host according to the mode.
///
/// In standard mode percent-encoded unreserved characters and sub-delimiters
/// are decoded and the host is lower-cased, with Unicode rules when it is
/// not ASCII. Hex digits of the remaining percent-encoded octets are
/// upper-cased.
///
/// In safe-browsing mode the host is first repaired: it is decoded to a
/// fixed point, stripped of leading dots and trailing dots or slashes,
/// cleared of empty labels and, when it is a plain decimal number, turned
/// into the IPv4 address that number stands for. It is then lower-cased
/// like a standard host before being escaped.
pub(crate) fn canonicalize_host(host: &str, mode: Mode) -> String {
    match mode {
        Mode::Standard => {
            const DECODE: table::Table = table::UNRESERVED.or(table::SUB_DELIMS);
            let host = pct_enc::decode_allowed(host, DECODE);
            pct_enc::uppercase_octets(&lowercase(&host)).into_owned()
        }
        Mode::SafeBrowsing => {
            let mut host = repair_host(&pct_enc::unescape_fully(host.as_bytes()));
            if let Some(addr) = decimal_ipv4(&host) {
                host = addr.to_string().into_bytes();
            }
            let host = match String::from_utf8(host) {
                Ok(s) => lowercase(&s).into_bytes(),
                Err(e) => {
                    let mut bytes = e.into_bytes();
                    bytes.make_ascii_lowercase();
                    bytes
                }
            };
            pct_enc::encode(&host, table::SAFE_BROWSING_HOST)
        }
    }
}

fn lowercase(host: &str) -> String {
    if host.is_ascii() {
        host.to_ascii_lowercase()
    } else {
        host.to_lowercase()
    }
}

/// Strips leading dots and trailing runs of dots or slashes, and collapses
/// consecutive dots.
fn repair_host(host: &[u8]) -> Vec<u8> {
    let start = host.iter().position(|&x| x != b'.').unwrap_or(host.len());
    let end = host
        .iter()
        .rposition(|&x| x != b'.' && x != b'/')
        .map_or(start, |i| i + 1)
        .max(start);

    let mut buf = Vec::with_capacity(end - start);
    for &x in &host[start..end] {
        if x == b'.' && buf.last() == Some(&b'.') {
            continue;
        }
        buf.push(x);
    }
    buf
}

/// Reads a host made only of decimal digits as a 32-bit IPv4 address.
fn decimal_ipv4(host: &[u8]) -> Option<Ipv4Addr> {
    if host.is_empty() || !host.iter().all(u8::is_ascii_digit) {
        return None;
    }
    // Digits only, so this is valid UTF-8.
    let digits = std::str::from_utf8(host).ok()?;
    digits.parse::<u32>().ok().map(Ipv4Addr::from)
}

/// Returns the port to keep, or an empty string if the port is empty or
/// is the default port of the scheme.
pub(crate) fn canonicalize_port<'a>(scheme: &str, port: &'a str) -> &'a str {
    let default = Scheme::new(scheme).and_then(Scheme::default_port);
    match port.parse::<u16>() {
        Ok(n) if Some(n) == default => "",
        _ => port,
    }
}
