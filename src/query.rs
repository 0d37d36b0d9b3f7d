//! Query canonicalization.

use crate::{
    config::NormalizationConfig,
    pct_enc::{self, table},
};
use std::collections::HashMap;

/// A query key with every value given to it, in order of appearance.
///
/// Keys and values are percent-decoded and may hold arbitrary bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryEntry {
    /// The decoded key.
    pub key: Vec<u8>,
    /// The decoded values, one per occurrence of the key.
    pub values: Vec<Vec<u8>>,
}

/// Parses a query into an ordered multimap.
///
/// The query is split on `'&'` and each pair is split on its first `'='`.
/// A pair without `'='` has an empty value. Pairs with an empty key and an
/// empty value, such as `""` or `"="`, are skipped.
/// Keys and values are percent-decoded once; pairs whose decoded keys are
/// equal are grouped under the first occurrence.
///
/// # Examples
///
/// ```
/// use uri_canon::parse_query;
///
/// let entries = parse_query("foo[]=bar&x&&foo%5B%5D=baz&k=a=b");
/// assert_eq!(entries.len(), 3);
/// assert_eq!(entries[0].key, b"foo[]");
/// assert_eq!(entries[0].values, [&b"bar"[..], b"baz"]);
/// assert_eq!(entries[1].values, [b""]);
/// assert_eq!(entries[2].values, [b"a=b"]);
/// ```
#[must_use]
pub fn parse_query(query: &str) -> Vec<QueryEntry> {
    let mut entries: Vec<QueryEntry> = Vec::new();
    let mut index: HashMap<Vec<u8>, usize> = HashMap::new();

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key.is_empty() && value.is_empty() {
            continue;
        }
        let key = pct_enc::decode(key).into_owned();
        let value = pct_enc::decode(value).into_owned();

        match index.get(&key) {
            Some(&i) => entries[i].values.push(value),
            None => {
                index.insert(key.clone(), entries.len());
                entries.push(QueryEntry {
                    key,
                    values: vec![value],
                });
            }
        }
    }
    entries
}

/// Canonicalizes a query, returning it with its leading `'?'`.
///
/// Keys and values are re-encoded so that only unreserved characters and
/// `/ ; ?` are left bare; a space becomes `%20`, never `'+'`. A value that
/// is empty is written without `'='`. When the configuration asks for it,
/// keys are sorted byte-wise, keeping the order of values under each key.
///
/// An empty query yields `"?"` if `had_delimiter` is set and the
/// configuration keeps empty delimiters, and `""` otherwise.
///
/// # Examples
///
/// ```
/// use uri_canon::{canonicalize_query, NormalizationConfig};
///
/// let config = NormalizationConfig::new();
/// assert_eq!(canonicalize_query("array[key]=value", true, &config), "?array%5Bkey%5D=value");
/// assert_eq!(canonicalize_query("a&", true, &config), "?a");
/// assert_eq!(canonicalize_query("", true, &config), "?");
///
/// let config = config.sort_query_params(true).remove_empty_delimiters(true);
/// assert_eq!(canonicalize_query("c=3&b=2&a=1", true, &config), "?a=1&b=2&c=3");
/// assert_eq!(canonicalize_query("", true, &config), "");
/// ```
#[must_use]
pub fn canonicalize_query(query: &str, had_delimiter: bool, config: &NormalizationConfig) -> String {
    let mut entries = parse_query(query);
    if entries.is_empty() {
        return if had_delimiter && !config.removes_empty_delimiters() {
            "?".to_owned()
        } else {
            String::new()
        };
    }
    if config.sorts_query_params() {
        entries.sort_by(|a, b| a.key.cmp(&b.key));
    }

    let mut buf = String::with_capacity(query.len() + 1);
    buf.push('?');
    for entry in &entries {
        for value in &entry.values {
            if buf.len() > 1 {
                buf.push('&');
            }
            pct_enc::encode_to(&mut buf, &entry.key, table::QUERY);
            if !value.is_empty() {
                buf.push('=');
                pct_enc::encode_to(&mut buf, value, table::QUERY);
            }
        }
    }
    buf
}
