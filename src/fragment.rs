//! Fragment canonicalization.

use crate::{
    config::NormalizationConfig,
    pct_enc::{self, table},
};

/// Canonicalizes a fragment, returning it with its leading `'#'`.
///
/// The fragment is decoded once and every byte that is not unreserved is
/// re-encoded. Empty fragments follow the same rule as empty queries.
/// Safe-browsing mode drops the fragment.
pub(crate) fn canonicalize_fragment(
    fragment: &str,
    had_delimiter: bool,
    config: &NormalizationConfig,
) -> String {
    if config.is_safe_browsing() {
        return String::new();
    }
    if fragment.is_empty() {
        return if had_delimiter && !config.removes_empty_delimiters() {
            "#".to_owned()
        } else {
            String::new()
        };
    }

    let mut buf = String::with_capacity(fragment.len() + 1);
    buf.push('#');
    pct_enc::encode_to(&mut buf, &pct_enc::decode(fragment), table::FRAGMENT);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    #[test]
    fn fragments() {
        let config = NormalizationConfig::new();
        assert_eq!(canonicalize_fragment("fragment", true, &config), "#fragment");
        assert_eq!(canonicalize_fragment("a b/%7e", true, &config), "#a%20b%2F~");
        assert_eq!(canonicalize_fragment("", true, &config), "#");
        assert_eq!(canonicalize_fragment("", false, &config), "");

        let config = config.remove_empty_delimiters(true);
        assert_eq!(canonicalize_fragment("", true, &config), "");

        let config = config.mode(Mode::SafeBrowsing);
        assert_eq!(canonicalize_fragment("frag", true, &config), "");
    }
}
