#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_canon::{normalize_str, Mode, NormalizationConfig};

fuzz_target!(|data: &str| {
    for mode in [Mode::Standard, Mode::SafeBrowsing] {
        let config = NormalizationConfig::new().mode(mode);
        let Ok(n1) = normalize_str(data, config) else {
            continue;
        };
        // `normalize` is idempotent: we cannot normalize beyond a normalized URI.
        let n2 = normalize_str(&n1, config).unwrap();
        assert_eq!(n1, n2);
    }
});
