#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_canon::pct_enc::*;

fuzz_target!(|data: &[u8]| {
    let once = decode_bytes(data);
    assert!(once.len() <= data.len());

    // Nothing is left to decode after a full unescape.
    let full = unescape_fully(data);
    assert!(!has_octet(&full));
    assert_eq!(*decode_bytes(&full), *full);
});
