#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(c) = uri_canon::parse(data) else {
        return;
    };
    // Components are restored to their original text.
    for s in [
        c.scheme(),
        c.user(),
        c.pass(),
        c.host(),
        c.port(),
        c.path(),
        c.query(),
        c.fragment(),
    ] {
        assert!(data.contains(s), "{s:?} not in {data:?}");
    }
    if c.had_query_delimiter() {
        assert!(data.contains('?'));
    }
    if c.had_fragment_delimiter() {
        assert!(data.contains('#'));
    }
});
