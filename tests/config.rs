#![cfg(feature = "serde")]

use uri_canon::{Mode, NormalizationConfig};

#[test]
fn config_from_json() {
    let config: NormalizationConfig =
        serde_json::from_str(r#"{"sort_query_params": true, "mode": "safe-browsing"}"#).unwrap();
    assert_eq!(
        config,
        NormalizationConfig::new()
            .sort_query_params(true)
            .mode(Mode::SafeBrowsing)
    );

    let config: NormalizationConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, NormalizationConfig::default());

    assert!(serde_json::from_str::<NormalizationConfig>(r#"{"mode": "strict"}"#).is_err());
}

#[test]
fn config_to_json() {
    let config = NormalizationConfig::new().remove_empty_delimiters(true);
    let json = serde_json::to_value(config).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "remove_empty_delimiters": true,
            "sort_query_params": false,
            "mode": "standard",
        })
    );
}
