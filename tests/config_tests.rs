//! Configuration module unit tests

use aigqlproxy::config::{ApiKey, Settings};
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_settings_creation_with_full_environment() {
    let settings = Settings::from_lookup(lookup(&[
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "8080"),
        ("OPENAI_API_KEY", "sk-test-key-12345678901234567890"),
        ("OPENAI_BASE_URL", "https://example.openai.azure.com/v1"),
        ("OPENAI_TIMEOUT", "15"),
        ("MAX_REQUEST_SIZE", "2048"),
        ("RUST_LOG", "debug"),
        ("LOG_FORMAT", "json"),
    ]))
    .unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(
        settings.openai.api_key.as_ref().map(ApiKey::expose),
        Some("sk-test-key-12345678901234567890")
    );
    assert_eq!(settings.openai.base_url, "https://example.openai.azure.com/v1");
    assert_eq!(settings.openai.timeout, 15);
    assert_eq!(settings.request.max_request_size, 2048);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "json");
    assert_eq!(
        settings.chat_completions_url(),
        "https://example.openai.azure.com/v1/chat/completions"
    );
}

#[test]
fn test_missing_api_key_is_not_a_startup_error() {
    let settings = Settings::from_lookup(lookup(&[])).unwrap();
    assert!(settings.openai.api_key.is_none());
}

#[test]
fn test_api_key_with_inner_whitespace_is_rejected() {
    let result = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-abc def")]));
    assert!(result.is_err());
}

#[test]
fn test_invalid_numbers_are_rejected() {
    for (key, value) in [
        ("SERVER_PORT", "not-a-port"),
        ("SERVER_PORT", "70000"),
        ("OPENAI_TIMEOUT", "-1"),
        ("MAX_REQUEST_SIZE", "0"),
    ] {
        let result = Settings::from_lookup(lookup(&[(key, value)]));
        assert!(result.is_err(), "{}={} should be rejected", key, value);
    }
}

#[test]
fn test_default_settings_are_valid() {
    let settings = Settings::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.server.port, 4000);
}
