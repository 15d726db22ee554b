//! tests/config_tests.rs

use std::collections::HashMap;

use crate::config::app_config::AppConfig;
use crate::errors::ConfigError;

fn base_env() -> HashMap<&'static str, String> {
    [
        ("AIRTABLE_API_KEY", "pat-test"),
        ("AIRTABLE_BASE_ID", "appBase"),
        ("VAPI_API_KEY", "vapi-key"),
        ("VAPI_ASSISTANT_ID", "assistant-1"),
        ("TWILIO_ACCOUNT_SID", "AC-test"),
        ("TWILIO_AUTH_TOKEN", "tw-token"),
        ("TWILIO_PHONE_NUMBER", "+10000000000"),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.to_string()))
    .collect()
}

fn load(env: &HashMap<&'static str, String>) -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_are_applied() {
    let cfg = load(&base_env()).unwrap();
    assert_eq!(cfg.record_store.api_url, "https://api.airtable.com/v0");
    assert_eq!(cfg.record_store.table, "Customer");
    assert_eq!(cfg.voice_api.api_url, "https://api.vapi.ai");
    assert_eq!(cfg.voice_api.display_name, "Dental Feedback");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 5022);
    assert_eq!(cfg.server.workers, 1);
}

#[test]
fn missing_secret_is_reported_by_name() {
    let mut env = base_env();
    env.remove("TWILIO_AUTH_TOKEN");
    assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("TWILIO_AUTH_TOKEN"));

    // En blanco cuenta como ausente
    let mut env = base_env();
    env.insert("VAPI_API_KEY", "   ".to_string());
    assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("VAPI_API_KEY"));
}

#[test]
fn display_name_longer_than_40_chars_is_rejected() {
    let mut env = base_env();
    env.insert("CALL_DISPLAY_NAME", "x".repeat(40));
    assert!(load(&env).is_ok());

    env.insert("CALL_DISPLAY_NAME", "x".repeat(41));
    assert!(matches!(
        load(&env).unwrap_err(),
        ConfigError::Invalid { var: "CALL_DISPLAY_NAME", .. }
    ));
}

#[test]
fn invalid_port_is_rejected() {
    let mut env = base_env();
    env.insert("SERVER_PORT", "http".to_string());
    assert!(matches!(
        load(&env).unwrap_err(),
        ConfigError::Invalid { var: "SERVER_PORT", .. }
    ));
}

#[test]
fn trailing_slash_is_trimmed_and_secrets_are_redacted() {
    let mut env = base_env();
    env.insert("VAPI_API_URL", "http://localhost:9000/".to_string());
    let cfg = load(&env).unwrap();
    assert_eq!(cfg.voice_api.api_url, "http://localhost:9000");

    let debug = format!("{:?}", cfg);
    assert!(!debug.contains("pat-test"));
    assert!(!debug.contains("vapi-key"));
    assert!(!debug.contains("tw-token"));
    assert!(!debug.contains("AC-test"));
    assert!(debug.contains("assistant-1"));
}
