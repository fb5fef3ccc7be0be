use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("ROOMSET_API_BASE_URL", "https://shop.example.com");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ROOMSET_API_BASE_URL"),
        "expected MissingEnvVar(ROOMSET_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_base_url_as_missing() {
    let mut map = full_env();
    map.insert("ROOMSET_API_BASE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = full_env();
    map.insert("ROOMSET_API_BASE_URL", "shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROOMSET_API_BASE_URL"),
        "expected InvalidEnvVar, got: {result:?}"
    );
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");

    assert_eq!(config.api_base_url, "https://shop.example.com");
    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.data_dir, PathBuf::from("./.roomset"));
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.user_agent, "roomset/0.1 (storefront-client)");
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.retry_backoff_base_ms, 500);
    assert_eq!(config.max_concurrent_looks, 4);
    assert_eq!(config.cart_path(), PathBuf::from("./.roomset/cart.json"));
    assert_eq!(
        config.wishlist_path(),
        PathBuf::from("./.roomset/wishlist.json")
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("ROOMSET_ENV", "production");
    map.insert("ROOMSET_DATA_DIR", "/var/lib/roomset");
    map.insert("ROOMSET_MAX_RETRIES", "0");
    map.insert("ROOMSET_MAX_CONCURRENT_LOOKS", "12");

    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(config.env, Environment::Production);
    assert_eq!(config.data_dir, PathBuf::from("/var/lib/roomset"));
    assert_eq!(config.max_retries, 0);
    assert_eq!(config.max_concurrent_looks, 12);
}

#[test]
fn build_app_config_rejects_invalid_number() {
    let mut map = full_env();
    map.insert("ROOMSET_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROOMSET_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar, got: {result:?}"
    );
}
