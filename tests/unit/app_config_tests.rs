/*!
 * Tests for application configuration functionality
 */

use parksite::app_config::{Config, LogLevel, MAX_DEPTH, MAX_RETRY_COUNT};
use parksite::locale::Locale;

use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.cms.endpoint, "http://localhost:3000");
    assert_eq!(config.cms.depth, MAX_DEPTH);
    assert_eq!(config.cms.retry_count, 2);
    assert_eq!(config.locales.default, Locale::Id);
    assert_eq!(config.locales.supported.len(), 3);
    assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
    assert!(!config.notification.enabled);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.cms.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    // Fixtures replace the CMS, so the endpoint no longer matters
    config.cms.fixtures_path = Some(common::fixtures_path());
    assert!(config.validate().is_ok());

    config.cms.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.cms.timeout_secs = 5;

    config.locales.supported = vec![Locale::En];
    assert!(config.validate().is_err(), "default locale must be supported");
    config.locales.default = Locale::En;
    assert!(config.validate().is_ok());

    config.notification.enabled = true;
    assert!(config.validate().is_err(), "recipient required");
    config.notification.recipient = "sales@example.com".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withExcessiveRetryCount_shouldFail() {
    let mut config = Config::default();

    config.cms.retry_count = MAX_RETRY_COUNT;
    assert!(config.validate().is_ok());

    config.cms.retry_count = 70;
    config.cms.retry_backoff_ms = 0;
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("retry count"));
}

#[test]
fn test_effectiveDepth_shouldClampToMaximum() {
    let mut config = Config::default();
    config.cms.depth = 7;
    assert_eq!(config.cms.effective_depth(), MAX_DEPTH);
    config.cms.depth = 1;
    assert_eq!(config.cms.effective_depth(), 1);
}

#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let config: Config = serde_json::from_str(
        r#"{"cms": {"endpoint": "https://cms.example.com", "api_key": "k"}, "locales": {"default": "en"}, "log_level": "debug"}"#,
    )
    .unwrap();

    assert_eq!(config.cms.endpoint, "https://cms.example.com");
    assert_eq!(config.cms.timeout_secs, 10);
    assert_eq!(config.locales.default, Locale::En);
    assert_eq!(config.locales.supported, Locale::ALL.to_vec());
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("parksite.json");

    let created = Config::load_or_create(&path).unwrap();
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(reloaded.cms.endpoint, created.cms.endpoint);
    assert_eq!(reloaded.server.port, created.server.port);
}

#[test]
fn test_loadOrCreate_withMalformedFile_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("parksite.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_or_create(&path).is_err());
}
