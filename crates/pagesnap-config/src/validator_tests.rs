use super::*;
use crate::schema::DeviceConfig;

fn device(name: &str) -> DeviceConfig {
    DeviceConfig {
        name: name.to_string(),
        user_agent: "Mozilla/5.0".to_string(),
        width: 1280,
        height: 800,
        scale: 1.0,
        mobile: false,
        touch: false,
    }
}

#[test]
fn test_validate_default_config() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_invalid_port() {
    let mut config = Config::default();
    config.browser.debug_port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "browser.debug_port"));
}

#[test]
fn test_validate_zero_timeouts() {
    let mut config = Config::default();
    config.extract.node_timeout_ms = 0;
    config.extract.navigation_timeout_ms = 0;

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors.iter().any(|e| e.path == "extract.node_timeout_ms"));
    assert!(result.errors.iter().any(|e| e.path == "extract.navigation_timeout_ms"));
}

#[test]
fn test_validate_zero_concurrency() {
    let mut config = Config::default();
    config.extract.max_concurrency = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "extract.max_concurrency"));
}

#[test]
fn test_validate_high_concurrency_warning() {
    let mut config = Config::default();
    config.extract.max_concurrency = 1000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "extract.max_concurrency"));
}

#[test]
fn test_validate_empty_style_override_warning() {
    let mut config = Config::default();
    config.styles.condense = Some(Vec::new());
    config.styles.zero = Some(vec!["gap".to_string()]);

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].path, "styles.condense");
}

#[test]
fn test_validate_device_dimensions() {
    let mut config = Config::default();
    let mut flat = device("Flat");
    flat.height = 0;
    let mut unscaled = device("Unscaled");
    unscaled.scale = 0.0;
    config.devices = vec![flat, unscaled];

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors.iter().any(|e| e.path == "devices[0]"));
    assert!(result.errors.iter().any(|e| e.path == "devices[1].scale"));
}

#[test]
fn test_validate_duplicate_device_names() {
    let mut config = Config::default();
    config.devices = vec![device("Phone"), device("Tablet"), device("Phone")];

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "devices[2].name");
    assert!(result.errors[0].message.contains("Phone"));
}

#[test]
fn test_validate_empty_device_name() {
    let mut config = Config::default();
    config.devices = vec![device("")];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "devices[0].name"));
}

#[test]
fn test_into_result() {
    let mut config = Config::default();
    config.extract.max_concurrency = 0;
    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "extract.max_concurrency"));

    let warnings = ConfigValidator::validate(&Config::default())
        .into_result()
        .unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn test_validation_error_new() {
    let error = ValidationError::new("browser.debug_port", "bad");
    assert_eq!(error.path, "browser.debug_port");
    assert_eq!(error.message, "bad");
}
