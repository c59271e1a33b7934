//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

/// Concurrency above this is accepted but flagged.
const HIGH_CONCURRENCY: usize = 256;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a `ConfigError`.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_extract(config, &mut result);
        Self::validate_styles(config, &mut result);
        Self::validate_devices(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }
    }

    fn validate_extract(config: &Config, result: &mut ValidationResult) {
        let extract = &config.extract;

        if extract.node_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "extract.node_timeout_ms",
                "node_timeout_ms must be greater than 0",
            ));
        }

        if extract.navigation_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "extract.navigation_timeout_ms",
                "navigation_timeout_ms must be greater than 0",
            ));
        }

        if extract.max_concurrency == 0 {
            result.add_error(ValidationError::new(
                "extract.max_concurrency",
                "max_concurrency must be greater than 0",
            ));
        }

        if extract.max_concurrency > HIGH_CONCURRENCY {
            result.add_warning(ValidationWarning::new(
                "extract.max_concurrency",
                format!(
                    "max_concurrency is very high (>{}), the browser may throttle or drop calls",
                    HIGH_CONCURRENCY
                ),
            ));
        }
    }

    fn validate_styles(config: &Config, result: &mut ValidationResult) {
        for (group, entries) in config.styles.overrides() {
            if entries.is_empty() {
                result.add_warning(ValidationWarning::new(
                    format!("styles.{}", group),
                    "Empty override disables this group entirely",
                ));
            }
        }
    }

    fn validate_devices(config: &Config, result: &mut ValidationResult) {
        let mut seen = HashSet::new();

        for (i, device) in config.devices.iter().enumerate() {
            let path = format!("devices[{}]", i);

            if device.name.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.name", path),
                    "Device name cannot be empty",
                ));
            } else if !seen.insert(device.name.as_str()) {
                result.add_error(ValidationError::new(
                    format!("{}.name", path),
                    format!("Duplicate device name '{}'", device.name),
                ));
            }

            if device.width == 0 || device.height == 0 {
                result.add_error(ValidationError::new(
                    path.clone(),
                    "width and height must be greater than 0",
                ));
            }

            if device.scale <= 0.0 {
                result.add_error(ValidationError::new(
                    format!("{}.scale", path),
                    "scale must be greater than 0",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
