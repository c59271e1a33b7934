//! Configuration loader.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pagesnap.toml";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    /// Load `path` when given, else `pagesnap.toml` if present, else defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Render a configuration back to TOML.
    pub fn to_toml(config: &Config) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(config)?)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    fn expand_paths(config: &mut Config) {
        let paths = [
            config.browser.chrome_path.as_mut(),
            config.browser.profile_dir.as_mut(),
            config.logging.dir.as_mut(),
            config.output.dir.as_mut(),
        ];
        for path in paths.into_iter().flatten() {
            if let Some(raw) = path.to_str() {
                *path = Self::expand_path(raw).into();
            }
        }
    }

    /// Expand shell-style paths (e.g., `~/.cache`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.browser.debug_port, 9222);
        assert_eq!(config.extract.max_concurrency, 32);
    }

    #[test]
    fn test_expand_path() {
        let expanded = ConfigLoader::expand_path("~/.pagesnap");
        assert!(!expanded.starts_with('~'));
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [browser]
            debug_port = 9333
            headless = false
            launch = false

            [extract]
            node_timeout_ms = 2500
            max_concurrency = 8

            [styles]
            zero = ["gap", "padding"]

            [[devices]]
            name = "Laptop"
            user_agent = "Mozilla/5.0"
            width = 1440
            height = 900
            scale = 2.0

            [logging]
            level = "debug"

            [output]
            project = "Storefront"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.debug_port, 9333);
        assert!(!config.browser.headless);
        assert!(!config.browser.launch);
        assert_eq!(config.extract.node_timeout_ms, 2500);
        assert_eq!(config.extract.max_concurrency, 8);
        assert_eq!(config.extract.network_idle_ms, 500);
        assert_eq!(
            config.styles.zero.as_deref(),
            Some(&["gap".to_string(), "padding".to_string()][..])
        );
        assert!(config.styles.auto.is_none());
        assert_eq!(config.devices.len(), 1);
        assert_eq!(config.devices[0].scale, 2.0);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.project.as_deref(), Some("Storefront"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[browser]").unwrap();
        writeln!(file, "debug_port = 9500").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.browser.debug_port, 9500);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/pagesnap.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_explicit_missing() {
        let result = ConfigLoader::load_or_default(Some(Path::new("/nonexistent/pagesnap.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_tilde_paths_expanded() {
        let config = ConfigLoader::load_str(
            r#"
            [logging]
            dir = "~/logs"
            "#,
        )
        .unwrap();
        let dir = config.logging.dir.unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with("logs"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: unique test-only variable
        unsafe {
            std::env::set_var("PAGESNAP_TEST_PORT", "9444");
        }
        let config = ConfigLoader::load_str("[browser]\ndebug_port = ${PAGESNAP_TEST_PORT}").unwrap();
        assert_eq!(config.browser.debug_port, 9444);
        unsafe {
            std::env::remove_var("PAGESNAP_TEST_PORT");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${PAGESNAP_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "PAGESNAP_NONEXISTENT_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = ConfigLoader::load_str("[extract]\nmax_concurrency = 4").unwrap();
        let text = ConfigLoader::to_toml(&config).unwrap();
        let reparsed = ConfigLoader::load_str(&text).unwrap();
        assert_eq!(reparsed.extract.max_concurrency, 4);
    }
}
