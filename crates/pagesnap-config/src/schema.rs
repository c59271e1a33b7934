//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub styles: StylesConfig,

    /// Device emulation profiles. Empty means the built-in set.
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Chrome connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Explicit Chrome executable; searched for when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    /// Launch Chrome when nothing is listening on `debug_port`.
    #[serde(default = "default_true")]
    pub launch: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: true,
            chrome_path: None,
            profile_dir: None,
            launch: true,
        }
    }
}

impl BrowserConfig {
    /// CDP HTTP endpoint.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_true() -> bool {
    true
}

/// Extraction tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_node_timeout_ms")]
    pub node_timeout_ms: u64,

    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Quiet period after load before extraction starts.
    #[serde(default = "default_network_idle_ms")]
    pub network_idle_ms: u64,

    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            node_timeout_ms: default_node_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            network_idle_ms: default_network_idle_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
        }
    }
}

impl ExtractConfig {
    pub fn node_timeout(&self) -> Duration {
        Duration::from_millis(self.node_timeout_ms)
    }

    pub fn network_idle(&self) -> Duration {
        Duration::from_millis(self.network_idle_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

fn default_node_timeout_ms() -> u64 {
    10_000
}

fn default_max_concurrency() -> usize {
    32
}

fn default_network_idle_ms() -> u64 {
    500
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

/// Overrides for the style classification groups.
///
/// A group left unset keeps its built-in property list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylesConfig {
    #[serde(default)]
    pub auto: Option<Vec<String>>,

    #[serde(default)]
    pub condense: Option<Vec<String>>,

    #[serde(default)]
    pub none: Option<Vec<String>>,

    #[serde(default)]
    pub normal: Option<Vec<String>>,

    #[serde(default)]
    pub zero: Option<Vec<String>>,
}

impl StylesConfig {
    /// Overridden groups as `(name, entries)` pairs.
    pub fn overrides(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [
            ("auto", &self.auto),
            ("condense", &self.condense),
            ("none", &self.none),
            ("normal", &self.normal),
            ("zero", &self.zero),
        ]
        .into_iter()
        .filter_map(|(name, entries)| entries.as_deref().map(|e| (name, e)))
    }
}

/// One device emulation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub name: String,

    pub user_agent: String,

    /// Viewport width in CSS pixels.
    pub width: u32,

    /// Viewport height in CSS pixels.
    pub height: u32,

    #[serde(default = "default_scale")]
    pub scale: f64,

    #[serde(default)]
    pub mobile: bool,

    #[serde(default)]
    pub touch: bool,
}

fn default_scale() -> f64 {
    1.0
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily-rotated log files; console only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Project name used as the document title.
    #[serde(default)]
    pub project: Option<String>,

    /// Directory rendered documents are written to.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.browser.debug_port, 9222);
        assert!(config.browser.headless);
        assert!(config.browser.launch);
        assert_eq!(config.extract.node_timeout(), Duration::from_secs(10));
        assert_eq!(config.extract.max_concurrency, 32);
        assert!(config.devices.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_endpoint() {
        let browser = BrowserConfig {
            debug_port: 9333,
            ..Default::default()
        };
        assert_eq!(browser.endpoint(), "http://localhost:9333");
    }

    #[test]
    fn test_style_overrides() {
        let styles = StylesConfig {
            zero: Some(vec!["gap".to_string()]),
            none: Some(vec![]),
            ..Default::default()
        };
        let overrides: Vec<_> = styles.overrides().map(|(name, _)| name).collect();
        assert_eq!(overrides, ["none", "zero"]);
    }

    #[test]
    fn test_device_defaults() {
        let device: DeviceConfig = toml::from_str(
            r#"
            name = "Laptop"
            user_agent = "UA"
            width = 1440
            height = 900
            "#,
        )
        .unwrap();
        assert_eq!(device.scale, 1.0);
        assert!(!device.mobile);
        assert!(!device.touch);
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.browser.debug_port, config.browser.debug_port);
    }
}
