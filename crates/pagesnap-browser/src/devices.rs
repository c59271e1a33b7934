//! Device emulation profiles.

use pagesnap_config::DeviceConfig;
use tracing::debug;

use crate::cdp::{CdpError, DeviceMetrics, PageSession};
use crate::manager::BrowserError;

/// Viewport, user agent and input model for one emulated device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub name: String,
    pub user_agent: String,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub mobile: bool,
    pub touch: bool,
}

impl DeviceProfile {
    /// iPhone X, iPad Pro and a 1920x1080 desktop Chrome.
    pub fn builtin() -> Vec<DeviceProfile> {
        vec![
            DeviceProfile {
                name: "iPhone X".to_string(),
                user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 11_0 like Mac OS X) AppleWebKit/604.1.38 (KHTML, like Gecko) Version/11.0 Mobile/15A372 Safari/604.1".to_string(),
                width: 375,
                height: 812,
                scale: 3.0,
                mobile: true,
                touch: true,
            },
            DeviceProfile {
                name: "iPad Pro".to_string(),
                user_agent: "Mozilla/5.0 (iPad; CPU OS 11_0 like Mac OS X) AppleWebKit/604.1.34 (KHTML, like Gecko) Version/11.0 Mobile/15A5341f Safari/604.1".to_string(),
                width: 1024,
                height: 1366,
                scale: 2.0,
                mobile: true,
                touch: true,
            },
            DeviceProfile {
                name: "Chrome".to_string(),
                user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/77.0.3865.90 Safari/537.36".to_string(),
                width: 1920,
                height: 1080,
                scale: 1.0,
                mobile: false,
                touch: false,
            },
        ]
    }

    /// Configured profiles, or the built-in set when none are configured.
    pub fn from_config(devices: &[DeviceConfig]) -> Vec<DeviceProfile> {
        if devices.is_empty() {
            Self::builtin()
        } else {
            devices.iter().map(DeviceProfile::from).collect()
        }
    }

    /// Keep the profiles named in `names` (case-insensitive), in that order.
    ///
    /// An empty `names` keeps every profile.
    pub fn select(
        profiles: Vec<DeviceProfile>,
        names: &[String],
    ) -> Result<Vec<DeviceProfile>, BrowserError> {
        if names.is_empty() {
            return Ok(profiles);
        }
        names
            .iter()
            .map(|name| {
                profiles
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(name))
                    .cloned()
                    .ok_or_else(|| BrowserError::UnknownDevice(name.clone()))
            })
            .collect()
    }

    /// Apply this profile to a page before it navigates.
    pub async fn apply(&self, session: &PageSession) -> Result<(), CdpError> {
        session
            .set_device_metrics(&DeviceMetrics {
                width: self.width,
                height: self.height,
                device_scale_factor: self.scale,
                mobile: self.mobile,
            })
            .await?;
        session.set_user_agent(&self.user_agent).await?;
        session.set_touch_emulation(self.touch).await?;
        debug!(device = %self.name, "Applied device emulation");
        Ok(())
    }
}

impl From<&DeviceConfig> for DeviceProfile {
    fn from(config: &DeviceConfig) -> Self {
        Self {
            name: config.name.clone(),
            user_agent: config.user_agent.clone(),
            width: config.width,
            height: config.height,
            scale: config.scale,
            mobile: config.mobile,
            touch: config.touch,
        }
    }
}
