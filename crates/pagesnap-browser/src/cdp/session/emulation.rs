//! Device emulation for CDP page session.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::DeviceMetrics;

use super::core::PageSession;

impl PageSession {
    /// Override viewport size, device scale factor and mobile mode.
    pub async fn set_device_metrics(&self, metrics: &DeviceMetrics) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(serde_json::to_value(metrics)?),
        )
        .await?;
        Ok(())
    }

    pub async fn set_user_agent(&self, user_agent: &str) -> Result<(), CdpError> {
        self.call(
            "Emulation.setUserAgentOverride",
            Some(json!({"userAgent": user_agent})),
        )
        .await?;
        Ok(())
    }

    pub async fn set_touch_emulation(&self, enabled: bool) -> Result<(), CdpError> {
        let mut params = json!({"enabled": enabled});
        if enabled {
            params["maxTouchPoints"] = json!(1);
        }
        self.call("Emulation.setTouchEmulationEnabled", Some(params))
            .await?;
        Ok(())
    }
}
