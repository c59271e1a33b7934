//! BrowserManager core: connect, launch and shutdown.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use pagesnap_config::BrowserConfig;
use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cdp::CdpClient;
use super::{default_profile_dir, BrowserError};

const LAUNCH_ATTEMPTS: u32 = 30;
const LAUNCH_POLL: Duration = Duration::from_millis(200);

/// Owns the CDP connection and, when it started one, the Chrome process.
pub struct BrowserManager {
    pub(super) config: BrowserConfig,
    pub(super) client: RwLock<Option<Arc<CdpClient>>>,
    pub(super) chrome_process: RwLock<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            chrome_process: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Find a Chrome executable in the usual install locations.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Configured executable if set, else a discovered one.
    pub fn chrome_path(&self) -> Option<PathBuf> {
        match &self.config.chrome_path {
            Some(path) => Some(path.clone()),
            None => Self::find_chrome(),
        }
    }

    /// Whether something answers CDP discovery on the debug port.
    pub async fn is_chrome_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = self.chrome_path().ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = self
            .config
            .profile_dir
            .clone()
            .unwrap_or_else(default_profile_dir);

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--hide-scrollbars")
            .arg("--mute-audio")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to the browser, launching it if necessary and allowed.
    pub async fn connect(&self) -> Result<Arc<CdpClient>, BrowserError> {
        let mut slot = self.client.write().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        if !self.is_chrome_running().await {
            if !self.config.launch {
                return Err(BrowserError::ConnectionFailed(format!(
                    "Chrome is not listening on {} and launching is disabled",
                    self.config.endpoint()
                )));
            }

            info!("Chrome not running on port {}, launching...", self.config.debug_port);

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut ready = false;
            for _ in 0..LAUNCH_ATTEMPTS {
                tokio::time::sleep(LAUNCH_POLL).await;
                if self.is_chrome_running().await {
                    ready = true;
                    break;
                }
            }

            if !ready {
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        } else {
            info!("Chrome already running on port {}", self.config.debug_port);
        }

        let client = Arc::new(CdpClient::connect(&self.config.endpoint()).await?);
        *slot = Some(client.clone());

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(client)
    }

    /// The connected client.
    pub async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Drop the browser connection.
    pub async fn close(&self) {
        if self.client.write().await.take().is_some() {
            info!("Browser connection closed");
        }
    }

    /// Close the connection and stop Chrome if we launched it.
    pub async fn shutdown(&self) {
        self.close().await;
        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            if let Err(e) = child.kill().await {
                warn!("Failed to stop Chrome: {}", e);
            }
        }
    }
}
