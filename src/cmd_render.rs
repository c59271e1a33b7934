//! `render` subcommand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use pagesnap_browser::{BrowserManager, DeviceProfile, RenderWorker};
use pagesnap_config::Config;
use pagesnap_core::DesignDocument;

/// Render `url` for each selected device and write the documents.
pub(crate) async fn handle_render(
    config: &Config,
    url: &str,
    device_names: &[String],
    out: Option<PathBuf>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let devices = DeviceProfile::select(DeviceProfile::from_config(&config.devices), device_names)?;
    let out_dir = out.or_else(|| config.output.dir.clone());

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, finishing with what has been extracted");
                cancel.cancel();
            }
        });
    }

    let manager = Arc::new(BrowserManager::new(config.browser.clone()));
    let worker = RenderWorker::from_config(config, manager.clone()).with_cancel(cancel);

    let renders = worker.render(url, &devices).await;
    manager.shutdown().await;

    let mut failed = 0;
    for render in renders? {
        match render.result {
            Ok(doc) => emit(&doc, out_dir.as_deref(), pretty)?,
            Err(e) => {
                error!(device = %render.device, "Render failed: {}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} device renders failed", failed, devices.len()).into());
    }
    Ok(())
}

fn emit(doc: &DesignDocument, out_dir: Option<&Path>, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = to_json(doc, pretty)?;
    match out_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(format!("{}.json", file_stem(&doc.device)));
            std::fs::write(&path, json)?;
            info!(device = %doc.device, path = %path.display(), "Wrote design document");
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Lowercase device name with every non-alphanumeric run replaced by `-`.
fn file_stem(device: &str) -> String {
    let mut stem = String::with_capacity(device.len());
    for c in device.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.ends_with('-') {
            stem.push('-');
        }
    }
    stem.trim_matches('-').to_string()
}
