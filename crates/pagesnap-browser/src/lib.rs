//! # pagesnap browser
//!
//! Chrome DevTools Protocol plumbing behind pagesnap: a WebSocket CDP
//! client, a [`PageDriver`](pagesnap_core::PageDriver) over a CDP page
//! session, device emulation profiles, a Chrome launcher, and the render
//! worker that turns a URL into one [`DesignDocument`](pagesnap_core::DesignDocument)
//! per device.
//!
//! ```text
//! ┌──────────────┐  connect/launch  ┌──────────────┐    WebSocket    ┌──────────┐
//! │ RenderWorker │ ───────────────► │BrowserManager│ ◄─────────────► │  Chrome  │
//! └──────┬───────┘                  └──────────────┘       CDP       └──────────┘
//!        │ per device: emulate, navigate, idle, helpers
//!        ▼
//!  CdpPageDriver ──► pagesnap_core::Extractor ──► MetaAggregator ──► DesignDocument
//! ```
//!
//! Chrome is started with `--remote-debugging-port` when nothing is
//! listening on the configured port, or reused when it already is.

pub mod cdp;
mod devices;
mod driver;
mod helpers;
pub mod manager;
mod render;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use devices::DeviceProfile;
pub use driver::CdpPageDriver;
pub use helpers::PAGE_HELPERS;
pub use manager::{BrowserError, BrowserManager};
pub use render::{link_list, project_name, style_table, DeviceRender, RenderOptions, RenderWorker};
