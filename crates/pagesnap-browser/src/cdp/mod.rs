//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to Chrome over the remote debugging WebSocket and speaks the
//! CDP JSON-RPC protocol. Only the domains pagesnap needs are wrapped:
//! Target, Page, DOM, Runtime, Network and Emulation.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://example.com", Duration::from_secs(30)).await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
