//! Browser instance manager.
//!
//! Connects to Chrome on the configured debug port, launching a headless
//! instance with its own profile when nothing is listening yet.

mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{default_profile_dir, BrowserError};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
