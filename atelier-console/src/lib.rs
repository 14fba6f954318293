//! Admin console for the Atelier contest platform.
//!
//! Talks to the platform REST API through [`api_client::ApiClient`] and the
//! per-resource [`services`], and drives one [`pages`] controller per admin
//! page. The `atelier-admin` binary renders those pages as text tables.
#![allow(missing_docs)]

pub mod api_client;
pub mod config;
pub mod demo;
pub mod memory;
pub mod pages;
pub mod render;
pub mod services;

pub use api_client::ApiClient;
pub use config::{ConfigLoader, ConsoleConfig};
pub use memory::MemoryBackend;
pub use pages::Services;
