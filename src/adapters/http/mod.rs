//! HTTP adapter for the remote session registry.
//!
//! - `HttpRegistryClient` - implements every registry port over reqwest
//! - `RegistryClientConfig` - base URL and timeout

mod client;
mod config;
mod dto;
mod errors;

pub use client::HttpRegistryClient;
pub use config::{RegistryClientConfig, DEFAULT_BASE_URL};
