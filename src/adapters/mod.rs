//! Adapters - Implementations of port interfaces.
//!
//! - `http` - reqwest client for the remote registry
//! - `memory` - in-process registry, directories and auth gateway

pub mod http;
pub mod memory;

pub use http::{HttpRegistryClient, RegistryClientConfig};
pub use memory::{
    InMemoryAuthGateway, InMemoryInstructorDirectory, InMemorySessionRegistry,
    InMemoryUserDirectory,
};
