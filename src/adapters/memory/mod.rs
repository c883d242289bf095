//! In-process implementations of the registry ports.
//!
//! Stand-ins for the remote registry, used by tests.

mod auth_gateway;
mod directories;
mod session_registry;

pub use auth_gateway::InMemoryAuthGateway;
pub use directories::{InMemoryInstructorDirectory, InMemoryUserDirectory};
pub use session_registry::InMemorySessionRegistry;
