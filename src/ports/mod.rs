//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the booking core and the remote registry. Adapters implement these ports.
//!
//! - `SessionRegistry` - Session CRUD and participation
//! - `AuthGateway` - Login and registration
//! - `InstructorDirectory` - Instructor reference data
//! - `UserDirectory` - User profile lookup and account deletion

mod auth_gateway;
mod instructor_directory;
mod session_registry;
mod user_directory;

pub use auth_gateway::{AuthGateway, LoginRequest, RegisterConfirmation, RegisterRequest};
pub use instructor_directory::InstructorDirectory;
pub use session_registry::SessionRegistry;
pub use user_directory::UserDirectory;
