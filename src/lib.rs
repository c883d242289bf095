//! Session Booking - client core for booking group sessions
//!
//! Tracks who is logged in (`AuthSessionStore`), gates registry operations
//! on that identity (`BookingCoordinator`) and talks to the remote session
//! registry over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
