//! Booking session domain module.
//!
//! A session is a scheduled event run by one instructor that users register
//! into. Ids and timestamps come from the registry; the client edits the
//! draft fields and the participant list through dedicated operations.

mod aggregate;
mod draft;
mod errors;

pub use aggregate::Session;
pub use draft::{SessionDraft, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
pub use errors::BookingError;
