//! Core contract of the ClanHall client: the error taxonomy, the response
//! envelope interpreter, and the session persister.
//!
//! Control flow for any backend call: the HTTP layer (clanhall-api) issues
//! the request and parses the body, this crate's [`envelope::interpret`]
//! decides success or failure, and on a successful auth call the
//! [`session::SessionService`] records the credentials and notifies
//! observers.

pub mod envelope;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::{ApiError, Result};
pub use session::{MemorySessionStore, SessionChange, SessionService, SessionStore};
