//! Session state: the injectable key-value store and the persister that
//! writes verified credentials into it.

pub mod service;
pub mod store;

pub use service::{SessionChange, SessionService};
pub use store::{MemorySessionStore, SessionStore, keys};
