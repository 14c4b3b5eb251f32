pub mod config;
pub mod json_store;
pub mod paths;

pub use crate::config::ClientConfig;
pub use crate::json_store::JsonFileSessionStore;
pub use crate::paths::ClanhallPaths;
