//! # footfall-core
//!
//! Foundation crate for the Footfall visitor-analytics service.
//! Defines errors, configuration, and date handling.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod dates;
pub mod errors;

// Re-export the most commonly used types at the crate root.
pub use config::ServerConfig;
pub use errors::{ConfigError, StorageError, StorageResult};
