//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ConfigError`] — invalid prompt or request text
//! - [`error::BackendInitError`] — the reasoning backend could not be built

pub mod error;
