//! Tool providers and the capabilities they advertise.
//!
//! - [`config::ProviderConfig`] — how to launch one provider subprocess
//! - [`capability::Capability`] — one advertised tool
//! - [`capability::CapabilityRegistry`] — all capabilities, in acquisition order

pub mod capability;
pub mod config;
