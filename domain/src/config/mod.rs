//! Run-level settings resolved before any provider is launched.

pub mod profile;
