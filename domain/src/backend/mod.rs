//! Reasoning backend selection.
//!
//! These types define the backend settings without depending on any
//! serialization format or SDK.

pub mod handle;
pub mod selector;
