//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod aggregate;
pub mod consult;
pub mod provider_session;
pub mod recorder;
pub mod tool_loop;
pub(crate) mod tool_helpers;
