//! Interaction driver
//!
//! Runs the consultant either as a REPL or for one query, printing answers
//! and recording every exchange.

mod line_source;
mod session;

pub use line_source::{LineSource, RustylineSource, default_history_path};
pub use session::{DriverOutcome, ExitReason, run_interactive, run_single_shot};
