//! Presentation layer for aws-advisor
//!
//! This crate contains the CLI definition, the interaction driver
//! (REPL and single shot), console formatting and progress reporting.

pub mod cli;
pub mod driver;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use driver::{
    DriverOutcome, ExitReason, LineSource, RustylineSource, default_history_path,
    run_interactive, run_single_shot,
};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
