//! Progress reporting for provider acquisition and consultations

use crate::output::console::ConsoleFormatter;
use advisor_application::{AcquireProgress, ConsultProgress};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner-based progress on the terminal
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("   {spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(old) = slot.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn set_message(&self, message: String) {
        if let Ok(slot) = self.spinner.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_message(message);
            }
        }
    }

    /// Print a line above the spinner without tearing it
    fn println(&self, line: String) {
        if let Ok(slot) = self.spinner.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.println(line);
                return;
            }
        }
        println!("{}", line);
    }

    fn finish_with(&self, line: Option<String>) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(pb) = slot.take() {
                match line {
                    Some(line) => pb.finish_with_message(line),
                    None => pb.finish_and_clear(),
                }
            }
        }
    }

    /// Show a spinner while the consultant works on a request
    pub fn start_consulting(&self) {
        self.start("Consulting AWS resources...".to_string());
    }

    /// Clear the consultation spinner
    pub fn finish(&self) {
        self.finish_with(None);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AcquireProgress for ProgressReporter {
    fn on_provider_starting(&self, provider: &str) {
        self.start(format!(
            "Loading {} tools...",
            ConsoleFormatter::provider_label(provider)
        ));
    }

    fn on_provider_ready(&self, provider: &str, capabilities: usize) {
        self.finish_with(Some(format!(
            "{} {} ({} tools)",
            "v".green(),
            ConsoleFormatter::provider_label(provider),
            capabilities
        )));
    }

    fn on_provider_failed(&self, provider: &str, error: &str) {
        self.finish_with(Some(format!(
            "{} {} ({})",
            "x".red(),
            ConsoleFormatter::provider_label(provider),
            error
        )));
    }
}

impl ConsultProgress for ProgressReporter {
    fn on_tool_call(&self, tool: &str, args_preview: &str) {
        self.set_message(format!("{} {}", tool.cyan(), args_preview.dimmed()));
    }

    fn on_tool_result(&self, tool: &str, is_error: bool) {
        let mark = if is_error { "x".red() } else { "v".green() };
        self.println(format!("   {} {}", mark, tool));
        self.set_message("Consulting AWS resources...".to_string());
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AcquireProgress for SimpleProgress {
    fn on_provider_starting(&self, provider: &str) {
        println!(
            "   Loading {} tools...",
            ConsoleFormatter::provider_label(provider)
        );
    }

    fn on_provider_ready(&self, _provider: &str, _capabilities: usize) {}

    fn on_provider_failed(&self, provider: &str, error: &str) {
        println!(
            "   {} {} ({})",
            "x".red(),
            ConsoleFormatter::provider_label(provider),
            error
        );
    }
}

impl ConsultProgress for SimpleProgress {
    fn on_tool_call(&self, tool: &str, args_preview: &str) {
        println!("   {} {} {}", "->".cyan(), tool, args_preview.dimmed());
    }
}
