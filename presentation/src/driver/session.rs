//! Interactive and single-shot consultation loops

use super::line_source::LineSource;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use advisor_application::{Consult, ConversationRecorder};
use advisor_domain::is_exit_command;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

const PROMPT: &str = "You: ";

/// Why an interactive session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// The user typed an exit token
    ExitCommand,
    /// Ctrl-C at the prompt
    Interrupted,
    /// Ctrl-D or end of piped input
    EndOfInput,
    /// The terminal could not be read
    InputFailed(String),
    /// A single-shot query was answered
    Completed,
}

impl ExitReason {
    /// The session ended because input broke, not because the user left
    pub fn is_failure(&self) -> bool {
        matches!(self, ExitReason::InputFailed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOutcome {
    /// Exchanges recorded during this run
    pub exchanges: usize,
    pub reason: ExitReason,
}

/// Consult once and record the exchange. `None` if the request was rejected.
async fn exchange(
    consultant: &mut dyn Consult,
    recorder: &mut ConversationRecorder,
    progress: Option<&ProgressReporter>,
    request: &str,
) -> Option<String> {
    match progress {
        Some(p) => p.start_consulting(),
        None => println!("{}", ConsoleFormatter::consulting()),
    }
    let result = consultant.consult(request).await;
    if let Some(p) = progress {
        p.finish();
    }

    match result {
        Ok(answer) => {
            recorder.append(request, &answer);
            Some(answer)
        }
        Err(e) => {
            warn!(error = %e, "Request rejected");
            println!("{}", ConsoleFormatter::error(&e.to_string()));
            None
        }
    }
}

/// Read-consult-print until an exit token, Ctrl-C or end of input
pub async fn run_interactive(
    consultant: &mut dyn Consult,
    recorder: &mut ConversationRecorder,
    source: &mut dyn LineSource,
    progress: Option<&ProgressReporter>,
) -> DriverOutcome {
    let mut exchanges = 0;

    let reason = loop {
        let line = match source.read_line(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => break ExitReason::Interrupted,
            Err(ReadlineError::Eof) => break ExitReason::EndOfInput,
            Err(e) => break ExitReason::InputFailed(e.to_string()),
        };

        let request = line.trim();
        if is_exit_command(request) {
            break ExitReason::ExitCommand;
        }
        if request.is_empty() {
            continue;
        }

        source.add_history(request);
        if let Some(answer) = exchange(consultant, recorder, progress, request).await {
            println!("{}", ConsoleFormatter::answer(&answer));
            exchanges += 1;
        }
    };

    debug!(exchanges, ?reason, "Interactive session ended");
    DriverOutcome { exchanges, reason }
}

/// Join the words with single spaces and consult once
pub async fn run_single_shot(
    consultant: &mut dyn Consult,
    recorder: &mut ConversationRecorder,
    words: &[String],
    progress: Option<&ProgressReporter>,
) -> DriverOutcome {
    let request = words.join(" ");
    let exchanges = match exchange(consultant, recorder, progress, &request).await {
        Some(answer) => {
            println!("{}", ConsoleFormatter::response_block(&answer));
            1
        }
        None => 0,
    };

    DriverOutcome {
        exchanges,
        reason: ExitReason::Completed,
    }
}
