//! Exit tokens for the interactive loop

/// Inputs that end the interactive loop (compared case-insensitively after trimming)
pub const EXIT_TOKENS: [&str; 4] = ["exit", "quit", "bye", "q"];

pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(input))
}
