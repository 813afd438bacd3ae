//! Plain-text transcript rendering
//!
//! ```text
//! ================================================================================
//! AWS INFRASTRUCTURE ADVISOR - CONSULTATION LOG
//! ================================================================================
//!
//!
//! ================================================================================
//! Exchange 1
//! ================================================================================
//!
//! USER:
//! <request>
//!
//! CONSULTANT:
//! <answer>
//!
//! ================================================================================
//! END OF CONSULTATION
//! ================================================================================
//! ```

use super::log::ConversationLog;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;
pub const TRANSCRIPT_TITLE: &str = "AWS INFRASTRUCTURE ADVISOR - CONSULTATION LOG";
pub const TRANSCRIPT_FOOTER: &str = "END OF CONSULTATION";

pub fn render_transcript(log: &ConversationLog) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{rule}\n{TRANSCRIPT_TITLE}\n{rule}\n");

    for (i, exchange) in log.entries().iter().enumerate() {
        let _ = writeln!(out, "\n{rule}\nExchange {}\n{rule}\n", i + 1);
        let _ = writeln!(out, "USER:\n{}\n", exchange.user_text);
        let _ = writeln!(out, "CONSULTANT:\n{}", exchange.assistant_text);
    }

    let _ = writeln!(out, "\n{rule}\n{TRANSCRIPT_FOOTER}\n{rule}");
    out
}
