//! System prompt for the consultant.

pub mod consultant;
