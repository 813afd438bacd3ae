//! Interaction rules shared by every front end.

pub mod exit;
