// Core form logic for sentimeter: text sanitization, prediction scoring,
// the text-analysis form state machine, configuration, and the messages
// exchanged between the TUI and the app orchestrator.

pub mod config;
pub mod form;
pub mod prediction;
pub mod protocol;
pub mod text;
