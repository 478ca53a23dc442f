// Messages exchanged between the TUI, the app orchestrator, and spawned
// prediction tasks.

use crate::form::{AnalyzeError, EditOp, FormDisplay};
use crate::prediction::PredictionResult;

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Edit(EditOp),
    Paste(String),
    Analyze,
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full display surface after a state change.
    Display(Box<FormDisplay>),
    /// Blocking alert message.
    Alert(String),
}

/// Outcome of a spawned prediction request.
///
/// The `generation` matches the `Effect::Dispatch` that started the request.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionEvent {
    pub generation: u64,
    pub outcome: Result<PredictionResult, AnalyzeError>,
}
