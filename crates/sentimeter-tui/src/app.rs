// Application state and orchestration logic.
//
// The central event loop owns the `TextAnalysisForm`. It feeds user commands
// and prediction results into the form, carries out the effects the form
// returns (spawning prediction requests, raising alerts, scheduling the
// deferred recompute after a paste), and pushes display updates to the TUI.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use sentimeter_client::PredictionService;
use sentimeter_core::form::{Effect, FormDisplay, FormEvent, FormOptions, TextAnalysisForm};
use sentimeter_core::protocol::{PredictionEvent, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub form: TextAnalysisForm,
    /// Prediction backend, shared with spawned request tasks.
    pub service: Arc<dyn PredictionService>,
    /// Spawned request tasks report back through clones of this sender.
    pub prediction_tx: mpsc::Sender<PredictionEvent>,
    /// Set by a paste; cleared once the deferred recompute has run.
    pub recompute_pending: bool,
    /// Last display pushed to the TUI, to skip redundant updates.
    last_display: Option<FormDisplay>,
}

impl AppState {
    pub fn new(
        options: FormOptions,
        service: Arc<dyn PredictionService>,
        prediction_tx: mpsc::Sender<PredictionEvent>,
    ) -> Self {
        AppState {
            form: TextAnalysisForm::new(options),
            service,
            prediction_tx,
            recompute_pending: false,
            last_display: None,
        }
    }

    /// Start a prediction request in the background.
    fn spawn_prediction(&self, generation: u64, text: String) {
        let service = Arc::clone(&self.service);
        let tx = self.prediction_tx.clone();
        tokio::spawn(async move {
            let outcome = sentimeter_client::analyze(service.as_ref(), &text).await;
            if tx.send(PredictionEvent { generation, outcome }).await.is_err() {
                debug!("Prediction receiver dropped before gen {} settled", generation);
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Prediction results from spawned request tasks
///
/// A paste schedules a stats recompute that runs on a later loop turn,
/// once the paste step itself has completed.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut prediction_rx: mpsc::Receiver<PredictionEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let mut prediction_open = true;

    push_display(&mut state, &ui_tx).await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Prediction results (only poll when channel is open) ---
            event = prediction_rx.recv(), if prediction_open => {
                match event {
                    Some(PredictionEvent { generation, outcome }) => {
                        apply_event(
                            &mut state,
                            FormEvent::PredictionSettled { generation, outcome },
                            &ui_tx,
                        )
                        .await;
                    }
                    None => {
                        info!("Prediction channel closed");
                        prediction_open = false;
                    }
                }
            }

            // --- Deferred recompute after a paste ---
            _ = tokio::task::yield_now(), if state.recompute_pending => {
                state.recompute_pending = false;
                apply_event(&mut state, FormEvent::Recompute, &ui_tx).await;
            }
        }
    }

    info!("Application event loop stopped");
    Ok(())
}

/// Translate a user command into a form event.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let event = match cmd {
        UserCommand::Edit(op) => FormEvent::Edit(op),
        UserCommand::Paste(content) => {
            debug!("Paste of {} chars", content.chars().count());
            FormEvent::Paste(content)
        }
        UserCommand::Analyze => FormEvent::AnalyzeRequested,
        UserCommand::Quit => {
            // Handled in the main loop
            return;
        }
    };
    apply_event(state, event, ui_tx).await;
}

/// Feed one event to the form, run its effects, and push the new display.
pub async fn apply_event(state: &mut AppState, event: FormEvent, ui_tx: &mpsc::Sender<UiUpdate>) {
    let effects = state.form.handle(event);

    for effect in effects {
        match effect {
            Effect::ScheduleRecompute => {
                state.recompute_pending = true;
            }
            Effect::Dispatch { generation, text } => {
                state.spawn_prediction(generation, text);
            }
            Effect::Alert(message) => {
                let _ = ui_tx.send(UiUpdate::Alert(message)).await;
            }
        }
    }

    push_display(state, ui_tx).await;
}

/// Send the current display to the TUI if it changed since the last push.
async fn push_display(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let display = state.form.display();
    if state.last_display.as_ref() == Some(display) {
        return;
    }
    let display = display.clone();
    state.last_display = Some(display.clone());
    let _ = ui_tx.send(UiUpdate::Display(Box::new(display))).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
