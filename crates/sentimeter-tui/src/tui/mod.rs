// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the form's display surface. The
// app orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders on a fixed interval.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use sentimeter_core::config::DEFAULT_ENDPOINT;
use sentimeter_core::form::FormDisplay;
use sentimeter_core::protocol::{UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state for rendering.
pub struct ViewState {
    /// Last display surface pushed by the app orchestrator.
    pub display: FormDisplay,
    /// Blocking alert, shown until dismissed.
    pub alert: Option<String>,
    /// Whether the quit confirmation dialog is open.
    pub confirm_quit: bool,
    /// Prediction endpoint, shown in the status bar.
    pub endpoint: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            display: FormDisplay::default(),
            alert: None,
            confirm_quit: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ViewState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ViewState {
            endpoint: endpoint.into(),
            ..ViewState::default()
        }
    }

    /// Whether a modal dialog currently captures input.
    pub fn dialog_open(&self) -> bool {
        self.alert.is_some() || self.confirm_quit
    }
}

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Display(display) => {
            state.display = *display;
        }
        UiUpdate::Alert(message) => {
            // A newer alert replaces one still on screen.
            state.alert = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete form frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    render_status_bar(frame, &layout, state);
    widgets::text_field::render(frame, layout.text_field, state);
    widgets::counters::render(frame, layout.counters, state);
    widgets::trigger::render(frame, layout.trigger, state);
    widgets::results::render(frame, layout.results, state);
    render_help_bar(frame, &layout, state);

    if let Some(message) = &state.alert {
        widgets::dialog::render_alert(frame, frame.area(), message);
    } else if state.confirm_quit {
        widgets::dialog::render_quit_confirm(frame, frame.area());
    }
}

fn render_status_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = format!(
        " Sentimeter | {} | {}",
        state.endpoint, state.display.trigger.label
    );
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.status_bar);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.alert.is_some() {
        " Enter/Esc:Dismiss"
    } else if state.confirm_quit {
        " y:Quit | n/Esc:Cancel"
    } else {
        " Enter:Analyze | Ctrl+U:Clear | Esc:Quit"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen, bracketed paste).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, terminal input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    endpoint: String,
    render_interval: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableBracketedPaste) {
        warn!("Failed to enable bracketed paste: {}", e);
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(endpoint);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(render_interval);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed, leaving TUI loop");
                        break Ok(());
                    }
                }
            }

            // Terminal input
            maybe_event = event_stream.next() => {
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        input::handle_key(key_event, &mut view_state)
                    }
                    Some(Ok(Event::Paste(content))) => {
                        input::handle_paste(content, &view_state)
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                };
                if let Some(cmd) = command {
                    let quit = cmd == UserCommand::Quit;
                    let _ = cmd_tx.send(cmd).await;
                    if quit {
                        break Ok(());
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use sentimeter_core::form::{ScoreBar, ANALYZE_LABEL, SUMMARY_PLACEHOLDER};

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.display.text.is_empty());
        assert_eq!(state.display.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(state.display.trigger.label, ANALYZE_LABEL);
        assert!(state.alert.is_none());
        assert!(!state.confirm_quit);
        assert!(!state.dialog_open());
        assert_eq!(state.endpoint, "http://localhost:8000/predict");
    }

    #[test]
    fn apply_ui_update_display_replaces_surface() {
        let mut state = ViewState::default();
        let mut display = FormDisplay::default();
        display.text = "hello".to_string();
        display.results_visible = true;
        display.positive_bar = ScoreBar {
            label: "Positive: 60.0%".to_string(),
            width_percent: 60.0,
        };
        apply_ui_update(&mut state, UiUpdate::Display(Box::new(display.clone())));
        assert_eq!(state.display, display);
    }

    #[test]
    fn apply_ui_update_alert_opens_dialog() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Alert("first".to_string()));
        apply_ui_update(&mut state, UiUpdate::Alert("second".to_string()));
        assert_eq!(state.alert.as_deref(), Some("second"));
        assert!(state.dialog_open());
    }

    #[test]
    fn render_frame_does_not_panic_in_all_modes() {
        let backend = ratatui::backend::TestBackend::new(80, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::new("http://127.0.0.1:9999/predict");

        terminal.draw(|f| render_frame(f, &state)).unwrap();

        state.display.results_visible = true;
        terminal.draw(|f| render_frame(f, &state)).unwrap();

        state.confirm_quit = true;
        terminal.draw(|f| render_frame(f, &state)).unwrap();

        state.alert = Some("Failed to analyze sentiment. Please try again.".to_string());
        terminal.draw(|f| render_frame(f, &state)).unwrap();
    }

    #[test]
    fn render_frame_survives_tiny_terminal() {
        let backend = ratatui::backend::TestBackend::new(12, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.display.text = "some text".to_string();
        state.alert = Some("alert".to_string());
        terminal.draw(|f| render_frame(f, &state)).unwrap();
    }
}
