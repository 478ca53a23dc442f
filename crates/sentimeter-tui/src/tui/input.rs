// Keyboard and paste input handling.
//
// Translates crossterm events into UserCommand messages for the app
// orchestrator, or into local ViewState changes (dismissing an alert,
// the quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use sentimeter_core::form::EditOp;
use sentimeter_core::protocol::UserCommand;

use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // An alert blocks everything until it is dismissed
    if view_state.alert.is_some() {
        return handle_alert(key_event, view_state);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Enter => Some(UserCommand::Analyze),
        KeyCode::Esc => {
            view_state.confirm_quit = true;
            None
        }
        KeyCode::Backspace => Some(UserCommand::Edit(EditOp::Backspace)),
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserCommand::Edit(EditOp::Clear))
        }
        KeyCode::Tab => Some(UserCommand::Edit(EditOp::Insert('\t'))),
        KeyCode::Char(c)
            if !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(UserCommand::Edit(EditOp::Insert(c)))
        }
        _ => None,
    }
}

/// Handle a bracketed paste.
///
/// Pastes are dropped while a dialog is open.
pub fn handle_paste(content: String, view_state: &ViewState) -> Option<UserCommand> {
    if view_state.alert.is_some() || view_state.confirm_quit || content.is_empty() {
        return None;
    }
    Some(UserCommand::Paste(content))
}

/// Enter or Esc dismisses the alert; everything else is blocked.
fn handle_alert(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
        view_state.alert = None;
    }
    None
}

/// `y` confirms quit, `n` or Esc cancels; everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserCommand::Quit),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
