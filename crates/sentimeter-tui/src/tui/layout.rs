// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Text Field (fill)                                 |
// +--------------------------------------------------+
// | Counters (1 row)                                  |
// +--------------------------------------------------+
// | Trigger Button (3 rows)                           |
// +--------------------------------------------------+
// | Results (6 rows)                                  |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each form zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: app name, endpoint, request state.
    pub status_bar: Rect,
    /// Editable text area.
    pub text_field: Rect,
    /// Word and character counters.
    pub counters: Rect,
    /// Analyze button.
    pub trigger: Rect,
    /// Summary line and the two percentage bars.
    pub results: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub const TRIGGER_HEIGHT: u16 = 3;
pub const RESULTS_HEIGHT: u16 = 6;

/// Build the form layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // status bar
            Constraint::Min(3),                 // text field
            Constraint::Length(1),              // counters
            Constraint::Length(TRIGGER_HEIGHT), // trigger
            Constraint::Length(RESULTS_HEIGHT), // results
            Constraint::Length(1),              // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        text_field: vertical[1],
        counters: vertical[2],
        trigger: vertical[3],
        results: vertical[4],
        help_bar: vertical[5],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
