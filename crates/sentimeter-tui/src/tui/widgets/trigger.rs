// Trigger widget: the analyze button.
//
// Enabled: cyan bold border and label. Disabled (empty field, or a request
// in flight): dim gray.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use sentimeter_core::form::TriggerControl;

use crate::tui::ViewState;

/// Render the trigger button into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let trigger = &state.display.trigger;
    let style = trigger_style(trigger);

    let paragraph = Paragraph::new(format!("[ {} ]", trigger.label))
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(paragraph, area);
}

/// Style for the button in its current state.
pub fn trigger_style(trigger: &TriggerControl) -> Style {
    if trigger.enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
