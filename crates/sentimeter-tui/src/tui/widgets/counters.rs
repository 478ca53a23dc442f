// Counters line: word count and character count against the limit.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the counters into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = build_counters_line(
        &state.display.word_count_label,
        &state.display.char_count_label,
    );
    frame.render_widget(Paragraph::new(line), area);
}

fn build_counters_line(words: &str, chars: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {words}"), Style::default().fg(Color::Gray)),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(chars.to_string(), Style::default().fg(Color::Gray)),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
