// Text field widget: the editable input area.
//
// Content is hard-wrapped here, by display width, into the exact rows that
// get drawn. Only the trailing rows that fit are rendered, so the end of the
// text (where typing happens) stays visible.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::tui::ViewState;

const PLACEHOLDER: &str = "Type or paste text to analyze...";
const TAB: &str = "    ";

/// Render the text field into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible_rows = area.height.saturating_sub(2) as usize;
    let show_cursor = !state.dialog_open();

    let lines = build_lines(&state.display.text, inner_width, show_cursor);
    let start = lines.len().saturating_sub(visible_rows);
    let visible: Vec<Line<'static>> = lines.into_iter().skip(start).collect();

    let paragraph = Paragraph::new(Text::from(visible))
        .block(Block::default().borders(Borders::ALL).title("Text"));
    frame.render_widget(paragraph, area);
}

/// Build every display row of the field, with a placeholder when empty.
fn build_lines(content: &str, width: usize, show_cursor: bool) -> Vec<Line<'static>> {
    let cursor = Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED));

    if content.is_empty() {
        let mut spans = Vec::new();
        if show_cursor {
            spans.push(cursor);
        }
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
        return vec![Line::from(spans)];
    }

    let trailing = usize::from(show_cursor);
    let mut lines: Vec<Line<'static>> = wrap_rows(content, width, trailing)
        .into_iter()
        .map(Line::from)
        .collect();
    if show_cursor {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }
    lines
}

/// Hard-wrap `content` into rows at most `width` cells wide.
///
/// Newlines start a new row and tabs expand to four spaces. `trailing` cells
/// are reserved at the end of the last row; if they don't fit, an empty row
/// is appended for them. A single character wider than `width` gets a row of
/// its own.
pub fn wrap_rows(content: &str, width: usize, trailing: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut last_width = 0;
    for segment in content.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for c in segment.replace('\t', TAB).chars() {
            let w = c.width().unwrap_or(0);
            if row_width > 0 && row_width + w > width {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(c);
            row_width += w;
        }
        rows.push(row);
        last_width = row_width;
    }

    if trailing > 0 && last_width + trailing > width {
        rows.push(String::new());
    }
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
