// Modal dialogs: blocking alerts and the quit confirmation.
//
// Both render as a centered box on top of the form, clearing what is
// underneath.

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const ALERT_WIDTH: u16 = 52;
const ALERT_HEIGHT: u16 = 6;
const CONFIRM_WIDTH: u16 = 28;
const CONFIRM_HEIGHT: u16 = 5;

/// Render a blocking alert with `message`, dismissed with Enter or Esc.
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let dialog_area = centered_rect(ALERT_WIDTH, ALERT_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Alert ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// Render the quit confirmation prompt.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let dialog_area = centered_rect(CONFIRM_WIDTH, CONFIRM_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Quit? ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Line::from(vec![
        Span::raw("Really quit? ("),
        Span::styled(
            "y",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("/"),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(")"),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// Compute a centered rectangle of the given size within `area`, clamped
/// to the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);

    Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
