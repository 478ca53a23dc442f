// Results widget: sentiment summary and the positive/negative bars.
//
// When no result is shown the panel only carries the placeholder summary;
// the bars are drawn once a result arrives.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use sentimeter_core::form::ScoreBar;
use sentimeter_core::prediction::Polarity;

use crate::tui::ViewState;

/// Render the results panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let display = &state.display;
    let block = Block::default().borders(Borders::ALL).title("Results");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // summary
            Constraint::Length(1), // spacer
            Constraint::Length(1), // positive bar
            Constraint::Length(1), // negative bar
        ])
        .split(inner);

    let summary = Paragraph::new(Line::from(Span::styled(
        format!(" {}", display.summary),
        summary_style(display.results_visible, display.summary_polarity),
    )));
    frame.render_widget(summary, rows[0]);

    if !display.results_visible {
        return;
    }

    frame.render_widget(score_gauge(&display.positive_bar, Color::Green), rows[2]);
    frame.render_widget(score_gauge(&display.negative_bar, Color::Red), rows[3]);
}

/// Summary colour follows the result's polarity; the placeholder is dim.
pub fn summary_style(visible: bool, polarity: Option<Polarity>) -> Style {
    let color = match (visible, polarity) {
        (false, _) => return Style::default().fg(Color::DarkGray),
        (true, Some(Polarity::Positive)) => Color::Green,
        (true, Some(Polarity::Negative)) => Color::Red,
        (true, None) => Color::White,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Build a one-row gauge whose filled width is the bar percentage.
fn score_gauge(bar: &ScoreBar, color: Color) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(bar_ratio(bar.width_percent))
        .label(bar.label.clone())
}

/// Convert a percentage to a gauge ratio in `[0, 1]`.
pub fn bar_ratio(width_percent: f64) -> f64 {
    if width_percent.is_nan() {
        return 0.0;
    }
    (width_percent / 100.0).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn bar_ratio_clamps() {
        assert_eq!(bar_ratio(0.0), 0.0);
        assert!((bar_ratio(82.0) - 0.82).abs() < 1e-12);
        assert_eq!(bar_ratio(100.0), 1.0);
        assert_eq!(bar_ratio(130.0), 1.0);
        assert_eq!(bar_ratio(-5.0), 0.0);
        assert_eq!(bar_ratio(f64::NAN), 0.0);
    }

    #[test]
    fn summary_colour_follows_polarity() {
        assert_eq!(summary_style(true, Some(Polarity::Positive)).fg, Some(Color::Green));
        assert_eq!(summary_style(true, Some(Polarity::Negative)).fg, Some(Color::Red));
        assert_eq!(summary_style(false, None).fg, Some(Color::DarkGray));
        assert_eq!(summary_style(false, Some(Polarity::Positive)).fg, Some(Color::DarkGray));
    }

    #[test]
    fn hidden_results_show_placeholder_only() {
        let backend = ratatui::backend::TestBackend::new(50, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Your sentiment will appear here"));
        assert!(!text.contains("Positive:"));
    }

    #[test]
    fn visible_results_show_summary_and_bars() {
        let backend = ratatui::backend::TestBackend::new(50, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.display.results_visible = true;
        state.display.summary = "The overall sentiment is Positive".to_string();
        state.display.summary_polarity = Some(Polarity::Positive);
        state.display.positive_bar = ScoreBar {
            label: "Positive: 82.0%".to_string(),
            width_percent: 82.0,
        };
        state.display.negative_bar = ScoreBar {
            label: "Negative: 18.0%".to_string(),
            width_percent: 18.0,
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer_text(buffer);
        assert!(text.contains("The overall sentiment is Positive"));
        // Summary row starts one cell in from the border, after a space.
        assert_eq!(buffer[(2u16, 1u16)].fg, Color::Green);
        assert!(text.contains("Positive: 82.0%"));
        assert!(text.contains("Negative: 18.0%"));
    }

    #[test]
    fn render_does_not_panic_in_small_area() {
        let backend = ratatui::backend::TestBackend::new(10, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.display.results_visible = true;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
