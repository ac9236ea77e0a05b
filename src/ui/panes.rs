//! Rendering logic for each TUI pane
//!
//! Every function here is a pure projection of session state: rendering
//! twice with unchanged inputs paints the same thing.

use crate::config::{Configuration, BUDGET_CHOICES_MS, SIZE_CHOICES};
use crate::engine::{AlgorithmId, Arrangement, Counters, Operation};
use crate::session::SessionState;
use crate::ui::theme::{bar_color, DEFAULT_THEME};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Bar},
        Block, Borders, Paragraph,
    },
    Frame,
};

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border))
        .title(title)
}

/// Paint the array as one vertical bar per index.
///
/// Bar height is proportional to the value; the hue sweeps the value range.
/// The index named by a pending `Read` is painted in the highlight color so
/// the algorithm's cursor is visible while it scans.
pub fn render_array_pane(
    frame: &mut Frame,
    area: Rect,
    values: &[u16],
    size: usize,
    cursor: Option<usize>,
) {
    let canvas = Canvas::default()
        .block(pane_block(" array "))
        .marker(symbols::Marker::HalfBlock)
        .x_bounds([0.0, size as f64])
        .y_bounds([0.0, size as f64])
        .paint(|ctx| {
            for (index, &value) in values.iter().enumerate() {
                let color = match cursor {
                    Some(read_index) if read_index == index => DEFAULT_THEME.highlight,
                    _ => bar_color(value, size),
                };

                ctx.draw(&Bar {
                    x1: index as f64 + 0.5,
                    y1: 0.0,
                    x2: index as f64 + 0.5,
                    y2: f64::from(value),
                    color,
                });
            }
        });

    frame.render_widget(canvas, area);
}

/// Numeric projections of the engine counters plus throughput.
pub fn render_stats_pane(
    frame: &mut Frame,
    area: Rect,
    counters: Counters,
    last_operation: Option<Operation>,
    fps: f64,
    state: SessionState,
) {
    let operation = match last_operation {
        Some(operation) => operation.to_string(),
        None => "-".to_string(),
    };

    let state_label = match state {
        SessionState::Idle => "idle",
        SessionState::Running => "sorting",
        SessionState::Paused => "paused",
    };

    let rows = [
        ("reads", counters.reads.to_string()),
        ("writes", counters.writes.to_string()),
        ("compares", counters.compares.to_string()),
        ("swaps", counters.swaps.to_string()),
        ("operation", operation),
        ("fps", format!("{:.1}", fps)),
        ("state", state_label.to_string()),
    ];

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", label),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(pane_block(" stats ")), area);
}

/// The four setting categories with their enumerated value sets.
///
/// The whole pane is dimmed while a run is in flight, mirroring the
/// session's rejection of settings changes in that state. Sizes above the
/// host cap are not shown; they are not selectable on this terminal.
pub fn render_settings_pane(
    frame: &mut Frame,
    area: Rect,
    config: &Configuration,
    locked: bool,
    max_size: usize,
) {
    let mut lines = Vec::new();

    lines.push(category_line(
        "(i) initial",
        Arrangement::ALL
            .iter()
            .map(|choice| (choice.label().to_string(), *choice == config.initial)),
        locked,
    ));
    lines.push(Line::default());

    lines.push(category_line(
        "(z) size",
        SIZE_CHOICES
            .iter()
            .filter(|&&choice| choice <= max_size)
            .map(|choice| (choice.to_string(), *choice == config.size)),
        locked,
    ));
    lines.push(Line::default());

    lines.push(category_line(
        "(t) budget ms",
        BUDGET_CHOICES_MS
            .iter()
            .map(|choice| (choice.to_string(), *choice == config.step_time_budget_ms)),
        locked,
    ));
    lines.push(Line::default());

    lines.push(category_line(
        "(a) algorithm",
        AlgorithmId::ALL
            .iter()
            .map(|choice| (choice.label().to_string(), *choice == config.algorithm)),
        locked,
    ));

    let title = if locked { " settings (locked) " } else { " settings " };
    frame.render_widget(Paragraph::new(lines).block(pane_block(title)), area);
}

fn category_line<'a>(
    label: &'a str,
    choices: impl Iterator<Item = (String, bool)>,
    locked: bool,
) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{:<14}", label),
        Style::default().fg(DEFAULT_THEME.comment),
    )];

    for (index, (text, selected)) in choices.enumerate() {
        if index > 0 {
            spans.push(Span::styled(
                " ",
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }

        let style = match (selected, locked) {
            (true, false) => Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
            (true, true) => Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::BOLD),
            (false, _) => Style::default().fg(DEFAULT_THEME.comment),
        };

        spans.push(Span::styled(text, style));
    }

    Line::from(spans)
}

/// One-line status bar: message on the left, key hints on the right.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, share_feedback: bool) {
    let mut spans = vec![Span::styled(
        format!(" {}", message),
        Style::default().fg(DEFAULT_THEME.secondary),
    )];

    if share_feedback {
        spans.push(Span::styled(
            "  link copied",
            Style::default().fg(DEFAULT_THEME.success),
        ));
    }

    let hints = "space play/pause | n step | r reset | s share | i/z/t/a settings | q quit ";
    let used: usize = spans.iter().map(|span| span.content.len()).sum();
    let padding = (area.width as usize).saturating_sub(used + hints.len());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(
        hints,
        Style::default().fg(DEFAULT_THEME.comment),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text<F>(width: u16, height: u16, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(draw).expect("draw");

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_status_bar_names_every_key() {
        let text = rendered_text(120, 1, |frame| {
            render_status_bar(frame, frame.area(), "Ready!", false);
        });

        for hint in ["space", "n step", "r reset", "s share", "i/z/t/a", "q quit"] {
            assert!(text.contains(hint), "missing hint {hint:?}");
        }
    }

    #[test]
    fn test_settings_pane_hides_sizes_above_the_cap() {
        let config = Configuration::default();

        let text = rendered_text(80, 12, |frame| {
            render_settings_pane(
                frame,
                frame.area(),
                &config,
                false,
                Configuration::MAX_SIZE_CONSTRAINED,
            );
        });

        assert!(text.contains("1024"));
        assert!(!text.contains("2048"), "above-cap size offered");
        assert!(!text.contains("4096"), "above-cap size offered");
    }
}
