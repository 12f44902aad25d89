//! Source pane rendering with diagnostic highlighting
//!
//! Displays the annotated source: every character covered by a diagnostic is
//! drawn on the marked background, and the line of the selected diagnostic
//! gets the current-line background and a bright line number.

use crate::diagnostics::annotate::Segment;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the source pane draws.
pub struct SourceView<'a> {
    pub title: &'a str,
    pub lines: &'a [Vec<Segment>],
    /// 1-based line to emphasize
    pub selected_line: Option<usize>,
}

/// Render the source pane.
///
/// `center_on` scrolls so that the given 1-based line sits in the middle of
/// the pane; `scroll` is clamped so the last line never leaves the bottom.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    view: &SourceView,
    is_focused: bool,
    scroll: &mut usize,
    center_on: Option<usize>,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = view.lines.len();
    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if let Some(line) = center_on {
        *scroll = line.saturating_sub(1).saturating_sub(visible_height / 2);
    }
    if total_lines > visible_height {
        *scroll = (*scroll).min(total_lines - visible_height);
    } else {
        *scroll = 0;
    }

    let visible_lines: Vec<Line> = view
        .lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, segments)| {
            let line_num = idx + 1;
            let is_selected = view.selected_line == Some(line_num);

            let (num_style, base_style) = if is_selected {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .fg(DEFAULT_THEME.fg)
                        .bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                (
                    Style::default().fg(DEFAULT_THEME.comment), // Line numbers
                    Style::default().fg(DEFAULT_THEME.fg),
                )
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(segments.iter().map(|segment| {
                let style = if segment.marked {
                    Style::default()
                        .bg(DEFAULT_THEME.marked_bg)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    base_style
                };
                Span::styled(segment.text.clone(), style)
            }));
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
