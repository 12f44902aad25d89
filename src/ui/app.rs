//! Viewer state and event loop

use crate::diagnostics::annotate::{annotate, Segment};
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Diagnostics,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Shown as the source pane title
    pub path: String,

    /// Annotated source, one entry per line, tabs expanded
    pub lines: Vec<Vec<Segment>>,

    pub diagnostics: Vec<Diagnostic>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Index into `diagnostics`
    pub selected: usize,

    /// Line to emphasize in the source pane
    pub highlighted_line: Option<usize>,

    /// Line to center the source pane on at the next draw
    pub jump_to: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Build the viewer for a finished run over `source`.
    pub fn new(
        path: impl Into<String>,
        source: &str,
        log: &DiagnosticLog,
        tab_size: usize,
    ) -> Self {
        let annotation = annotate(source, log, tab_size);
        let tab = " ".repeat(tab_size);
        let lines = annotation
            .lines()
            .into_iter()
            .map(|line| {
                line.into_iter()
                    .map(|segment| Segment {
                        text: segment.text.replace('\t', &tab),
                        marked: segment.marked,
                    })
                    .collect()
            })
            .collect();

        let diagnostics = log.diagnostics().to_vec();
        let first_line = diagnostics.first().map(|d| d.line);
        let status_message = if diagnostics.is_empty() {
            String::from("No errors")
        } else {
            String::from("Ready!")
        };

        App {
            path: path.into(),
            lines,
            diagnostics,
            focused_pane: FocusedPane::Diagnostics,
            source_scroll: 0,
            diagnostics_scroll: 0,
            selected: 0,
            highlighted_line: first_line,
            jump_to: first_line,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source (top) | Diagnostics (bottom)
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[0]);

        let view = super::panes::SourceView {
            title: &self.path,
            lines: &self.lines,
            selected_line: self.highlighted_line,
        };
        super::panes::render_source_pane(
            frame,
            rows[0],
            &view,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
            self.jump_to.take(),
        );

        super::panes::render_diagnostics_pane(
            frame,
            rows[1],
            &self.diagnostics,
            self.selected,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.diagnostics.len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Diagnostics => {
                    self.selected = self.selected.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Clamped against the pane height at the next draw
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Diagnostics => {
                    if self.selected + 1 < self.diagnostics.len() {
                        self.selected += 1;
                    }
                }
            },
            KeyCode::Enter => self.jump_to_selected(),
            _ => {}
        }
    }

    /// Center the source pane on the selected diagnostic's line.
    fn jump_to_selected(&mut self) {
        let Some(diagnostic) = self.diagnostics.get(self.selected) else {
            self.status_message = "Nothing to jump to".to_string();
            return;
        };
        self.highlighted_line = Some(diagnostic.line);
        self.jump_to = Some(diagnostic.line);
        self.status_message = format!("Line {}: {}", diagnostic.line, diagnostic.message);
    }
}
