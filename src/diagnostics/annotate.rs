//! Overlay of diagnostic spans on the raw source
//!
//! The annotator makes its own pass over the source text, independent of the
//! lexer, and tracks `(line, column)` with the same tab rule: a tab advances
//! the column by the tab size, every other character by one. A newline moves to
//! the next line and sits *before* its first column, so it is never inside an
//! ordinary span.
//!
//! Diagnostics are visited with a single forward cursor. This is only correct
//! because the log is ordered by line (see [`DiagnosticLog`]).
//!
//! Once the cursor has run past the last diagnostic, nothing more is marked,
//! unless trailing content after the program was reported: then everything
//! from the line after that report to the end of the source is marked.

use super::{Diagnostic, DiagnosticLog};

/// One source character and whether it falls inside a diagnostic span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub line: usize,
    /// 0-based column; `None` for a newline, which precedes column 0 of the next line
    pub col: Option<usize>,
    pub marked: bool,
}

/// A run of consecutive characters sharing the same marking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub marked: bool,
}

/// Annotated source, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    cells: Vec<Cell>,
    end_of_input_marker: bool,
}

impl Annotation {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether an extra marked space follows the source to point at missing input.
    pub fn end_of_input_marker(&self) -> bool {
        self.end_of_input_marker
    }

    /// Columns marked on `line`, in source order.
    pub fn marked_columns(&self, line: usize) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|c| c.marked && c.line == line)
            .filter_map(|c| c.col)
            .collect()
    }

    /// Coalesced runs in display form: a marked newline becomes a marked
    /// space followed by an unmarked newline, and the end-of-input marker is a
    /// final marked space.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut push = |text: &str, marked: bool| match segments.last_mut() {
            Some(last) if last.marked == marked => last.text.push_str(text),
            _ => segments.push(Segment {
                text: text.to_string(),
                marked,
            }),
        };

        let mut buf = [0u8; 4];
        for cell in &self.cells {
            if cell.ch == '\n' && cell.marked {
                push(" ", true);
                push("\n", false);
            } else {
                push(cell.ch.encode_utf8(&mut buf), cell.marked);
            }
        }
        if self.end_of_input_marker {
            push(" ", true);
        }
        segments
    }

    /// The display segments split into lines, newlines removed.
    pub fn lines(&self) -> Vec<Vec<Segment>> {
        let mut lines = vec![Vec::new()];
        for segment in self.segments() {
            let mut parts = segment.text.split('\n').peekable();
            while let Some(part) = parts.next() {
                if !part.is_empty() {
                    if let Some(line) = lines.last_mut() {
                        line.push(Segment {
                            text: part.to_string(),
                            marked: segment.marked,
                        });
                    }
                }
                if parts.peek().is_some() {
                    lines.push(Vec::new());
                }
            }
        }
        lines
    }

    /// Render with `decorate` applied to every marked run.
    pub fn render(&self, mut decorate: impl FnMut(&str) -> String) -> String {
        self.segments()
            .into_iter()
            .map(|s| if s.marked { decorate(&s.text) } else { s.text })
            .collect()
    }
}

/// Walk `source` and mark every character covered by a diagnostic in `log`.
pub fn annotate(source: &str, log: &DiagnosticLog, tab_size: usize) -> Annotation {
    let mut cursor = Cursor::new(log.diagnostics(), log.saw_junk_after_program_end());
    let mut line = 1;
    let mut col: Option<usize> = None;
    // Column the next character starts at
    let mut next = 0;
    let mut cells = Vec::with_capacity(source.len());

    for ch in source.chars() {
        let width = if ch == '\t' { tab_size } else { 1 };
        if ch == '\n' {
            line += 1;
            col = None;
            next = 0;
        } else if width > 0 {
            col = Some(next + width - 1);
            next += width;
        }

        let marked = cursor.is_marked(line, col);
        cells.push(Cell {
            ch,
            line,
            col,
            marked,
        });
    }

    Annotation {
        cells,
        end_of_input_marker: log.saw_unexpected_end_of_input(),
    }
}

/// Forward-only position in the diagnostic list.
struct Cursor<'a> {
    diagnostics: &'a [Diagnostic],
    index: usize,
    exhausted: bool,
    mark_rest: bool,
}

impl<'a> Cursor<'a> {
    fn new(diagnostics: &'a [Diagnostic], mark_rest: bool) -> Self {
        Self {
            diagnostics,
            index: 0,
            exhausted: diagnostics.is_empty(),
            mark_rest,
        }
    }

    fn is_marked(&mut self, line: usize, col: Option<usize>) -> bool {
        if self.exhausted {
            return self.mark_rest;
        }

        let mut current = &self.diagnostics[self.index];
        if current.line > line {
            return false;
        }

        while current.line < line {
            match self.diagnostics.get(self.index + 1) {
                Some(next) => {
                    self.index += 1;
                    current = next;
                }
                None => {
                    self.exhausted = true;
                    return false;
                }
            }
        }

        while ends_before(current, col) {
            match self.diagnostics.get(self.index + 1) {
                None => {
                    self.exhausted = true;
                    return false;
                }
                // Nothing further on this line
                Some(next) if line < next.line => return false,
                Some(next) => {
                    self.index += 1;
                    current = next;
                }
            }
        }

        col.is_some_and(|c| current.covers(line, c))
    }
}

fn ends_before(diagnostic: &Diagnostic, col: Option<usize>) -> bool {
    match (diagnostic.last_col(), col) {
        (Some(last), Some(col)) => last < col,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn log_with(spans: &[(usize, usize, Option<usize>)]) -> DiagnosticLog {
        let mut log = DiagnosticLog::new();
        for &(line, start, end) in spans {
            log.append(DiagnosticKind::Syntax, "x", line, start, end);
        }
        log
    }

    fn segment(text: &str, marked: bool) -> Segment {
        Segment {
            text: text.to_string(),
            marked,
        }
    }

    #[test]
    fn test_marks_span_columns() {
        let log = log_with(&[(1, 2, Some(4))]);
        let annotation = annotate("ab?d", &log, 8);
        assert_eq!(annotation.marked_columns(1), vec![2, 3]);
        assert!(!annotation.end_of_input_marker());
    }

    #[test]
    fn test_no_diagnostics_no_marks() {
        let annotation = annotate("program p\n", &DiagnosticLog::new(), 8);
        assert!(annotation.cells().iter().all(|c| !c.marked));
        assert_eq!(annotation.segments(), vec![segment("program p\n", false)]);
    }

    #[test]
    fn test_multiple_spans_across_lines() {
        let log = log_with(&[(1, 0, Some(1)), (1, 3, Some(5)), (3, 1, Some(2))]);
        let annotation = annotate("abcdef\nxyz\nuvw\n", &log, 8);
        assert_eq!(annotation.marked_columns(1), vec![0, 3, 4]);
        assert!(annotation.marked_columns(2).is_empty());
        assert_eq!(annotation.marked_columns(3), vec![1]);
    }

    #[test]
    fn test_tab_shifts_columns() {
        // The lexer reports 'x' after a tab at column 8
        let log = log_with(&[(1, 8, Some(9))]);
        let annotation = annotate("\tx y", &log, 8);
        let marked: Vec<char> = annotation
            .cells()
            .iter()
            .filter(|c| c.marked)
            .map(|c| c.ch)
            .collect();
        assert_eq!(marked, vec!['x']);
    }

    #[test]
    fn test_zero_width_tab() {
        let log = log_with(&[(1, 0, Some(1))]);
        let annotation = annotate("\tx", &log, 0);
        let x = annotation.cells()[1];
        assert_eq!((x.ch, x.col, x.marked), ('x', Some(0), true));
        assert_eq!(annotation.cells()[0].col, None);
    }

    #[test]
    fn test_trailing_content_marks_remaining_lines() {
        let mut log = DiagnosticLog::new();
        log.record_junk_after_program_end(1, 4);
        let annotation = annotate("end junk\nmore\n", &log, 8);

        assert_eq!(annotation.marked_columns(1), vec![4, 5, 6, 7]);
        assert_eq!(annotation.marked_columns(2), vec![0, 1, 2, 3]);
        // The newline ending the junk line is where the cursor runs out
        let newlines: Vec<bool> = annotation
            .cells()
            .iter()
            .filter(|c| c.ch == '\n')
            .map(|c| c.marked)
            .collect();
        assert_eq!(newlines, vec![false, true]);
    }

    #[test]
    fn test_end_of_input_marker() {
        let mut log = DiagnosticLog::new();
        log.record_unexpected_end_of_input(1, 5);
        let annotation = annotate("begin", &log, 8);
        assert!(annotation.end_of_input_marker());
        assert_eq!(annotation.render(|s| format!("[{}]", s)), "begin[ ]");
    }

    #[test]
    fn test_render_marked_newline_as_space() {
        let mut log = DiagnosticLog::new();
        log.record_junk_after_program_end(1, 0);
        let annotation = annotate("ab\ncd\n", &log, 8);
        assert_eq!(annotation.render(|s| format!("[{}]", s)), "[ab]\n[cd ]\n");
    }

    #[test]
    fn test_lines_split_segments() {
        let log = log_with(&[(2, 1, Some(2))]);
        let annotation = annotate("ab\ncd", &log, 8);
        let lines = annotation.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![segment("ab", false)]);
        assert_eq!(lines[1], vec![segment("c", false), segment("d", true)]);
    }
}
