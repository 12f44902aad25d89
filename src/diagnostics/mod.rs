//! Diagnostics collected during a scan/parse pass
//!
//! Both the lexer and the parser only move forward through the source, so the
//! log's insertion order is also non-decreasing by line. The annotator relies
//! on that ordering to walk diagnostics with a single forward cursor.
//!
//! Columns are stored 0-based with an exclusive end. [`Diagnostic::end_col`] is
//! `None` for open-ended spans (end of input, trailing content) that have no
//! finite end column.

pub mod annotate;

use std::fmt;

/// What produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// No catalog definition matched at this position
    UnidentifiedToken,
    /// A match longer than the configured maximum lexeme length
    LexemeTooLong,
    /// An expectation in the grammar failed
    Syntax,
    /// The grammar needed more tokens than the input had
    UnexpectedEndOfInput,
    /// Tokens remained after the program's final `end`
    TrailingContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    pub start_col: usize,
    pub end_col: Option<usize>,
}

impl Diagnostic {
    /// Last column covered by this diagnostic, or `None` when it is open-ended.
    pub fn last_col(&self) -> Option<usize> {
        self.end_col.map(|end| end.saturating_sub(1))
    }

    /// Whether `col` on `line` lies within the span.
    pub fn covers(&self, line: usize, col: usize) -> bool {
        line == self.line
            && self.start_col <= col
            && self.last_col().map_or(true, |last| col <= last)
    }
}

/// `<message> [<line>:<start>]` for open-ended spans, otherwise
/// `<message> [<line>:<start>-<end>]`, with columns rendered 1-based.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_col {
            None => write!(f, "{} [{}:{}]", self.message, self.line, self.start_col + 1),
            Some(end) => write!(
                f,
                "{} [{}:{}-{}]",
                self.message,
                self.line,
                self.start_col + 1,
                end + 1
            ),
        }
    }
}

/// Callback invoked for each diagnostic the moment it is recorded.
pub type Reporter = Box<dyn FnMut(&Diagnostic)>;

/// Append-only, ordered list of diagnostics for one run.
///
/// Two sticky flags accompany the list; each structural condition is recorded
/// at most once per run.
#[derive(Default)]
pub struct DiagnosticLog {
    diagnostics: Vec<Diagnostic>,
    saw_junk_after_program_end: bool,
    saw_unexpected_end_of_input: bool,
    reporter: Option<Reporter>,
}

impl DiagnosticLog {
    /// A log that records silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that hands each new diagnostic to `reporter` as it is appended.
    pub fn with_reporter(reporter: impl FnMut(&Diagnostic) + 'static) -> Self {
        Self {
            reporter: Some(Box::new(reporter)),
            ..Self::default()
        }
    }

    /// Record a diagnostic, report it, and append it to the tail.
    pub fn append(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
        start_col: usize,
        end_col: Option<usize>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            message: message.into(),
            line,
            start_col,
            end_col,
        };
        if let Some(report) = self.reporter.as_mut() {
            report(&diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Record "unexpected end of input" at `(line, col)` unless already recorded.
    ///
    /// Returns true if this call recorded it.
    pub fn record_unexpected_end_of_input(&mut self, line: usize, col: usize) -> bool {
        if self.saw_unexpected_end_of_input {
            return false;
        }
        self.saw_unexpected_end_of_input = true;
        self.append(
            DiagnosticKind::UnexpectedEndOfInput,
            "unexpected end of input",
            line,
            col,
            None,
        );
        true
    }

    /// Record trailing content after the program unless already recorded.
    ///
    /// Returns true if this call recorded it.
    pub fn record_junk_after_program_end(&mut self, line: usize, col: usize) -> bool {
        if self.saw_junk_after_program_end {
            return false;
        }
        self.saw_junk_after_program_end = true;
        self.append(
            DiagnosticKind::TrailingContent,
            "non-empty content after end of program",
            line,
            col,
            None,
        );
        true
    }

    pub fn saw_unexpected_end_of_input(&self) -> bool {
        self.saw_unexpected_end_of_input
    }

    pub fn saw_junk_after_program_end(&self) -> bool {
        self.saw_junk_after_program_end
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Render a diagnostic as one line of text.
    pub fn format(diagnostic: &Diagnostic) -> String {
        diagnostic.to_string()
    }

    /// Remove and return every diagnostic, leaving the log empty.
    ///
    /// The sticky flags are left untouched; they describe the run, not the list.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticLog")
            .field("diagnostics", &self.diagnostics)
            .field("saw_junk_after_program_end", &self.saw_junk_after_program_end)
            .field("saw_unexpected_end_of_input", &self.saw_unexpected_end_of_input)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a DiagnosticLog {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
