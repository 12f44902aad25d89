//! Catalog-driven lexer
//!
//! The lexer reads its input one physical line at a time and classifies the
//! front of the remaining line against the [`Catalog`]. It never looks further
//! ahead than the current line, so a lexeme cannot span lines.
//!
//! Bad input is never fatal here. Unidentifiable characters and over-long
//! matches are reported to the [`DiagnosticLog`] and skipped; `COMMENT`
//! matches are skipped silently. Scanning then resumes on the rest of the line.

use super::catalog::{Catalog, TokenDefinition};
use super::grammar::Category;
use crate::config::Settings;
use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use std::fmt;
use std::io::BufRead;
use tracing::{debug, trace, warn};

/// Line and 0-based column range of a lexeme; `end_col` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

/// A classified piece of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'c> {
    pub text: String,
    pub definition: &'c TokenDefinition,
    pub span: Span,
}

impl Lexeme<'_> {
    /// Name of the catalog definition this lexeme matched.
    pub fn category(&self) -> &str {
        &self.definition.name
    }

    pub fn is(&self, category: Category) -> bool {
        self.definition.name == category.name()
    }

    pub fn is_any(&self, categories: &[Category]) -> bool {
        categories.iter().any(|&c| self.is(c))
    }
}

impl fmt::Display for Lexeme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' [{}:{}-{}]",
            self.definition.name,
            self.text,
            self.span.line,
            self.span.start_col + 1,
            self.span.end_col + 1
        )
    }
}

/// Line-oriented lexer over any buffered reader.
pub struct Scanner<'c, R> {
    catalog: &'c Catalog,
    reader: Option<R>,
    tab_size: usize,
    line_capacity: usize,
    max_lexeme_length: usize,

    /// Current physical line and the byte offset of its unconsumed part
    buffer: String,
    position: usize,

    line: usize,
    column: usize,
    saw_tab: bool,
}

impl<'c, R: BufRead> Scanner<'c, R> {
    pub fn new(catalog: &'c Catalog, reader: R, settings: &Settings) -> Self {
        Self {
            catalog,
            reader: Some(reader),
            tab_size: settings.tab_size,
            line_capacity: settings.line_capacity(),
            max_lexeme_length: settings.max_lexeme_length,
            buffer: String::new(),
            position: 0,
            line: 0,
            column: 0,
            saw_tab: false,
        }
    }

    /// Produce the next lexeme, or `None` once the input is exhausted.
    pub fn next(&mut self, log: &mut DiagnosticLog) -> Option<Lexeme<'c>> {
        let catalog = self.catalog;

        loop {
            self.skip_whitespace();
            while self.rest().is_empty() {
                if !self.read_line() {
                    debug!(line = self.line, "reached end of input");
                    return None;
                }
                self.skip_whitespace();
            }

            let rest = self.rest();
            let Some((definition, end)) = catalog.lookup(rest) else {
                log.append(
                    DiagnosticKind::UnidentifiedToken,
                    "cannot identify token",
                    self.line,
                    self.column,
                    Some(self.column + 1),
                );
                let width = rest.chars().next().map_or(1, char::len_utf8);
                self.position += width;
                self.column += 1;
                continue;
            };

            let text = &rest[..end];
            let length = text.chars().count();
            let start_col = self.column;

            if definition.is_comment() {
                self.position += end;
                self.column += length;
                continue;
            }

            if length > self.max_lexeme_length {
                log.append(
                    DiagnosticKind::LexemeTooLong,
                    "lexeme is too long",
                    self.line,
                    start_col,
                    Some(start_col + length),
                );
                self.position += end;
                self.column += length;
                continue;
            }

            let lexeme = Lexeme {
                text: text.to_string(),
                definition,
                span: Span {
                    line: self.line,
                    start_col,
                    end_col: start_col + length,
                },
            };
            self.position += end;
            self.column += length;

            trace!(
                token = %definition.name,
                lexeme = %lexeme.text,
                line = lexeme.span.line,
                cols = ?(lexeme.span.start_col + 1, lexeme.span.end_col + 1),
                "identified token"
            );
            return Some(lexeme);
        }
    }

    /// Run the lexer to exhaustion, collecting every lexeme.
    pub fn tokenize(&mut self, log: &mut DiagnosticLog) -> Vec<Lexeme<'c>> {
        let mut lexemes = Vec::new();
        while let Some(lexeme) = self.next(log) {
            lexemes.push(lexeme);
        }
        lexemes
    }

    /// Current `(line, column)`; after end of input this is the end of the last line.
    pub fn current_location(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Whether a tab has been consumed as whitespace so far.
    pub fn saw_tab(&self) -> bool {
        self.saw_tab
    }

    fn rest(&self) -> &str {
        &self.buffer[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let mut consumed = 0;
        for ch in self.buffer[self.position..].chars() {
            match ch {
                '\t' => {
                    self.saw_tab = true;
                    self.column += self.tab_size;
                }
                ' ' | '\n' | '\r' | '\x0b' | '\x0c' => self.column += 1,
                _ => break,
            }
            consumed += 1;
        }
        // Every whitespace character above is a single byte
        self.position += consumed;
    }

    /// Load the next physical line. Returns false, and releases the reader, at end of input.
    fn read_line(&mut self) -> bool {
        let Some(reader) = self.reader.as_mut() else {
            return false;
        };

        let mut bytes = Vec::new();
        match reader.read_until(b'\n', &mut bytes) {
            Ok(0) => {
                self.reader = None;
                return false;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(
                    line = self.line + 1,
                    error = %err,
                    "failed to read input, treating as end of input"
                );
                self.reader = None;
                return false;
            }
        }

        self.buffer = String::from_utf8_lossy(&bytes).into_owned();
        if let Some((cut, _)) = self.buffer.char_indices().nth(self.line_capacity) {
            warn!(
                line = self.line + 1,
                limit = self.line_capacity,
                "line exceeds the maximum length and was truncated"
            );
            self.buffer.truncate(cut);
        }
        self.position = 0;
        self.column = 0;
        self.line += 1;
        trace!(line = self.line, "processing line");
        true
    }
}
