//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the primitives every grammar
//! production is written in terms of.
//!
//! # Parser Architecture
//!
//! The parser is a recursive descent recognizer with a single lookahead lexeme,
//! pulled from the [`Scanner`] one at a time:
//! - This module: Parser struct, lookahead helpers, and the `program` entry point
//! - `statements`: statement productions (compound, assignment, read, write, if, while)
//! - `expressions`: expression, simple expression, term, factor
//!
//! No tree is built. The only outputs are the diagnostics appended to the
//! [`DiagnosticLog`] and whether the log stayed empty.
//!
//! # Error Recovery
//!
//! A failed expectation reports one diagnostic and does **not** consume the
//! offending lexeme, so it stays current for the next check and may produce
//! further diagnostics there. Running out of input is different: the first
//! production to notice records "unexpected end of input" once and every
//! enclosing production returns immediately via [`EndOfInput`].

use super::grammar::Category;
use super::lexer::{Lexeme, Scanner};
use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use std::io::BufRead;
use tracing::{debug, trace_span};

/// Signal that the lookahead ran out; unwinds every open production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EndOfInput;

pub(crate) type Flow = Result<(), EndOfInput>;

/// Recursive descent recognizer for the language
pub struct Parser<'c, 'l, R> {
    pub(crate) scanner: Scanner<'c, R>,
    pub(crate) log: &'l mut DiagnosticLog,
    pub(crate) current: Option<Lexeme<'c>>,
}

impl<'c, 'l, R: BufRead> Parser<'c, 'l, R> {
    pub fn new(scanner: Scanner<'c, R>, log: &'l mut DiagnosticLog) -> Self {
        Self {
            scanner,
            log,
            current: None,
        }
    }

    /// Parse a whole program.
    ///
    /// Returns true when the log holds no diagnostics afterwards, lexical ones included.
    pub fn parse_program(&mut self) -> bool {
        if self.program().is_err() {
            debug!("parsing stopped at unexpected end of input");
        }
        self.log.is_empty()
    }

    /// Hand back the lexer, e.g. to query whether tabs were seen.
    pub fn into_scanner(self) -> Scanner<'c, R> {
        self.scanner
    }

    /// The lookahead lexeme, if any input remains.
    pub fn current(&self) -> Option<&Lexeme<'c>> {
        self.current.as_ref()
    }

    /// `program ::= 'program' progname compound_statement`
    fn program(&mut self) -> Flow {
        let _span = trace_span!("program").entered();

        self.advance();
        self.guard()?;
        self.expect(Category::Program, "'program'")?;
        self.expect(Category::ProgramName, "<progname>")?;
        self.compound_statement()?;

        if !self.log.saw_unexpected_end_of_input() {
            if let Some(lexeme) = &self.current {
                let (line, col) = (lexeme.span.line, lexeme.span.start_col);
                self.log.record_junk_after_program_end(line, col);
            }
        }
        Ok(())
    }

    /// Pull the next lexeme into the lookahead.
    pub(crate) fn advance(&mut self) {
        self.current = self.scanner.next(self.log);
    }

    /// Fail with [`EndOfInput`] if the lookahead is empty, recording it once.
    pub(crate) fn guard(&mut self) -> Flow {
        if self.current.is_some() {
            return Ok(());
        }
        let (line, col) = self.scanner.current_location();
        self.log.record_unexpected_end_of_input(line, col);
        Err(EndOfInput)
    }

    /// Advance, then guard.
    pub(crate) fn bump(&mut self) -> Flow {
        self.advance();
        self.guard()
    }

    pub(crate) fn check(&self, category: Category) -> bool {
        self.current.as_ref().is_some_and(|l| l.is(category))
    }

    pub(crate) fn check_any(&self, categories: &[Category]) -> bool {
        self.current.as_ref().is_some_and(|l| l.is_any(categories))
    }

    /// Consume the lookahead if it is one of `categories`, otherwise report
    /// that `expected` was wanted and leave the lookahead in place.
    pub(crate) fn consume(&mut self, categories: &[Category], expected: &str) {
        match &self.current {
            Some(lexeme) if lexeme.is_any(categories) => self.advance(),
            Some(_) => self.syntax_error(expected),
            None => {}
        }
    }

    /// [`consume`](Self::consume) a single category, then guard.
    pub(crate) fn expect(&mut self, category: Category, expected: &str) -> Flow {
        self.consume(&[category], expected);
        self.guard()
    }

    /// [`consume`](Self::consume) any of `categories`, then guard.
    pub(crate) fn expect_any(&mut self, categories: &[Category], expected: &str) -> Flow {
        self.consume(categories, expected);
        self.guard()
    }

    /// Report that `expected` was wanted where the lookahead stands.
    pub(crate) fn syntax_error(&mut self, expected: &str) {
        let Some(lexeme) = &self.current else {
            return;
        };
        let message = format!("expected {} but saw '{}'", expected, lexeme.text);
        let span = lexeme.span;
        self.log.append(
            DiagnosticKind::Syntax,
            message,
            span.line,
            span.start_col,
            Some(span.end_col),
        );
    }
}
