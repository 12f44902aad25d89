//! Statement productions
//!
//! # Grammar
//!
//! ```text
//! compound_statement   ::= 'begin' statement { ';' statement } 'end'
//! statement            ::= simple_statement | structured_statement
//! simple_statement     ::= assignment_statement | read_statement | write_statement
//! assignment_statement ::= variable ':=' expression
//! read_statement       ::= 'read' '(' variable { ',' variable } ')'
//! write_statement      ::= 'write' '(' expression { ',' expression } ')'
//! structured_statement ::= compound_statement | if_statement | while_statement
//! if_statement         ::= 'if' expression 'then' statement [ 'else' statement ]
//! while_statement      ::= 'while' expression 'do' statement
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use super::grammar::{Category, SIMPLE_STATEMENT, STRUCTURED_STATEMENT, VARIABLE};
use super::parse::{Flow, Parser};
use std::io::BufRead;
use tracing::trace_span;

impl<R: BufRead> Parser<'_, '_, R> {
    /// `compound_statement ::= 'begin' statement { ';' statement } 'end'`
    ///
    /// The closing `end` is the one expectation not followed by an end-of-input
    /// check: input may legitimately stop right after the program's last `end`.
    pub(crate) fn compound_statement(&mut self) -> Flow {
        let _span = trace_span!("compound_statement").entered();

        self.expect(Category::Begin, "'begin'")?;
        self.statement()?;
        while self.check(Category::Semicolon) {
            self.bump()?;
            self.statement()?;
        }
        self.guard()?;
        self.consume(&[Category::End], "'end'");
        Ok(())
    }

    /// `statement ::= simple_statement | structured_statement`
    pub(crate) fn statement(&mut self) -> Flow {
        let _span = trace_span!("statement").entered();

        if self.check_any(SIMPLE_STATEMENT) {
            self.simple_statement()?;
        } else if self.check_any(STRUCTURED_STATEMENT) {
            self.structured_statement()?;
        } else {
            self.syntax_error("<variable>, 'read', 'write', 'begin', 'if', or 'while'");
        }
        self.guard()
    }

    fn simple_statement(&mut self) -> Flow {
        let _span = trace_span!("simple_statement").entered();

        if self.check_any(VARIABLE) {
            self.assignment_statement()?;
        } else if self.check(Category::Read) {
            self.read_statement()?;
        } else if self.check(Category::Write) {
            self.write_statement()?;
        } else {
            self.syntax_error("<variable>, 'read', or 'write'");
        }
        self.guard()
    }

    fn assignment_statement(&mut self) -> Flow {
        let _span = trace_span!("assignment_statement").entered();

        self.expect_any(VARIABLE, "<variable>")?;
        self.expect(Category::AssigningOperator, "':='")?;
        self.expression()?;
        self.guard()
    }

    fn read_statement(&mut self) -> Flow {
        let _span = trace_span!("read_statement").entered();

        self.expect(Category::Read, "'read'")?;
        self.expect(Category::LeftParenthesis, "'('")?;
        self.expect_any(VARIABLE, "<variable>")?;
        while self.check(Category::Comma) {
            self.bump()?;
            self.consume(VARIABLE, "<variable>");
        }
        self.guard()?;
        self.expect(Category::RightParenthesis, "')'")
    }

    fn write_statement(&mut self) -> Flow {
        let _span = trace_span!("write_statement").entered();

        self.expect(Category::Write, "'write'")?;
        self.expect(Category::LeftParenthesis, "'('")?;
        self.expression()?;
        while self.check(Category::Comma) {
            self.bump()?;
            self.expression()?;
        }
        self.guard()?;
        self.expect(Category::RightParenthesis, "')'")
    }

    fn structured_statement(&mut self) -> Flow {
        let _span = trace_span!("structured_statement").entered();

        if self.check(Category::Begin) {
            self.compound_statement()?;
        } else if self.check(Category::If) {
            self.if_statement()?;
        } else if self.check(Category::While) {
            self.while_statement()?;
        } else {
            self.syntax_error("'begin', 'if', or 'while'");
        }
        self.guard()
    }

    fn if_statement(&mut self) -> Flow {
        let _span = trace_span!("if_statement").entered();

        self.expect(Category::If, "'if'")?;
        self.expression()?;
        self.expect(Category::Then, "'then'")?;
        self.statement()?;
        if self.check(Category::Else) {
            self.bump()?;
            self.statement()?;
        }
        self.guard()
    }

    fn while_statement(&mut self) -> Flow {
        let _span = trace_span!("while_statement").entered();

        self.expect(Category::While, "'while'")?;
        self.expression()?;
        self.expect(Category::Do, "'do'")?;
        self.statement()
    }
}
