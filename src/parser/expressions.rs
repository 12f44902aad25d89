//! Expression productions
//!
//! ```text
//! expression        ::= simple_expression [ relational_operator simple_expression ]
//! simple_expression ::= [ adding_operator ] term { adding_operator term }
//! term              ::= factor { multiplying_operator factor }
//! factor            ::= variable | constant | '(' expression ')'
//! ```
//!
//! Operator precedence is encoded by the nesting of the productions alone;
//! there is no tree to attach it to.

use super::grammar::{Category, VARIABLE};
use super::parse::{Flow, Parser};
use std::io::BufRead;
use tracing::trace_span;

impl<R: BufRead> Parser<'_, '_, R> {
    pub(crate) fn expression(&mut self) -> Flow {
        let _span = trace_span!("expression").entered();

        self.simple_expression()?;
        if self.check(Category::RelationalOperator) {
            self.bump()?;
            self.simple_expression()?;
        }
        self.guard()
    }

    fn simple_expression(&mut self) -> Flow {
        let _span = trace_span!("simple_expression").entered();

        // Optional sign
        if self.check(Category::AddingOperator) {
            self.bump()?;
        }
        self.term()?;
        while self.check(Category::AddingOperator) {
            self.bump()?;
            self.term()?;
        }
        self.guard()
    }

    fn term(&mut self) -> Flow {
        let _span = trace_span!("term").entered();

        self.factor()?;
        while self.check(Category::MultiplyingOperator) {
            self.bump()?;
            self.factor()?;
        }
        self.guard()
    }

    fn factor(&mut self) -> Flow {
        let _span = trace_span!("factor").entered();

        if self.check_any(VARIABLE) || self.check(Category::Constant) {
            self.advance();
        } else if self.check(Category::LeftParenthesis) {
            self.bump()?;
            self.expression()?;
            self.consume(&[Category::RightParenthesis], "')'");
        } else {
            self.syntax_error("<variable>, <constant>, or ( <expression> )");
        }
        self.guard()
    }
}
