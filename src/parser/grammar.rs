//! Lexical categories referenced by the grammar
//!
//! The catalog is data, so the parser only knows token categories by name.
//! [`Category`] is the closed set of names the grammar expects to find in the
//! catalog; any other definition the catalog declares is accepted by the lexer
//! but can never satisfy an expectation.
//!
//! ```text
//! program              ::= 'program' progname compound_statement
//! compound_statement   ::= 'begin' statement { ';' statement } 'end'
//! statement            ::= simple_statement | structured_statement
//! simple_statement     ::= assignment_statement | read_statement | write_statement
//! assignment_statement ::= variable ':=' expression
//! read_statement       ::= 'read' '(' variable { ',' variable } ')'
//! write_statement      ::= 'write' '(' expression { ',' expression } ')'
//! structured_statement ::= compound_statement | if_statement | while_statement
//! if_statement         ::= 'if' expression 'then' statement [ 'else' statement ]
//! while_statement      ::= 'while' expression 'do' statement
//! expression           ::= simple_expression [ relational_operator simple_expression ]
//! simple_expression    ::= [ adding_operator ] term { adding_operator term }
//! term                 ::= factor { multiplying_operator factor }
//! factor               ::= variable | constant | '(' expression ')'
//! variable             ::= PROGNAME_VARIABLE | VARIABLE
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Program,
    Begin,
    End,
    Read,
    Write,
    If,
    Then,
    Else,
    While,
    Do,
    AssigningOperator,
    RelationalOperator,
    AddingOperator,
    MultiplyingOperator,
    LeftParenthesis,
    RightParenthesis,
    Semicolon,
    Comma,
    Constant,
    Variable,
    ProgramName,
}

impl Category {
    /// Catalog name of this category.
    pub fn name(self) -> &'static str {
        match self {
            Category::Program => "PROGRAM",
            Category::Begin => "BEGIN",
            Category::End => "END",
            Category::Read => "READ",
            Category::Write => "WRITE",
            Category::If => "IF",
            Category::Then => "THEN",
            Category::Else => "ELSE",
            Category::While => "WHILE",
            Category::Do => "DO",
            Category::AssigningOperator => "ASSIGNING_OPERATOR",
            Category::RelationalOperator => "RELATIONAL_OPERATOR",
            Category::AddingOperator => "ADDING_OPERATOR",
            Category::MultiplyingOperator => "MULTIPLYING_OPERATOR",
            Category::LeftParenthesis => "LEFT_PARENTHESIS",
            Category::RightParenthesis => "RIGHT_PARENTHESIS",
            Category::Semicolon => "SEMICOLON",
            Category::Comma => "COMMA",
            Category::Constant => "CONSTANT",
            Category::Variable => "VARIABLE",
            Category::ProgramName => "PROGNAME_VARIABLE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `variable ::= PROGNAME_VARIABLE | VARIABLE`
pub const VARIABLE: &[Category] = &[Category::ProgramName, Category::Variable];

/// First set of `simple_statement`.
pub const SIMPLE_STATEMENT: &[Category] = &[
    Category::ProgramName,
    Category::Variable,
    Category::Read,
    Category::Write,
];

/// First set of `structured_statement`.
pub const STRUCTURED_STATEMENT: &[Category] = &[Category::Begin, Category::If, Category::While];
