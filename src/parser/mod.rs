//! Lexer and recognizer for the language
//!
//! This module turns source text into a verdict plus diagnostics:
//! - [`catalog`]: Token definitions loaded from a file (name + regex, in priority order)
//! - [`lexer`]: Lexing (source text → lexemes), driven by the catalog
//! - [`parse`]: Parser struct and shared lookahead helpers
//! - [`statements`] / [`expressions`]: the grammar productions
//! - [`grammar`]: token categories the productions test against
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent recognizer with one lexeme of lookahead.
//! Lexing is lazy: the parser pulls lexemes on demand and the lexer reads
//! input one line at a time. No syntax tree is produced.

pub mod catalog;
pub mod expressions;
pub mod grammar;
pub mod lexer;
pub mod parse;
pub mod statements;
