//! # Introduction
//!
//! tinypas checks programs written in a small Pascal-like teaching language.
//! Tokens are not hard-coded: they come from a catalog file of named regular
//! expressions, tried in priority order. The checker recognizes the program
//! without building a tree and reports every lexical and syntax problem with
//! its line and column range.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog → Lexer → Parser → DiagnosticLog → Report / Viewer
//! ```
//!
//! 1. [`parser`]: loads the token catalog, lexes lazily, and recognizes the
//!    grammar by recursive descent.
//! 2. [`diagnostics`]: the ordered diagnostic log and the source annotator.
//! 3. [`driver`]: runs one file end to end and prints the report through
//!    [`report::Console`].
//! 4. [`ui`]: ratatui-based viewer for a finished run; not part of the stable
//!    library API.
//!
//! ## Example
//!
//! ```text
//! program demo
//! begin
//!     read(a_, b_);
//!     while a_ <> 0 do begin a_ := a_ - 1; write(a_ * b_) end
//! end
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod logging;
pub mod parser;
pub mod report;
pub mod ui;
