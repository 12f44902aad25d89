//! Runtime settings
//!
//! Every limit and output toggle lives here with its default value. The CLI
//! overrides individual fields; library users construct [`Settings`] directly.

use std::path::PathBuf;

/// Columns a tab advances by.
pub const TAB_SIZE: usize = 8;

/// Longest physical line, including its terminator, the lexer reads in full.
pub const MAX_LINE_LENGTH: usize = 1000;

/// Longest lexeme the lexer accepts.
pub const MAX_LEXEME_LENGTH: usize = 100;

/// Catalog file looked up when none is given.
pub const TOKEN_DEFINITION_FILE: &str = "token_definition.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tab_size: usize,
    pub max_line_length: usize,
    pub max_lexeme_length: usize,

    /// Catalog resource to load
    pub token_definitions: PathBuf,

    /// Emit ANSI colors; monochrome output when false
    pub color: bool,
    /// Print the annotated source after a run with diagnostics
    pub show_source: bool,
    /// Warn that tab expansion may skew columns
    pub tab_warning: bool,
    /// Print a success line when no diagnostics were recorded
    pub success_message: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_size: TAB_SIZE,
            max_line_length: MAX_LINE_LENGTH,
            max_lexeme_length: MAX_LEXEME_LENGTH,
            token_definitions: PathBuf::from(TOKEN_DEFINITION_FILE),
            color: true,
            show_source: true,
            tab_warning: true,
            success_message: true,
        }
    }
}

impl Settings {
    /// Settings with every decoration turned off, for tests and piping.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    /// Number of characters of a physical line the lexer keeps.
    pub fn line_capacity(&self) -> usize {
        self.max_line_length.saturating_sub(1)
    }
}
