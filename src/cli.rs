//! CLI argument parsing using clap

use crate::config::{
    Settings, MAX_LEXEME_LENGTH, MAX_LINE_LENGTH, TAB_SIZE, TOKEN_DEFINITION_FILE,
};
use crate::driver::Mode;
use clap::Parser;
use std::path::PathBuf;

/// Check a program against the grammar, with tokens defined by a regex catalog.
#[derive(Parser, Debug, Clone)]
#[command(name = "tinypas")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Program to check
    pub input: PathBuf,

    /// Token definition file
    #[arg(short = 't', long = "tokens", default_value = TOKEN_DEFINITION_FILE)]
    pub tokens: PathBuf,

    /// Columns a tab advances by
    #[arg(long, default_value_t = TAB_SIZE, value_parser = at_least_one)]
    pub tab_size: usize,

    /// Longest lexeme accepted
    #[arg(long, default_value_t = MAX_LEXEME_LENGTH)]
    pub max_lexeme_length: usize,

    /// Longest physical line read in full; the rest of a longer line is dropped
    #[arg(long, default_value_t = MAX_LINE_LENGTH)]
    pub max_line_length: usize,

    /// Disable colors
    #[arg(long)]
    pub monochrome: bool,

    /// Do not print the annotated source after errors
    #[arg(long)]
    pub no_source: bool,

    /// Do not warn about tabs when errors were found
    #[arg(long)]
    pub no_tab_warning: bool,

    /// Only tokenize the input and print every lexeme
    #[arg(long, conflicts_with = "view")]
    pub lex_only: bool,

    /// Browse the result in an interactive terminal viewer
    #[arg(long)]
    pub view: bool,
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings {
            tab_size: self.tab_size,
            max_line_length: self.max_line_length,
            max_lexeme_length: self.max_lexeme_length,
            token_definitions: self.tokens.clone(),
            color: !self.monochrome,
            show_source: !self.no_source,
            tab_warning: !self.no_tab_warning,
            success_message: true,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.lex_only {
            Mode::LexOnly
        } else {
            Mode::Parse
        }
    }
}

fn at_least_one(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["tinypas", "prog.txt"]);
        assert_eq!(args.input, PathBuf::from("prog.txt"));
        assert_eq!(args.settings(), Settings::default());
        assert_eq!(args.mode(), Mode::Parse);
    }

    #[test]
    fn test_flags_map_onto_settings() {
        let args = Args::parse_from([
            "tinypas",
            "-t",
            "defs.txt",
            "--tab-size",
            "4",
            "--monochrome",
            "--no-source",
            "--no-tab-warning",
            "--lex-only",
            "prog.txt",
        ]);
        let settings = args.settings();
        assert_eq!(settings.token_definitions, PathBuf::from("defs.txt"));
        assert_eq!(settings.tab_size, 4);
        assert!(!settings.color);
        assert!(!settings.show_source);
        assert!(!settings.tab_warning);
        assert_eq!(args.mode(), Mode::LexOnly);
    }

    #[test]
    fn test_zero_tab_size_rejected() {
        assert!(Args::try_parse_from(["tinypas", "--tab-size", "0", "p.txt"]).is_err());
        let args = Args::try_parse_from(["tinypas", "--tab-size", "1", "p.txt"]).unwrap();
        assert_eq!(args.settings().tab_size, 1);
    }

    #[test]
    fn test_lex_only_conflicts_with_view() {
        assert!(Args::try_parse_from(["tinypas", "--lex-only", "--view", "p.txt"]).is_err());
    }
}
