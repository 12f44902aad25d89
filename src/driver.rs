//! One run of the checker: load the catalog, scan or parse the input, report.
//!
//! Fatal problems (the catalog or the input cannot be read) come back as a
//! [`DriverError`] before any tokenization begins. Everything else ends up in
//! the [`DiagnosticLog`] of the returned [`Outcome`] and the run completes.

use crate::config::Settings;
use crate::diagnostics::annotate::annotate;
use crate::diagnostics::DiagnosticLog;
use crate::parser::catalog::{Catalog, LoadError};
use crate::parser::lexer::Scanner;
use crate::parser::parse::Parser;
use crate::report::{self, Console, Role};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot load token definitions: {0}")]
    Catalog(#[from] LoadError),

    #[error("cannot open file: {}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report: {0}")]
    Io(#[from] io::Error),
}

impl DriverError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Catalog(_) => 2,
            DriverError::Input { .. } | DriverError::Io(_) => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Recognize a whole program
    #[default]
    Parse,
    /// Only tokenize, printing each lexeme
    LexOnly,
}

#[derive(Debug)]
pub struct Outcome {
    pub log: DiagnosticLog,
    /// Whether the input contained a tab character
    pub saw_tab: bool,
    /// Lexemes printed in lex-only mode
    pub lexemes: usize,
}

impl Outcome {
    /// True when no diagnostic of any kind was recorded.
    pub fn accepted(&self) -> bool {
        self.log.is_empty()
    }
}

/// Load the catalog named by `settings`, warning on `console` about surplus definitions.
pub fn load_catalog<W: Write>(
    settings: &Settings,
    console: &Console<W>,
) -> Result<Catalog, DriverError> {
    let catalog = Catalog::load(&settings.token_definitions)?;
    if catalog.ignored_definitions() > 0 {
        console.line(Role::Warning, report::surplus_definitions_warning(catalog.len()))?;
    }
    Ok(catalog)
}

/// Read the input as text; invalid UTF-8 is replaced the same way the lexer does.
pub fn read_source(input: &Path) -> Result<String, DriverError> {
    let bytes = fs::read(input).map_err(|source| DriverError::Input {
        path: input.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Run the whole pipeline on `input` and print the report to `console`.
pub fn run<W: Write + 'static>(
    settings: &Settings,
    input: &Path,
    mode: Mode,
    console: &Console<W>,
) -> Result<Outcome, DriverError> {
    let outcome = check(settings, input, mode, console)?;
    print_report(settings, input, mode, &outcome, console)?;
    Ok(outcome)
}

/// Scan or parse `input`, printing diagnostics (and lexemes) as they are found.
pub fn check<W: Write + 'static>(
    settings: &Settings,
    input: &Path,
    mode: Mode,
    console: &Console<W>,
) -> Result<Outcome, DriverError> {
    let catalog = load_catalog(settings, console)?;
    let file = File::open(input).map_err(|source| DriverError::Input {
        path: input.to_path_buf(),
        source,
    })?;
    info!(path = %input.display(), ?mode, "processing file");

    let mut log = console.reporting_log();
    let scanner = Scanner::new(&catalog, BufReader::new(file), settings);

    let (saw_tab, lexemes) = match mode {
        Mode::Parse => {
            let mut parser = Parser::new(scanner, &mut log);
            parser.parse_program();
            (parser.into_scanner().saw_tab(), 0)
        }
        Mode::LexOnly => {
            let mut scanner = scanner;
            let mut count = 0;
            while let Some(lexeme) = scanner.next(&mut log) {
                console.line(Role::Plain, &lexeme)?;
                count += 1;
            }
            (scanner.saw_tab(), count)
        }
    };
    debug!(diagnostics = log.len(), saw_tab, "run complete");

    Ok(Outcome {
        log,
        saw_tab,
        lexemes,
    })
}

/// Tab warning, then either the success line or the annotated source.
pub fn print_report<W: Write>(
    settings: &Settings,
    input: &Path,
    mode: Mode,
    outcome: &Outcome,
    console: &Console<W>,
) -> Result<(), DriverError> {
    if outcome.accepted() {
        if settings.success_message {
            let message = match mode {
                Mode::Parse => report::SUCCESS_PARSE,
                Mode::LexOnly => report::SUCCESS_LEX,
            };
            console.line(Role::Success, message)?;
        }
        console.flush()?;
        return Ok(());
    }

    if outcome.saw_tab && settings.tab_warning {
        console.line(Role::Warning, report::tab_warning(settings.tab_size))?;
    }

    if settings.show_source {
        let source = read_source(input)?;
        let annotation = annotate(&source, &outcome.log, settings.tab_size);
        let palette = console.palette();

        console.line(Role::Muted, input.display())?;
        console.write_str(&annotation.render(|marked| palette.paint(Role::Highlight, marked)))?;
        console.write_str("\n")?;
    }
    console.flush()?;
    Ok(())
}
