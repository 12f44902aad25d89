//! User-facing output of a run
//!
//! [`Console`] is a shared handle on the output stream. The driver writes the
//! report through it, and the diagnostic log holds a clone so each diagnostic
//! is printed the moment it is recorded.

pub mod style;

pub use style::{Palette, Role};

use crate::diagnostics::DiagnosticLog;
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

pub const SUCCESS_PARSE: &str = "SUCCESS - completed parsing with no errors";
pub const SUCCESS_LEX: &str = "SUCCESS - completed lexing with no errors";

pub fn tab_warning(tab_size: usize) -> String {
    format!(
        "WARNING - detect usage of tab(s), column location might be off since a tab \
         is currently counted as {} space(s) (see --tab-size)",
        tab_size
    )
}

pub fn surplus_definitions_warning(declared: usize) -> String {
    format!(
        "WARNING - detect more than {} token definition(s). Please update the header \
         so new definition(s) can be loaded.",
        declared
    )
}

/// Shared, styled output stream.
pub struct Console<W> {
    out: Rc<RefCell<W>>,
    palette: Palette,
}

impl<W> Clone for Console<W> {
    fn clone(&self) -> Self {
        Self {
            out: Rc::clone(&self.out),
            palette: self.palette,
        }
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self {
            out: Rc::new(RefCell::new(out)),
            palette,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Write `text` painted as `role`, followed by a newline.
    pub fn line(&self, role: Role, text: impl Display) -> io::Result<()> {
        writeln!(self.out.borrow_mut(), "{}", self.palette.paint(role, text))
    }

    /// Write `text` verbatim.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        self.out.borrow_mut().write_all(text.as_bytes())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out.borrow_mut().flush()
    }
}

impl<W: Write + 'static> Console<W> {
    /// A diagnostic log that prints every diagnostic to this console in error style.
    pub fn reporting_log(&self) -> DiagnosticLog {
        let console = self.clone();
        DiagnosticLog::with_reporter(move |diagnostic| {
            // Reporting is best effort; the diagnostic stays in the log either way
            let _ = console.line(Role::Error, diagnostic);
        })
    }
}

impl Console<Vec<u8>> {
    /// Everything written so far, for inspection in tests.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out.borrow()).into_owned()
    }
}
