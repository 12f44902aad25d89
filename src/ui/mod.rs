//! Terminal viewer for a finished run, built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: viewer state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (annotated
//!   source, diagnostic list, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it from the source text
//! and the run's [`DiagnosticLog`] and call [`App::run`] to start the event loop.
//!
//! [`DiagnosticLog`]: crate::diagnostics::DiagnosticLog
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
