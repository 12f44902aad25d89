//! TUI pane rendering modules
//!
//! - [`source`]: Annotated source with line numbers and the selected line
//! - [`diagnostics`]: Diagnostic list with the current selection
//! - [`status`]: Status bar with keybindings and the run verdict
//!
//! Each pane module exports a primary `render_*` function that draws from
//! borrowed data and updates only the scroll state it is handed.

pub mod diagnostics;
pub mod source;
pub mod status;

pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, SourceView};
pub use status::render_status_bar;
