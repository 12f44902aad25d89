//! Tracing setup for debugging the lexer and parser.
//!
//! ```bash
//! # Catalog loading and end of input
//! TINYPAS_LOG=debug tinypas program.txt
//!
//! # Every line read and lexeme identified
//! TINYPAS_LOG=tinypas::parser::lexer=trace tinypas program.txt
//!
//! # Enter/exit of each grammar production
//! TINYPAS_LOG=trace TINYPAS_LOG_SPANS=1 tinypas program.txt
//! ```
//!
//! The subscriber is only initialised when `TINYPAS_LOG` (or `RUST_LOG`) is
//! set. Output goes to stderr and never mixes with the report on stdout.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `TINYPAS_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("TINYPAS_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Span lifecycle events to print, from `TINYPAS_LOG_SPANS`.
fn span_events() -> FmtSpan {
    match std::env::var("TINYPAS_LOG_SPANS").as_deref() {
        Ok("1") | Ok("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `TINYPAS_LOG` nor `RUST_LOG` is set.
pub fn init() {
    let has_own_log = std::env::var("TINYPAS_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_own_log && !has_rust_log {
        return;
    }

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_span_events(span_events())
        .with_writer(std::io::stderr)
        .try_init();
}
