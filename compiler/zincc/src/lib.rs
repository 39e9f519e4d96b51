//! Zinc compilation session.
//!
//! A [`Session`] owns the `Model` of one compilation, declares the standard
//! library into it, binds every builtin exactly once and hands out
//! evaluators over the result. Evaluation errors leave the session as
//! [`Diagnostic`]s.
//!
//! ```text
//! Session::new ──► declare stdlib
//!     │
//!     ▼
//! model_mut() ──► model declarations
//!     │
//!     ▼
//! register_builtins() ──► BuiltinRegistry (immutable)
//!     │
//!     ▼
//! eval() / evaluator() ──► Value | Diagnostic
//! ```
//!
//! # Debugging
//!
//! Call [`init_tracing`] once at startup, then:
//! - `RUST_LOG=zinc_eval=debug` - one event per bound builtin
//! - `RUST_LOG=zinc_eval=trace` - every identifier-chain step
//!
//! Passing `SessionConfig::log_filter` (read from `ZINC_LOG`) overrides
//! `RUST_LOG`.

mod config;
mod session;

use std::sync::Once;

pub use config::{ConfigError, SessionConfig, LOG_VAR, MAX_DEPTH_VAR};
pub use session::Session;
pub use zinc_diagnostic::Diagnostic;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber. Safe to call more than once.
///
/// `filter` overrides `RUST_LOG`; with neither, nothing is installed.
pub fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = match filter {
            Some(directives) => EnvFilter::new(directives),
            None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            None => return,
        };
        let layer = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true);
        // Another subscriber may already be installed by the embedding tool.
        let _ = tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .try_init();
    });
}
