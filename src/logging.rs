//! Structured logging for the resolver core.
//!
//! This crate only emits `tracing` events at registry mutations and
//! resolution steps (file registered, export-chain hop, cycle detected,
//! member lookup failed). It does not install a global subscriber —
//! embedding binaries own that decision. `init_for_embedder` is provided as
//! a convenience for binaries that want the same compact formatting this
//! crate's own tests use.

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Install a compact, `RUST_LOG`-aware subscriber. Safe to call more than
/// once — only the first call takes effect.
///
/// `default_filter` is used when `RUST_LOG` is unset, e.g. `"warn"` for a
/// quiet embedding binary or `"refresolve=debug"` during development.
pub fn init_for_embedder(default_filter: &str) {
    let default_filter = default_filter.to_owned();
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(default_filter)
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}
