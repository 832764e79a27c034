//! Tracing configuration.
//!
//! The subscriber is only initialised when `JSDTS_LOG` (or `RUST_LOG`) is
//! set, so there is zero overhead in normal runs. Values use the standard
//! `RUST_LOG` syntax (e.g. `debug`, `jsdts::resolver=trace`). All output goes
//! to stderr so it never interferes with the `console` destination on stdout.

use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `JSDTS_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("JSDTS_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `JSDTS_LOG` nor `RUST_LOG` is set.
pub fn init_tracing() {
    let has_jsdts_log = std::env::var("JSDTS_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_jsdts_log && !has_rust_log {
        return;
    }

    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .try_init();
    // A second init (tests, embedding hosts) is not an error worth surfacing.
    let _ = result;
}
