//! @dose
//! purpose: Tracing subscriber setup for the CLI. Diagnostics go to stderr so stdout carries
//!     only rendered output.
//!
//! when-editing:
//!     - !APIVIEW_LOG wins over RUST_LOG; --verbose only applies when neither is set
//!
//! invariants:
//!     - init_logging is safe to call more than once; later calls are ignored
//!
//! gotchas:
//!     - Filter values use RUST_LOG syntax, e.g. `apiview_ts::parser=debug`

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "APIVIEW_LOG";

/// Pick the filter: APIVIEW_LOG, then RUST_LOG, then the verbosity default
pub fn build_filter(verbose: bool) -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        return EnvFilter::builder().parse_lossy(val);
    }
    if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(default_directive(verbose))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
