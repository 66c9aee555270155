//! Logging initialization.
//!
//! All diagnostics go to stderr so hook output stays readable:
//! - `CCOCO_LOG`: an `EnvFilter` directive (default `info`, or `debug`
//!   with `--verbose`), e.g. `CCOCO_LOG=ccoco=trace`.
//! - `CCOCO_LOG_FORMAT=json`: JSON events instead of human-readable lines.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

pub const LOG_ENV: &str = "CCOCO_LOG";
pub const FORMAT_ENV: &str = "CCOCO_LOG_FORMAT";

pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let json = std::env::var(FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
