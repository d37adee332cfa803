//! Log output setup
//!
//! Lines start with a local `2024-05-01 12:00:00 -` timestamp, then the
//! level and the message.

use std::fmt::Write as _;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::EnvFilter;

/// Timestamp followed by the ` - ` separator
struct Timestamp(ChronoLocal);

impl FormatTime for Timestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        self.0.format_time(w)?;
        w.write_str(" -")
    }
}

/// Default filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `verbosity`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Timestamp(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string())))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
