//! Minimal `log` backend for the binaries.
//!
//! Records go to stderr as `LEVEL [target] message`; stdout is reserved for
//! rendered boards and JSON summaries. The level comes from `POLYFLEET_LOG`.
#![cfg(feature = "std")]

use log::{LevelFilter, Log, Metadata, Record};
use std::env;

/// Environment variable holding the maximum level, e.g. `debug`.
pub const LOG_ENV: &str = "POLYFLEET_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Level named by `value`, falling back to `info` when absent or unparsable.
fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger at the level named by `POLYFLEET_LOG`.
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(level_from(None), LevelFilter::Info);
        assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(level_from(Some("off")), LevelFilter::Off);
        assert_eq!(level_from(Some("chatty")), LevelFilter::Info);
    }
}
