//! Stderr logger for the frame loop.
//!
//! Lines look like `[  1.234s  WARN frame] message`: the `tote_vision*`
//! crate prefix is dropped from the target. Records from other crates are
//! held to `warn` whatever the configured level, so a debug run shows the
//! frame loop and not its dependencies. Install once at startup with
//! [`init_with_level`].

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const OWN_PREFIX: &str = "tote_vision";

struct FrameLogger {
    level: LevelFilter,
    started: Instant,
}

fn is_own_target(target: &str) -> bool {
    target.starts_with(OWN_PREFIX)
}

/// `tote_vision_detector::frame` -> `frame`; foreign targets unchanged.
fn short_target(target: &str) -> &str {
    if !is_own_target(target) {
        return target;
    }
    match target.split_once("::") {
        Some((_, rest)) => rest,
        None => target,
    }
}

fn format_line(elapsed: f64, level: Level, target: &str, args: &std::fmt::Arguments) -> String {
    format!("[{elapsed:7.3}s {level:>5} {}] {args}", short_target(target))
}

impl Log for FrameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let ceiling = if is_own_target(metadata.target()) {
            self.level
        } else {
            self.level.min(LevelFilter::Warn)
        };
        metadata.level() <= ceiling
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<FrameLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Repeated calls after the first successful one are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| FrameLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(level: LevelFilter) -> FrameLogger {
        FrameLogger {
            level,
            started: Instant::now(),
        }
    }

    fn meta(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn foreign_targets_capped_at_warn() {
        let l = logger(LevelFilter::Debug);
        assert!(l.enabled(&meta(Level::Debug, "tote_vision_detector::select")));
        assert!(!l.enabled(&meta(Level::Info, "serde_json")));
        assert!(l.enabled(&meta(Level::Warn, "serde_json")));
    }

    #[test]
    fn configured_level_applies_to_own_records() {
        let l = logger(LevelFilter::Info);
        assert!(l.enabled(&meta(Level::Info, "tote_vision::replay")));
        assert!(!l.enabled(&meta(Level::Debug, "tote_vision::replay")));
    }

    #[test]
    fn line_uses_short_target() {
        let line = format_line(
            1.5,
            Level::Warn,
            "tote_vision_detector::frame",
            &format_args!("frame skipped"),
        );
        assert_eq!(line, "[  1.500s  WARN frame] frame skipped");
        assert_eq!(short_target("tote_vision"), "tote_vision");
        assert_eq!(short_target("other::module"), "other::module");
    }
}
