//! Logging initialization using the `tracing` ecosystem.
//!
//! Installs one global subscriber with two outputs:
//! - console output (human-readable, colored)
//! - the session log file, appended to without ANSI codes
//!
//! The level comes from `RUST_LOG` when set, otherwise from the explicit
//! parameter. Operator messages stay at `info` whatever the level.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::sink::MESSAGE_TARGET;

/// Add the always-on directive for operator messages to `filter`.
///
/// # Errors
/// Fails only if the message target does not parse as a directive.
pub fn with_operator_messages(filter: EnvFilter) -> Result<EnvFilter> {
    let directive = format!("{MESSAGE_TARGET}=info")
        .parse()
        .context("invalid operator message directive")?;
    Ok(filter.add_directive(directive))
}

/// Initialize the global tracing subscriber.
///
/// Must be called once at program start, before any message is emitted.
///
/// # Errors
/// Fails if `log_file` has no file name, cannot be opened, or a global
/// subscriber is already installed.
pub fn init_logging(log_level: &str, log_file: &Path) -> Result<()> {
    let env_filter = with_operator_messages(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
    )?;

    let dir = log_file.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("log path {} has no file name", log_file.display()))?;
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("failed to open session log {}", log_file.display()))?;

    let console_layer = fmt::layer().with_target(false).with_ansi(true);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::{info, warn};

    use super::*;
    use crate::adapters::logging::TracingSink;
    use crate::ports::MessageSink;

    /// Writer appending into a shared buffer.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn output(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_with(filter: EnvFilter, emit: impl FnOnce()) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_writer(move || writer.clone())
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, emit);
        capture.output()
    }

    #[test]
    fn test_operator_messages_survive_warn_level() {
        let filter = with_operator_messages(EnvFilter::new("warn")).unwrap();
        let output = capture_with(filter, || {
            TracingSink.emit("Submitted buy order for NEWCOIN-USD");
            info!("diagnostic detail");
            warn!("diagnostic warning");
        });

        assert!(output.contains("Submitted buy order for NEWCOIN-USD"));
        assert!(output.contains("diagnostic warning"));
        assert!(!output.contains("diagnostic detail"));
    }

    #[test]
    fn test_operator_messages_survive_off() {
        let filter = with_operator_messages(EnvFilter::new("off")).unwrap();
        let output = capture_with(filter, || TracingSink.emit("Set up Coinbase Pro API"));
        assert!(output.contains("Set up Coinbase Pro API"));
    }
}
