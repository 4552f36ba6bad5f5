//! `MessageSink` backed by `tracing`.

use tracing::info;

use crate::ports::message_sink::MessageSink;

/// Target used for operator-facing messages. The subscriber keeps it at
/// `info` regardless of the diagnostic level.
pub const MESSAGE_TARGET: &str = "listing_sniper::messages";

/// Emits every message as an `info` event, which the installed
/// subscriber writes to both stdout and the session log file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn emit(&self, message: &str) {
        info!(target: MESSAGE_TARGET, "{message}");
    }
}
