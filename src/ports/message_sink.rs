//! Message Sink Port - Operator-facing Output
//!
//! Every human-readable line the bot produces (startup banners, new
//! listings, trade decisions, recovered errors) goes through one sink so
//! it can be printed and persisted together, and captured in tests.

/// Destination for operator-facing messages.
pub trait MessageSink: Send + Sync + 'static {
  /// Emit one complete message.
  fn emit(&self, message: &str);
}
