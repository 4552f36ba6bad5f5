//! Logging Adapter - Console + Session File Output
//!
//! - `session`: allocates this run's `logger_<n>.txt`
//! - `subscriber`: installs the tracing subscriber writing to it
//! - `sink`: the `MessageSink` used for operator-facing messages

pub mod session;
pub mod sink;
pub mod subscriber;

pub use session::{next_session_index, session_log_path};
pub use sink::TracingSink;
pub use subscriber::{init_logging, with_operator_messages};
