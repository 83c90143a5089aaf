//! Logging setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application. Events go to stderr so that JSON written to stdout
//! stays machine-readable.

mod logging;

pub use logging::{filter_directive, init_logging, LOG_ENV_VAR};
