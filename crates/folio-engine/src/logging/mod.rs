//! Logging setup.
//!
//! Everything logs through the `log` facade; this module installs
//! `env_logger` behind it exactly once.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
