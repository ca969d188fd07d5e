//! CLI command handlers for AAC Board.
//!
//! These commands manage configuration and speech without starting the
//! terminal UI, for scripting and for checking the speech setup.

pub mod common;
pub mod config;
pub mod speech;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use speech::{SayArgs, VoicesArgs};
