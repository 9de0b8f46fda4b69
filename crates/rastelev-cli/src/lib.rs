//! # rastelev-cli
//!
//! Library side of the `rastelev` command: properties file handling and the
//! subcommand implementations, kept out of `main.rs` so they can be tested.

pub mod commands;
pub mod config;
mod error;

pub use error::{CliError, Result};
