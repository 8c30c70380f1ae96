//! Party Registry Command-Line Interface
//!
//! Stands in for the UI collaborator: every command goes through the same
//! form validation and registry operations a screen would use.
//!
//! # Modules
//!
//! - `config`: environment-driven configuration
//! - `commands`: argument parsing and command execution

pub mod config;
pub mod commands;

pub use config::RegistryConfig;
pub use commands::{Command, CommandError, execute};
