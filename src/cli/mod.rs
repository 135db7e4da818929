//! CLI module for summit - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands to schedule an event,
//! validate an event file, and inspect talk demand.

pub mod commands;

pub use commands::Cli;
