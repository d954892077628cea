//! Command-line interface
//!
//! This module contains the CLI commands and argument parsing
//! for inspecting and validating a descriptor.

pub mod commands;

pub use commands::{Command, Opt, OutputFormatArg};
