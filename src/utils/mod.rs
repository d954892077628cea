//! Utility functions and helpers
//!
//! Text rendering shared by the CLI and library callers.

pub mod serialization;

pub use serialization::{to_json_pretty, to_toml};
