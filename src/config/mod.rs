//! Runtime settings
//!
//! Process-level knobs that sit around the descriptor: where to find it,
//! which network to act on, and how strictly to treat plaintext secrets.
//! Read from environment variables, overridden by CLI flags.

pub mod settings;

pub use settings::{Settings, GLOBAL_SETTINGS};
