//! # Deploy Descriptor - Typed Configuration for My Contract Toolchain
//!
//! This crate is the configuration layer I put in front of my contract
//! compile/deploy pipeline. When I come back to this code, here's what I
//! need to remember:
//!
//! ## What It Does
//! - **Compiler Selection**: semantic compiler version plus optimizer settings
//! - **Network Profiles**: named RPC endpoints, each with its signing keys
//! - **Secret Hygiene**: keys come from `${ENV_VARS}`, are zeroed on drop,
//!   and only ever print as account addresses
//! - **Validation**: every shape rule is checked once at load, so callers
//!   only ever see a valid descriptor
//!
//! ## How I Organized My Code
//! - `descriptor/`: data model, loading (TOML/JSON), interpolation, validation
//! - `secrets/`: signing credentials, endpoint redaction, plaintext policy
//! - `config/`: runtime settings from the environment
//! - `utils/`: rendering helpers
//! - `cli/`: command-line interface
//!
//! ## What It Does NOT Do
//! Compiling, signing, RPC and deployment belong to the toolchain that
//! consumes the descriptor. Nothing here talks to a network.

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod secrets;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt, OutputFormatArg};
pub use config::{Settings, GLOBAL_SETTINGS};
pub use descriptor::{
    CompilerSettings, ConfigurationDescriptor, DescriptorBuilder, DescriptorFormat, EnvSource,
    LoadOptions, NetworkProfile, NetworkProfiles, NetworkSigner, OptimizerSettings, ProcessEnv,
    RedactedDescriptor,
};
pub use error::{ConfigError, Result};
pub use secrets::{redact_endpoint, SecretPolicy, SecretWarning, SigningCredential};
pub use utils::{to_json_pretty, to_toml};
