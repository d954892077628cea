//! Error handling for descriptor loading
//!
//! Every failure a descriptor can produce, from file I/O to a malformed
//! credential. Messages never carry secret material.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// serde quotes offending values, e.g. `invalid type: string "..."`
static QUOTED_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("quoted value pattern is valid")
});

/// Mask every quoted literal in a parser message
fn scrub_quoted(message: &str) -> String {
    QUOTED_VALUE.replace_all(message, "\"***\"").into_owned()
}

/// Result type alias for descriptor operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error types for loading and validating a configuration descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O errors
    Io(String),
    /// TOML/JSON syntax or shape errors
    Parse(String),
    /// File extension we don't know how to read
    UnsupportedFormat(String),
    /// A `${VAR}` reference with no value in the environment
    MissingEnvVar { var: String, field: String },
    /// Compiler version is not a semantic version
    InvalidCompilerVersion(String),
    /// Optimizer enabled with zero runs
    InvalidOptimizerRuns,
    /// Network endpoint is not a usable URI
    InvalidEndpoint { network: String, reason: String },
    /// Network profile declares no signing credentials
    EmptyCredentials(String),
    /// Credential could not be parsed as a private key
    InvalidCredential {
        network: String,
        index: usize,
        reason: String,
    },
    /// Credential written in plaintext instead of an env reference
    PlaintextSecret { network: String, index: usize },
    /// Same profile name declared twice
    DuplicateNetwork(String),
    /// Profile name that is empty or blank
    InvalidNetworkName(String),
    /// Lookup of a profile that doesn't exist
    UnknownNetwork(String),
    /// No explicit, configured or default network to fall back on
    NoNetworkSelected,
    /// Chain id of zero
    InvalidChainId(String),
    /// Empty or repeated plugin identifier
    InvalidPlugin(String),
    /// Serialization errors when rendering a descriptor
    Serialization(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported descriptor format: {ext} (expected .toml or .json)")
            }
            ConfigError::MissingEnvVar { var, field } => {
                write!(f, "Environment variable {var} referenced by {field} is not set")
            }
            ConfigError::InvalidCompilerVersion(version) => {
                write!(f, "Invalid compiler version: {version}")
            }
            ConfigError::InvalidOptimizerRuns => {
                write!(f, "Optimizer runs must be positive when the optimizer is enabled")
            }
            ConfigError::InvalidEndpoint { network, reason } => {
                write!(f, "Invalid endpoint for network {network}: {reason}")
            }
            ConfigError::EmptyCredentials(network) => {
                write!(f, "Network {network} has no accounts")
            }
            ConfigError::InvalidCredential {
                network,
                index,
                reason,
            } => {
                write!(
                    f,
                    "Invalid credential #{index} for network {network}: {reason}"
                )
            }
            ConfigError::PlaintextSecret { network, index } => {
                write!(
                    f,
                    "Credential #{index} for network {network} is written in plaintext; \
                     reference an environment variable such as ${{PRIVATE_KEY}} instead"
                )
            }
            ConfigError::DuplicateNetwork(name) => write!(f, "Duplicate network: {name}"),
            ConfigError::InvalidNetworkName(name) => {
                write!(f, "Invalid network name: {name:?} (names must not be blank)")
            }
            ConfigError::UnknownNetwork(name) => write!(f, "Unknown network: {name}"),
            ConfigError::NoNetworkSelected => write!(
                f,
                "No network selected; pass one, set DEPLOY_NETWORK, or set default_network"
            ),
            ConfigError::InvalidChainId(network) => {
                write!(f, "Chain id for network {network} must be positive")
            }
            ConfigError::InvalidPlugin(msg) => write!(f, "Invalid plugin: {msg}"),
            ConfigError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl ConfigError {
    /// Build a `Parse` error from a TOML failure without echoing the
    /// offending source line; only the message and its position survive.
    pub fn from_toml(err: &toml::de::Error, source: &str) -> Self {
        let message = scrub_quoted(err.message().trim());
        let position = err.span().and_then(|span| source.get(..span.start)).map(|before| {
            let line = before.matches('\n').count() + 1;
            let column = before
                .rsplit('\n')
                .next()
                .map(|tail| tail.chars().count())
                .unwrap_or(0)
                + 1;
            (line, column)
        });
        match position {
            Some((line, column)) => {
                ConfigError::Parse(format!("{message} at line {line}, column {column}"))
            }
            None => ConfigError::Parse(message),
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            ConfigError::Io(err.to_string())
        } else if err.is_syntax() || err.is_data() || err.is_eof() {
            ConfigError::Parse(scrub_quoted(&err.to_string()))
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}
