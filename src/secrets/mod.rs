//! Signing credentials and secret hygiene
//!
//! Credentials are private keys. They live in zeroize-on-drop wrappers,
//! print as account addresses, and are expected to arrive through
//! environment variables rather than being written into the descriptor.

pub mod credential;
pub mod redact;

pub use credential::{to_checksum_address, CredentialFormatError, SigningCredential};
pub use redact::{embeds_api_key, redact_endpoint};

use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with a credential written directly into the descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecretPolicy {
    /// Reject the descriptor
    #[default]
    Deny,
    /// Accept it and record a warning
    Warn,
}

/// Secret-hygiene findings that did not stop the descriptor from loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretWarning {
    PlaintextCredential { network: String, index: usize },
    EmbeddedApiKey { network: String },
}

impl fmt::Display for SecretWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretWarning::PlaintextCredential { network, index } => write!(
                f,
                "network {network}: credential #{index} is stored in plaintext"
            ),
            SecretWarning::EmbeddedApiKey { network } => write!(
                f,
                "network {network}: endpoint appears to embed an API key"
            ),
        }
    }
}
