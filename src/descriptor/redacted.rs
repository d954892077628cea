use super::compiler::CompilerSettings;
use super::descriptor::ConfigurationDescriptor;
use crate::secrets::redact_endpoint;
use serde::Serialize;
use std::collections::BTreeMap;

/// Display-safe view: credentials become addresses, endpoints are masked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactedDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_network: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    pub compiler: CompilerSettings,
    pub networks: BTreeMap<String, RedactedNetwork>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactedNetwork {
    pub url: String,
    pub accounts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl ConfigurationDescriptor {
    pub fn redacted(&self) -> RedactedDescriptor {
        let networks = self
            .networks()
            .iter()
            .map(|(name, profile)| {
                let network = RedactedNetwork {
                    url: redact_endpoint(profile.url()),
                    accounts: profile
                        .accounts()
                        .iter()
                        .map(|credential| credential.address().to_string())
                        .collect(),
                    chain_id: profile.chain_id(),
                };
                (name.to_string(), network)
            })
            .collect();

        RedactedDescriptor {
            default_network: self.default_network().map(str::to_string),
            plugins: self.plugins().to_vec(),
            compiler: self.compiler().clone(),
            networks,
        }
    }
}
