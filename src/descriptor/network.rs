use crate::error::{ConfigError, Result};
use crate::secrets::SigningCredential;
use std::collections::BTreeMap;
use url::Url;

const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

pub(crate) fn validate_network_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidNetworkName(name.to_string()));
    }
    Ok(())
}

/// Scheme and host rules for an RPC endpoint
pub(crate) fn validate_endpoint(name: &str, url: &Url) -> Result<()> {
    let scheme = url.scheme();
    if !SUPPORTED_SCHEMES.contains(&scheme) {
        return Err(ConfigError::InvalidEndpoint {
            network: name.to_string(),
            reason: format!("unsupported scheme {scheme}"),
        });
    }
    if url.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(ConfigError::InvalidEndpoint {
            network: name.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

/// A named RPC endpoint and the keys used to sign for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    url: Url,
    accounts: Vec<SigningCredential>,
    chain_id: Option<u64>,
}

impl NetworkProfile {
    pub fn new(url: Url, accounts: Vec<SigningCredential>) -> Self {
        NetworkProfile {
            url,
            accounts,
            chain_id: None,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn accounts(&self) -> &[SigningCredential] {
        &self.accounts
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        validate_endpoint(name, &self.url)?;
        if self.accounts.is_empty() {
            return Err(ConfigError::EmptyCredentials(name.to_string()));
        }
        if self.chain_id == Some(0) {
            return Err(ConfigError::InvalidChainId(name.to_string()));
        }
        Ok(())
    }
}

/// Profiles keyed by unique name, iterated in name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkProfiles {
    profiles: BTreeMap<String, NetworkProfile>,
}

impl NetworkProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, profile: NetworkProfile) -> Result<()> {
        let name = name.into();
        validate_network_name(&name)?;
        if self.profiles.contains_key(&name) {
            return Err(ConfigError::DuplicateNetwork(name));
        }
        self.profiles.insert(name, profile);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&NetworkProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    /// Lookup that also hands back the stored name
    pub fn get_key_value(&self, name: &str) -> Result<(&str, &NetworkProfile)> {
        self.profiles
            .get_key_value(name)
            .map(|(name, profile)| (name.as_str(), profile))
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkProfile)> {
        self.profiles.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
