use super::compiler::CompilerSettings;
use super::network::{NetworkProfile, NetworkProfiles};
use crate::error::{ConfigError, Result};
use crate::secrets::{SecretWarning, SigningCredential};
use std::collections::HashSet;

/// The validated, read-only configuration handed to the toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDescriptor {
    compiler: CompilerSettings,
    networks: NetworkProfiles,
    plugins: Vec<String>,
    default_network: Option<String>,
    secret_warnings: Vec<SecretWarning>,
}

/// One signing key together with the network it signs for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSigner<'a> {
    pub network: &'a str,
    pub credential: &'a SigningCredential,
}

impl NetworkSigner<'_> {
    pub fn address(&self) -> &str {
        self.credential.address()
    }
}

impl ConfigurationDescriptor {
    pub fn builder(compiler: CompilerSettings) -> DescriptorBuilder {
        DescriptorBuilder::new(compiler)
    }

    pub fn compiler(&self) -> &CompilerSettings {
        &self.compiler
    }

    pub fn networks(&self) -> &NetworkProfiles {
        &self.networks
    }

    pub fn network(&self, name: &str) -> Result<&NetworkProfile> {
        self.networks.get(name)
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn default_network(&self) -> Option<&str> {
        self.default_network.as_deref()
    }

    /// Findings recorded while loading under a permissive secret policy
    pub fn secret_warnings(&self) -> &[SecretWarning] {
        &self.secret_warnings
    }

    /// Signing keys for `name`, in declaration order
    pub fn signers(&self, name: &str) -> Result<Vec<NetworkSigner<'_>>> {
        let (network, profile) = self.networks.get_key_value(name)?;
        Ok(profile
            .accounts()
            .iter()
            .map(|credential| NetworkSigner {
                network,
                credential,
            })
            .collect())
    }

    /// Check every shape invariant, stopping at the first violation
    pub fn validate(&self) -> Result<()> {
        self.compiler.validate()?;

        for (name, profile) in self.networks.iter() {
            profile.validate(name)?;
        }

        if let Some(default) = &self.default_network {
            if !self.networks.contains(default) {
                return Err(ConfigError::UnknownNetwork(default.clone()));
            }
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if plugin.trim().is_empty() {
                return Err(ConfigError::InvalidPlugin(
                    "plugin name must not be empty".to_string(),
                ));
            }
            if !seen.insert(plugin.as_str()) {
                return Err(ConfigError::InvalidPlugin(format!("{plugin} listed twice")));
            }
        }

        Ok(())
    }
}

/// Assembles a descriptor programmatically; `build` validates
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    compiler: CompilerSettings,
    networks: NetworkProfiles,
    plugins: Vec<String>,
    default_network: Option<String>,
    secret_warnings: Vec<SecretWarning>,
}

impl DescriptorBuilder {
    pub fn new(compiler: CompilerSettings) -> Self {
        DescriptorBuilder {
            compiler,
            networks: NetworkProfiles::new(),
            plugins: Vec::new(),
            default_network: None,
            secret_warnings: Vec::new(),
        }
    }

    pub fn network(mut self, name: impl Into<String>, profile: NetworkProfile) -> Result<Self> {
        self.networks.insert(name, profile)?;
        Ok(self)
    }

    pub fn plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugins.push(plugin.into());
        self
    }

    pub fn default_network(mut self, name: impl Into<String>) -> Self {
        self.default_network = Some(name.into());
        self
    }

    pub(crate) fn secret_warning(mut self, warning: SecretWarning) -> Self {
        self.secret_warnings.push(warning);
        self
    }

    pub fn build(self) -> Result<ConfigurationDescriptor> {
        let descriptor = ConfigurationDescriptor {
            compiler: self.compiler,
            networks: self.networks,
            plugins: self.plugins,
            default_network: self.default_network,
            secret_warnings: self.secret_warnings,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}
