use super::compiler::CompilerSettings;
use super::descriptor::{ConfigurationDescriptor, DescriptorBuilder};
use super::env::{interpolate, EnvSource, ProcessEnv};
use super::network::{validate_endpoint, validate_network_name, NetworkProfile};
use crate::error::{ConfigError, Result};
use crate::secrets::{
    embeds_api_key, redact_endpoint, SecretPolicy, SecretWarning, SigningCredential,
};
use log::{debug, info, warn};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use url::Url;
use zeroize::{Zeroize, Zeroizing};

static PROCESS_ENV: ProcessEnv = ProcessEnv;

/// Source formats a descriptor can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Toml,
    Json,
}

impl DescriptorFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(DescriptorFormat::Toml),
            "json" => Ok(DescriptorFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// How secrets are resolved and policed during a load
#[derive(Clone, Copy)]
pub struct LoadOptions<'a> {
    pub secret_policy: SecretPolicy,
    pub env: &'a dyn EnvSource,
}

impl Default for LoadOptions<'static> {
    fn default() -> Self {
        LoadOptions {
            secret_policy: SecretPolicy::default(),
            env: &PROCESS_ENV,
        }
    }
}

impl<'a> LoadOptions<'a> {
    pub fn with_env(env: &'a dyn EnvSource) -> Self {
        LoadOptions {
            secret_policy: SecretPolicy::default(),
            env,
        }
    }

    pub fn secret_policy(mut self, policy: SecretPolicy) -> Self {
        self.secret_policy = policy;
        self
    }
}

impl fmt::Debug for LoadOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("secret_policy", &self.secret_policy)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescriptor {
    #[serde(alias = "solidity")]
    compiler: CompilerSettings,
    #[serde(
        default,
        alias = "network_profiles",
        deserialize_with = "profiles_in_order"
    )]
    networks: Vec<(String, RawNetworkProfile)>,
    #[serde(default)]
    plugins: Vec<String>,
    #[serde(default, alias = "defaultNetwork")]
    default_network: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNetworkProfile {
    url: String,
    #[serde(default, alias = "credentials")]
    accounts: Vec<String>,
    #[serde(default, alias = "chainId")]
    chain_id: Option<u64>,
}

impl Drop for RawNetworkProfile {
    fn drop(&mut self) {
        self.accounts.zeroize();
    }
}

/// Keep every entry, repeats included, so duplicates reach
/// `NetworkProfiles::insert` instead of silently overwriting
fn profiles_in_order<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, RawNetworkProfile)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ProfilesVisitor;

    impl<'de> Visitor<'de> for ProfilesVisitor {
        type Value = Vec<(String, RawNetworkProfile)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a table of network profiles")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut profiles = Vec::new();
            while let Some(entry) = map.next_entry::<String, RawNetworkProfile>()? {
                profiles.push(entry);
            }
            Ok(profiles)
        }
    }

    deserializer.deserialize_map(ProfilesVisitor)
}

impl ConfigurationDescriptor {
    /// Read, resolve and validate the descriptor at `path`
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let format = DescriptorFormat::from_path(path)?;
        info!("Loading descriptor from {}", path.display());
        let text = Zeroizing::new(fs::read_to_string(path)?);
        Self::from_str_with_format(&text, format, options)
    }

    pub fn from_toml_str(text: &str, options: &LoadOptions) -> Result<Self> {
        Self::from_str_with_format(text, DescriptorFormat::Toml, options)
    }

    pub fn from_json_str(text: &str, options: &LoadOptions) -> Result<Self> {
        Self::from_str_with_format(text, DescriptorFormat::Json, options)
    }

    pub fn from_str_with_format(
        text: &str,
        format: DescriptorFormat,
        options: &LoadOptions,
    ) -> Result<Self> {
        let raw: RawDescriptor = match format {
            DescriptorFormat::Toml => {
                toml::from_str(text).map_err(|e| ConfigError::from_toml(&e, text))?
            }
            DescriptorFormat::Json => serde_json::from_str(text)?,
        };
        let descriptor = resolve(raw, options)?;
        info!(
            "Descriptor loaded: compiler {}, {} network(s)",
            descriptor.compiler().version(),
            descriptor.networks().len()
        );
        Ok(descriptor)
    }
}

fn resolve(raw: RawDescriptor, options: &LoadOptions) -> Result<ConfigurationDescriptor> {
    let RawDescriptor {
        compiler,
        networks,
        plugins,
        default_network,
    } = raw;

    // compiler rules come before anything that touches the environment
    compiler.validate()?;

    let mut builder = DescriptorBuilder::new(compiler);
    for plugin in plugins {
        builder = builder.plugin(plugin);
    }
    if let Some(name) = default_network {
        builder = builder.default_network(name);
    }

    for (name, raw_profile) in &networks {
        let (profile, warnings) = resolve_profile(name, raw_profile, options)?;
        for warning in warnings {
            builder = builder.secret_warning(warning);
        }
        builder = builder.network(name.clone(), profile)?;
    }

    builder.build()
}

fn resolve_profile(
    name: &str,
    raw: &RawNetworkProfile,
    options: &LoadOptions,
) -> Result<(NetworkProfile, Vec<SecretWarning>)> {
    validate_network_name(name)?;
    let mut warnings = Vec::new();

    let endpoint = interpolate(&raw.url, &format!("networks.{name}.url"), options.env)?;
    let url = Url::parse(&endpoint.value).map_err(|e| ConfigError::InvalidEndpoint {
        network: name.to_string(),
        reason: e.to_string(),
    })?;
    validate_endpoint(name, &url)?;
    if !endpoint.from_env && embeds_api_key(&url) {
        warn!(
            "Network {name} endpoint {} appears to embed an API key; move it to an environment variable",
            redact_endpoint(&url)
        );
        warnings.push(SecretWarning::EmbeddedApiKey {
            network: name.to_string(),
        });
    }

    let mut accounts = Vec::with_capacity(raw.accounts.len());
    for (index, entry) in raw.accounts.iter().enumerate() {
        let field = format!("networks.{name}.accounts[{index}]");
        let resolved = interpolate(entry, &field, options.env)?;
        if !resolved.from_env {
            match options.secret_policy {
                SecretPolicy::Deny => {
                    return Err(ConfigError::PlaintextSecret {
                        network: name.to_string(),
                        index,
                    })
                }
                SecretPolicy::Warn => {
                    warn!("Network {name} credential #{index} is stored in plaintext");
                    warnings.push(SecretWarning::PlaintextCredential {
                        network: name.to_string(),
                        index,
                    });
                }
            }
        }
        let credential = SigningCredential::from_hex(&resolved.value).map_err(|e| {
            ConfigError::InvalidCredential {
                network: name.to_string(),
                index,
                reason: e.to_string(),
            }
        })?;
        debug!("Network {name} signer #{index}: {}", credential.address());
        accounts.push(credential);
    }

    let mut profile = NetworkProfile::new(url, accounts);
    if let Some(chain_id) = raw.chain_id {
        profile = profile.with_chain_id(chain_id);
    }
    profile.validate(name)?;
    Ok((profile, warnings))
}
