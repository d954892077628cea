use crate::descriptor::{ConfigurationDescriptor, EnvSource, ProcessEnv};
use crate::error::{ConfigError, Result};
use crate::secrets::SecretPolicy;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

pub static GLOBAL_SETTINGS: Lazy<Settings> = Lazy::new(Settings::new);

static DEFAULT_DESCRIPTOR_PATH: &str = "deploy.toml";

const DESCRIPTOR_PATH_KEY: &str = "DEPLOY_CONFIG";
const NETWORK_KEY: &str = "DEPLOY_NETWORK";
const ALLOW_PLAINTEXT_KEY: &str = "DEPLOY_ALLOW_PLAINTEXT_SECRETS";

pub struct Settings {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Settings {
        Self::from_env(&ProcessEnv)
    }

    pub fn from_env(env: &dyn EnvSource) -> Settings {
        let descriptor_path = env
            .var(DESCRIPTOR_PATH_KEY)
            .unwrap_or_else(|| String::from(DEFAULT_DESCRIPTOR_PATH));

        let mut map = HashMap::new();
        map.insert(String::from(DESCRIPTOR_PATH_KEY), descriptor_path);

        if let Some(network) = env.var(NETWORK_KEY) {
            map.insert(String::from(NETWORK_KEY), network);
        }
        if let Some(flag) = env.var(ALLOW_PLAINTEXT_KEY) {
            map.insert(String::from(ALLOW_PLAINTEXT_KEY), flag);
        }

        Settings {
            inner: RwLock::new(map),
        }
    }

    pub fn get_descriptor_path(&self) -> PathBuf {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on settings - this should never happen");
        inner
            .get(DESCRIPTOR_PATH_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR_PATH))
    }

    pub fn set_descriptor_path(&self, path: PathBuf) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on settings - this should never happen");
        inner.insert(
            String::from(DESCRIPTOR_PATH_KEY),
            path.to_string_lossy().into_owned(),
        );
    }

    pub fn get_network(&self) -> Option<String> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on settings - this should never happen");
        inner.get(NETWORK_KEY).cloned()
    }

    pub fn set_network(&self, network: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on settings - this should never happen");
        inner.insert(String::from(NETWORK_KEY), network);
    }

    pub fn allow_plaintext_secrets(&self) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on settings - this should never happen");
        inner.insert(String::from(ALLOW_PLAINTEXT_KEY), String::from("true"));
    }

    pub fn secret_policy(&self) -> SecretPolicy {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on settings - this should never happen");
        match inner.get(ALLOW_PLAINTEXT_KEY).map(|v| v.trim().to_lowercase()) {
            Some(flag) if flag == "1" || flag == "true" || flag == "yes" => SecretPolicy::Warn,
            _ => SecretPolicy::Deny,
        }
    }

    /// Pick a network: explicit argument, then DEPLOY_NETWORK, then the
    /// descriptor's default, then the only profile if there is exactly one
    pub fn select_network(
        &self,
        explicit: Option<&str>,
        descriptor: &ConfigurationDescriptor,
    ) -> Result<String> {
        let chosen = explicit
            .map(str::to_string)
            .or_else(|| self.get_network())
            .or_else(|| descriptor.default_network().map(str::to_string))
            .or_else(|| {
                let mut names = descriptor.networks().names();
                match (names.next(), names.next()) {
                    (Some(only), None) => Some(only.to_string()),
                    _ => None,
                }
            })
            .ok_or(ConfigError::NoNetworkSelected)?;

        if !descriptor.networks().contains(&chosen) {
            return Err(ConfigError::UnknownNetwork(chosen));
        }
        Ok(chosen)
    }
}
