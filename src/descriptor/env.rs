use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use zeroize::Zeroizing;

static ENV_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env reference pattern is valid")
});

/// Where `${NAME}` references are looked up
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A descriptor value after its references were substituted
pub struct Interpolated {
    pub value: Zeroizing<String>,
    /// At least one `${NAME}` was substituted
    pub from_env: bool,
}

/// Substitute every `${NAME}` in `input`. `field` names the descriptor
/// entry for error messages.
pub fn interpolate(input: &str, field: &str, env: &dyn EnvSource) -> Result<Interpolated> {
    let mut value = Zeroizing::new(String::with_capacity(input.len()));
    let mut from_env = false;
    let mut last = 0;

    for caps in ENV_REFERENCE.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        value.push_str(&input[last..whole.start()]);
        match env.var(name.as_str()) {
            Some(resolved) => {
                let resolved = Zeroizing::new(resolved);
                value.push_str(&resolved);
            }
            None => {
                return Err(ConfigError::MissingEnvVar {
                    var: name.as_str().to_string(),
                    field: field.to_string(),
                })
            }
        }
        last = whole.end();
        from_env = true;
    }
    value.push_str(&input[last..]);

    Ok(Interpolated { value, from_env })
}
