use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Runs used by the toolchain when the descriptor leaves them out
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

static SEMVER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*)?(?:\+[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?$",
    )
    .expect("semantic version pattern is valid")
});

/// `MAJOR.MINOR.PATCH[-pre][+build]` without leading zeros
pub fn is_semver(version: &str) -> bool {
    SEMVER_PATTERN.is_match(version)
}

fn default_runs() -> u32 {
    DEFAULT_OPTIMIZER_RUNS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerSettings {
    #[serde(default)]
    enabled: bool,
    #[serde(default = "default_runs")]
    runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: DEFAULT_OPTIMIZER_RUNS,
        }
    }
}

impl OptimizerSettings {
    pub fn new(enabled: bool, runs: u32) -> Self {
        Self { enabled, runs }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Raw runs value; meaningless while the optimizer is disabled
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Runs handed to the compiler, or `None` when the optimizer is off
    pub fn effective_runs(&self) -> Option<NonZeroU32> {
        if self.enabled {
            NonZeroU32::new(self.runs)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.runs == 0 {
            return Err(ConfigError::InvalidOptimizerRuns);
        }
        Ok(())
    }
}

/// Compiler table as written; the optimizer may sit directly under it or
/// inside a `settings` table, the toolchain's own layout
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompilerSettings {
    version: String,
    #[serde(default)]
    optimizer: Option<OptimizerSettings>,
    #[serde(default)]
    settings: Option<RawCompilerTuning>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompilerTuning {
    #[serde(default)]
    optimizer: Option<OptimizerSettings>,
}

impl TryFrom<RawCompilerSettings> for CompilerSettings {
    type Error = String;

    fn try_from(raw: RawCompilerSettings) -> std::result::Result<Self, Self::Error> {
        let nested = raw.settings.and_then(|settings| settings.optimizer);
        let optimizer = match (raw.optimizer, nested) {
            (Some(_), Some(_)) => {
                return Err(
                    "optimizer given both at compiler.optimizer and compiler.settings.optimizer"
                        .to_string(),
                )
            }
            (Some(optimizer), None) | (None, Some(optimizer)) => optimizer,
            (None, None) => OptimizerSettings::default(),
        };
        Ok(CompilerSettings {
            version: raw.version,
            optimizer,
        })
    }
}

/// Compiler selection and tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCompilerSettings")]
pub struct CompilerSettings {
    version: String,
    optimizer: OptimizerSettings,
}

impl CompilerSettings {
    pub fn new(version: impl Into<String>, optimizer: OptimizerSettings) -> Self {
        Self {
            version: version.into(),
            optimizer,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn optimizer(&self) -> &OptimizerSettings {
        &self.optimizer
    }

    pub fn validate(&self) -> Result<()> {
        if !is_semver(&self.version) {
            return Err(ConfigError::InvalidCompilerVersion(self.version.clone()));
        }
        self.optimizer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semver_accepts_release_and_prerelease() {
        assert!(is_semver("0.7.0"));
        assert!(is_semver("0.8.19"));
        assert!(is_semver("1.0.0-alpha.1"));
        assert!(is_semver("1.0.0+commit.e28d00a7"));
    }

    #[test]
    fn test_semver_rejects_partial_versions() {
        assert!(!is_semver("0.7"));
        assert!(!is_semver("v0.7.0"));
        assert!(!is_semver("01.2.3"));
        assert!(!is_semver("^0.7.0"));
        assert!(!is_semver(""));
    }

    #[test]
    fn test_enabled_optimizer_needs_runs() {
        let zero = OptimizerSettings::new(true, 0);
        assert_eq!(zero.validate(), Err(ConfigError::InvalidOptimizerRuns));
        assert_eq!(zero.effective_runs(), None);

        let disabled = OptimizerSettings::new(false, 0);
        assert!(disabled.validate().is_ok());
        assert_eq!(disabled.effective_runs(), None);
    }

    #[test]
    fn test_effective_runs() {
        let optimizer = OptimizerSettings::new(true, 200);
        assert_eq!(optimizer.effective_runs().map(NonZeroU32::get), Some(200));
    }

    #[test]
    fn test_runs_default_when_omitted() {
        let compiler: CompilerSettings =
            toml::from_str("version = \"0.7.0\"\n[optimizer]\nenabled = true\n").unwrap();
        assert_eq!(compiler.optimizer().runs(), DEFAULT_OPTIMIZER_RUNS);
        assert!(compiler.validate().is_ok());
    }

    #[test]
    fn test_nested_settings_optimizer() {
        let compiler: CompilerSettings = toml::from_str(
            "version = \"0.7.0\"\n[settings.optimizer]\nenabled = true\nruns = 200\n",
        )
        .unwrap();
        assert_eq!(compiler.optimizer(), &OptimizerSettings::new(true, 200));
    }

    #[test]
    fn test_optimizer_declared_twice() {
        let result = toml::from_str::<CompilerSettings>(
            "version = \"0.7.0\"\n[optimizer]\nenabled = true\n[settings.optimizer]\nenabled = true\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_compiler_key() {
        assert!(toml::from_str::<CompilerSettings>(
            "version = \"0.7.0\"\nevmVersion = \"istanbul\"\n"
        )
        .is_err());
        assert!(toml::from_str::<CompilerSettings>(
            "version = \"0.7.0\"\n[settings]\noutputSelection = 1\n"
        )
        .is_err());
    }

    #[test]
    fn test_bad_version_rejected() {
        let compiler = CompilerSettings::new("latest", OptimizerSettings::default());
        assert_eq!(
            compiler.validate(),
            Err(ConfigError::InvalidCompilerVersion("latest".to_string()))
        );
    }
}
