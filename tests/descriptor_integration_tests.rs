//! Descriptor integration tests
//!
//! Loads descriptors from disk the way the toolchain does at startup and
//! checks the shape rules a consumer relies on.

use deploy_descriptor::descriptor::{is_semver, write_template, DESCRIPTOR_TEMPLATE};
use deploy_descriptor::{
    ConfigError, ConfigurationDescriptor, LoadOptions, SecretPolicy, SecretWarning,
};
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

const PRIVATE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
const ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

fn test_env() -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("PRIVATE_KEY".to_string(), PRIVATE_KEY.to_string());
    vars.insert(
        "INFURA_API_KEY".to_string(),
        "014b38b8d1bf4292ac1aa2477d0342ba".to_string(),
    );
    vars
}

#[test]
fn test_load_toml_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("deploy.toml");
    fs::write(
        &path,
        r#"
[compiler]
version = "0.7.0"

[compiler.optimizer]
enabled = true
runs = 200

[networks.rinkeby]
url = "https://rinkeby.infura.io/v3/${INFURA_API_KEY}"
accounts = ["${PRIVATE_KEY}"]
"#,
    )
    .unwrap();

    let vars = test_env();
    let descriptor = ConfigurationDescriptor::load(&path, &LoadOptions::with_env(&vars)).unwrap();

    // Optimizer enabled with 200 runs yields runs = 200
    let runs = descriptor.compiler().optimizer().effective_runs().unwrap();
    assert_eq!(runs.get(), 200);
    assert!(is_semver(descriptor.compiler().version()));

    // One credential on rinkeby yields exactly one signer for rinkeby
    let signers = descriptor.signers("rinkeby").unwrap();
    assert_eq!(signers.len(), 1);
    assert_eq!(signers[0].network, "rinkeby");
    assert_eq!(signers[0].address(), ADDRESS);
}

#[test]
fn test_load_json_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("deploy.json");
    fs::write(
        &path,
        r#"{
            "solidity": { "version": "0.8.19", "optimizer": { "enabled": false } },
            "defaultNetwork": "local",
            "networks": {
                "local": { "url": "http://127.0.0.1:8545", "accounts": ["${PRIVATE_KEY}"], "chainId": 31337 }
            }
        }"#,
    )
    .unwrap();

    let vars = test_env();
    let descriptor = ConfigurationDescriptor::load(&path, &LoadOptions::with_env(&vars)).unwrap();
    assert_eq!(descriptor.compiler().version(), "0.8.19");
    assert_eq!(descriptor.compiler().optimizer().effective_runs(), None);
    assert_eq!(descriptor.default_network(), Some("local"));
    assert_eq!(descriptor.network("local").unwrap().chain_id(), Some(31337));
}

#[test]
fn test_unknown_extension_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("hardhat.config.js");
    fs::write(&path, "module.exports = {};").unwrap();

    let vars = test_env();
    let err = ConfigurationDescriptor::load(&path, &LoadOptions::with_env(&vars)).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let temp_dir = tempdir().unwrap();
    let vars = test_env();
    let err = ConfigurationDescriptor::load(
        temp_dir.path().join("absent.toml"),
        &LoadOptions::with_env(&vars),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_version_shapes() {
    let vars = test_env();
    for (version, ok) in [("0.7.0", true), ("0.7", false), ("v0.7.0", false), ("01.2.3", false)] {
        let text = format!("[compiler]\nversion = \"{version}\"\n");
        let result = ConfigurationDescriptor::from_toml_str(&text, &LoadOptions::with_env(&vars));
        assert_eq!(result.is_ok(), ok, "version {version}");
    }
}

#[test]
fn test_zero_runs_only_matters_when_enabled() {
    let vars = test_env();
    let enabled = "[compiler]\nversion = \"0.7.0\"\n[compiler.optimizer]\nenabled = true\nruns = 0\n";
    assert_eq!(
        ConfigurationDescriptor::from_toml_str(enabled, &LoadOptions::with_env(&vars)).unwrap_err(),
        ConfigError::InvalidOptimizerRuns
    );

    let disabled = "[compiler]\nversion = \"0.7.0\"\n[compiler.optimizer]\nenabled = false\nruns = 0\n";
    assert!(ConfigurationDescriptor::from_toml_str(disabled, &LoadOptions::with_env(&vars)).is_ok());
}

#[test]
fn test_embedded_secrets_flagged() {
    // The shape the toolchain's own config ships with: key and project id inline
    let text = format!(
        r#"
[solidity]
version = "0.7.0"

[networks.rinkeby]
url = "https://rinkeby.infura.io/v3/014b38b8d1bf4292ac1aa2477d0342ba"
accounts = ["{PRIVATE_KEY}"]
"#
    );
    let vars = test_env();

    let denied = ConfigurationDescriptor::from_toml_str(&text, &LoadOptions::with_env(&vars));
    assert!(matches!(denied, Err(ConfigError::PlaintextSecret { index: 0, .. })));

    let options = LoadOptions::with_env(&vars).secret_policy(SecretPolicy::Warn);
    let descriptor = ConfigurationDescriptor::from_toml_str(&text, &options).unwrap();
    assert_eq!(descriptor.secret_warnings().len(), 2);
    assert!(descriptor
        .secret_warnings()
        .contains(&SecretWarning::PlaintextCredential {
            network: "rinkeby".to_string(),
            index: 0
        }));

    let rendered = format!("{descriptor:?}");
    assert!(!rendered.contains(PRIVATE_KEY));
}

#[test]
fn test_redacted_json_has_no_secrets() {
    let vars = test_env();
    let descriptor =
        ConfigurationDescriptor::from_toml_str(DESCRIPTOR_TEMPLATE, &LoadOptions::with_env(&vars))
            .unwrap();
    let json = deploy_descriptor::to_json_pretty(&descriptor.redacted()).unwrap();
    assert!(json.contains(ADDRESS));
    assert!(json.contains("https://rinkeby.infura.io/v3/***"));
    assert!(!json.contains(PRIVATE_KEY));
    assert!(!json.contains("014b38b8d1bf4292ac1aa2477d0342ba"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("deploy.toml");

    write_template(&path, false).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), DESCRIPTOR_TEMPLATE);

    let err = write_template(&path, false).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    write_template(&path, true).unwrap();
}

#[test]
fn test_parse_errors_never_echo_keys() {
    let temp_dir = tempdir().unwrap();
    let vars = test_env();

    // accounts written as a bare string instead of a list
    let toml_path = temp_dir.path().join("deploy.toml");
    fs::write(
        &toml_path,
        format!(
            "[compiler]\nversion = \"0.7.0\"\n\n[networks.rinkeby]\nurl = \"https://rinkeby.example.org\"\naccounts = \"{PRIVATE_KEY}\"\n"
        ),
    )
    .unwrap();
    let err = ConfigurationDescriptor::load(&toml_path, &LoadOptions::with_env(&vars)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(!err.to_string().contains(PRIVATE_KEY), "{err}");

    // unterminated array
    fs::write(
        &toml_path,
        format!("[compiler]\nversion = \"0.7.0\"\n[networks.rinkeby]\naccounts = [\"{PRIVATE_KEY}\"\n"),
    )
    .unwrap();
    let err = ConfigurationDescriptor::load(&toml_path, &LoadOptions::with_env(&vars)).unwrap_err();
    assert!(!err.to_string().contains(PRIVATE_KEY), "{err}");

    let json_path = temp_dir.path().join("deploy.json");
    fs::write(
        &json_path,
        format!(
            r#"{{"compiler": {{"version": "0.7.0"}}, "networks": {{"rinkeby": {{"url": "https://rinkeby.example.org", "accounts": [{{"key": "{PRIVATE_KEY}"}}]}}}}}}"#
        ),
    )
    .unwrap();
    let err = ConfigurationDescriptor::load(&json_path, &LoadOptions::with_env(&vars)).unwrap_err();
    assert!(!err.to_string().contains(PRIVATE_KEY), "{err}");
}

#[test]
fn test_load_reports_first_rule_broken() {
    let empty: HashMap<String, String> = HashMap::new();

    // bad version wins over a missing env var and a bad endpoint
    let text = r#"
[compiler]
version = "0.7"

[networks.rinkeby]
url = "ftp://${HOST}"
accounts = ["${PRIVATE_KEY}"]
"#;
    assert_eq!(
        ConfigurationDescriptor::from_toml_str(text, &LoadOptions::with_env(&empty)).unwrap_err(),
        ConfigError::InvalidCompilerVersion("0.7".to_string())
    );

    // zero runs wins over the networks
    let text = r#"
[compiler]
version = "0.7.0"

[compiler.optimizer]
enabled = true
runs = 0

[networks.rinkeby]
url = "https://rinkeby.example.org"
accounts = ["${PRIVATE_KEY}"]
"#;
    assert_eq!(
        ConfigurationDescriptor::from_toml_str(text, &LoadOptions::with_env(&empty)).unwrap_err(),
        ConfigError::InvalidOptimizerRuns
    );

    // a broken profile wins over an unknown default network
    let vars = test_env();
    let text = r#"
default_network = "mainnet"

[compiler]
version = "0.7.0"

[networks.rinkeby]
url = "https://rinkeby.example.org"
accounts = []
"#;
    assert_eq!(
        ConfigurationDescriptor::from_toml_str(text, &LoadOptions::with_env(&vars)).unwrap_err(),
        ConfigError::EmptyCredentials("rinkeby".to_string())
    );

    // the default network is checked before plugins
    let text = r#"
default_network = "mainnet"
plugins = ["", ""]

[compiler]
version = "0.7.0"
"#;
    assert_eq!(
        ConfigurationDescriptor::from_toml_str(text, &LoadOptions::with_env(&vars)).unwrap_err(),
        ConfigError::UnknownNetwork("mainnet".to_string())
    );
}

#[test]
fn test_toolchain_layout_loads_from_json_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("deploy.json");
    fs::write(
        &path,
        r#"{
            "solidity": {
                "version": "0.7.0",
                "settings": { "optimizer": { "enabled": true, "runs": 200 } }
            },
            "networks": {
                "rinkeby": {
                    "url": "https://rinkeby.infura.io/v3/${INFURA_API_KEY}",
                    "accounts": ["${PRIVATE_KEY}"]
                }
            }
        }"#,
    )
    .unwrap();

    let vars = test_env();
    let descriptor = ConfigurationDescriptor::load(&path, &LoadOptions::with_env(&vars)).unwrap();
    assert_eq!(
        descriptor.compiler().optimizer().effective_runs().map(|runs| runs.get()),
        Some(200)
    );
    assert_eq!(descriptor.signers("rinkeby").unwrap().len(), 1);
}
