use crate::error::{ConfigError, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Starter descriptor; every secret is an environment reference
pub const DESCRIPTOR_TEMPLATE: &str = r#"# Contract toolchain descriptor.
# Secrets are read from the environment; never write keys into this file.

plugins = ["@nomiclabs/hardhat-waffle"]
default_network = "rinkeby"

[compiler]
version = "0.7.0"

[compiler.optimizer]
enabled = true
runs = 200

[networks.rinkeby]
url = "https://rinkeby.infura.io/v3/${INFURA_API_KEY}"
accounts = ["${PRIVATE_KEY}"]
chain_id = 4
"#;

/// Write the template to `path`, refusing to clobber an existing file
/// unless `force` is set
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::Io(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    fs::write(path, DESCRIPTOR_TEMPLATE)?;
    info!("Wrote descriptor template to {}", path.display());
    Ok(())
}
