use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for `show`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormatArg {
    #[default]
    Toml,
    Json,
}

impl FromStr for OutputFormatArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(OutputFormatArg::Toml),
            "json" => Ok(OutputFormatArg::Json),
            _ => Err(format!("Invalid format: {s}. Valid options: toml, json")),
        }
    }
}

impl std::fmt::Display for OutputFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormatArg::Toml => write!(f, "toml"),
            OutputFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "deploy-descriptor")]
pub struct Opt {
    #[arg(
        long,
        global = true,
        help = "Descriptor file (.toml or .json); defaults to $DEPLOY_CONFIG or deploy.toml"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long = "allow-plaintext-secrets",
        global = true,
        help = "Warn instead of failing on credentials written into the descriptor"
    )]
    pub allow_plaintext_secrets: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "validate", about = "Load and validate the descriptor")]
    Validate,
    #[command(name = "show", about = "Print the descriptor with secrets redacted")]
    Show {
        #[arg(
            long = "format",
            default_value_t = OutputFormatArg::Toml,
            help = "Output format (toml, json)"
        )]
        format: OutputFormatArg,
    },
    #[command(name = "networks", about = "List configured networks")]
    Networks,
    #[command(name = "accounts", about = "Print signer addresses for a network")]
    Accounts {
        #[arg(help = "Network name; defaults to $DEPLOY_NETWORK or default_network")]
        network: Option<String>,
    },
    #[command(name = "init", about = "Write a template descriptor")]
    Init {
        #[arg(long, default_value = "deploy.toml", help = "Where to write the template")]
        path: PathBuf,
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
    #[command(name = "keygen", about = "Generate a new signing key")]
    Keygen,
}
