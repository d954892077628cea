// Entry point for the descriptor CLI
use clap::Parser;
use deploy_descriptor::{
    descriptor::write_template, redact_endpoint, to_json_pretty, to_toml, Command,
    ConfigurationDescriptor, LoadOptions, Opt, OutputFormatArg, SigningCredential,
    GLOBAL_SETTINGS,
};
use log::{error, info, LevelFilter};
use std::process;

fn main() {
    // Info by default; RUST_LOG still wins
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    if let Some(path) = opt.config.clone() {
        GLOBAL_SETTINGS.set_descriptor_path(path);
    }
    if opt.allow_plaintext_secrets {
        GLOBAL_SETTINGS.allow_plaintext_secrets();
    }

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_descriptor() -> deploy_descriptor::Result<ConfigurationDescriptor> {
    let options = LoadOptions::default().secret_policy(GLOBAL_SETTINGS.secret_policy());
    ConfigurationDescriptor::load(GLOBAL_SETTINGS.get_descriptor_path(), &options)
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Validate => {
            let descriptor = load_descriptor()?;
            for warning in descriptor.secret_warnings() {
                println!("warning: {warning}");
            }
            println!("OK");
        }
        Command::Show { format } => {
            let redacted = load_descriptor()?.redacted();
            let rendered = match format {
                OutputFormatArg::Toml => to_toml(&redacted)?,
                OutputFormatArg::Json => to_json_pretty(&redacted)?,
            };
            println!("{rendered}");
        }
        Command::Networks => {
            let descriptor = load_descriptor()?;
            for (name, profile) in descriptor.networks().iter() {
                let marker = if descriptor.default_network() == Some(name) {
                    " (default)"
                } else {
                    ""
                };
                println!("{name}{marker}: {}", redact_endpoint(profile.url()));
            }
        }
        Command::Accounts { network } => {
            let descriptor = load_descriptor()?;
            let name = GLOBAL_SETTINGS.select_network(network.as_deref(), &descriptor)?;
            for signer in descriptor.signers(&name)? {
                println!("{}", signer.address());
            }
        }
        Command::Init { path, force } => {
            write_template(&path, force)?;
            println!("Wrote {}", path.display());
            println!("Set INFURA_API_KEY and PRIVATE_KEY in your environment before deploying.");
        }
        Command::Keygen => {
            // Printed once; the user moves it into a secret store
            let credential = SigningCredential::generate();
            info!("Generated signing key for {}", credential.address());
            println!("Address:     {}", credential.address());
            println!("Private key: 0x{}", credential.expose_secret_hex().as_str());
        }
    }
    Ok(())
}
