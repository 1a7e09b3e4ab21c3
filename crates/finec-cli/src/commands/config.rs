//! Config command implementation.
//!
//! Manages the ISS connection settings file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use finec_config::{default_config_path, load_from, save_to, ConfigKey, IssConfig, ENV_BASE_URL, ENV_TIMEOUT};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_info, print_json, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let path = resolve_path(config)?;
    match args.command {
        ConfigCommand::Show => execute_show(&path, format),
        ConfigCommand::Get(get_args) => execute_get(get_args, &path, format),
        ConfigCommand::Set(set_args) => execute_set(set_args, &path),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, &path),
        ConfigCommand::Path => execute_path(&path),
    }
}

fn resolve_path(config: Option<&Path>) -> Result<PathBuf> {
    match config {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(default_config_path()?),
    }
}

/// Show current configuration.
fn execute_show(path: &Path, format: OutputFormat) -> Result<()> {
    let config = load_from(path)?;

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_output(&settings(&config), format)?;
            for var in [ENV_BASE_URL, ENV_TIMEOUT] {
                if std::env::var_os(var).is_some() {
                    print_warning(&format!("{var} is set and overrides the file"));
                }
            }
        }
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Csv => print_output(&settings(&config), format)?,
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.get(*key));
            }
        }
    }

    Ok(())
}

fn settings(config: &IssConfig) -> Vec<KeyValue> {
    ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), config.get(*key)))
        .collect()
}

/// Get a configuration value.
fn execute_get(args: GetArgs, path: &Path, format: OutputFormat) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    let config = load_from(path)?;
    let value = config.get(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            print_json(&output)?;
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, path: &Path) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;

    let mut config = load_from(path)?;
    config.set(key, &args.value)?;
    save_to(&config, path)?;

    print_success(&format!("Set {} = {}", key.as_str(), config.get(key)));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let defaults = IssConfig::default();

    match format {
        OutputFormat::Table => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), defaults.get(*key)),
                    )
                })
                .collect();
            print_header("Available Configuration Keys");
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": defaults.get(*key)
                    })
                })
                .collect();
            print_json(&output)?;
        }
        OutputFormat::Csv => {
            println!("key,description,default");
            for key in ConfigKey::all() {
                println!("{},{},{}", key.as_str(), key.description(), defaults.get(*key));
            }
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, path: &Path) -> Result<()> {
    if args.all {
        save_to(&IssConfig::default(), path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::parse(&key_str)?;
        let mut config = load_from(path)?;
        config.reset(key);
        save_to(&config, path)?;
        print_success(&format!("Reset {} to default ({})", key.as_str(), config.get(key)));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(path: &Path) -> Result<()> {
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
