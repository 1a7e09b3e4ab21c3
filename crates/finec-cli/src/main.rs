//! Finec CLI - MOEX G-curve yields from the command line.
//!
//! # Usage
//!
//! ```bash
//! # One-year yield published for a trading date
//! finec curve rate --date 2022-09-28 --maturity 1
//!
//! # Several maturities, JSON output
//! finec curve rate --date 2022-09-28 --maturity 0.5,1,5,10 --format json
//!
//! # Every intraday snapshot of the parameters
//! finec curve params --date 2022-09-28 --all
//!
//! # Offline, from a saved ISS response
//! finec curve show --date 2022-09-28 --params-file zcyc.json
//!
//! # Point at a different ISS host
//! finec config set base_url http://localhost:8080
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = cli.format;
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Curve(args) => commands::curve::execute(args, format, config)?,
        Commands::Config(args) => commands::config::execute(args, format, config)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,finec_cli=debug,finec_curves=debug,finec_ext_iss=debug,finec_config=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
