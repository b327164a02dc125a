//! `personal-wallet`: a command-line Solana wallet.

mod cli;
mod commands;
mod logging;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use wallet_core::WalletConfig;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = WalletConfig::load(cli.config.as_deref())?.with_overrides(cli.url, cli.keypair);
    debug!(url = %config.url, keypair = %config.keypair_path.display(), "resolved configuration");

    let store = config.key_store();
    let client = config.rpc_client()?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::CreateWallet => commands::create::run(&store, client, &mut out),
        Commands::ImportWallet { path } => commands::import::run(&path, &store, client, &mut out),
        Commands::Info => commands::info::run(&store, client, &mut out),
        Commands::RequestAirdrop { amount } => {
            commands::airdrop::run(&amount, &store, client, &mut out)
        }
        Commands::Transfer { to, amount } => {
            commands::transfer::run(&to, &amount, &store, client, &mut out)
        }
    }
}
