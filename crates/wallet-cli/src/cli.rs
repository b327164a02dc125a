//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal Solana wallet: create or import a key, check the balance,
/// request devnet SOL and send transfers.
#[derive(Parser, Debug)]
#[command(name = "personal-wallet", version, propagate_version = true)]
pub struct Cli {
    /// RPC endpoint: a URL or one of devnet, testnet, mainnet-beta, localnet.
    #[arg(short, long, global = true, env = "PERSONAL_WALLET_URL")]
    pub url: Option<String>,

    /// Key file of the active wallet.
    #[arg(short, long, global = true, env = "PERSONAL_WALLET_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Configuration file (TOML).
    #[arg(short, long, global = true, env = "PERSONAL_WALLET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new wallet and save its private key.
    #[command(name = "createWallet")]
    CreateWallet,

    /// Import an existing wallet from a private key file.
    #[command(name = "importWallet")]
    ImportWallet {
        /// Raw 64-byte key or solana-keygen JSON file.
        path: PathBuf,
    },

    /// Show the wallet public key and balance.
    Info,

    /// Request a SOL airdrop to the wallet.
    RequestAirdrop {
        /// Amount in SOL, e.g. 1.5
        amount: String,
    },

    /// Transfer SOL to another wallet.
    Transfer {
        /// Recipient address (Base58).
        to: String,

        /// Amount in SOL, e.g. 0.25
        amount: String,
    },
}
