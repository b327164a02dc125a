use std::io::Write;

use anyhow::Result;
use chain_sol::{parse_sol, Sol};
use wallet_core::{ChainClient, KeyStore, Wallet};

/// The amount is validated before the wallet is opened.
pub fn run<C: ChainClient>(
    amount: &str,
    store: &KeyStore,
    client: C,
    out: &mut impl Write,
) -> Result<()> {
    let lamports = parse_sol(amount)?;
    writeln!(out, "Requesting airdrop of {}", Sol(lamports))?;

    let wallet = Wallet::load(store, client)?;
    let tx_id = wallet.request_airdrop(lamports)?;

    writeln!(out, "Airdropped {}", Sol(lamports))?;
    writeln!(out, "Transaction hash: {tx_id}")?;
    Ok(())
}
