use std::io::Write;

use anyhow::Result;
use chain_sol::{parse_sol, Sol};
use wallet_core::{ChainClient, KeyStore, Wallet};

pub fn run<C: ChainClient>(
    to: &str,
    amount: &str,
    store: &KeyStore,
    client: C,
    out: &mut impl Write,
) -> Result<()> {
    let lamports = parse_sol(amount)?;
    let to = to.trim();
    writeln!(out, "Transferring {} to {to}", Sol(lamports))?;

    let wallet = Wallet::load(store, client)?;
    let tx_id = wallet.transfer(to, lamports)?;

    writeln!(out, "Transaction complete")?;
    writeln!(out, "Transaction hash: {tx_id}")?;
    Ok(())
}
