use std::io::Write;

use anyhow::Result;
use chain_sol::Sol;
use wallet_core::{ChainClient, KeyStore, Wallet};

pub fn run<C: ChainClient>(store: &KeyStore, client: C, out: &mut impl Write) -> Result<()> {
    let wallet = Wallet::load(store, client)?;
    writeln!(out, "Public Key: {}", wallet.address())?;

    let balance = wallet.balance()?;
    writeln!(out, "Balance: {}", Sol(balance))?;
    Ok(())
}
