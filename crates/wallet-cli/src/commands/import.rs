use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chain_sol::Sol;
use wallet_core::{ChainClient, KeyStore, Wallet};

pub fn run<C: ChainClient>(
    source: &Path,
    store: &KeyStore,
    client: C,
    out: &mut impl Write,
) -> Result<()> {
    let source = source.to_str().map_or(source, |s| Path::new(s.trim()));
    let wallet = Wallet::import(source, store, client)?;
    writeln!(out, "Public Key: {}", wallet.address())?;

    let balance = wallet.balance()?;
    writeln!(out, "Balance: {}", Sol(balance))?;
    Ok(())
}
