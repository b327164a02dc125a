use std::io::Write;

use anyhow::Result;
use wallet_core::{ChainClient, KeyStore, Wallet};

pub fn run<C: ChainClient>(store: &KeyStore, client: C, out: &mut impl Write) -> Result<()> {
    let wallet = Wallet::create(store, client)?;

    writeln!(out, "Public Key: {}", wallet.address())?;
    writeln!(out, "Private Key Saved in '{}' file", store.path().display())?;
    Ok(())
}
