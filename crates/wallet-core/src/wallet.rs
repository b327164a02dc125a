use std::path::Path;

use chain_sol::{build_sol_transfer, parse_recipient, transaction_id, Keypair, Lamports, Pubkey};
use tracing::{debug, warn};

use crate::client::{ChainClient, TxId};
use crate::error::WalletError;
use crate::keystore::{self, KeyStore};

/// A keypair bound to a chain client.
///
/// The only persistent state is the key store file: `create` and `import`
/// write it, `load` reads it.
pub struct Wallet<C> {
    keypair: Keypair,
    client: C,
}

impl<C: ChainClient> Wallet<C> {
    /// Generate a new keypair and persist it, replacing any existing key.
    pub fn create(store: &KeyStore, client: C) -> Result<Self, WalletError> {
        let keypair = client.new_keypair();
        Self::save(keypair, store, client)
    }

    /// Read a keypair from `source` (raw 64 bytes or a JSON byte array) and
    /// make it the stored wallet key.
    ///
    /// The store is only written once the source has decoded successfully.
    pub fn import(source: &Path, store: &KeyStore, client: C) -> Result<Self, WalletError> {
        let bytes = keystore::read_source(source)?;
        let keypair = Keypair::decode(&bytes)?;
        Self::save(keypair, store, client)
    }

    /// Open the wallet previously saved in `store`.
    pub fn load(store: &KeyStore, client: C) -> Result<Self, WalletError> {
        let bytes = store.read()?;
        let keypair = Keypair::from_bytes(&bytes)?;
        debug!(pubkey = %keypair.pubkey(), "loaded wallet");
        Ok(Self { keypair, client })
    }

    fn save(keypair: Keypair, store: &KeyStore, client: C) -> Result<Self, WalletError> {
        store.write(keypair.to_bytes().as_slice())?;
        Ok(Self { keypair, client })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// The wallet address (Base58 public key).
    pub fn address(&self) -> String {
        self.pubkey().to_string()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn balance(&self) -> Result<Lamports, WalletError> {
        self.client.get_balance(&self.pubkey())
    }

    pub fn request_airdrop(&self, lamports: Lamports) -> Result<TxId, WalletError> {
        self.client.request_airdrop(&self.pubkey(), lamports)
    }

    /// Send `lamports` to `to`.
    ///
    /// The recipient must decode to an on-curve Ed25519 key and the amount
    /// must be non-zero; both are checked before anything is sent to the node.
    pub fn transfer(&self, to: &str, lamports: Lamports) -> Result<TxId, WalletError> {
        let recipient = parse_recipient(to)?;
        if lamports == 0 {
            return Err(WalletError::TransactionFailed(
                "transfer amount must be greater than zero".into(),
            ));
        }

        let blockhash = self.client.get_recent_blockhash()?;
        let tx = build_sol_transfer(&self.pubkey(), &recipient, lamports, &blockhash)?;
        let wire = self.client.sign(&self.keypair, &tx)?;
        let expected = transaction_id(&wire)?;

        let tx_id = self.client.submit(&wire)?;
        if tx_id != expected {
            warn!(%expected, returned = %tx_id, "node returned an unexpected signature");
        }
        debug!(%tx_id, %recipient, lamports, "transfer submitted");
        Ok(tx_id)
    }
}
