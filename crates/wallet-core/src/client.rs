//! The chain capability a [`Wallet`](crate::Wallet) is bound to.
//!
//! Key generation, signing, blockhash lookup, submission, balance and airdrop
//! all go through [`ChainClient`], so wallet logic can be exercised against an
//! in-memory implementation. Every [`SolanaRpc`] is a `ChainClient`; key
//! generation and signing default to local Ed25519.

use chain_sol::{sign_transaction, Keypair, Lamports, Pubkey, SolTransaction, SolanaRpc};

use crate::error::WalletError;

/// Base58 transaction signature returned by the network.
pub type TxId = String;

pub trait ChainClient {
    fn new_keypair(&self) -> Keypair {
        Keypair::generate()
    }

    /// Sign a compiled transaction, returning wire bytes.
    fn sign(&self, signer: &Keypair, tx: &SolTransaction) -> Result<Vec<u8>, WalletError> {
        Ok(sign_transaction(tx, signer)?)
    }

    fn get_recent_blockhash(&self) -> Result<[u8; 32], WalletError>;

    fn submit(&self, wire: &[u8]) -> Result<TxId, WalletError>;

    fn get_balance(&self, pubkey: &Pubkey) -> Result<Lamports, WalletError>;

    fn request_airdrop(&self, pubkey: &Pubkey, lamports: Lamports) -> Result<TxId, WalletError>;
}

impl<R: SolanaRpc> ChainClient for R {
    fn get_recent_blockhash(&self) -> Result<[u8; 32], WalletError> {
        Ok(self.get_latest_blockhash()?)
    }

    fn submit(&self, wire: &[u8]) -> Result<TxId, WalletError> {
        Ok(self.send_transaction(wire)?)
    }

    fn get_balance(&self, pubkey: &Pubkey) -> Result<Lamports, WalletError> {
        Ok(SolanaRpc::get_balance(self, pubkey)?)
    }

    fn request_airdrop(&self, pubkey: &Pubkey, lamports: Lamports) -> Result<TxId, WalletError> {
        Ok(SolanaRpc::request_airdrop(self, pubkey, lamports)?)
    }
}
