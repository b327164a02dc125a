//! Solana primitives for the personal wallet.
//!
//! This crate handles SOL amount parsing and formatting, Base58 addresses,
//! Ed25519 keypairs, the legacy transaction wire format and a small blocking
//! JSON-RPC client, all without pulling in `solana-sdk` (which drags in tokio
//! and 200+ transitive dependencies).
//!
//! Signing uses `ed25519-dalek`, on-curve checks `curve25519-dalek`, and
//! addresses `bs58`.

pub mod address;
pub mod amount;
pub mod error;
pub mod keypair;
pub mod rpc;
pub mod transaction;

pub use address::{parse_recipient, Pubkey};
pub use amount::{format_lamports, parse_sol, Lamports, Sol, LAMPORTS_PER_SOL};
pub use error::{AmountError, SolError};
pub use keypair::Keypair;
pub use rpc::{Cluster, Commitment, RpcClient, SolanaRpc};
pub use transaction::{
    build_sol_transfer, sign_transaction, transaction_id, SolTransaction, SYSTEM_PROGRAM_ID,
};
