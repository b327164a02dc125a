//! Personal wallet core: key storage, configuration and the wallet façade.
//!
//! A [`Wallet`] binds one Ed25519 keypair, persisted by a [`KeyStore`] at a
//! caller-chosen path, to a [`ChainClient`]. Amounts are lamports; use
//! [`chain_sol::parse_sol`] and [`chain_sol::format_lamports`] at the edges.

pub mod client;
pub mod config;
pub mod error;
pub mod keystore;
pub mod wallet;

pub use client::{ChainClient, TxId};
pub use config::WalletConfig;
pub use error::WalletError;
pub use keystore::KeyStore;
pub use wallet::Wallet;
