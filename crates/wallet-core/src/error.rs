use std::path::PathBuf;

use chain_sol::{AmountError, SolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid keypair: {0}")]
    DecodeError(String),

    #[error("No wallet found at {}. Create or import one first.", .0.display())]
    NotInitialized(PathBuf),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Transaction build failed: {0}")]
    TransactionFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<SolError> for WalletError {
    fn from(e: SolError) -> Self {
        match e {
            SolError::InvalidPrivateKey(msg) => WalletError::DecodeError(msg),
            SolError::InvalidAddress(msg) => WalletError::InvalidAddress(msg),
            SolError::TransactionBuildError(msg) | SolError::SerializationError(msg) => {
                WalletError::TransactionFailed(msg)
            }
            SolError::SigningError(msg) => WalletError::SigningFailed(msg),
            SolError::Rpc(msg) => WalletError::NetworkError(msg),
        }
    }
}
