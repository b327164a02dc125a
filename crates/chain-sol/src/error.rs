use thiserror::Error;

/// Solana chain operation errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("rpc error: {0}")]
    Rpc(String),
}

impl From<reqwest::Error> for SolError {
    fn from(e: reqwest::Error) -> Self {
        SolError::Rpc(e.to_string())
    }
}

/// Errors produced while parsing a decimal SOL amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty sol value")]
    EmptyInput,

    #[error("invalid sol value: {0}")]
    InvalidFormat(String),

    #[error("invalid sol value: decimal part too long: {0}")]
    PrecisionOverflow(String),

    #[error("sol value out of range: {0}")]
    Overflow(String),
}
