//! Blocking JSON-RPC client for a Solana node.
//!
//! Only the four calls a personal wallet needs are implemented. Each call is
//! a single HTTP POST; failures surface immediately, nothing is retried.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::address::{address_to_bytes, Pubkey};
use crate::amount::Lamports;
use crate::error::SolError;

/// Timeout for a single RPC request.
const RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC request ID counter.
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// The network operations the wallet delegates to a node.
pub trait SolanaRpc {
    fn get_balance(&self, pubkey: &Pubkey) -> Result<Lamports, SolError>;

    /// Returns the airdrop transaction signature.
    fn request_airdrop(&self, pubkey: &Pubkey, lamports: Lamports) -> Result<String, SolError>;

    fn get_latest_blockhash(&self) -> Result<[u8; 32], SolError>;

    /// Submit signed wire bytes; returns the transaction signature.
    fn send_transaction(&self, wire: &[u8]) -> Result<String, SolError>;
}

impl<T: SolanaRpc + ?Sized> SolanaRpc for &T {
    fn get_balance(&self, pubkey: &Pubkey) -> Result<Lamports, SolError> {
        (**self).get_balance(pubkey)
    }

    fn request_airdrop(&self, pubkey: &Pubkey, lamports: Lamports) -> Result<String, SolError> {
        (**self).request_airdrop(pubkey, lamports)
    }

    fn get_latest_blockhash(&self) -> Result<[u8; 32], SolError> {
        (**self).get_latest_blockhash()
    }

    fn send_transaction(&self, wire: &[u8]) -> Result<String, SolError> {
        (**self).send_transaction(wire)
    }
}

/// Well-known clusters, or a custom endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
    Custom(String),
}

impl Cluster {
    pub fn url(&self) -> &str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Custom(url) => url,
        }
    }
}

impl FromStr for Cluster {
    type Err = SolError;

    /// Accepts the `solana` CLI monikers (`devnet`, `d`, `mainnet-beta`,
    /// `m`, ...) or an `http(s)://` URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "devnet" | "d" => Ok(Cluster::Devnet),
            "testnet" | "t" => Ok(Cluster::Testnet),
            "mainnet-beta" | "mainnet" | "m" => Ok(Cluster::MainnetBeta),
            "localnet" | "localhost" | "l" => Ok(Cluster::Localnet),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Cluster::Custom(s.to_string()))
            }
            _ => Err(SolError::Rpc(format!("unknown cluster or URL: {s}"))),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

/// Commitment level attached to queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    fn as_str(self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// JSON-RPC 2.0 request
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// `{"context": {...}, "value": ...}` wrapper used by most query methods.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
}

/// HTTP JSON-RPC client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    commitment: Commitment,
    http: reqwest::blocking::Client,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, commitment: Commitment) -> Result<Self, SolError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()?;
        Ok(Self {
            url: url.into(),
            commitment,
            http,
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, SolError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: REQUEST_ID.fetch_add(1, Ordering::SeqCst),
            method,
            params,
        };
        debug!(method, id = request.id, url = %self.url, "rpc request");

        let response = self.http.post(&self.url).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SolError::Rpc(format!("HTTP error: {status}")));
        }

        let body: JsonRpcResponse<T> = response.json()?;
        unwrap_response(body)
    }

    fn commitment_config(&self) -> Value {
        json!({ "commitment": self.commitment.as_str() })
    }
}

impl SolanaRpc for RpcClient {
    fn get_balance(&self, pubkey: &Pubkey) -> Result<Lamports, SolError> {
        let balance: WithContext<Lamports> = self.call(
            "getBalance",
            json!([pubkey.to_string(), self.commitment_config()]),
        )?;
        Ok(balance.value)
    }

    fn request_airdrop(&self, pubkey: &Pubkey, lamports: Lamports) -> Result<String, SolError> {
        self.call(
            "requestAirdrop",
            json!([pubkey.to_string(), lamports, self.commitment_config()]),
        )
    }

    fn get_latest_blockhash(&self) -> Result<[u8; 32], SolError> {
        let latest: WithContext<LatestBlockhash> =
            self.call("getLatestBlockhash", json!([self.commitment_config()]))?;
        parse_blockhash(&latest.value.blockhash)
    }

    fn send_transaction(&self, wire: &[u8]) -> Result<String, SolError> {
        let encoded = general_purpose::STANDARD.encode(wire);
        self.call(
            "sendTransaction",
            json!([
                encoded,
                {
                    "encoding": "base64",
                    "preflightCommitment": self.commitment.as_str(),
                }
            ]),
        )
    }
}

fn unwrap_response<T>(body: JsonRpcResponse<T>) -> Result<T, SolError> {
    if let Some(error) = body.error {
        return Err(SolError::Rpc(format!(
            "RPC error {}: {}",
            error.code, error.message
        )));
    }
    body.result
        .ok_or_else(|| SolError::Rpc("missing result in RPC response".into()))
}

fn parse_blockhash(blockhash: &str) -> Result<[u8; 32], SolError> {
    address_to_bytes(blockhash)
        .map_err(|e| SolError::Rpc(format!("malformed blockhash {blockhash}: {e}")))
}
