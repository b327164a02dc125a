//! Wallet configuration: which node to talk to and where the key lives.
//!
//! Values come from an optional TOML file; the command line overrides them.
//!
//! ```toml
//! url = "devnet"                       # or mainnet-beta, localnet, https://...
//! keypair_path = "/home/me/.local/share/personal-wallet/id.key"
//! commitment = "confirmed"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chain_sol::{Cluster, Commitment, RpcClient};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::keystore::KeyStore;

const APP_DIR: &str = "personal-wallet";
const CONFIG_FILE: &str = "config.toml";
const KEY_FILE: &str = "id.key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletConfig {
    /// Cluster moniker or RPC URL.
    pub url: String,
    pub keypair_path: PathBuf,
    pub commitment: Commitment,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            url: "devnet".to_string(),
            keypair_path: default_keypair_path(),
            commitment: Commitment::default(),
        }
    }
}

impl WalletConfig {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicitly named file must exist; a missing default file just
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, WalletError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text)
                .map_err(|e| WalletError::Config(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(WalletError::FileNotFound(path)),
            Err(source) => Err(WalletError::Io { path, source }),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, WalletError> {
        let config: Self = toml::from_str(text).map_err(|e| WalletError::Config(e.to_string()))?;
        config.cluster()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, url: Option<String>, keypair_path: Option<PathBuf>) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(path) = keypair_path {
            self.keypair_path = path;
        }
        self
    }

    pub fn cluster(&self) -> Result<Cluster, WalletError> {
        self.url
            .parse()
            .map_err(|_| WalletError::Config(format!("unknown cluster or URL: {}", self.url)))
    }

    pub fn key_store(&self) -> KeyStore {
        KeyStore::new(&self.keypair_path)
    }

    pub fn rpc_client(&self) -> Result<RpcClient, WalletError> {
        let cluster = self.cluster()?;
        Ok(RpcClient::new(cluster.url(), self.commitment)?)
    }
}

/// `<config dir>/personal-wallet/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// `<data dir>/personal-wallet/id.key`, falling back to `./data`.
pub fn default_keypair_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join(KEY_FILE))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_devnet() {
        let config = WalletConfig::default();
        assert_eq!(config.cluster().unwrap(), Cluster::Devnet);
        assert_eq!(config.commitment, Commitment::Confirmed);
    }

    #[test]
    fn parse_full_file() {
        let config = WalletConfig::from_toml(
            r#"
            url = "http://127.0.0.1:8899"
            keypair_path = "/tmp/wallet.key"
            commitment = "finalized"
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster().unwrap(), Cluster::Custom("http://127.0.0.1:8899".into()));
        assert_eq!(config.keypair_path, PathBuf::from("/tmp/wallet.key"));
        assert_eq!(config.commitment, Commitment::Finalized);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = WalletConfig::from_toml("url = \"testnet\"").unwrap();
        assert_eq!(config.cluster().unwrap(), Cluster::Testnet);
        assert_eq!(config.keypair_path, default_keypair_path());
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = WalletConfig::from_toml("rpc = \"devnet\"").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn bad_cluster_rejected() {
        let err = WalletConfig::from_toml("url = \"moon\"").unwrap_err();
        assert!(err.to_string().contains("moon"));
    }

    #[test]
    fn overrides_win() {
        let config = WalletConfig::default()
            .with_overrides(Some("localnet".into()), Some(PathBuf::from("k.key")));
        assert_eq!(config.cluster().unwrap(), Cluster::Localnet);
        assert_eq!(config.key_store().path(), Path::new("k.key"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = WalletConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, WalletError::FileNotFound(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "url = \"mainnet-beta\"\ncommitment = \"processed\"\n").unwrap();
        let config = WalletConfig::load(Some(&path)).unwrap();
        assert_eq!(config.cluster().unwrap(), Cluster::MainnetBeta);
        assert_eq!(config.commitment, Commitment::Processed);
    }
}
