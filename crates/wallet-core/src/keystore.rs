//! File-backed storage of the wallet's private key.
//!
//! The store holds exactly the 64 raw `seed || public` bytes of the active
//! keypair. Writes replace the file in full via a sibling temp file and a
//! rename, so a reader never observes a half-written key. There is no
//! locking: two processes writing at once race, and the last rename wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use zeroize::Zeroizing;

use crate::error::WalletError;

/// Location of the persisted private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the stored key bytes.
    pub fn read(&self) -> Result<Zeroizing<Vec<u8>>, WalletError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Zeroizing::new(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(WalletError::NotInitialized(self.path.clone()))
            }
            Err(source) => Err(WalletError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Replace the stored key bytes.
    pub fn write(&self, key_bytes: &[u8]) -> Result<(), WalletError> {
        let io_err = |source| WalletError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp = self.temp_path();
        let written = write_private(&tmp, key_bytes).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(source));
        }

        info!(path = %self.path.display(), "saved wallet key");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "wallet".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Read a key file chosen by the user for import.
pub fn read_source(path: &Path) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Zeroizing::new(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(WalletError::FileNotFound(path.to_path_buf()))
        }
        Err(source) => Err(WalletError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write with owner-only permissions where the platform supports it.
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
    };

    #[cfg(not(unix))]
    let mut file = fs::File::create(path)?;

    file.write_all(bytes)?;
    file.sync_all()
}
