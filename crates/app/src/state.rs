use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use common::prelude::{KeyError, PrivateKey, PublicKey};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "sealbox";
pub const IDENTITY_FILE_NAME: &str = "identity.toml";

/// A peer identity document
///
/// ```toml
/// private_key = "<base58>"
/// public_key = "<base58>"
///
/// [peers]
/// alice = "<base58>"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Our own key pair, in its full 64-byte text form
    pub private_key: PrivateKey,
    /// Informational copy of our public key, checked against `private_key` on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKey>,
    /// Known peers by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peers: BTreeMap<String, PublicKey>,
}

impl IdentityConfig {
    /// Create a document around a freshly generated key pair
    pub fn generate() -> Result<Self, StateError> {
        let private_key = PrivateKey::generate()?;
        Ok(Self {
            private_key,
            public_key: Some(private_key.public_key()),
            peers: BTreeMap::new(),
        })
    }

    /// Get the identity file path (custom or default ~/.sealbox/identity.toml)
    pub fn path(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)).join(IDENTITY_FILE_NAME))
    }

    pub fn from_toml(text: &str) -> Result<Self, StateError> {
        let config: IdentityConfig = toml::from_str(text)?;
        if let Some(public_key) = config.public_key {
            if public_key != config.private_key.public_key() {
                return Err(StateError::PublicKeyMismatch);
            }
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, StateError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load an identity document from disk
    pub async fn load(path: &Path) -> Result<Self, StateError> {
        if !path.exists() {
            return Err(StateError::NotFound(path.to_path_buf()));
        }
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_toml(&text)
    }

    /// Write the document to `path`, creating parent directories.
    /// Refuses to replace an existing file unless `force` is set.
    pub async fn save(&self, path: &Path, force: bool) -> Result<(), StateError> {
        if path.exists() && !force {
            return Err(StateError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, self.to_toml()?).await?;
        Ok(())
    }

    /// Resolve a peer by name from `[peers]`, falling back to a base58 public key
    pub fn resolve_peer(&self, peer: &str) -> Result<PublicKey, StateError> {
        if let Some(key) = self.peers.get(peer) {
            return Ok(*key);
        }
        PublicKey::from_text(peer).map_err(|e| StateError::UnknownPeer(peer.to_string(), e))
    }

    /// Name a public key if it is listed under `[peers]`
    pub fn peer_name(&self, key: &PublicKey) -> Option<&str> {
        self.peers
            .iter()
            .find(|(_, known)| *known == key)
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("identity file not found: {0}. Run 'sealbox generate --output {0}' first")]
    NotFound(PathBuf),

    #[error("identity file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("public_key does not match private_key")]
    PublicKeyMismatch,

    #[error("unknown peer '{0}': not a configured name or public key ({1})")]
    UnknownPeer(String, KeyError),

    #[error("key error: {0}")]
    Key(#[from] KeyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
