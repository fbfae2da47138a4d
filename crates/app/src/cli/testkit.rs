//! Shared fixtures for op tests: two peers with identity files in a temp dir

use std::path::PathBuf;

use tempfile::TempDir;

use crate::cli::op::{Op, OpContext};
use crate::cli::ops::Encrypt;
use crate::state::IdentityConfig;

pub struct Peers {
    pub dir: TempDir,
    pub alice: IdentityConfig,
    pub bob: IdentityConfig,
}

impl Peers {
    /// `alice.toml` and `bob.toml`, each listing the other under `[peers]`
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut alice = IdentityConfig::generate().unwrap();
        let mut bob = IdentityConfig::generate().unwrap();
        alice
            .peers
            .insert("bob".to_string(), bob.private_key.public_key());
        bob.peers
            .insert("alice".to_string(), alice.private_key.public_key());

        alice.save(&dir.path().join("alice.toml"), false).await.unwrap();
        bob.save(&dir.path().join("bob.toml"), false).await.unwrap();
        Self { dir, alice, bob }
    }

    pub fn ctx(&self, name: &str) -> OpContext {
        OpContext::new(Some(self.dir.path().join(format!("{}.toml", name))))
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Encrypt `plaintext` from `from` to `to` and return the path of the raw message
    pub async fn seal(&self, from: &str, to: &str, plaintext: &[u8]) -> PathBuf {
        let input = self.path("plain.txt");
        let output = self.path("sealed.bin");
        tokio::fs::write(&input, plaintext).await.unwrap();
        Encrypt {
            to: to.to_string(),
            input: Some(input),
            output: Some(output.clone()),
        }
        .execute(&self.ctx(from))
        .await
        .unwrap();
        output
    }
}
