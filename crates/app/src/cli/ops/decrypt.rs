use std::path::PathBuf;

use clap::Args;
use common::prelude::{MessageError, PublicKey};

use crate::cli::io::{decode_text, read_input};
use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Decrypt {
    /// File holding the raw message (reads base58 from stdin if omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Write the plaintext here (prints it if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only accept messages from this peer: a name from [peers] or a base58 public key
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    #[error("decrypt failed: {0}")]
    StateFailed(#[from] StateError),
    #[error("decrypt failed: {0}")]
    Message(#[from] MessageError),
    #[error("decrypt failed: message is not base58: {0}")]
    Encoding(#[from] bs58::decode::Error),
    #[error("decrypt failed: message is from {actual}, expected {expected}")]
    UnexpectedSender {
        expected: PublicKey,
        actual: PublicKey,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Decrypt {
    type Error = DecryptError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = ctx.identity().await?;
        let expected = match &self.from {
            Some(peer) => Some(config.resolve_peer(peer)?),
            None => None,
        };

        let data = match &self.input {
            Some(path) => read_input(Some(path.as_path())).await?,
            None => decode_text(&read_input(None).await?)?,
        };

        let (sender, plaintext) = config.private_key.decrypt(&data)?;
        if let Some(expected) = expected {
            if expected != sender {
                return Err(DecryptError::UnexpectedSender {
                    expected,
                    actual: sender,
                });
            }
        }
        tracing::debug!(%sender, plaintext = plaintext.len(), "decrypted");

        let from = config
            .peer_name(&sender)
            .map(str::to_string)
            .unwrap_or_else(|| sender.to_text());

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &plaintext).await?;
                Ok(format!(
                    "Opened {} bytes from {} to: {}",
                    plaintext.len(),
                    from,
                    path.display()
                ))
            }
            None => Ok(format!(
                "from: {}\n{}",
                from,
                String::from_utf8_lossy(&plaintext)
            )),
        }
    }
}
