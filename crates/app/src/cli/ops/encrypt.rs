use std::path::PathBuf;

use clap::Args;
use common::prelude::MessageError;

use crate::cli::io::{encode_text, read_input};
use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Encrypt {
    /// Recipient: a name from [peers] or a base58 public key
    #[arg(long)]
    pub to: String,

    /// File to encrypt (reads stdin if omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Write the raw message here (prints base58 if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    #[error("encrypt failed: {0}")]
    StateFailed(#[from] StateError),
    #[error("encrypt failed: {0}")]
    Message(#[from] MessageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Encrypt {
    type Error = EncryptError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = ctx.identity().await?;
        let peer = config.resolve_peer(&self.to)?;

        let plaintext = read_input(self.input.as_deref()).await?;
        let sealed = config.private_key.encrypt(&peer, &plaintext)?;
        tracing::debug!(%peer, plaintext = plaintext.len(), sealed = sealed.len(), "encrypted");

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &sealed).await?;
                Ok(format!(
                    "Sealed {} bytes for {} to: {}",
                    sealed.len(),
                    peer,
                    path.display()
                ))
            }
            None => Ok(encode_text(&sealed)),
        }
    }
}
