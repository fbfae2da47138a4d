use clap::Args;

use crate::state::StateError;

/// Print the identity's public key
#[derive(Args, Debug, Clone)]
pub struct PublicKey {
    /// Also list the configured peers
    #[arg(long, default_value_t = false)]
    pub peers: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PublicKeyError {
    #[error("public-key failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for PublicKey {
    type Error = PublicKeyError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = ctx.identity().await?;
        let mut output = config.private_key.public_key().to_text();

        if self.peers {
            for (name, key) in &config.peers {
                output.push_str(&format!("\n{}: {}", name, key));
            }
        }

        Ok(output)
    }
}
