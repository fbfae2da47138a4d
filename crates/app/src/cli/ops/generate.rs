use std::path::PathBuf;

use clap::Args;

use crate::state::{IdentityConfig, StateError};

#[derive(Args, Debug, Clone)]
pub struct Generate {
    /// Write the identity document here instead of printing it
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing identity file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generate failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Generate {
    type Error = GenerateError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = IdentityConfig::generate()?;
        let public_key = config.private_key.public_key();

        match &self.output {
            Some(path) => {
                config.save(path, self.force).await?;
                tracing::info!(path = %path.display(), %public_key, "wrote identity");
                Ok(format!(
                    "Generated identity at: {}\n - Public key: {}",
                    path.display(),
                    public_key
                ))
            }
            None => Ok(config.to_toml()?.trim_end().to_string()),
        }
    }
}
