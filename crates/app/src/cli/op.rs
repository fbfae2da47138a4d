use std::error::Error;
use std::path::PathBuf;

use crate::state::{IdentityConfig, StateError};

#[derive(Clone, Debug)]
pub struct OpContext {
    /// Optional custom identity path (defaults to ~/.sealbox/identity.toml)
    pub identity_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(identity_path: Option<PathBuf>) -> Self {
        Self { identity_path }
    }

    /// Resolve and load the identity this invocation acts as
    pub async fn identity(&self) -> Result<IdentityConfig, StateError> {
        let path = IdentityConfig::path(self.identity_path.clone())?;
        tracing::debug!(path = %path.display(), "loading identity");
        IdentityConfig::load(&path).await
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
