pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sealbox")]
#[command(about = "Generate peer keys and seal messages to peers")]
pub struct Args {
    /// Path to the identity file (defaults to ~/.sealbox/identity.toml)
    #[arg(long, global = true)]
    pub identity: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
