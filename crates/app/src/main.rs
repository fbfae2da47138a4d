// CLI modules
mod cli;
mod state;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Decrypt, Encrypt, Generate, PublicKey, Version};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Decrypt, Decrypt),
    (Encrypt, Encrypt),
    (Generate, Generate),
    (PublicKey, PublicKey),
    (Version, Version),
}

/// Log to stderr so stdout carries only command output.
/// Returns a guard that must be kept alive for the duration of the program.
fn init_logging(log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    let (stderr_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_level: tracing::Level = log_level.parse().unwrap_or(tracing::Level::WARN);

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stderr_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    guard
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let _guard = init_logging(&args.log_level);

    let ctx = cli::op::OpContext::new(args.identity);

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            // flush buffered log lines before exiting
            drop(_guard);
            std::process::exit(1);
        }
    }
}
