//! HipChat Notify CLI
//!
//! Concourse resource entry point: `hipchat-notify out <ROOT_DIR>`

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use hipchat_notify::cli::{handle_out, OutArgs};

#[derive(Parser)]
#[command(name = "hipchat-notify")]
#[command(about = "Post Concourse build notifications to a HipChat room")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose and send a notification (reads the request JSON from stdin)
    Out(OutArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the version document, logs go to stderr.
    // RUST_LOG=debug hipchat-notify out /tmp/build
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hipchat_notify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Out(args) => {
            let code = handle_out(args).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
