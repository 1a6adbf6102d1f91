//! Wayfarer CLI — the main entry point.
//!
//! Commands:
//! - `chat`      — Interactive concierge session or single-message mode
//! - `tools`     — List the registered travel tools
//! - `handshake` — Dump the simulated MCP handshake sequence
//! - `doctor`    — Check the Ollama backend and configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "wayfarer",
    about = "Wayfarer — AI travel concierge with tool-calling",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the travel concierge
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List the registered travel tools
    Tools {
        /// Also print each tool's parameter schema
        #[arg(short, long)]
        schemas: bool,
    },

    /// Print the simulated MCP handshake sequence
    Handshake,

    /// Check backend health and configuration
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Tools { schemas } => commands::tools::run(schemas)?,
        Commands::Handshake => commands::handshake::run()?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
