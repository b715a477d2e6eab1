//! Mentora CLI — the main entry point.
//!
//! Commands:
//! - `onboard`       — Initialize config directory
//! - `chat`          — Interactive advisory session
//! - `ask`           — Single-message mode
//! - `history`       — Show recent conversation history
//! - `clear-history` — Delete a user's conversation history
//! - `serve`         — Start the HTTP gateway

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mentora",
    about = "Mentora — conversational career advisor",
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
    /// Initialize configuration
    Onboard,

    /// Chat with the career advisor
    Chat {
        /// User id for profile and history
        #[arg(short, long, default_value = "default")]
        user: String,
    },

    /// Send a single message and print the reply
    Ask {
        /// User id for profile and history
        #[arg(short, long, default_value = "default")]
        user: String,

        /// The message to send
        #[arg(short, long)]
        message: String,
    },

    /// Show recent conversation history, newest first
    History {
        /// User id
        #[arg(short, long, default_value = "default")]
        user: String,

        /// How many turns to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Delete a user's conversation history
    ClearHistory {
        /// User id
        #[arg(short, long, default_value = "default")]
        user: String,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { user } => commands::chat::run(&user).await?,
        Commands::Ask { user, message } => commands::ask::run(&user, &message).await?,
        Commands::History { user, limit } => commands::history::run(&user, limit).await?,
        Commands::ClearHistory { user } => commands::history::clear(&user).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
    }

    Ok(())
}
