use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newscurator_core::{ai::SummaryLength, AppConfig, SentimentFilter, UserSelection};

mod commands;

#[derive(Parser)]
#[command(name = "newscurator")]
#[command(author, version, about = "Personalized news: fetch by topic, filter by sentiment, summarize")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Run one curation pass and print the results
    Fetch {
        /// Topic to search for
        #[arg(short, long)]
        topic: String,
        /// Sentiment filter: both, positive or negative
        #[arg(short, long, default_value = "both")]
        sentiment: SentimentFilter,
        /// Summary length: short or detailed
        #[arg(short, long, default_value = "short")]
        length: SummaryLength,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Fetch {
            topic,
            sentiment,
            length,
            json,
        }) => {
            let selection = UserSelection::new(topic, sentiment, length);
            commands::fetch::run(&config, selection, json).await
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

/// Logs go to stderr. While the TUI owns the terminal they stay off unless
/// RUST_LOG asks for them.
fn init_logging(config: &AppConfig, tui: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) if tui => EnvFilter::new("off"),
        Err(_) => EnvFilter::new(&config.general.log_level),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
