//! Mindgraph CLI entry point

use clap::{Parser, Subcommand};
use mindgraph_core::RelationKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mindgraph")]
#[command(about = "Knowledge graph editor sync client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Base URL of the graph API, e.g. http://localhost:8000/api/v1
    /// (falls back to an in-memory demo graph when unset)
    #[arg(long, env = "MINDGRAPH_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the graph API
    #[arg(long, env = "MINDGRAPH_TOKEN")]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the graph and print its topics and edges
    Show,
    /// Connect two topics and save
    Connect {
        /// Source topic (id or exact title)
        source: String,
        /// Target topic (id or exact title)
        target: String,
        /// Relation kind: prerequisite, follows, similar, opposite, parent,
        /// child, or related
        #[arg(short, long, default_value = "related")]
        kind: RelationKind,
    },
    /// Remove the edge between two topics and save
    Disconnect {
        source: String,
        target: String,
    },
    /// Move a topic to a new position and save
    Move {
        /// Topic (id or exact title)
        id: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "mindgraph={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Show => commands::show(cli.api_url, cli.token).await,
        Commands::Connect {
            source,
            target,
            kind,
        } => commands::connect(cli.api_url, cli.token, source, target, kind).await,
        Commands::Disconnect { source, target } => {
            commands::disconnect(cli.api_url, cli.token, source, target).await
        }
        Commands::Move { id, x, y } => commands::move_topic(cli.api_url, cli.token, id, x, y).await,
        Commands::Version => {
            println!("Mindgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
