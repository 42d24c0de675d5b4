//! Command-line interface for roster-bench.
//!
//! # Usage Examples
//!
//! ```bash
//! # Stream 10M synthetic employees to data/employees.json (NDJSON)
//! roster-bench generate --total-records 10000000 -o data/employees.json
//!
//! # Serve the read/search API (newest-first profile, port 3500)
//! roster-bench serve --db-host db --db-name bigdata_db
//!
//! # Legacy ascending listing on port 3000
//! roster-bench serve --profile oldest-first
//! ```

use clap::{Parser, Subcommand};
use roster_bench::{generate, serve};
use roster_generator::GenerateArgs;
use roster_server::ServeArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-bench")]
#[command(about = "Synthetic employee roster generator and search-strategy benchmark service")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic employee dataset as NDJSON
    Generate(GenerateArgs),
    /// Serve the employee read/search API
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_bench=info,roster_generator=info,roster_server=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::run_generate(args).await,
        Commands::Serve(args) => serve::run_serve(args).await,
    }
}
