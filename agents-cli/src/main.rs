//! agents-api CLI - HTTP API over the `agents` table
//!
//! - `serve`: run the HTTP server against MySQL/MariaDB (or in memory)
//! - `ping`: check database connectivity and print the agent count
//!
//! Configuration comes from flags, environment variables, and a `.env`
//! file in the working directory (loaded first, never overriding the
//! real environment).

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "agents-api",
    author,
    version,
    about = "REST API for the agents table (list, aggregates, create, update, delete)"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check database connectivity and print the number of agents
    Ping(commands::ping::PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; a malformed one is reported once tracing is up
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env file");
        }
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Ping(args) => commands::run_ping(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
