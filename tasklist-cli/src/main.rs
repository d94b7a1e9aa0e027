//! tasklist CLI - run and inspect the task-list HTTP service
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `check`: verify the database connection and task table
//! - `normalize-url`: print a connection string the way the server will use it

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    author,
    version,
    about = "Task-list HTTP service backed by Postgres"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check database connectivity and the task table
    Check(commands::check::CheckArgs),
    /// Normalize a database connection string
    NormalizeUrl(commands::normalize::NormalizeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Check(args) => commands::run_check(args).await?,
        Commands::NormalizeUrl(args) => commands::run_normalize(args)?,
    }
    Ok(())
}
