//! Connectivity check command
//!
//! Normalizes the configured connection string, connects, makes sure the
//! task table exists, and reports how many rows it holds.

use anyhow::{Context, Result};
use clap::Parser;

use tasklist_server::config::{normalize_connection_string, redact_connection_string};
use tasklist_server::db::TaskRepo;
use tasklist_server::schema::ensure_schema;

use super::serve::DatabaseArgs;

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_check(args: CheckArgs) -> Result<()> {
    let raw = args
        .db
        .raw_url()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL or POSTGRES_URL")?;
    let normalized = normalize_connection_string(&raw)?;
    println!("url:    {}", redact_connection_string(&normalized));

    let engine = args.db.engine();
    engine.ping().await.context("Database unreachable")?;
    println!("status: connected");

    let pool = engine.handle()?;
    ensure_schema(pool)
        .await
        .context("Failed to create task table")?;

    let count = TaskRepo::new(pool).count().await?;
    println!("tasks:  {}", count);

    Ok(())
}
