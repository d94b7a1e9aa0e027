//! Print the normalized form of a connection string

use anyhow::Result;
use clap::Parser;

use tasklist_server::config::{normalize_connection_string, redact_connection_string};

/// Arguments for the normalize-url command
#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Connection string to normalize
    pub url: String,

    /// Print the password instead of `***`
    #[arg(long)]
    pub show_password: bool,
}

pub fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let normalized = normalize_connection_string(&args.url)?;

    if args.show_password {
        println!("{}", normalized);
    } else {
        println!("{}", redact_connection_string(&normalized));
    }

    Ok(())
}
