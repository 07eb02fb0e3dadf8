//! Dynamic pricing CLI - schema, user and export management.
//!
//! # Usage
//!
//! ```bash
//! # Create the SQLite schema
//! dp-cli init-db
//!
//! # Create a user
//! dp-cli user create --username alice --password 's3cret!'
//!
//! # Export the filtered product set
//! dp-cli export --format csv --margin-min 0.2 --margin-max 0.6 --output prices.csv
//! ```
//!
//! # Commands
//!
//! - `init-db` - Create the schema (idempotent)
//! - `user create` - Create a dashboard user
//! - `export` - Write suggested prices to a file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use dynamic_pricing_dashboard::pricing::ProductFilter;

mod commands;

use commands::export::FormatArg;

#[derive(Parser)]
#[command(name = "dp-cli")]
#[command(author, version, about = "Dynamic pricing dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    InitDb,
    /// Manage dashboard users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Export suggested prices
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: FormatArg,

        /// Keep SKUs containing this text (case-insensitive)
        #[arg(long)]
        sku: Option<String>,

        /// Lower margin bound, 0 to 1
        #[arg(long)]
        margin_min: Option<f64>,

        /// Upper margin bound, 0 to 1
        #[arg(long)]
        margin_max: Option<f64>,

        /// File to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::InitDb => commands::db::init().await?,
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                commands::user::create(&username, &password).await?;
            }
        },
        Commands::Export {
            format,
            sku,
            margin_min,
            margin_max,
            output,
        } => {
            let filter = ProductFilter::new(sku.as_deref(), margin_min, margin_max);
            commands::export::run(format, &filter, &output).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "dp-cli",
            "export",
            "--format",
            "xlsx",
            "--margin-min",
            "0.3",
            "--output",
            "out.xlsx",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Export {
                format: FormatArg::Xlsx,
                margin_min: Some(_),
                margin_max: None,
                ..
            })
        ));
    }
}
