mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database};

#[derive(Parser)]
#[command(name = "windfarm", version, about = "Operator commands for the wind-farm maintenance store")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Log SQL statements and loader details
    #[arg(long, default_value_t = false, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Load the CSV snapshots into the store (creates missing tables first)
    Load {
        /// Directory holding the four snapshot files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Print the per-file report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Drop and recreate every table
    ResetDb {
        /// Skip the confirmation prompt
        #[arg(long, short, default_value_t = false)]
        yes: bool,
    },

    /// Permanently delete one maintenance record
    DeleteMaintenance {
        /// Maintenance record ID
        id: i32,
    },

    /// Print every site
    ListSites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let url = args
        .database_url
        .context("No database configured: pass --database-url or set DATABASE_URL")?;

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(2).sqlx_logging(args.debug);
    let db = Database::connect(opts)
        .await
        .context("Failed to connect to the database")?;

    match args.command {
        Command::Load { data_dir, json } => commands::load(&db, &data_dir, json).await,
        Command::ResetDb { yes } => commands::reset_db(&db, yes).await,
        Command::DeleteMaintenance { id } => commands::delete_maintenance(&db, id).await,
        Command::ListSites => commands::list_sites(&db).await,
    }
}
