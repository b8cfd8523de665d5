//! Shiptrack CLI - database migrations, seed data and user provisioning.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema migrations and create the session table
//! shiptrack-cli migrate
//!
//! # Insert the default warehouses (only into an empty table)
//! shiptrack-cli seed warehouses
//!
//! # Create a user of any role, including managers
//! shiptrack-cli user create -n "Meera Iyer" -e meera@example.com -r manager -p 'long password'
//! ```
//!
//! # Environment Variables
//!
//! - `SHIPTRACK_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use shiptrack_core::Role;

mod commands;

#[derive(Parser)]
#[command(name = "shiptrack-cli")]
#[command(author, version, about = "Shiptrack CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert reference data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert the default hub warehouses
    Warehouses,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role (`manager`, `driver`, `customer`)
        #[arg(short, long)]
        role: Role,

        /// Initial password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let pool = commands::connect().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&pool).await?,
        Commands::Seed { target } => match target {
            SeedTarget::Warehouses => commands::seed::warehouses(&pool).await?,
        },
        Commands::User { action } => match action {
            UserAction::Create {
                name,
                email,
                role,
                password,
            } => commands::user::create(&pool, &name, &email, role, &password).await?,
        },
    }

    pool.close().await;
    Ok(())
}
