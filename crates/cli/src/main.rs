//! EduReach CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! edureach migrate
//!
//! # Seed the super admin (prints a temporary password when -p is omitted)
//! edureach admin bootstrap -e owner@example.com -n "Owner"
//!
//! # Create a regular admin
//! edureach admin create -e staff@example.com -n "Staff" -p "temporary-pass"
//!
//! # Load site content from YAML
//! edureach seed content crates/cli/seed/content.yaml
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "edureach")]
#[command(author, version, about = "EduReach CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create the super admin. Refuses if one already exists.
    Bootstrap {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Temporary password (generated when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create a regular admin
    Create {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Temporary password (generated when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert services, testimonials, program images, and blog posts from YAML
    Content {
        /// Path to the YAML file
        file: String,

        /// Skip resources that already have rows
        #[arg(long)]
        if_empty: bool,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Bootstrap {
                email,
                name,
                password,
            } => {
                commands::admin::bootstrap(&email, &name, password).await?;
            }
            AdminAction::Create {
                email,
                name,
                password,
            } => {
                commands::admin::create(&email, &name, password).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Content { file, if_empty } => {
                commands::seed::content(&file, if_empty).await?;
            }
        },
    }
    Ok(())
}
