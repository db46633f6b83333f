use std::process::ExitCode;

use anyhow::Context;
use classpulse::cli::seeder::{SeedOutcome, seed_feedback};
use classpulse::cli::{check_database, create_admin, reset_admin_password};
use classpulse::classpulse_config::{DatabaseConfig, ServerConfig};
use classpulse::classpulse_db::{PgPool, close_db_pool, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "classpulse-cli")]
#[command(about = "ClassPulse CLI - Administrative tools for the feedback service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// Login name (prompted if not provided)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Set an admin's password, creating the admin if it does not exist
    ResetAdminPassword {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Fill an empty feedback table with sample submissions
    Seed {
        /// Number of submissions to generate
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,

        /// Seed even when feedback already exists
        #[arg(long)]
        force: bool,
    },
    /// Check connectivity and print row counts
    CheckDb,
}

fn prompt_username(username: Option<String>) -> anyhow::Result<String> {
    match username {
        Some(username) => Ok(username),
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username"),
    }
}

fn prompt_password(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password"),
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config).await?;
    if config.run_migrations {
        run_migrations(&pool).await?;
    }
    Ok(pool)
}

async fn run(command: Commands, pool: &PgPool) -> anyhow::Result<()> {
    let bcrypt_cost = ServerConfig::from_env().bcrypt_cost;

    match command {
        Commands::CreateAdmin { username, password } => {
            let username = prompt_username(username)?;
            let password = prompt_password(password)?;
            let admin = create_admin(pool, &username, &password, bcrypt_cost).await?;
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", admin.username);
            println!("   ID: {}", admin.id);
        }
        Commands::ResetAdminPassword { username, password } => {
            let username = prompt_username(username)?;
            let password = prompt_password(password)?;
            let admin = reset_admin_password(pool, &username, &password, bcrypt_cost).await?;
            println!("\n✅ Password set for admin '{}'", admin.username);
        }
        Commands::Seed { count, force } => match seed_feedback(pool, count, force).await? {
            SeedOutcome::Inserted(inserted) => {
                println!("\n🌱 Inserted {inserted} sample feedback submissions");
            }
            SeedOutcome::Skipped { existing } => {
                println!(
                    "\nℹ️  Feedback table already has {existing} rows; use --force to seed anyway"
                );
            }
        },
        Commands::CheckDb => {
            println!("\n✅ Database connection OK\n");
            for count in check_database(pool).await? {
                println!("   {:<18} {:>8}", count.table, count.rows);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classpulse=warn,sqlx=warn".into()),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("\n❌ {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(cli.command, &pool).await;
    close_db_pool(&pool).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}
