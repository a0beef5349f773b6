//! CLI administration tool for slug-shortener.
//!
//! Inspects and manages slug reservations and short links directly against
//! PostgreSQL, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show who holds a slug
//! cargo run --bin admin -- reservation show promo
//!
//! # List a company's slugs
//! cargo run --bin admin -- reservation list acme
//!
//! # Reserve (or refresh) a slug for a company
//! cargo run --bin admin -- reservation reserve acme promo
//!
//! # Show a short link and its hit counter
//! cargo run --bin admin -- entry show aZ3kQ9 --slug promo
//!
//! # Generate a value for ALLOWED_API_TOKENS
//! cargo run --bin admin -- token generate
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server (`DATABASE_URL` or `DB_*`), plus
//! `RESERVATION_DURATION_SECONDS` for `reservation reserve`.

use slug_shortener::application::services::{
    AllocationConfig, AllocationService, ReservationConfig, ReservationService,
};
use slug_shortener::config::{Config, StorageBackend, mask_connection_string};
use slug_shortener::domain::entities::{GLOBAL_NAMESPACE, ReservationState, SlugReservation};
use slug_shortener::infrastructure::persistence::{
    PgSlugReservationRepository, PgUrlEntryRepository,
};
use slug_shortener::server::connect_pool;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing slug-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage slug reservations
    Reservation {
        #[command(subcommand)]
        action: ReservationAction,
    },

    /// Inspect short links
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// API token helpers
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum ReservationAction {
    /// Show the current reservation of a slug
    Show { slug: String },

    /// List slugs attributed to a company
    List { company_id: String },

    /// Reserve or refresh a slug for a company
    Reserve { company_id: String, slug: String },
}

#[derive(Subcommand)]
enum EntryAction {
    /// Show a short link with its hit counter
    Show {
        code: String,

        /// Company slug the code is published under (global if omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Print a random token suitable for ALLOWED_API_TOKENS
    Generate,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Token {
        action: TokenAction::Generate,
    } = cli.command
    {
        println!("{}", generate_token());
        return Ok(());
    }

    // the admin tool always talks to PostgreSQL
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if config.storage_backend == StorageBackend::Memory {
        config.storage_backend = StorageBackend::Postgres;
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Reservation { action } => {
            handle_reservation_action(action, &pool, &config).await?
        }
        Commands::Entry { action } => handle_entry_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
        Commands::Token { .. } => {}
    }

    Ok(())
}

fn reservation_service(
    pool: &PgPool,
    config: &Config,
) -> ReservationService<PgSlugReservationRepository> {
    ReservationService::new(
        Arc::new(PgSlugReservationRepository::new(Arc::new(pool.clone()))),
        ReservationConfig {
            reservation_duration: config.reservation_duration(),
        },
    )
}

/// Dispatches reservation commands.
async fn handle_reservation_action(
    action: ReservationAction,
    pool: &PgPool,
    config: &Config,
) -> Result<()> {
    let service = reservation_service(pool, config);

    match action {
        ReservationAction::Show { slug } => {
            let reservation = service
                .reservation(&slug)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            print_reservation(&reservation);
        }
        ReservationAction::List { company_id } => {
            let slugs = service
                .list_slugs_for(&company_id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list slugs: {}", e))?;

            println!(
                "{} {}",
                "📋 Slugs of".bright_blue().bold(),
                company_id.cyan().bold()
            );
            println!();

            if slugs.is_empty() {
                println!("{}", "  No slugs found".yellow());
                return Ok(());
            }

            for slug in &slugs {
                println!("  {}", slug);
            }

            println!();
            println!("  Total: {}", slugs.len().to_string().bright_white().bold());
        }
        ReservationAction::Reserve { company_id, slug } => {
            let reservation = service
                .reserve(&company_id, &slug)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to reserve slug: {}", e))?;

            println!("{}", "✅ Slug reserved".green().bold());
            println!();
            print_reservation(&reservation);
        }
    }

    Ok(())
}

/// Prints a reservation with its state at the current time.
fn print_reservation(reservation: &SlugReservation) {
    let state = match reservation.state_at(Utc::now()) {
        ReservationState::TemporaryHeld { expires_at, .. } => format!(
            "{} until {}",
            "TEMPORARY".yellow(),
            expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        ReservationState::Expired { expired_at, .. } => format!(
            "{} since {}",
            "EXPIRED".red(),
            expired_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        ReservationState::Permanent { .. } => "PERMANENT".green().to_string(),
    };

    println!("  Slug:    {}", reservation.slug.cyan());
    println!("  Owner:   {}", reservation.owner.bright_white().bold());
    println!("  State:   {}", state);
    println!(
        "  Created: {}",
        reservation
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
}

/// Dispatches short link commands.
async fn handle_entry_action(action: EntryAction, pool: &PgPool) -> Result<()> {
    match action {
        EntryAction::Show { code, slug } => {
            let service = AllocationService::new(
                Arc::new(PgUrlEntryRepository::new(Arc::new(pool.clone()))),
                AllocationConfig::default(),
            );
            let namespace = slug.as_deref().unwrap_or(GLOBAL_NAMESPACE);

            let entry = service
                .entry(namespace, &code)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "🔗 Short link".bright_blue().bold());
            println!();
            println!("  Path:      {}", entry.short_path().cyan());
            println!("  Long URL:  {}", entry.long_url.bright_white());
            if let Some(ref record_id) = entry.record_id {
                println!("  Record ID: {}", record_id);
            }
            println!(
                "  Accessed:  {}",
                entry.times_accessed.to_string().bright_green().bold()
            );
            match entry.last_accessed {
                Some(at) => println!("  Last:      {}", at.format("%Y-%m-%d %H:%M")),
                None => println!("  Last:      {}", "never".bright_black()),
            }
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_entries")
                .fetch_one(pool)
                .await?;

            let reservations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slug_reservations")
                .fetch_one(pool)
                .await?;

            if let Some(ref url) = config.database_url {
                println!("  Database:     {}", mask_connection_string(url).bright_black());
            }
            println!("  PostgreSQL:   {}", version.bright_white());
            println!("  Short links:  {}", entries.to_string().bright_green().bold());
            println!(
                "  Reservations: {}",
                reservations.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Generates a random API token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
