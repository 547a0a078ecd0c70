//! CLI administration tool for shorturl.
//!
//! Works directly against the configured PostgreSQL database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Allocate (or look up) the token for a URL
//! cargo run --bin admin -- shorten https://example.com/a
//!
//! # Resolve a token
//! cargo run --bin admin -- resolve aZ3kP9q
//!
//! # Show statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`DATABASE_URL` or `DB_*`, `TOKEN_STRATEGY`, ...).

use shorturl::application::services::{Resolver, TokenAllocator, UrlValidator};
use shorturl::application::token::build_generator;
use shorturl::config::{self, Config, StorageBackend, mask_connection_string};
use shorturl::domain::repositories::MappingRepository;
use shorturl::error::AppError;
use shorturl::infrastructure::cache::NullCache;
use shorturl::infrastructure::persistence::PgMappingRepository;
use shorturl::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Allocate a short token for a URL
    Shorten {
        /// Absolute http(s) URL
        url: String,
    },

    /// Show the original URL behind a token
    Resolve {
        /// Short token
        token: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin requires STORAGE_BACKEND=postgres");
    }

    let pool = connect_database(&config).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let repository: Arc<dyn MappingRepository> =
        Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Shorten { url } => shorten(&config, repository, &url).await?,
        Commands::Resolve { token } => resolve(repository, &token).await?,
        Commands::Stats => stats(repository).await?,
        Commands::Db { action } => match action {
            DbAction::Check => db_check(&config, &pool).await?,
        },
    }

    Ok(())
}

/// Validates and allocates a token, printing the mapping.
async fn shorten(config: &Config, repository: Arc<dyn MappingRepository>, url: &str) -> Result<()> {
    UrlValidator::new(config.validate_dns)
        .validate(url)
        .await
        .map_err(|e| anyhow::anyhow!("Invalid URL: {}", describe(&e)))?;

    let generator = build_generator(config.generator_settings(), repository.clone());
    let allocator = TokenAllocator::new(repository, generator, config.max_allocation_attempts);

    let token = allocator
        .allocate(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to allocate token: {}", describe(&e)))?;

    println!("{}", "Short URL allocated".green().bold());
    println!("  Original: {}", url.cyan());
    println!("  Token:    {}", token.bright_yellow().bold());
    println!("  Path:     /api/shorturl/{}", token);

    Ok(())
}

/// Looks up a token and prints its original URL.
async fn resolve(repository: Arc<dyn MappingRepository>, token: &str) -> Result<()> {
    let resolver = Resolver::new(repository, Arc::new(NullCache::new()));

    match resolver.resolve(token).await {
        Ok(url) => {
            println!("  {} -> {}", token.bright_yellow(), url.cyan());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("  No mapping for '{}'", token).yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Lookup failed: {}", describe(&e))),
    }
}

/// Displays the number of stored mappings.
async fn stats(repository: Arc<dyn MappingRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let count = repository
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  Mappings: {}", count.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Runs a trivial query and reports the server version.
async fn db_check(config: &Config, pool: &PgPool) -> Result<()> {
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(pool)
        .await
        .context("Database query failed")?;

    let target = config
        .database_url
        .as_deref()
        .map(mask_connection_string)
        .unwrap_or_default();

    println!("{}", "Database connection OK".green().bold());
    println!("  URL:     {}", target.bright_black());
    println!("  Version: {}", version.bright_black());

    Ok(())
}

/// Error message plus any structured details.
fn describe(e: &AppError) -> String {
    let details = match e {
        AppError::InvalidUrl { details, .. }
        | AppError::NotFound { details, .. }
        | AppError::Storage { details, .. } => details,
    };

    if details.is_null() || details.as_object().is_some_and(|o| o.is_empty()) {
        e.to_string()
    } else {
        format!("{} ({})", e, details)
    }
}
