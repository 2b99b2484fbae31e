use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::repositories::{SqliteDonorRepository, SqliteRequestRepository, SqliteStockRepository};
use crate::storage::traits::Connection;

/// DbConnection owns the pool behind every SQLite repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and set up its schema
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database {}", url))?;
        }

        // One connection: submissions are processed one at a time, and an
        // in-memory database only lives as long as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Open a private in-memory database
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS donors (
                donor_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                dob TEXT NOT NULL,
                blood_type TEXT NOT NULL,
                contact TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blood_stock (
                blood_type TEXT PRIMARY KEY,
                quantity INTEGER NOT NULL CHECK (quantity >= 0)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blood_requests (
                request_id INTEGER PRIMARY KEY AUTOINCREMENT,
                requestor_name TEXT NOT NULL,
                contact_number TEXT NOT NULL,
                email_address TEXT NOT NULL,
                blood_type_required TEXT NOT NULL,
                quantity_needed INTEGER NOT NULL,
                urgency TEXT NOT NULL,
                patient_name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                status TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type DonorRepository = SqliteDonorRepository;
    type StockRepository = SqliteStockRepository;
    type RequestRepository = SqliteRequestRepository;

    fn create_donor_repository(&self) -> Self::DonorRepository {
        SqliteDonorRepository::new(self.clone())
    }

    fn create_stock_repository(&self) -> Self::StockRepository {
        SqliteStockRepository::new(self.clone())
    }

    fn create_request_repository(&self) -> Self::RequestRepository {
        SqliteRequestRepository::new(self.clone())
    }
}
