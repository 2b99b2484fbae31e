//! # SQLite Storage Module
//!
//! SQLite implementations of the storage traits, built on an `sqlx` pool.
//!
//! ## Components
//!
//! - **connection.rs** - database creation, schema setup and repository factory
//! - **repositories/** - one repository per table

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{SqliteDonorRepository, SqliteRequestRepository, SqliteStockRepository};
