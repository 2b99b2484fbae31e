//! # Bloodlink Backend
//!
//! Core of a blood bank: donor registration against an eligibility policy,
//! blood requests served from stock, and the SQLite store behind both.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (any front end)
//!     ↓
//! IO Layer (commands, DTO mappers)
//!     ↓
//! Domain Layer (validators, eligibility, fulfillment, services)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::BackendConfig;
use crate::domain::{Clock, DonorService, RequestService, StockService, SystemClock};
use crate::logging::LoggingError;
use crate::storage::DbConnection;

/// Application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub donor_service: DonorService<DbConnection>,
    pub request_service: RequestService<DbConnection>,
    pub stock_service: StockService<DbConnection>,
}

impl AppState {
    /// Build every service over one store and one clock
    pub fn new(db_conn: DbConnection, clock: Arc<dyn Clock>) -> Self {
        let db_conn = Arc::new(db_conn);
        Self {
            donor_service: DonorService::new(db_conn.clone(), clock.clone()),
            request_service: RequestService::new(db_conn.clone(), clock),
            stock_service: StockService::new(db_conn),
        }
    }
}

/// Initialize logging and the backend with all required services.
///
/// A log subscriber the host already installed is kept as it is.
pub async fn initialize_backend(config: &BackendConfig) -> Result<AppState> {
    match logging::init(&config.logging) {
        Ok(()) => {}
        Err(LoggingError::Subscriber(_)) => debug!("Log subscriber already installed"),
        Err(err) => return Err(err.into()),
    }

    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let app_state = AppState::new(db_conn, Arc::new(SystemClock));

    if let Some(levels) = &config.stock_seed {
        app_state.stock_service.seed(levels).await?;
    }

    Ok(app_state)
}
