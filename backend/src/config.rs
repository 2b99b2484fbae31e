//! Start-up configuration read from `BLOODLINK_*` environment variables.

use shared::BloodType;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LoggingConfig;

pub const DATABASE_URL_VAR: &str = "BLOODLINK_DATABASE_URL";
pub const LOG_LEVEL_VAR: &str = "BLOODLINK_LOG_LEVEL";
pub const STOCK_SEED_VAR: &str = "BLOODLINK_STOCK_SEED";

const DATA_DIRECTORY: &str = "bloodlink";
const DATABASE_FILE: &str = "blood_donation_platform.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot create data directory {path}")]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read stock seed file {path}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stock seed file {path} must map blood types to unit counts")]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Everything the backend needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub database_url: String,
    pub logging: LoggingConfig,
    /// Stock levels applied at start-up, if a seed file was configured
    pub stock_seed: Option<BTreeMap<BloodType, u32>>,
}

impl BackendConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = match var(DATABASE_URL_VAR) {
            Some(url) => url,
            None => default_database_url()?,
        };

        let logging = var(LOG_LEVEL_VAR)
            .map(|log_level| LoggingConfig { log_level })
            .unwrap_or_default();

        let stock_seed = var(STOCK_SEED_VAR)
            .map(|path| read_stock_seed(PathBuf::from(path)))
            .transpose()?;

        Ok(Self {
            database_url,
            logging,
            stock_seed,
        })
    }
}

/// `sqlite:<data dir>/bloodlink/blood_donation_platform.db`, creating the
/// directory. Falls back to the working directory when the platform has no
/// data directory.
fn default_database_url() -> Result<String, ConfigError> {
    let Some(data_dir) = dirs::data_dir() else {
        return Ok(format!("sqlite:{}", DATABASE_FILE));
    };

    let directory = data_dir.join(DATA_DIRECTORY);
    std::fs::create_dir_all(&directory).map_err(|source| ConfigError::DataDirectory {
        path: directory.clone(),
        source,
    })?;

    Ok(format!("sqlite:{}", directory.join(DATABASE_FILE).display()))
}

/// Parse a YAML map such as `O+: 12` into stock levels
pub fn read_stock_seed(path: PathBuf) -> Result<BTreeMap<BloodType, u32>, ConfigError> {
    let yaml = std::fs::read_to_string(&path).map_err(|source| ConfigError::SeedRead {
        path: path.clone(),
        source,
    })?;

    serde_yaml::from_str(&yaml).map_err(|source| ConfigError::SeedFormat { path, source })
}
