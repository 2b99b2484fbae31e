use anyhow::Result;
use shared::BloodType;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use super::models::stock::StockEntry;
use crate::storage::{Connection, StockStorage};

/// Service for reading and administering blood stock levels
#[derive(Clone)]
pub struct StockService<C: Connection> {
    stock_repository: C::StockRepository,
}

impl<C: Connection> StockService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            stock_repository: connection.create_stock_repository(),
        }
    }

    /// Set the units on hand for one blood type
    pub async fn restock(&self, blood_type: BloodType, quantity: u32) -> Result<()> {
        self.stock_repository.set_stock(blood_type, quantity).await?;
        info!("Stock for {} set to {} units", blood_type, quantity);
        Ok(())
    }

    /// Apply a whole table of stock levels
    pub async fn seed(&self, levels: &BTreeMap<BloodType, u32>) -> Result<()> {
        for (blood_type, quantity) in levels {
            self.restock(*blood_type, *quantity).await?;
        }
        info!("Seeded stock for {} blood types", levels.len());
        Ok(())
    }

    pub async fn get_stock(&self, blood_type: BloodType) -> Result<Option<u32>> {
        self.stock_repository.get_stock(blood_type).await
    }

    pub async fn list_stock(&self) -> Result<Vec<StockEntry>> {
        self.stock_repository.list_stock().await
    }
}
