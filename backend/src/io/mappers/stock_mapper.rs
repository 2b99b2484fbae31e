use crate::domain::models::stock::StockEntry as DomainStockEntry;
use shared::{StockEntry as SharedStockEntry, StockListResponse};

pub struct StockMapper;

impl StockMapper {
    pub fn to_dto(domain: DomainStockEntry) -> SharedStockEntry {
        SharedStockEntry {
            blood_type: domain.blood_type,
            quantity: domain.quantity,
        }
    }

    pub fn to_stock_list_dto(entries: Vec<DomainStockEntry>) -> StockListResponse {
        StockListResponse {
            stock: entries.into_iter().map(Self::to_dto).collect(),
        }
    }
}
