// Repository modules
pub mod donor_repository;
pub mod request_repository;
pub mod stock_repository;

// Re-export repository types
pub use donor_repository::SqliteDonorRepository;
pub use request_repository::SqliteRequestRepository;
pub use stock_repository::SqliteStockRepository;
