pub mod donor_mapper;
pub mod error_mapper;
pub mod request_mapper;
pub mod stock_mapper;

pub use donor_mapper::DonorMapper;
pub use error_mapper::ErrorMapper;
pub use request_mapper::RequestMapper;
pub use stock_mapper::StockMapper;
