pub mod blood_request;
pub mod donor;
pub mod stock;
