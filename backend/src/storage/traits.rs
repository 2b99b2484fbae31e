//! # Storage Traits
//!
//! Storage abstractions the domain services are written against. The SQLite
//! implementation lives in [`super::sqlite`]; another backend only has to
//! provide these traits and a [`Connection`] that hands out repositories.

use anyhow::Result;
use async_trait::async_trait;
use shared::BloodType;

use crate::domain::models::{
    blood_request::{BloodRequest, NewBloodRequest},
    donor::{Donor, NewDonor},
    stock::StockEntry,
};

/// Donor registry operations
#[async_trait]
pub trait DonorStorage: Send + Sync {
    /// Store a registered donor and return the id the store assigned
    async fn insert_donor(&self, donor: &NewDonor) -> Result<i64>;

    /// All donors in registration order
    async fn list_donors(&self) -> Result<Vec<Donor>>;
}

/// Blood stock operations
#[async_trait]
pub trait StockStorage: Send + Sync {
    /// Units on hand, or `None` when the type has no stock row
    async fn get_stock(&self, blood_type: BloodType) -> Result<Option<u32>>;

    /// Take `amount` units. Fails with `EligibilityError::StockUnderflow`
    /// when fewer are on hand, leaving the row untouched.
    async fn decrement_stock(&self, blood_type: BloodType, amount: u32) -> Result<()>;

    /// Set the stock level for a type, creating the row if needed
    async fn set_stock(&self, blood_type: BloodType, quantity: u32) -> Result<()>;

    /// All stock rows ordered by blood type label
    async fn list_stock(&self) -> Result<Vec<StockEntry>>;
}

/// Blood request operations
#[async_trait]
pub trait RequestStorage: Send + Sync {
    /// Record a request without touching stock
    async fn insert_request(&self, request: &NewBloodRequest) -> Result<i64>;

    /// Take `request.quantity_needed` units of the requested type and record
    /// the request as one unit of work: either both writes land or neither.
    async fn insert_fulfilled_request(&self, request: &NewBloodRequest) -> Result<i64>;

    /// All requests in submission order
    async fn list_requests(&self) -> Result<Vec<BloodRequest>>;
}

/// A storage connection that creates the repositories the services need.
pub trait Connection: Send + Sync + Clone {
    type DonorRepository: DonorStorage + Clone;
    type StockRepository: StockStorage + Clone;
    type RequestRepository: RequestStorage + Clone;

    fn create_donor_repository(&self) -> Self::DonorRepository;

    fn create_stock_repository(&self) -> Self::StockRepository;

    fn create_request_repository(&self) -> Self::RequestRepository;
}
