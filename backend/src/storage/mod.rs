//! # Storage Module
//!
//! Persistence for donors, blood stock and blood requests.
//!
//! The domain services only see the traits in [`traits`]; the SQLite
//! implementation in [`sqlite`] is what the application wires in.
//!
//! ## Tables
//!
//! - **donors** - one row per successful registration, ids assigned by the store
//! - **blood_stock** - units on hand keyed by blood type
//! - **blood_requests** - every accepted request with the status it was given
//!
//! A fulfilled request and its stock decrement are written in one
//! transaction; see [`traits::RequestStorage::insert_fulfilled_request`].

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{Connection, DonorStorage, RequestStorage, StockStorage};
