//! # Domain Module
//!
//! Business rules for the blood bank: who may donate, which requests are
//! accepted, and how a request is served from stock.
//!
//! ## Module Organization
//!
//! - **validators**: pure field checks (dates, phone numbers, email addresses, age)
//! - **eligibility**: ordered donor and request checks built from the validators
//! - **fulfillment**: the stock decision for an authorized request
//! - **donor_service / request_service / stock_service**: orchestration over storage
//!
//! ## Business Rules
//!
//! - Donors must be 18 to 65 years old and free of every listed medical risk
//! - Requests must carry authorization before stock is looked at
//! - A request is Fulfilled only when stock covers the full quantity; there is
//!   no partial fulfillment and a Pending request is never revisited
//! - A Fulfilled request and its stock decrement are stored together or not at all

pub mod clock;
pub mod donor_service;
pub mod eligibility;
pub mod errors;
pub mod fulfillment;
pub mod models;
pub mod request_service;
pub mod stock_service;
pub mod validators;

pub use clock::{Clock, FixedClock, SystemClock};
pub use donor_service::{DonorService, RegisteredDonor};
pub use eligibility::EligibilityError;
pub use errors::ServiceError;
pub use request_service::{RequestService, SubmittedRequest};
pub use stock_service::StockService;
