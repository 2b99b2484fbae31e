//! # IO Module
//!
//! Adapter layer between a presentation layer and the domain services.
//!
//! ## Key Responsibilities
//!
//! - **Commands**: one async function per user action, taking `&AppState`
//! - **Mapping**: domain models to the DTOs in the `shared` crate
//! - **Error Translation**: domain failures to a tagged `SubmissionError`
//!
//! The layer holds no business rules; a desktop, web or CLI front end can
//! drive the same commands.

pub mod commands;
pub mod mappers;

pub use commands::*;
