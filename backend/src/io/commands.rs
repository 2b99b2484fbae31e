//! # Presentation Commands
//!
//! The calls a presentation layer makes: two submissions and three listings.
//! Each takes the application state and returns shared DTOs, or a
//! `SubmissionError` tagged with why the call was rejected. Clearing the
//! form after an outcome is left to the caller (see `clear()` on the forms).

use shared::{
    BloodRequestForm, BloodRequestListResponse, BloodRequestResponse, DonorListResponse,
    DonorRegistrationForm, DonorRegistrationResponse, StockListResponse, SubmissionError,
};
use tracing::info;

use super::mappers::{DonorMapper, ErrorMapper, RequestMapper, StockMapper};
use crate::AppState;

/// Register a donor
pub async fn register_donor(
    state: &AppState,
    form: DonorRegistrationForm,
) -> Result<DonorRegistrationResponse, SubmissionError> {
    info!("register_donor - blood type '{}'", form.blood_type);

    state
        .donor_service
        .register_donor(&form)
        .await
        .map(DonorMapper::to_registration_dto)
        .map_err(ErrorMapper::to_dto)
}

/// Submit a blood request and serve it from stock if possible
pub async fn submit_blood_request(
    state: &AppState,
    form: BloodRequestForm,
) -> Result<BloodRequestResponse, SubmissionError> {
    info!(
        "submit_blood_request - {} units of '{}' ({})",
        form.quantity_needed, form.blood_type_required, form.urgency
    );

    state
        .request_service
        .submit_request(&form)
        .await
        .map(RequestMapper::to_submission_dto)
        .map_err(ErrorMapper::to_dto)
}

pub async fn list_donors(state: &AppState) -> Result<DonorListResponse, SubmissionError> {
    state
        .donor_service
        .list_donors()
        .await
        .map(DonorMapper::to_donor_list_dto)
        .map_err(ErrorMapper::from_storage)
}

pub async fn list_blood_stock(state: &AppState) -> Result<StockListResponse, SubmissionError> {
    state
        .stock_service
        .list_stock()
        .await
        .map(StockMapper::to_stock_list_dto)
        .map_err(ErrorMapper::from_storage)
}

pub async fn list_blood_requests(
    state: &AppState,
) -> Result<BloodRequestListResponse, SubmissionError> {
    state
        .request_service
        .list_requests()
        .await
        .map(RequestMapper::to_request_list_dto)
        .map_err(ErrorMapper::from_storage)
}
