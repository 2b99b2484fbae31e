use chrono::NaiveDateTime;
use shared::{BloodType, RequestStatus, Urgency};

/// Text layout of `created_at`, the same shape SQLite's CURRENT_TIMESTAMP uses
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored blood request. Status is fixed when the request is created.
#[derive(Debug, Clone, PartialEq)]
pub struct BloodRequest {
    pub request_id: i64,
    pub requestor_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub blood_type_required: BloodType,
    pub quantity_needed: u32,
    pub urgency: Urgency,
    pub patient_name: String,
    pub created_at: NaiveDateTime,
    pub status: RequestStatus,
}

/// Request fields written on submission; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewBloodRequest {
    pub requestor_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub blood_type_required: BloodType,
    pub quantity_needed: u32,
    pub urgency: Urgency,
    pub patient_name: String,
    pub created_at: NaiveDateTime,
    pub status: RequestStatus,
}
