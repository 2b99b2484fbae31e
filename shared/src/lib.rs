use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ABO/Rh blood group. Serialized with its clinical label ("A+", "AB-", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "AB+")]
    ABPositive,
    #[serde(rename = "AB-")]
    ABNegative,
}

impl BloodType {
    /// Every blood type, in the order the registration dropdown lists them
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::ABPositive,
        BloodType::ABNegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
            BloodType::ABPositive => "AB+",
            BloodType::ABNegative => "AB-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label does not name one of the eight blood types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBloodTypeError(pub String);

impl fmt::Display for ParseBloodTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown blood type '{}'", self.0)
    }
}

impl std::error::Error for ParseBloodTypeError {}

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        BloodType::ALL
            .into_iter()
            .find(|blood_type| blood_type.as_str() == label)
            .ok_or_else(|| ParseBloodTypeError(s.to_string()))
    }
}

/// How quickly a blood request has to be served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Normal,
    Urgent,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "Normal",
            Urgency::Urgent => "Urgent",
            Urgency::Critical => "Critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Urgency::Normal),
            "urgent" => Ok(Urgency::Urgent),
            "critical" => Ok(Urgency::Critical),
            _ => Err(format!("unknown urgency '{}'", s)),
        }
    }
}

/// Outcome recorded on a blood request when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Fulfilled,
    Pending,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Fulfilled => "Fulfilled",
            RequestStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fulfilled" => Ok(RequestStatus::Fulfilled),
            "Pending" => Ok(RequestStatus::Pending),
            other => Err(format!("unknown request status '{}'", other)),
        }
    }
}

/// A registered donor as shown in the donor list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub donor_id: i64,
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    pub blood_type: BloodType,
    pub contact: String,
}

/// Units of blood on hand for one blood type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub blood_type: BloodType,
    pub quantity: u32,
}

/// A stored blood request as shown in the request details view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub request_id: i64,
    pub requestor_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub blood_type_required: BloodType,
    pub quantity_needed: u32,
    pub urgency: Urgency,
    pub patient_name: String,
    /// Creation time (YYYY-MM-DD HH:MM:SS)
    pub created_at: String,
    pub status: RequestStatus,
}

/// Raw field values from the donor registration form.
///
/// Text fields hold exactly what was typed; check boxes are booleans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonorRegistrationForm {
    pub name: String,
    pub gender: String,
    pub dob: String,
    pub blood_type: String,
    pub address: String,
    pub contact: String,
    pub email: String,
    pub nationality: String,
    pub prior_transfusion: bool,
    pub chronic_illness: bool,
    pub allergies: bool,
    pub recent_surgery: bool,
    pub current_medication: bool,
    pub high_risk_history: bool,
    pub donated_before: bool,
    pub last_donation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub consent: bool,
}

impl DonorRegistrationForm {
    /// Reset every field, as the form does after any submission
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Raw field values from the blood request form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodRequestForm {
    pub requestor_name: String,
    pub organization_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub blood_type_required: String,
    pub quantity_needed: String,
    pub urgency: String,
    pub purpose: String,
    pub patient_name: String,
    pub patient_age: String,
    pub patient_condition: String,
    pub special_requirements: String,
    pub approval: bool,
}

impl BloodRequestForm {
    /// Reset every field, as the form does after any submission
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorRegistrationResponse {
    pub donor_id: i64,
    pub age: i32,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequestResponse {
    pub request_id: i64,
    pub status: RequestStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorListResponse {
    pub donors: Vec<Donor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockListResponse {
    pub stock: Vec<StockEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequestListResponse {
    pub requests: Vec<BloodRequest>,
}

/// Tag identifying why a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionErrorKind {
    MissingField,
    InvalidDate,
    FutureDate,
    AgeIneligible,
    InvalidPhone,
    InvalidEmail,
    InvalidBloodType,
    InvalidUrgency,
    InvalidQuantity,
    MedicalRiskIneligible,
    ConsentRequired,
    AuthorizationRequired,
    StockUnderflow,
    /// The store could not be reached or a query failed
    Infrastructure,
}

/// Rejection returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionError {
    pub kind: SubmissionErrorKind,
    pub message: String,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SubmissionError {}
