//! Eligibility policy for donor registrations and blood requests.
//!
//! Each check runs in a fixed order and the first failing check decides the
//! rejection, so a form with several problems always reports the same one.

use chrono::{NaiveDate, NaiveDateTime};
use shared::{BloodRequestForm, BloodType, DonorRegistrationForm, Urgency};

use super::validators::{
    compute_age, is_future_date, is_ten_digit_phone, is_valid_email, parse_calendar_date,
};

pub const MIN_DONOR_AGE: i32 = 18;
pub const MAX_DONOR_AGE: i32 = 65;

/// Why a submission was not accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("Please fill in all mandatory fields ({0} is empty).")]
    MissingField(&'static str),
    #[error("Invalid {0} format. Please use YYYY-MM-DD.")]
    InvalidDate(&'static str),
    #[error("{0} cannot be a future date.")]
    FutureDate(&'static str),
    #[error("Age must be between 18 and 65 to donate blood (age {0}).")]
    AgeIneligible(i32),
    #[error("Please enter a valid 10-digit {0}.")]
    InvalidPhone(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("'{0}' is not a recognised blood type.")]
    InvalidBloodType(String),
    #[error("'{0}' is not a recognised urgency level.")]
    InvalidUrgency(String),
    #[error("Quantity needed must be a positive whole number, got '{0}'.")]
    InvalidQuantity(String),
    #[error("Donors with medical history are not eligible to donate blood.")]
    MedicalRiskIneligible,
    #[error("You must provide consent to register.")]
    ConsentRequired,
    #[error("You must have authorization to submit request.")]
    AuthorizationRequired,
    #[error("Cannot take {requested} units of {blood_type}: only {available} in stock.")]
    StockUnderflow {
        blood_type: BloodType,
        requested: u32,
        available: u32,
    },
}

/// A donor registration that passed every check
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleDonor {
    pub name: String,
    pub dob: NaiveDate,
    pub blood_type: BloodType,
    pub contact: String,
    pub age: i32,
}

/// A blood request that passed every check, including authorization
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizedRequest {
    pub requestor_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub blood_type: BloodType,
    pub quantity: u32,
    pub urgency: Urgency,
    pub patient_name: String,
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), EligibilityError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(EligibilityError::MissingField(*name)),
        None => Ok(()),
    }
}

fn parse_blood_type(raw: &str) -> Result<BloodType, EligibilityError> {
    raw.parse()
        .map_err(|_| EligibilityError::InvalidBloodType(raw.to_string()))
}

/// Run the donor registration checks against the form as of `now`.
pub fn check_donor(
    form: &DonorRegistrationForm,
    now: NaiveDateTime,
) -> Result<EligibleDonor, EligibilityError> {
    require(&[
        ("name", form.name.as_str()),
        ("gender", form.gender.as_str()),
        ("email", form.email.as_str()),
        ("nationality", form.nationality.as_str()),
        ("date of birth", form.dob.as_str()),
        ("blood type", form.blood_type.as_str()),
        ("contact", form.contact.as_str()),
    ])?;

    let dob = parse_calendar_date(&form.dob)
        .map_err(|_| EligibilityError::InvalidDate("Date of Birth"))?;

    if is_future_date(&form.dob, now) {
        return Err(EligibilityError::FutureDate("Date of Birth"));
    }

    let age = compute_age(dob, now.date());
    if !(MIN_DONOR_AGE..=MAX_DONOR_AGE).contains(&age) {
        return Err(EligibilityError::AgeIneligible(age));
    }

    if !is_ten_digit_phone(&form.contact) {
        return Err(EligibilityError::InvalidPhone("phone number"));
    }

    if !is_valid_email(&form.email) {
        return Err(EligibilityError::InvalidEmail);
    }

    let blood_type = parse_blood_type(&form.blood_type)?;

    let risk_flags = [
        form.prior_transfusion,
        form.chronic_illness,
        form.allergies,
        form.recent_surgery,
        form.current_medication,
        form.high_risk_history,
    ];
    if risk_flags.iter().any(|flag| *flag) {
        return Err(EligibilityError::MedicalRiskIneligible);
    }

    if !form.last_donation.is_empty() {
        if parse_calendar_date(&form.last_donation).is_err() {
            return Err(EligibilityError::InvalidDate("Last Donation date"));
        }
        if is_future_date(&form.last_donation, now) {
            return Err(EligibilityError::FutureDate("Last donation date"));
        }
    }

    if !is_ten_digit_phone(&form.emergency_contact_number) {
        return Err(EligibilityError::InvalidPhone("emergency phone number"));
    }

    if !form.consent {
        return Err(EligibilityError::ConsentRequired);
    }

    Ok(EligibleDonor {
        name: form.name.trim().to_string(),
        dob,
        blood_type,
        contact: form.contact.clone(),
        age,
    })
}

/// Run the blood request checks. Authorization is the last gate, so an
/// `Ok` result means stock may be consulted.
pub fn check_request(form: &BloodRequestForm) -> Result<AuthorizedRequest, EligibilityError> {
    require(&[
        ("requestor name", form.requestor_name.as_str()),
        ("contact number", form.contact_number.as_str()),
        ("email address", form.email_address.as_str()),
        ("blood type", form.blood_type_required.as_str()),
        ("quantity needed", form.quantity_needed.as_str()),
        ("urgency", form.urgency.as_str()),
        ("patient name", form.patient_name.as_str()),
        ("patient age", form.patient_age.as_str()),
        ("patient condition", form.patient_condition.as_str()),
    ])?;

    if !is_ten_digit_phone(&form.contact_number) {
        return Err(EligibilityError::InvalidPhone("phone number"));
    }

    if !is_valid_email(&form.email_address) {
        return Err(EligibilityError::InvalidEmail);
    }

    let blood_type = parse_blood_type(&form.blood_type_required)?;
    let urgency: Urgency = form
        .urgency
        .parse()
        .map_err(|_| EligibilityError::InvalidUrgency(form.urgency.clone()))?;
    let quantity = match form.quantity_needed.trim().parse::<u32>() {
        Ok(quantity) if quantity > 0 => quantity,
        _ => return Err(EligibilityError::InvalidQuantity(form.quantity_needed.clone())),
    };

    if !form.approval {
        return Err(EligibilityError::AuthorizationRequired);
    }

    Ok(AuthorizedRequest {
        requestor_name: form.requestor_name.trim().to_string(),
        contact_number: form.contact_number.clone(),
        email_address: form.email_address.clone(),
        blood_type,
        quantity,
        urgency,
        patient_name: form.patient_name.trim().to_string(),
    })
}
