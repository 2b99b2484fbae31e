use chrono::NaiveDate;
use shared::BloodType;

/// A registered donor as stored in the `donors` table
#[derive(Debug, Clone, PartialEq)]
pub struct Donor {
    pub donor_id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub blood_type: BloodType,
    pub contact: String,
}

/// Donor fields written on registration; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonor {
    pub name: String,
    pub dob: NaiveDate,
    pub blood_type: BloodType,
    pub contact: String,
}
