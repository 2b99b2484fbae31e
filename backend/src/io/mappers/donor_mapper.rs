use crate::domain::models::donor::Donor as DomainDonor;
use crate::domain::RegisteredDonor;
use shared::{Donor as SharedDonor, DonorListResponse, DonorRegistrationResponse};

/// Mapper from domain donors to shared donor DTOs.
pub struct DonorMapper;

impl DonorMapper {
    pub fn to_dto(domain: DomainDonor) -> SharedDonor {
        SharedDonor {
            donor_id: domain.donor_id,
            name: domain.name,
            dob: domain.dob.format("%Y-%m-%d").to_string(),
            blood_type: domain.blood_type,
            contact: domain.contact,
        }
    }

    pub fn to_donor_list_dto(domain_donors: Vec<DomainDonor>) -> DonorListResponse {
        DonorListResponse {
            donors: domain_donors.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_registration_dto(registered: RegisteredDonor) -> DonorRegistrationResponse {
        DonorRegistrationResponse {
            donor_id: registered.donor_id,
            age: registered.age,
            success_message: format!(
                "Donor {} (Age: {}) registered successfully!",
                registered.name, registered.age
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::BloodType;

    #[test]
    fn test_dob_is_rendered_as_calendar_date() {
        let dto = DonorMapper::to_dto(DomainDonor {
            donor_id: 7,
            name: "Asha Menon".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 3, 2).unwrap(),
            blood_type: BloodType::BNegative,
            contact: "9876543210".to_string(),
        });
        assert_eq!(dto.dob, "1990-03-02");
        assert_eq!(dto.blood_type, BloodType::BNegative);
    }

    #[test]
    fn test_registration_message_names_donor_and_age() {
        let response = DonorMapper::to_registration_dto(RegisteredDonor {
            donor_id: 1,
            name: "Asha Menon".to_string(),
            age: 34,
        });
        assert_eq!(response.age, 34);
        assert_eq!(
            response.success_message,
            "Donor Asha Menon (Age: 34) registered successfully!"
        );
    }
}
