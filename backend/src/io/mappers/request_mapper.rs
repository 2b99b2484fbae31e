use crate::domain::models::blood_request::{BloodRequest as DomainRequest, CREATED_AT_FORMAT};
use crate::domain::SubmittedRequest;
use shared::{BloodRequest as SharedRequest, BloodRequestListResponse, BloodRequestResponse};

/// Mapper from domain blood requests to shared request DTOs.
pub struct RequestMapper;

impl RequestMapper {
    pub fn to_dto(domain: DomainRequest) -> SharedRequest {
        SharedRequest {
            request_id: domain.request_id,
            requestor_name: domain.requestor_name,
            contact_number: domain.contact_number,
            email_address: domain.email_address,
            blood_type_required: domain.blood_type_required,
            quantity_needed: domain.quantity_needed,
            urgency: domain.urgency,
            patient_name: domain.patient_name,
            created_at: domain.created_at.format(CREATED_AT_FORMAT).to_string(),
            status: domain.status,
        }
    }

    pub fn to_request_list_dto(domain_requests: Vec<DomainRequest>) -> BloodRequestListResponse {
        BloodRequestListResponse {
            requests: domain_requests.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_submission_dto(submitted: SubmittedRequest) -> BloodRequestResponse {
        BloodRequestResponse {
            request_id: submitted.request_id,
            status: submitted.status,
            message: submitted.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{BloodType, RequestStatus, Urgency};

    #[test]
    fn test_created_at_uses_store_timestamp_layout() {
        let created_at = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        let dto = RequestMapper::to_dto(DomainRequest {
            request_id: 3,
            requestor_name: "Dr. Iyer".to_string(),
            contact_number: "9123456780".to_string(),
            email_address: "iyer@cityhospital.org".to_string(),
            blood_type_required: BloodType::ONegative,
            quantity_needed: 2,
            urgency: Urgency::Critical,
            patient_name: "Kiran Rao".to_string(),
            created_at,
            status: RequestStatus::Pending,
        });
        assert_eq!(dto.created_at, "2024-06-15 09:05:03");
        assert_eq!(dto.status, RequestStatus::Pending);
    }
}
