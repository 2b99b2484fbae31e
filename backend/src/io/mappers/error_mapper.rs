use crate::domain::{EligibilityError, ServiceError};
use shared::{SubmissionError, SubmissionErrorKind};
use tracing::error;

/// Turns domain failures into the tagged errors the presentation layer shows.
pub struct ErrorMapper;

impl ErrorMapper {
    pub fn kind_of(err: &EligibilityError) -> SubmissionErrorKind {
        match err {
            EligibilityError::MissingField(_) => SubmissionErrorKind::MissingField,
            EligibilityError::InvalidDate(_) => SubmissionErrorKind::InvalidDate,
            EligibilityError::FutureDate(_) => SubmissionErrorKind::FutureDate,
            EligibilityError::AgeIneligible(_) => SubmissionErrorKind::AgeIneligible,
            EligibilityError::InvalidPhone(_) => SubmissionErrorKind::InvalidPhone,
            EligibilityError::InvalidEmail => SubmissionErrorKind::InvalidEmail,
            EligibilityError::InvalidBloodType(_) => SubmissionErrorKind::InvalidBloodType,
            EligibilityError::InvalidUrgency(_) => SubmissionErrorKind::InvalidUrgency,
            EligibilityError::InvalidQuantity(_) => SubmissionErrorKind::InvalidQuantity,
            EligibilityError::MedicalRiskIneligible => SubmissionErrorKind::MedicalRiskIneligible,
            EligibilityError::ConsentRequired => SubmissionErrorKind::ConsentRequired,
            EligibilityError::AuthorizationRequired => SubmissionErrorKind::AuthorizationRequired,
            EligibilityError::StockUnderflow { .. } => SubmissionErrorKind::StockUnderflow,
        }
    }

    pub fn to_dto(err: ServiceError) -> SubmissionError {
        match err {
            ServiceError::Eligibility(eligibility) => SubmissionError {
                kind: Self::kind_of(&eligibility),
                message: eligibility.to_string(),
            },
            ServiceError::Storage(storage) => Self::from_storage(storage),
        }
    }

    /// Store failures keep their detail in the log, not in the message shown
    pub fn from_storage(err: anyhow::Error) -> SubmissionError {
        error!("Storage failure: {:#}", err);
        SubmissionError {
            kind: SubmissionErrorKind::Infrastructure,
            message: "The blood bank database is unavailable. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::BloodType;

    #[test]
    fn test_eligibility_errors_keep_their_message() {
        let err = ServiceError::Eligibility(EligibilityError::AgeIneligible(17));
        let dto = ErrorMapper::to_dto(err);
        assert_eq!(dto.kind, SubmissionErrorKind::AgeIneligible);
        assert_eq!(dto.message, EligibilityError::AgeIneligible(17).to_string());
    }

    #[test]
    fn test_underflow_has_its_own_tag() {
        let err = EligibilityError::StockUnderflow {
            blood_type: BloodType::OPositive,
            requested: 4,
            available: 1,
        };
        assert_eq!(ErrorMapper::kind_of(&err), SubmissionErrorKind::StockUnderflow);
    }

    #[test]
    fn test_storage_failures_are_infrastructure() {
        let dto = ErrorMapper::to_dto(ServiceError::Storage(anyhow::anyhow!("database is locked")));
        assert_eq!(dto.kind, SubmissionErrorKind::Infrastructure);
        assert!(!dto.message.contains("locked"));
    }
}
