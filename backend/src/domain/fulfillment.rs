//! Decides whether a blood request can be served from current stock.

use shared::{BloodType, RequestStatus};

/// Outcome of matching one request against a stock snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentDecision {
    pub status: RequestStatus,
    /// The requested units come out of stock in the same write as the request
    pub takes_stock: bool,
    pub message: String,
}

/// Match `requested` units of `blood_type` against `available` stock.
///
/// `available` is `None` when there is no stock row for the type at all.
pub fn decide(
    blood_type: BloodType,
    requested: u32,
    available: Option<u32>,
    patient_name: &str,
) -> FulfillmentDecision {
    match available {
        None => FulfillmentDecision {
            status: RequestStatus::Pending,
            takes_stock: false,
            message: format!(
                "Currently out of stock for {}. Blood request for {} is pending.",
                blood_type, patient_name
            ),
        },
        Some(units) if units >= requested => FulfillmentDecision {
            status: RequestStatus::Fulfilled,
            takes_stock: true,
            message: format!("Blood request for {} has been fulfilled.", patient_name),
        },
        Some(units) => FulfillmentDecision {
            status: RequestStatus::Pending,
            takes_stock: false,
            message: format!(
                "Insufficient stock for {}. Available stock: {} units. Blood request for {} is pending.",
                blood_type, units, patient_name
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sufficient_stock_is_fulfilled() {
        let decision = decide(BloodType::OPositive, 3, Some(5), "Kiran");
        assert_eq!(decision.status, RequestStatus::Fulfilled);
        assert!(decision.takes_stock);
        assert!(decision.message.contains("fulfilled"));
    }

    #[test]
    fn test_exact_stock_is_fulfilled() {
        let decision = decide(BloodType::ONegative, 5, Some(5), "Kiran");
        assert_eq!(decision.status, RequestStatus::Fulfilled);
        assert!(decision.takes_stock);
    }

    #[test]
    fn test_insufficient_stock_is_pending_and_reports_available() {
        let decision = decide(BloodType::OPositive, 6, Some(5), "Kiran");
        assert_eq!(decision.status, RequestStatus::Pending);
        assert!(!decision.takes_stock);
        assert!(decision.message.contains("Available stock: 5 units"));
        assert!(decision.message.contains("O+"));
    }

    #[test]
    fn test_empty_row_counts_as_insufficient() {
        let decision = decide(BloodType::BPositive, 1, Some(0), "Kiran");
        assert_eq!(decision.status, RequestStatus::Pending);
        assert!(decision.message.contains("Available stock: 0 units"));
    }

    #[test]
    fn test_missing_stock_row_is_out_of_stock() {
        let decision = decide(BloodType::ABNegative, 1, None, "Kiran");
        assert_eq!(decision.status, RequestStatus::Pending);
        assert!(!decision.takes_stock);
        assert_eq!(
            decision.message,
            "Currently out of stock for AB-. Blood request for Kiran is pending."
        );
    }
}
