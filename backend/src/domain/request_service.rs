use anyhow::Result;
use shared::{BloodRequestForm, RequestStatus};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::eligibility;
use super::errors::ServiceError;
use super::fulfillment;
use super::models::blood_request::{BloodRequest, NewBloodRequest};
use crate::storage::{Connection, RequestStorage, StockStorage};

/// A request that was accepted and stored
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedRequest {
    pub request_id: i64,
    pub status: RequestStatus,
    pub message: String,
}

/// Service that accepts blood requests and serves them from stock
#[derive(Clone)]
pub struct RequestService<C: Connection> {
    stock_repository: C::StockRepository,
    request_repository: C::RequestRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> RequestService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            stock_repository: connection.create_stock_repository(),
            request_repository: connection.create_request_repository(),
            clock,
        }
    }

    /// Check a request form, decide its status against current stock and
    /// store it. Stock is only consulted once the request is authorized.
    pub async fn submit_request(
        &self,
        form: &BloodRequestForm,
    ) -> Result<SubmittedRequest, ServiceError> {
        let request = eligibility::check_request(form).map_err(|err| {
            warn!("Blood request rejected: {}", err);
            err
        })?;

        let available = self.stock_repository.get_stock(request.blood_type).await?;
        debug!("Stock for {}: {:?}", request.blood_type, available);

        let decision = fulfillment::decide(
            request.blood_type,
            request.quantity,
            available,
            &request.patient_name,
        );

        let new_request = NewBloodRequest {
            requestor_name: request.requestor_name,
            contact_number: request.contact_number,
            email_address: request.email_address,
            blood_type_required: request.blood_type,
            quantity_needed: request.quantity,
            urgency: request.urgency,
            patient_name: request.patient_name,
            created_at: self.clock.now(),
            status: decision.status,
        };

        let request_id = if decision.takes_stock {
            self.request_repository
                .insert_fulfilled_request(&new_request)
                .await?
        } else {
            self.request_repository.insert_request(&new_request).await?
        };

        info!(
            "Stored {} request {} for {} units of {} ({})",
            decision.status,
            request_id,
            new_request.quantity_needed,
            new_request.blood_type_required,
            new_request.urgency
        );

        Ok(SubmittedRequest {
            request_id,
            status: decision.status,
            message: decision.message,
        })
    }

    /// All requests in submission order
    pub async fn list_requests(&self) -> Result<Vec<BloodRequest>> {
        let requests = self.request_repository.list_requests().await?;
        info!("Found {} blood requests", requests.len());
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::eligibility::tests::{now, valid_request_form};
    use crate::domain::eligibility::EligibilityError;
    use crate::domain::models::stock::StockEntry;
    use crate::storage::sqlite::{
        SqliteDonorRepository, SqliteRequestRepository, SqliteStockRepository,
    };
    use crate::storage::DbConnection;
    use async_trait::async_trait;
    use shared::BloodType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stock repository that counts lookups
    #[derive(Clone)]
    struct CountingStock {
        inner: SqliteStockRepository,
        lookups: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl StockStorage for CountingStock {
        async fn get_stock(&self, blood_type: BloodType) -> Result<Option<u32>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_stock(blood_type).await
        }

        async fn decrement_stock(&self, blood_type: BloodType, amount: u32) -> Result<()> {
            self.inner.decrement_stock(blood_type, amount).await
        }

        async fn set_stock(&self, blood_type: BloodType, quantity: u32) -> Result<()> {
            self.inner.set_stock(blood_type, quantity).await
        }

        async fn list_stock(&self) -> Result<Vec<StockEntry>> {
            self.inner.list_stock().await
        }
    }

    #[derive(Clone)]
    struct CountingConnection {
        db: DbConnection,
        lookups: Arc<AtomicUsize>,
    }

    impl Connection for CountingConnection {
        type DonorRepository = SqliteDonorRepository;
        type StockRepository = CountingStock;
        type RequestRepository = SqliteRequestRepository;

        fn create_donor_repository(&self) -> Self::DonorRepository {
            self.db.create_donor_repository()
        }

        fn create_stock_repository(&self) -> Self::StockRepository {
            CountingStock {
                inner: self.db.create_stock_repository(),
                lookups: self.lookups.clone(),
            }
        }

        fn create_request_repository(&self) -> Self::RequestRepository {
            self.db.create_request_repository()
        }
    }

    async fn setup_test() -> (
        RequestService<CountingConnection>,
        SqliteStockRepository,
        Arc<AtomicUsize>,
    ) {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let lookups = Arc::new(AtomicUsize::new(0));
        let connection = Arc::new(CountingConnection {
            db: db.clone(),
            lookups: lookups.clone(),
        });
        let service = RequestService::new(connection, Arc::new(FixedClock(now())));
        (service, db.create_stock_repository(), lookups)
    }

    fn request_for(blood_type: &str, quantity: u32) -> BloodRequestForm {
        BloodRequestForm {
            blood_type_required: blood_type.to_string(),
            quantity_needed: quantity.to_string(),
            ..valid_request_form()
        }
    }

    #[tokio::test]
    async fn test_sufficient_stock_fulfills_and_decrements() {
        let (service, stock, _) = setup_test().await;
        stock.set_stock(BloodType::OPositive, 5).await.unwrap();

        let submitted = service.submit_request(&request_for("O+", 3)).await.unwrap();

        assert_eq!(submitted.status, RequestStatus::Fulfilled);
        assert_eq!(submitted.message, "Blood request for Kiran Rao has been fulfilled.");
        assert_eq!(stock.get_stock(BloodType::OPositive).await.unwrap(), Some(2));

        let requests = service.list_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request_id, submitted.request_id);
        assert_eq!(requests[0].status, RequestStatus::Fulfilled);
        assert_eq!(requests[0].created_at, now());
    }

    #[tokio::test]
    async fn test_insufficient_stock_stays_pending() {
        let (service, stock, _) = setup_test().await;
        stock.set_stock(BloodType::OPositive, 5).await.unwrap();

        let submitted = service.submit_request(&request_for("O+", 6)).await.unwrap();

        assert_eq!(submitted.status, RequestStatus::Pending);
        assert!(submitted.message.contains("Available stock: 5 units"));
        assert_eq!(stock.get_stock(BloodType::OPositive).await.unwrap(), Some(5));
        assert_eq!(service.list_requests().await.unwrap()[0].status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_unstocked_type_is_pending_without_creating_row() {
        let (service, stock, _) = setup_test().await;
        stock.set_stock(BloodType::OPositive, 5).await.unwrap();

        let submitted = service.submit_request(&request_for("AB-", 1)).await.unwrap();

        assert_eq!(submitted.status, RequestStatus::Pending);
        assert!(submitted.message.contains("out of stock"));
        assert_eq!(stock.get_stock(BloodType::ABNegative).await.unwrap(), None);
        assert_eq!(stock.list_stock().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_request_never_reads_stock() {
        let (service, stock, lookups) = setup_test().await;
        stock.set_stock(BloodType::OPositive, 5).await.unwrap();

        let mut form = request_for("O+", 3);
        form.approval = false;
        let err = service.submit_request(&form).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Eligibility(EligibilityError::AuthorizationRequired)
        ));
        assert_eq!(lookups.load(Ordering::SeqCst), 0);
        assert_eq!(stock.get_stock(BloodType::OPositive).await.unwrap(), Some(5));
        assert!(service.list_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_authorized_request_reads_stock_once() {
        let (service, stock, lookups) = setup_test().await;
        stock.set_stock(BloodType::OPositive, 5).await.unwrap();

        service.submit_request(&request_for("O+", 1)).await.unwrap();
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_status_is_not_revisited_after_restock() {
        let (service, stock, _) = setup_test().await;

        let submitted = service.submit_request(&request_for("B-", 2)).await.unwrap();
        assert_eq!(submitted.status, RequestStatus::Pending);

        stock.set_stock(BloodType::BNegative, 10).await.unwrap();

        let requests = service.list_requests().await.unwrap();
        assert_eq!(requests[0].status, RequestStatus::Pending);
        assert_eq!(stock.get_stock(BloodType::BNegative).await.unwrap(), Some(10));
    }
}
