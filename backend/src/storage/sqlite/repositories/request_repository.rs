use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use tracing::debug;

use super::stock_repository::take_units;
use crate::domain::models::blood_request::{BloodRequest, NewBloodRequest, CREATED_AT_FORMAT};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::RequestStorage;

/// Repository for the `blood_requests` table
#[derive(Clone)]
pub struct SqliteRequestRepository {
    db: DbConnection,
}

impl SqliteRequestRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn insert_on(conn: &mut SqliteConnection, request: &NewBloodRequest) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO blood_requests (
                requestor_name, contact_number, email_address, blood_type_required,
                quantity_needed, urgency, patient_name, created_at, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.requestor_name)
        .bind(&request.contact_number)
        .bind(&request.email_address)
        .bind(request.blood_type_required.as_str())
        .bind(i64::from(request.quantity_needed))
        .bind(request.urgency.as_str())
        .bind(&request.patient_name)
        .bind(request.created_at.format(CREATED_AT_FORMAT).to_string())
        .bind(request.status.as_str())
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    fn request_from_row(row: &SqliteRow) -> Result<BloodRequest> {
        let blood_type: String = row.try_get("blood_type_required")?;
        let quantity: i64 = row.try_get("quantity_needed")?;
        let urgency: String = row.try_get("urgency")?;
        let created_at: String = row.try_get("created_at")?;
        let status: String = row.try_get("status")?;

        Ok(BloodRequest {
            request_id: row.try_get("request_id")?,
            requestor_name: row.try_get("requestor_name")?,
            contact_number: row.try_get("contact_number")?,
            email_address: row.try_get("email_address")?,
            blood_type_required: blood_type.parse()?,
            quantity_needed: u32::try_from(quantity)
                .with_context(|| format!("Stored request quantity {} is out of range", quantity))?,
            urgency: urgency.parse().map_err(|e: String| anyhow!(e))?,
            patient_name: row.try_get("patient_name")?,
            created_at: NaiveDateTime::parse_from_str(&created_at, CREATED_AT_FORMAT)
                .with_context(|| format!("Stored timestamp '{}' is malformed", created_at))?,
            status: status.parse().map_err(|e: String| anyhow!(e))?,
        })
    }
}

#[async_trait]
impl RequestStorage for SqliteRequestRepository {
    async fn insert_request(&self, request: &NewBloodRequest) -> Result<i64> {
        let mut conn = self.db.pool().acquire().await?;
        Self::insert_on(&mut conn, request).await
    }

    async fn insert_fulfilled_request(&self, request: &NewBloodRequest) -> Result<i64> {
        // Dropping `tx` before commit rolls back, so any early return below
        // leaves both the stock row and the request table untouched.
        let mut tx = self.db.pool().begin().await?;

        take_units(&mut tx, request.blood_type_required, request.quantity_needed).await?;
        let request_id = Self::insert_on(&mut tx, request).await?;

        tx.commit().await?;
        debug!(
            "Committed request {} with {} units of {}",
            request_id, request.quantity_needed, request.blood_type_required
        );

        Ok(request_id)
    }

    async fn list_requests(&self) -> Result<Vec<BloodRequest>> {
        let rows = sqlx::query(
            r#"
            SELECT request_id, requestor_name, contact_number, email_address,
                   blood_type_required, quantity_needed, urgency, patient_name,
                   created_at, status
            FROM blood_requests
            ORDER BY request_id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::request_from_row).collect()
    }
}
