use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::BloodType;
use sqlx::{Row, SqliteConnection};

use crate::domain::eligibility::EligibilityError;
use crate::domain::models::stock::StockEntry;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::StockStorage;

/// Repository for the `blood_stock` table
#[derive(Clone)]
pub struct SqliteStockRepository {
    db: DbConnection,
}

impl SqliteStockRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn units_from_column(quantity: i64) -> Result<u32> {
    u32::try_from(quantity)
        .with_context(|| format!("Stored stock quantity {} is out of range", quantity))
}

/// Take `amount` units on an existing connection or transaction.
///
/// The `quantity >= ?` guard makes the check and the update one statement, so
/// a stale read can never drive the row negative.
pub(crate) async fn take_units(
    conn: &mut SqliteConnection,
    blood_type: BloodType,
    amount: u32,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE blood_stock
        SET quantity = quantity - ?
        WHERE blood_type = ? AND quantity >= ?
        "#,
    )
    .bind(i64::from(amount))
    .bind(blood_type.as_str())
    .bind(i64::from(amount))
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        let available: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM blood_stock WHERE blood_type = ?")
                .bind(blood_type.as_str())
                .fetch_optional(&mut *conn)
                .await?;

        return Err(EligibilityError::StockUnderflow {
            blood_type,
            requested: amount,
            available: available.map(units_from_column).transpose()?.unwrap_or(0),
        }
        .into());
    }

    Ok(())
}

#[async_trait]
impl StockStorage for SqliteStockRepository {
    async fn get_stock(&self, blood_type: BloodType) -> Result<Option<u32>> {
        let quantity: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM blood_stock WHERE blood_type = ?")
                .bind(blood_type.as_str())
                .fetch_optional(self.db.pool())
                .await?;

        quantity.map(units_from_column).transpose()
    }

    async fn decrement_stock(&self, blood_type: BloodType, amount: u32) -> Result<()> {
        let mut conn = self.db.pool().acquire().await?;
        take_units(&mut conn, blood_type, amount).await
    }

    async fn set_stock(&self, blood_type: BloodType, quantity: u32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blood_stock (blood_type, quantity)
            VALUES (?, ?)
            ON CONFLICT(blood_type) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(blood_type.as_str())
        .bind(i64::from(quantity))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_stock(&self) -> Result<Vec<StockEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT blood_type, quantity
            FROM blood_stock
            ORDER BY blood_type ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> Result<StockEntry> {
                let blood_type: String = row.try_get("blood_type")?;
                Ok(StockEntry {
                    blood_type: blood_type.parse()?,
                    quantity: units_from_column(row.try_get("quantity")?)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> SqliteStockRepository {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        SqliteStockRepository::new(db)
    }

    #[tokio::test]
    async fn test_missing_type_has_no_stock() {
        let repo = setup_test().await;
        assert_eq!(repo.get_stock(BloodType::ABNegative).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_stock_inserts_then_overwrites() {
        let repo = setup_test().await;

        repo.set_stock(BloodType::OPositive, 5).await.unwrap();
        assert_eq!(repo.get_stock(BloodType::OPositive).await.unwrap(), Some(5));

        repo.set_stock(BloodType::OPositive, 12).await.unwrap();
        assert_eq!(repo.get_stock(BloodType::OPositive).await.unwrap(), Some(12));
        assert_eq!(repo.list_stock().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_decrement_within_stock() {
        let repo = setup_test().await;
        repo.set_stock(BloodType::OPositive, 5).await.unwrap();

        repo.decrement_stock(BloodType::OPositive, 3).await.unwrap();
        assert_eq!(repo.get_stock(BloodType::OPositive).await.unwrap(), Some(2));

        repo.decrement_stock(BloodType::OPositive, 2).await.unwrap();
        assert_eq!(repo.get_stock(BloodType::OPositive).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_decrement_beyond_stock_underflows() {
        let repo = setup_test().await;
        repo.set_stock(BloodType::BNegative, 2).await.unwrap();

        let err = repo.decrement_stock(BloodType::BNegative, 3).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<EligibilityError>(),
            Some(&EligibilityError::StockUnderflow {
                blood_type: BloodType::BNegative,
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(repo.get_stock(BloodType::BNegative).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_decrement_missing_type_underflows_without_creating_row() {
        let repo = setup_test().await;

        let err = repo.decrement_stock(BloodType::ABNegative, 1).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EligibilityError>(),
            Some(EligibilityError::StockUnderflow { available: 0, .. })
        ));
        assert!(repo.list_stock().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_stock_is_ordered_by_label() {
        let repo = setup_test().await;
        repo.set_stock(BloodType::OPositive, 1).await.unwrap();
        repo.set_stock(BloodType::ABPositive, 2).await.unwrap();
        repo.set_stock(BloodType::ANegative, 3).await.unwrap();

        let labels: Vec<&str> = repo
            .list_stock()
            .await
            .unwrap()
            .iter()
            .map(|entry| entry.blood_type.as_str())
            .collect();
        assert_eq!(labels, vec!["A-", "AB+", "O+"]);
    }
}
