use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::donor::{Donor, NewDonor};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::DonorStorage;

const DOB_FORMAT: &str = "%Y-%m-%d";

/// Repository for the `donors` table
#[derive(Clone)]
pub struct SqliteDonorRepository {
    db: DbConnection,
}

impl SqliteDonorRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn donor_from_row(row: &SqliteRow) -> Result<Donor> {
        let dob: String = row.try_get("dob")?;
        let blood_type: String = row.try_get("blood_type")?;

        Ok(Donor {
            donor_id: row.try_get("donor_id")?,
            name: row.try_get("name")?,
            dob: NaiveDate::parse_from_str(&dob, DOB_FORMAT)
                .with_context(|| format!("Stored date of birth '{}' is not YYYY-MM-DD", dob))?,
            blood_type: blood_type.parse()?,
            contact: row.try_get("contact")?,
        })
    }
}

#[async_trait]
impl DonorStorage for SqliteDonorRepository {
    async fn insert_donor(&self, donor: &NewDonor) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO donors (name, dob, blood_type, contact)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&donor.name)
        .bind(donor.dob.format(DOB_FORMAT).to_string())
        .bind(donor.blood_type.as_str())
        .bind(&donor.contact)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list_donors(&self) -> Result<Vec<Donor>> {
        let rows = sqlx::query(
            r#"
            SELECT donor_id, name, dob, blood_type, contact
            FROM donors
            ORDER BY donor_id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::donor_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::BloodType;

    async fn setup_test() -> SqliteDonorRepository {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        SqliteDonorRepository::new(db)
    }

    fn new_donor(name: &str, blood_type: BloodType) -> NewDonor {
        NewDonor {
            name: name.to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 3, 12).unwrap(),
            blood_type,
            contact: "9876543210".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_donors_empty_database() {
        let repo = setup_test().await;
        let donors = repo.list_donors().await.expect("Failed to list donors");
        assert!(donors.is_empty(), "Should return empty vector for empty database");
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids_and_lists_in_order() {
        let repo = setup_test().await;

        let first = repo.insert_donor(&new_donor("Zara", BloodType::ABNegative)).await.unwrap();
        let second = repo.insert_donor(&new_donor("Amit", BloodType::OPositive)).await.unwrap();
        assert!(second > first);

        let donors = repo.list_donors().await.unwrap();
        assert_eq!(donors.len(), 2);
        // Registration order, not alphabetical
        assert_eq!(donors[0].name, "Zara");
        assert_eq!(donors[0].donor_id, first);
        assert_eq!(donors[0].blood_type, BloodType::ABNegative);
        assert_eq!(donors[0].dob, NaiveDate::from_ymd_opt(1990, 3, 12).unwrap());
        assert_eq!(donors[1].name, "Amit");
        assert_eq!(donors[1].contact, "9876543210");
    }
}
