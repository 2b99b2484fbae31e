use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use super::clock::Clock;
use super::eligibility;
use super::errors::ServiceError;
use super::models::donor::{Donor, NewDonor};
use crate::storage::{Connection, DonorStorage};
use shared::DonorRegistrationForm;

/// A donor that was accepted and stored
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredDonor {
    pub donor_id: i64,
    pub name: String,
    pub age: i32,
}

/// Service for registering and listing donors
#[derive(Clone)]
pub struct DonorService<C: Connection> {
    donor_repository: C::DonorRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> DonorService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            donor_repository: connection.create_donor_repository(),
            clock,
        }
    }

    /// Check a registration form and store the donor if every rule passes
    pub async fn register_donor(
        &self,
        form: &DonorRegistrationForm,
    ) -> Result<RegisteredDonor, ServiceError> {
        let donor = eligibility::check_donor(form, self.clock.now()).map_err(|err| {
            warn!("Donor registration rejected: {}", err);
            err
        })?;

        let new_donor = NewDonor {
            name: donor.name,
            dob: donor.dob,
            blood_type: donor.blood_type,
            contact: donor.contact,
        };
        let donor_id = self.donor_repository.insert_donor(&new_donor).await?;

        info!(
            "Registered donor {} ({}, age {}) with ID: {}",
            new_donor.name, new_donor.blood_type, donor.age, donor_id
        );

        Ok(RegisteredDonor {
            donor_id,
            name: new_donor.name,
            age: donor.age,
        })
    }

    /// All donors in registration order
    pub async fn list_donors(&self) -> Result<Vec<Donor>> {
        let donors = self.donor_repository.list_donors().await?;
        info!("Found {} donors", donors.len());
        Ok(donors)
    }
}
