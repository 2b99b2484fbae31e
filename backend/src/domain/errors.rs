use super::eligibility::EligibilityError;

/// Failure of a donor or request submission
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The submission broke a business rule; nothing was stored
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    /// The store failed underneath an otherwise valid submission
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        // Storage reports stock underflow as an EligibilityError inside anyhow
        match err.downcast::<EligibilityError>() {
            Ok(eligibility) => ServiceError::Eligibility(eligibility),
            Err(err) => ServiceError::Storage(err),
        }
    }
}
