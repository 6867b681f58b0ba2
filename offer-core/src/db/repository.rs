use async_trait::async_trait;
use thiserror::Error;

use crate::models::OfferLead;

#[derive(Debug, Error)]
pub enum SubmitterError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Offer-capture collaborator that receives finished comparisons.
///
/// Delivery is best effort: implementations report failure through the
/// returned flag instead of an error, and the wizard never depends on it.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    /// Hands over `lead`. Returns `true` when it was accepted.
    async fn submit(&self, lead: &OfferLead) -> bool;
}
