use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OfferComparisonInput, ValuationResult};

/// Optional contact details captured alongside a finished comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl LeadContact {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// A finished comparison handed to the offer-capture collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferLead {
    pub input: OfferComparisonInput,
    pub result: ValuationResult,
    pub contact: LeadContact,
    pub submitted_at: DateTime<Utc>,
}

/// A lead as read back from a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedLead {
    pub id: i64,
    pub lead: OfferLead,
}
