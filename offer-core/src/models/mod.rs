mod lead;
mod offer_comparison;
mod payment_frequency;

pub use lead::{LeadContact, OfferLead, RecordedLead};
pub use offer_comparison::{OfferComparisonInput, ValuationResult};
pub use payment_frequency::PaymentFrequency;
