use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentFrequency;

/// Facts the recipient declared about a competing offer and their payments.
///
/// Built from user data only by [`crate::wizard::OfferForm::validate`],
/// which guarantees both amounts are strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferComparisonInput {
    /// Lump sum already offered by a third party.
    pub existing_offer_amount: Decimal,

    /// Amount of each periodic payment.
    pub payment_amount: Decimal,

    pub payment_frequency: PaymentFrequency,

    /// Name of the competing company. Display only.
    pub company_name: Option<String>,
}

/// Outcome of valuing a payment stream against a competing offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Our lump-sum quote for the same payment stream.
    pub calculated_offer_amount: Decimal,

    /// `calculated_offer_amount - existing_offer_amount`.
    pub difference: Decimal,

    /// `difference` as a percentage of the existing offer.
    pub percentage_difference: Decimal,

    /// True when our quote beats the existing offer.
    pub is_better_offer: bool,
}
