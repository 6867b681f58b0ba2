use std::fmt;

use offer_core::format::{format_currency, format_percentage};
use offer_core::{OfferComparisonInput, ValuationResult};

/// Plain-text summary of one finished comparison.
pub struct ComparisonReport<'a> {
    pub input: &'a OfferComparisonInput,
    pub result: &'a ValuationResult,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(
        input: &'a OfferComparisonInput,
        result: &'a ValuationResult,
    ) -> Self {
        Self { input, result }
    }

    pub fn verdict(&self) -> &'static str {
        if self.result.is_better_offer {
            "Our offer beats the one you have."
        } else {
            "Your existing offer is higher than ours."
        }
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if let Some(company) = &self.input.company_name {
            writeln!(f, "Company:          {company}")?;
        }
        writeln!(
            f,
            "Payments:         {} {}",
            format_currency(self.input.payment_amount),
            self.input.payment_frequency.label().to_lowercase()
        )?;
        writeln!(
            f,
            "Existing offer:   {}",
            format_currency(self.input.existing_offer_amount)
        )?;
        writeln!(
            f,
            "Our offer:        {}",
            format_currency(self.result.calculated_offer_amount)
        )?;
        writeln!(
            f,
            "Difference:       {} ({})",
            format_currency(self.result.difference),
            format_percentage(self.result.percentage_difference)
        )?;
        write!(f, "{}", self.verdict())
    }
}
