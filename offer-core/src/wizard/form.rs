//! Raw form input and its parse-and-validate boundary.
//!
//! Every numeric field arrives as a string. [`OfferForm::validate`] is the
//! only path from those strings to an [`OfferComparisonInput`].

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::is_cents_precision;
use crate::{OfferComparisonInput, PaymentFrequency};

/// Largest amount the details form accepts for either field ($1 billion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Fields of the details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    ExistingOfferAmount,
    PaymentAmount,
    PaymentFrequency,
    CompanyName,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExistingOfferAmount => "existing_offer_amount",
            Self::PaymentAmount => "payment_amount",
            Self::PaymentFrequency => "payment_frequency",
            Self::CompanyName => "company_name",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation messages, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        field: FormField,
        message: impl Into<String>,
    ) {
        self.0.insert(field, message.into());
    }

    pub fn remove(
        &mut self,
        field: FormField,
    ) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(
        &self,
        field: FormField,
    ) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(
        &self,
        field: FormField,
    ) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Error returned when a string cannot be read as a dollar amount.
#[derive(Debug, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Normalizes amount input: trims whitespace, drops a leading `$` and
/// thousands separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_start()
        .replace(',', "")
}

/// Parses a dollar amount such as `"$1,234.56"`.
///
/// Unlike blank-means-zero parsing, empty input is an error here: every
/// amount on the details form is required.
pub fn parse_amount(s: &str) -> Result<Decimal, AmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(AmountError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        AmountError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Draft values of the details form plus any outstanding field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferForm {
    pub existing_offer_amount: String,
    pub payment_amount: String,
    pub payment_frequency: String,
    pub company_name: String,
    #[serde(skip)]
    errors: ValidationErrors,
}

impl OfferForm {
    pub fn new(
        existing_offer_amount: impl Into<String>,
        payment_amount: impl Into<String>,
        payment_frequency: impl Into<String>,
    ) -> Self {
        Self {
            existing_offer_amount: existing_offer_amount.into(),
            payment_amount: payment_amount.into(),
            payment_frequency: payment_frequency.into(),
            ..Default::default()
        }
    }

    pub fn with_company(
        mut self,
        company_name: impl Into<String>,
    ) -> Self {
        self.company_name = company_name.into();
        self
    }

    /// Re-populates a draft from previously accepted input.
    pub fn from_input(input: &OfferComparisonInput) -> Self {
        Self {
            existing_offer_amount: input.existing_offer_amount.to_string(),
            payment_amount: input.payment_amount.to_string(),
            payment_frequency: input.payment_frequency.as_str().to_string(),
            company_name: input.company_name.clone().unwrap_or_default(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn value(
        &self,
        field: FormField,
    ) -> &str {
        match field {
            FormField::ExistingOfferAmount => &self.existing_offer_amount,
            FormField::PaymentAmount => &self.payment_amount,
            FormField::PaymentFrequency => &self.payment_frequency,
            FormField::CompanyName => &self.company_name,
        }
    }

    /// Replaces one field's draft and clears that field's error only.
    pub fn set_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            FormField::ExistingOfferAmount => self.existing_offer_amount = value,
            FormField::PaymentAmount => self.payment_amount = value,
            FormField::PaymentFrequency => self.payment_frequency = value,
            FormField::CompanyName => self.company_name = value,
        }
        self.errors.remove(field);
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub(crate) fn with_errors(
        mut self,
        errors: ValidationErrors,
    ) -> Self {
        self.errors = errors;
        self
    }

    /// Parses and validates every field, reporting all failures at once.
    ///
    /// A blank frequency defaults to monthly.
    pub fn validate(&self) -> Result<OfferComparisonInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let existing_offer_amount = positive_amount(
            &self.existing_offer_amount,
            FormField::ExistingOfferAmount,
            "Enter the amount of the offer you received.",
            "Offer amount must be greater than zero.",
            &mut errors,
        );
        let payment_amount = positive_amount(
            &self.payment_amount,
            FormField::PaymentAmount,
            "Enter the amount of each payment you receive.",
            "Payment amount must be greater than zero.",
            &mut errors,
        );

        let payment_frequency = if self.payment_frequency.trim().is_empty() {
            Some(PaymentFrequency::default())
        } else {
            PaymentFrequency::parse(&self.payment_frequency)
        };
        if payment_frequency.is_none() {
            errors.insert(
                FormField::PaymentFrequency,
                "Choose monthly, quarterly, semiannually or annually.",
            );
        }

        match (existing_offer_amount, payment_amount, payment_frequency) {
            (Some(existing_offer_amount), Some(payment_amount), Some(payment_frequency))
                if errors.is_empty() =>
            {
                let company_name = self.company_name.trim();
                Ok(OfferComparisonInput {
                    existing_offer_amount,
                    payment_amount,
                    payment_frequency,
                    company_name: (!company_name.is_empty()).then(|| company_name.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

fn positive_amount(
    raw: &str,
    field: FormField,
    missing_message: &str,
    non_positive_message: &str,
    errors: &mut ValidationErrors,
) -> Option<Decimal> {
    match parse_amount(raw) {
        Ok(amount) if amount <= Decimal::ZERO => {
            errors.insert(field, non_positive_message);
            None
        }
        Ok(amount) if !is_cents_precision(amount) => {
            errors.insert(field, "Enter whole cents, at most two decimal places.");
            None
        }
        Ok(amount) if amount > MAX_AMOUNT => {
            errors.insert(field, "Amount cannot exceed $1,000,000,000.00.");
            None
        }
        Ok(amount) => Some(amount),
        Err(AmountError::Empty) => {
            errors.insert(field, missing_message);
            None
        }
        Err(AmountError::Invalid { .. }) => {
            errors.insert(field, "Enter a valid dollar amount, for example 1,250.00.");
            None
        }
    }
}
