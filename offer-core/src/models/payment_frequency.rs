use std::fmt;

use serde::{Deserialize, Serialize};

/// Cadence of the payment stream being valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    Semiannually,
    Annually,
}

impl PaymentFrequency {
    pub fn all() -> &'static [PaymentFrequency] {
        &[
            PaymentFrequency::Monthly,
            PaymentFrequency::Quarterly,
            PaymentFrequency::Semiannually,
            PaymentFrequency::Annually,
        ]
    }

    /// Number of payments received in one year.
    pub fn payments_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Semiannually => 2,
            Self::Annually => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Semiannually => "semiannually",
            Self::Annually => "annually",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Semiannually => "Semi-annually",
            Self::Annually => "Annually",
        }
    }

    /// Parses a frequency name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "semiannually" | "semi-annually" | "semiannual" => Some(Self::Semiannually),
            "annually" | "annual" => Some(Self::Annually),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn payments_per_year_matches_cadence() {
        let counts: Vec<u32> = PaymentFrequency::all()
            .iter()
            .map(PaymentFrequency::payments_per_year)
            .collect();

        assert_eq!(counts, vec![12, 4, 2, 1]);
    }

    #[test]
    fn parse_accepts_canonical_names() {
        for frequency in PaymentFrequency::all() {
            assert_eq!(PaymentFrequency::parse(frequency.as_str()), Some(*frequency));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(
            PaymentFrequency::parse("  Quarterly "),
            Some(PaymentFrequency::Quarterly)
        );
        assert_eq!(
            PaymentFrequency::parse("Semi-Annually"),
            Some(PaymentFrequency::Semiannually)
        );
        assert_eq!(PaymentFrequency::parse("ANNUAL"), Some(PaymentFrequency::Annually));
    }

    #[test]
    fn parse_rejects_unknown_cadence() {
        assert_eq!(PaymentFrequency::parse("weekly"), None);
        assert_eq!(PaymentFrequency::parse(""), None);
    }
}
