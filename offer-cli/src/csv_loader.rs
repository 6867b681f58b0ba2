//! CSV loader for batch offer comparisons.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed. Cells are read as raw strings and validated later by the same
//! form boundary the interactive wizard uses, so a bad amount fails only its
//! own row.
//!
//! | Column                  | Required | Notes |
//! |-------------------------|----------|-------|
//! | `existing_offer_amount` | yes      | e.g. `50000`, `$50,000.00` |
//! | `payment_amount`        | yes      | per-payment amount |
//! | `payment_frequency`     | no       | `monthly` (default), `quarterly`, `semiannually`, `annually` |
//! | `company_name`          | no       | label only |
//!
//! ### Example
//!
//! ```csv
//! existing_offer_amount,payment_amount,payment_frequency,company_name
//! 50000,1000,monthly,Acme Funding
//! 10000,500,annually,
//! ```

use std::path::Path;

use offer_core::wizard::OfferForm;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    existing_offer_amount: String,
    payment_amount: String,
    #[serde(default)]
    payment_frequency: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
}

/// Errors that can occur while reading the CSV file itself.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Structural problem: unreadable file, missing required column, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// One data row, ready to submit to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRecord {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub form: OfferForm,
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> ComparisonRecord {
    let mut form = OfferForm::new(
        row.existing_offer_amount,
        row.payment_amount,
        row.payment_frequency.unwrap_or_default(),
    );
    if let Some(company) = row.company_name {
        form = form.with_company(company);
    }
    ComparisonRecord {
        row: row_number,
        form,
    }
}

fn load_from_reader<R: std::io::Read>(
    reader: csv::Reader<R>
) -> Result<Vec<ComparisonRecord>, CsvLoadError> {
    let mut reader = reader;
    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        records.push(convert_row(result?, idx + 1));
    }
    Ok(records)
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

/// Parse CSV text and return one record per data row, in file order.
pub fn load_from_str(input: &str) -> Result<Vec<ComparisonRecord>, CsvLoadError> {
    load_from_reader(builder().from_reader(input.as_bytes()))
}

/// Read and parse a CSV file from disk.
pub fn load_from_file(path: &Path) -> Result<Vec<ComparisonRecord>, CsvLoadError> {
    load_from_reader(builder().from_path(path)?)
}
