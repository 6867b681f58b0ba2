use rust_decimal::Decimal;
use sqlx::{Row, ValueRef};
use offer_core::SubmitterError;

/// Get a decimal stored as exact TEXT from a row.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, SubmitterError> {
    let raw: String = row.try_get(column).map_err(|e| {
        SubmitterError::Database(format!("Failed to get TEXT from '{}': {}", column, e))
    })?;
    raw.parse::<Decimal>().map_err(|e| {
        SubmitterError::Database(format!(
            "Failed to parse decimal '{}' in '{}': {}",
            raw, column, e
        ))
    })
}

/// Get an optional string, returning None for NULL values.
pub fn get_optional_text(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Option<String>, SubmitterError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| SubmitterError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Ok(None);
    }

    row.try_get(column)
        .map(Some)
        .map_err(|e| SubmitterError::Database(format!("Failed to get '{}': {}", column, e)))
}

/// Convert a Decimal to its exact TEXT form for storage.
pub fn decimal_to_text(d: Decimal) -> String {
    d.to_string()
}
