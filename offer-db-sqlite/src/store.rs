use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use offer_core::{
    LeadContact, LeadSubmitter, OfferComparisonInput, OfferLead, PaymentFrequency, RecordedLead,
    SubmitterError, ValuationResult,
};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::decimal::{decimal_to_text, get_decimal, get_optional_text};

const SELECT_LEAD: &str = "SELECT id, existing_offer_amount, payment_amount, payment_frequency,
        company_name, calculated_offer_amount, difference, percentage_difference,
        is_better_offer, contact_name, contact_email, contact_phone, submitted_at
 FROM offer_leads";

/// Offer-capture store backed by SQLite.
pub struct SqliteLeadStore {
    pool: SqlitePool,
}

impl SqliteLeadStore {
    /// Opens `database_url`, creating the file if it does not exist.
    ///
    /// Accepts a bare path, a `sqlite:` URL or `:memory:`. In-memory
    /// databases are pinned to one long-lived connection so every query
    /// sees the same data.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?
            .create_if_missing(true);

        let pool_options = if StoreConfig::new(database_url).is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    /// Opens the store described by `config`, migrating it when asked.
    ///
    /// Connection failures map to [`SubmitterError::Connection`] and
    /// migration failures to [`SubmitterError::Database`].
    pub async fn open(config: &StoreConfig) -> Result<Self, SubmitterError> {
        let store = Self::new(&config.database_url)
            .await
            .map_err(|e| SubmitterError::Connection(format!("{e:#}")))?;
        if config.migrate {
            store
                .run_migrations()
                .await
                .map_err(|e| SubmitterError::Database(format!("{e:#}")))?;
        }
        debug!(url = %config.database_url, migrated = config.migrate, "lead store opened");
        Ok(store)
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts `lead` and returns its new id.
    pub async fn record_lead(
        &self,
        lead: &OfferLead,
    ) -> Result<i64, SubmitterError> {
        let result = sqlx::query(
            "INSERT INTO offer_leads (
                existing_offer_amount, payment_amount, payment_frequency, company_name,
                calculated_offer_amount, difference, percentage_difference, is_better_offer,
                contact_name, contact_email, contact_phone, submitted_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(decimal_to_text(lead.input.existing_offer_amount))
        .bind(decimal_to_text(lead.input.payment_amount))
        .bind(lead.input.payment_frequency.as_str())
        .bind(lead.input.company_name.as_deref())
        .bind(decimal_to_text(lead.result.calculated_offer_amount))
        .bind(decimal_to_text(lead.result.difference))
        .bind(decimal_to_text(lead.result.percentage_difference))
        .bind(lead.result.is_better_offer)
        .bind(lead.contact.name.as_deref())
        .bind(lead.contact.email.as_deref())
        .bind(lead.contact.phone.as_deref())
        .bind(lead.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SubmitterError::Database(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_lead(
        &self,
        id: i64,
    ) -> Result<RecordedLead, SubmitterError> {
        let sql = format!("{SELECT_LEAD} WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SubmitterError::Database(e.to_string()))?
            .ok_or(SubmitterError::NotFound)?;

        row_to_recorded_lead(&row)
    }

    /// All recorded leads, oldest first.
    pub async fn list_leads(&self) -> Result<Vec<RecordedLead>, SubmitterError> {
        let sql = format!("{SELECT_LEAD} ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SubmitterError::Database(e.to_string()))?;

        rows.iter().map(row_to_recorded_lead).collect()
    }
}

fn row_to_recorded_lead(row: &sqlx::sqlite::SqliteRow) -> Result<RecordedLead, SubmitterError> {
    let frequency: String = row
        .try_get("payment_frequency")
        .map_err(|e| SubmitterError::Database(e.to_string()))?;
    let payment_frequency = PaymentFrequency::parse(&frequency).ok_or_else(|| {
        SubmitterError::Database(format!("Invalid payment frequency: {}", frequency))
    })?;

    Ok(RecordedLead {
        id: row
            .try_get("id")
            .map_err(|e| SubmitterError::Database(e.to_string()))?,
        lead: OfferLead {
            input: OfferComparisonInput {
                existing_offer_amount: get_decimal(row, "existing_offer_amount")?,
                payment_amount: get_decimal(row, "payment_amount")?,
                payment_frequency,
                company_name: get_optional_text(row, "company_name")?,
            },
            result: ValuationResult {
                calculated_offer_amount: get_decimal(row, "calculated_offer_amount")?,
                difference: get_decimal(row, "difference")?,
                percentage_difference: get_decimal(row, "percentage_difference")?,
                is_better_offer: row
                    .try_get("is_better_offer")
                    .map_err(|e| SubmitterError::Database(e.to_string()))?,
            },
            contact: LeadContact {
                name: get_optional_text(row, "contact_name")?,
                email: get_optional_text(row, "contact_email")?,
                phone: get_optional_text(row, "contact_phone")?,
            },
            submitted_at: row.try_get::<DateTime<Utc>, _>("submitted_at").map_err(|e| {
                SubmitterError::Database(format!("Failed to get submitted_at: {}", e))
            })?,
        },
    })
}

#[async_trait]
impl LeadSubmitter for SqliteLeadStore {
    async fn submit(&self, lead: &OfferLead) -> bool {
        match self.record_lead(lead).await {
            Ok(id) => {
                info!(id, quote = %lead.result.calculated_offer_amount, "lead recorded");
                true
            }
            Err(error) => {
                warn!(%error, "lead submission failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    async fn setup_test_db() -> SqliteLeadStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let store = SqliteLeadStore::new_with_pool(pool).await;
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    fn test_lead() -> OfferLead {
        OfferLead {
            input: OfferComparisonInput {
                existing_offer_amount: dec!(50000.00),
                payment_amount: dec!(1000),
                payment_frequency: PaymentFrequency::Monthly,
                company_name: Some("Acme Funding".to_string()),
            },
            result: ValuationResult {
                calculated_offer_amount: dec!(103229.29),
                difference: dec!(53229.29),
                percentage_difference: dec!(106.46),
                is_better_offer: true,
            },
            contact: LeadContact {
                name: Some("Jordan Smith".to_string()),
                email: Some("jordan@example.com".to_string()),
                phone: None,
            },
            submitted_at: Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap(),
        }
    }

    fn minimal_lead() -> OfferLead {
        OfferLead {
            input: OfferComparisonInput {
                existing_offer_amount: dec!(10000),
                payment_amount: dec!(500),
                payment_frequency: PaymentFrequency::Annually,
                company_name: None,
            },
            result: ValuationResult {
                calculated_offer_amount: dec!(4301.22),
                difference: dec!(-5698.78),
                percentage_difference: dec!(-56.99),
                is_better_offer: false,
            },
            contact: LeadContact::default(),
            submitted_at: Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_record_and_get_lead() {
        let store = setup_test_db().await;
        let lead = test_lead();

        let id = store.record_lead(&lead).await.unwrap();
        let recorded = store.get_lead(id).await.unwrap();

        assert_eq!(recorded.id, id);
        assert_eq!(recorded.lead, lead);
    }

    #[tokio::test]
    async fn test_record_minimal_lead_keeps_nulls() {
        let store = setup_test_db().await;

        let id = store.record_lead(&minimal_lead()).await.unwrap();
        let recorded = store.get_lead(id).await.unwrap();

        assert_eq!(recorded.lead.input.company_name, None);
        assert!(recorded.lead.contact.is_empty());
        assert_eq!(recorded.lead.result.difference, dec!(-5698.78));
        assert!(!recorded.lead.result.is_better_offer);
    }

    #[tokio::test]
    async fn test_get_lead_not_found() {
        let store = setup_test_db().await;

        let result = store.get_lead(999).await;

        assert!(matches!(result, Err(SubmitterError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_leads_in_insert_order() {
        let store = setup_test_db().await;
        store.record_lead(&test_lead()).await.unwrap();
        store.record_lead(&minimal_lead()).await.unwrap();

        let leads = store.list_leads().await.unwrap();

        assert_eq!(leads.len(), 2);
        assert_eq!(
            leads[0].lead.input.payment_frequency,
            PaymentFrequency::Monthly
        );
        assert_eq!(
            leads[1].lead.input.payment_frequency,
            PaymentFrequency::Annually
        );
        assert!(leads[0].id < leads[1].id);
    }

    #[tokio::test]
    async fn test_submit_reports_success() {
        let store = setup_test_db().await;

        assert!(store.submit(&test_lead()).await);
        assert_eq!(store.list_leads().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_reports_failure_without_table() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqliteLeadStore::new_with_pool(pool).await;

        assert!(!store.submit(&test_lead()).await);
    }

    #[tokio::test]
    async fn test_open_default_config_is_ready_to_record() {
        let store = SqliteLeadStore::open(&StoreConfig::default()).await.unwrap();

        assert!(store.submit(&test_lead()).await);
        assert_eq!(store.list_leads().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_without_migrate_leaves_schema_alone() {
        let config = StoreConfig {
            migrate: false,
            ..StoreConfig::default()
        };

        let store = SqliteLeadStore::open(&config).await.unwrap();

        assert!(!store.submit(&test_lead()).await);
    }

    #[tokio::test]
    async fn test_open_unreachable_path_is_connection_error() {
        let config = StoreConfig::new("/nonexistent-dir/offers.db");

        let result = SqliteLeadStore::open(&config).await;

        assert!(matches!(result, Err(SubmitterError::Connection(_))));
    }

    #[tokio::test]
    async fn test_new_accepts_bare_memory_path() {
        let store = SqliteLeadStore::new(":memory:").await.unwrap();
        store.run_migrations().await.unwrap();

        let id = store.record_lead(&minimal_lead()).await.unwrap();

        assert_eq!(store.get_lead(id).await.unwrap().id, id);
    }
}
