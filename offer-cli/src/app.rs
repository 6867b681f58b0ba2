use offer_core::wizard::{
    CalculationError, OfferForm, StepController, SubmitError, TransitionError, ValidationErrors,
};
use offer_core::{LeadSubmitter, OfferLead};
use offer_db_sqlite::{SqliteLeadStore, StoreConfig};
use thiserror::Error;

/// Why a one-shot comparison did not reach Results.
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("{0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

impl From<SubmitError> for ComparisonError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => Self::Invalid(errors),
            SubmitError::Transition(err) => Self::Transition(err),
        }
    }
}

/// Walks a fresh wizard from Choice to Results with `form` as the details.
///
/// The returned controller sits on Results.
pub fn run_comparison(form: OfferForm) -> Result<StepController, ComparisonError> {
    let mut controller = StepController::new();
    controller.select_compare()?;
    controller.submit_details(form)?;
    controller.request_calculation()?;
    Ok(controller)
}

/// Opens the lead store and hands `lead` to it.
///
/// Failing to open the store is an error. A rejected lead is reported as
/// `false`.
pub async fn submit_lead(
    config: &StoreConfig,
    lead: &OfferLead,
) -> anyhow::Result<bool> {
    let store = SqliteLeadStore::open(config).await?;
    Ok(store.submit(lead).await)
}
