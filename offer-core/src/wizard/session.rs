//! The offer comparison wizard as an explicit state machine.
//!
//! | From    | Event            | To      | Effect |
//! |---------|------------------|---------|--------|
//! | Choice  | select compare   | Details | none |
//! | Details | submit (valid)   | Review  | input accepted |
//! | Details | submit (invalid) | Details | field errors attached |
//! | Review  | edit             | Details | input kept, draft refilled |
//! | Review  | calculate        | Results | quote and comparison computed |
//! | Results | compare another  | Choice  | input and result cleared |
//!
//! Transitions never mutate a session in place. Each returns the next
//! session value, so a caller either sees the whole transition or none of it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::form::{OfferForm, ValidationErrors};
use crate::calculations::{ValuationError, value_offer};
use crate::{OfferComparisonInput, ValuationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStage {
    #[default]
    Choice,
    Details,
    Review,
    Results,
}

impl WizardStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Details => "details",
            Self::Review => "review",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for WizardStage {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User actions that drive the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardEvent {
    SelectCompare,
    SubmitDetails,
    Edit,
    Calculate,
    CompareAnother,
}

impl fmt::Display for WizardEvent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::SelectCompare => "select compare",
            Self::SubmitDetails => "submit details",
            Self::Edit => "edit details",
            Self::Calculate => "calculate",
            Self::CompareAnother => "compare another",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {event} from the {from} stage")]
    InvalidTransition { from: WizardStage, event: WizardEvent },
}

/// Failure of a details submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The form had bad fields; the wizard stays on Details.
    #[error("invalid details: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Failure to calculate. Always a caller ordering bug, never bad user data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("calculation requested before any details were accepted")]
    MissingInput,

    #[error("calculation requested from the {0} stage")]
    OutOfOrder(WizardStage),

    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// One user's comparison in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WizardSession {
    stage: WizardStage,
    form: OfferForm,
    input: Option<OfferComparisonInput>,
    result: Option<ValuationResult>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    /// Current draft of the details form, with any field errors.
    pub fn form(&self) -> &OfferForm {
        &self.form
    }

    pub fn input(&self) -> Option<&OfferComparisonInput> {
        self.input.as_ref()
    }

    pub fn result(&self) -> Option<&ValuationResult> {
        self.result.as_ref()
    }

    pub fn select_compare(&self) -> Result<Self, TransitionError> {
        self.expect_stage(WizardStage::Choice, WizardEvent::SelectCompare)?;
        Ok(Self {
            stage: WizardStage::Details,
            ..Self::default()
        })
    }

    /// Validates `form` and moves to Review.
    ///
    /// On [`SubmitError::Invalid`] the caller keeps this session.
    pub fn submit_details(
        &self,
        form: OfferForm,
    ) -> Result<Self, SubmitError> {
        self.expect_stage(WizardStage::Details, WizardEvent::SubmitDetails)?;
        let input = form.validate().map_err(SubmitError::Invalid)?;
        Ok(Self {
            stage: WizardStage::Review,
            form: form.with_errors(ValidationErrors::new()),
            input: Some(input),
            result: None,
        })
    }

    /// Stays on Details, keeping the rejected draft and its errors.
    pub(crate) fn reject_details(
        &self,
        form: OfferForm,
        errors: ValidationErrors,
    ) -> Self {
        Self {
            form: form.with_errors(errors),
            ..self.clone()
        }
    }

    pub fn edit(&self) -> Result<Self, TransitionError> {
        self.expect_stage(WizardStage::Review, WizardEvent::Edit)?;
        let form = self
            .input
            .as_ref()
            .map(OfferForm::from_input)
            .unwrap_or_else(|| self.form.clone());
        Ok(Self {
            stage: WizardStage::Details,
            form,
            input: self.input.clone(),
            result: None,
        })
    }

    /// Values the accepted input and moves to Results.
    pub fn calculate(&self) -> Result<Self, CalculationError> {
        let input = self.input.as_ref().ok_or(CalculationError::MissingInput)?;
        if self.stage != WizardStage::Review {
            return Err(CalculationError::OutOfOrder(self.stage));
        }
        let result = value_offer(input)?;
        Ok(Self {
            stage: WizardStage::Results,
            form: self.form.clone(),
            input: Some(input.clone()),
            result: Some(result),
        })
    }

    pub fn compare_another(&self) -> Result<Self, TransitionError> {
        self.expect_stage(WizardStage::Results, WizardEvent::CompareAnother)?;
        Ok(Self::new())
    }

    pub(crate) fn with_form(
        &self,
        form: OfferForm,
    ) -> Self {
        Self {
            form,
            ..self.clone()
        }
    }

    fn expect_stage(
        &self,
        expected: WizardStage,
        event: WizardEvent,
    ) -> Result<(), TransitionError> {
        if self.stage == expected {
            debug!(from = %self.stage, %event, "wizard transition");
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                from: self.stage,
                event,
            })
        }
    }
}
