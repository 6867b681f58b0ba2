//! Offer comparison wizard: form boundary, session state machine and the
//! controller that owns a session.

pub mod controller;
pub mod form;
pub mod session;

pub use controller::StepController;
pub use form::{AmountError, FormField, MAX_AMOUNT, OfferForm, ValidationErrors, parse_amount};
pub use session::{
    CalculationError, SubmitError, TransitionError, WizardEvent, WizardSession, WizardStage,
};
