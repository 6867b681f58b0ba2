//! Binds user actions to wizard transitions.
//!
//! The controller is the only owner of a [`WizardSession`]. A transition is
//! computed against the current session and swapped in only when it
//! succeeds, so readers never observe a half-applied stage change.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::form::{FormField, OfferForm};
use super::session::{CalculationError, SubmitError, TransitionError, WizardSession, WizardStage};
use crate::{LeadContact, OfferLead};

#[derive(Debug, Clone, Default)]
pub struct StepController {
    session: WizardSession,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn stage(&self) -> WizardStage {
        self.session.stage()
    }

    /// Choice → Details.
    pub fn select_compare(&mut self) -> Result<&WizardSession, TransitionError> {
        let next = self.session.select_compare();
        self.apply(next)
    }

    /// Edits one draft field on the Details stage, clearing its error.
    ///
    /// Ignored on any other stage.
    pub fn update_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> &WizardSession {
        if self.session.stage() != WizardStage::Details {
            debug!(stage = %self.session.stage(), %field, "field update ignored");
            return &self.session;
        }
        let mut form = self.session.form().clone();
        form.set_field(field, value);
        self.session = self.session.with_form(form);
        &self.session
    }

    /// Details → Review when `form` validates.
    ///
    /// On validation failure the session stays on Details holding the
    /// rejected draft and its per-field errors.
    pub fn submit_details(
        &mut self,
        form: OfferForm,
    ) -> Result<&WizardSession, SubmitError> {
        match self.session.submit_details(form.clone()) {
            Ok(next) => {
                self.session = next;
                Ok(&self.session)
            }
            Err(SubmitError::Invalid(errors)) => {
                debug!(%errors, "details rejected");
                self.session = self.session.reject_details(form, errors.clone());
                Err(SubmitError::Invalid(errors))
            }
            Err(err) => {
                warn!(error = %err, "details submitted out of order");
                Err(err)
            }
        }
    }

    /// Submits the draft built up through [`StepController::update_field`].
    pub fn submit_current(&mut self) -> Result<&WizardSession, SubmitError> {
        let form = self.session.form().clone();
        self.submit_details(form)
    }

    /// Review → Details, keeping the accepted input.
    pub fn edit_details(&mut self) -> Result<&WizardSession, TransitionError> {
        let next = self.session.edit();
        self.apply(next)
    }

    /// Review → Results. The only place a quote is calculated.
    pub fn request_calculation(&mut self) -> Result<&WizardSession, CalculationError> {
        let next = self.session.calculate().inspect_err(|err| {
            warn!(error = %err, stage = %self.session.stage(), "calculation rejected");
        });
        let session = self.apply(next)?;
        if let Some(result) = session.result() {
            info!(
                quote = %result.calculated_offer_amount,
                difference = %result.difference,
                better = result.is_better_offer,
                "comparison calculated"
            );
        }
        Ok(session)
    }

    /// Results → Choice.
    pub fn compare_another(&mut self) -> Result<&WizardSession, TransitionError> {
        let next = self.session.compare_another();
        self.apply(next)
    }

    /// Back to a fresh Choice stage from anywhere.
    pub fn reset(&mut self) -> &WizardSession {
        self.session = WizardSession::new();
        &self.session
    }

    /// Builds the offer-capture payload for a finished comparison.
    ///
    /// Returns `None` unless the wizard is on Results.
    pub fn lead(
        &self,
        contact: LeadContact,
    ) -> Option<OfferLead> {
        if self.session.stage() != WizardStage::Results {
            return None;
        }
        Some(OfferLead {
            input: self.session.input()?.clone(),
            result: self.session.result()?.clone(),
            contact,
            submitted_at: Utc::now(),
        })
    }

    fn apply<E>(
        &mut self,
        next: Result<WizardSession, E>,
    ) -> Result<&WizardSession, E> {
        self.session = next?;
        Ok(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::PaymentFrequency;

    fn valid_form() -> OfferForm {
        OfferForm::new("50000", "1000", "monthly")
    }

    fn at_results() -> StepController {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();
        controller.submit_details(valid_form()).unwrap();
        controller.request_calculation().unwrap();
        controller
    }

    #[test]
    fn happy_path_then_reset() {
        let mut controller = at_results();
        assert_eq!(controller.stage(), WizardStage::Results);

        let session = controller.reset();

        assert_eq!(session.stage(), WizardStage::Choice);
        assert!(session.input().is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn results_carry_valuation() {
        let controller = at_results();
        let result = controller.session().result().unwrap();

        assert_eq!(result.calculated_offer_amount, dec!(103229.29));
        assert_eq!(result.difference, dec!(53229.29));
        assert_eq!(result.percentage_difference, dec!(106.46));
        assert!(result.is_better_offer);
    }

    #[test]
    fn annual_payment_below_existing_offer_is_not_better() {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();
        controller
            .submit_details(OfferForm::new("10000", "500", "annually"))
            .unwrap();

        let result = controller.request_calculation().unwrap().result().unwrap();

        assert_eq!(result.calculated_offer_amount, dec!(4301.22));
        assert!(!result.is_better_offer);
    }

    #[test]
    fn invalid_submit_stays_on_details_with_field_error() {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();

        let err = controller
            .submit_details(OfferForm::new("50000", "0", "monthly"))
            .unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)));
        let session = controller.session();
        assert_eq!(session.stage(), WizardStage::Details);
        assert_eq!(session.form().errors().len(), 1);
        assert!(session.form().errors().contains(FormField::PaymentAmount));
        assert_eq!(session.form().existing_offer_amount, "50000");
    }

    #[test]
    fn fixing_field_clears_its_error_and_allows_submit() {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();
        let _ = controller.submit_details(OfferForm::new("0", "0", "monthly"));

        let session = controller.update_field(FormField::PaymentAmount, "1000");
        assert!(!session.form().errors().contains(FormField::PaymentAmount));
        assert!(session.form().errors().contains(FormField::ExistingOfferAmount));

        controller.update_field(FormField::ExistingOfferAmount, "50000");
        let session = controller.submit_current().unwrap();

        assert_eq!(session.stage(), WizardStage::Review);
        assert_eq!(
            session.input().map(|i| i.payment_amount),
            Some(dec!(1000))
        );
    }

    #[test]
    fn update_field_outside_details_is_ignored() {
        let mut controller = StepController::new();

        let session = controller.update_field(FormField::PaymentAmount, "10");

        assert_eq!(session.form().payment_amount, "");
    }

    #[test]
    fn edit_and_resubmit_unchanged_keeps_input() {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();
        let original = controller
            .submit_details(valid_form().with_company("Acme"))
            .unwrap()
            .input()
            .cloned();

        controller.edit_details().unwrap();
        let session = controller.submit_current().unwrap();

        assert_eq!(session.stage(), WizardStage::Review);
        assert_eq!(session.input().cloned(), original);
    }

    #[test]
    fn edit_discards_previous_result() {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();
        controller.submit_details(valid_form()).unwrap();
        controller.edit_details().unwrap();
        controller.update_field(FormField::PaymentFrequency, "quarterly");
        controller.submit_current().unwrap();

        let result = controller.request_calculation().unwrap().result().unwrap();

        assert_eq!(result.calculated_offer_amount, dec!(34409.76));
    }

    #[test]
    fn sub_cent_payment_never_reaches_review() {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();

        let err = controller
            .submit_details(OfferForm::new("100", "0.0001", "annually"))
            .unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(controller.stage(), WizardStage::Details);
        assert_eq!(controller.request_calculation().unwrap_err(), CalculationError::MissingInput);
    }

    #[test]
    fn oversized_payment_is_a_field_error() {
        let mut controller = StepController::new();
        controller.select_compare().unwrap();

        let err = controller
            .submit_details(OfferForm::new("50000", "1000000000000000000000000000", "monthly"))
            .unwrap_err();

        let SubmitError::Invalid(errors) = err else {
            panic!("expected validation errors, got {err:?}");
        };
        assert!(errors.contains(FormField::PaymentAmount));
        assert_eq!(controller.stage(), WizardStage::Details);
    }

    #[test]
    fn every_accepted_input_calculates_a_positive_quote() {
        let extremes = [
            ("0.01", "0.01", "annually"),
            ("1000000000", "1000000000", "monthly"),
            ("0.01", "1000000000", "monthly"),
        ];

        for (existing, payment, frequency) in extremes {
            let mut controller = StepController::new();
            controller.select_compare().unwrap();
            controller
                .submit_details(OfferForm::new(existing, payment, frequency))
                .unwrap();

            let result = controller.request_calculation().unwrap().result().unwrap();

            assert!(
                result.calculated_offer_amount > Decimal::ZERO,
                "{payment} {frequency} -> {}",
                result.calculated_offer_amount
            );
        }
    }

    #[test]
    fn calculation_before_details_is_missing_input() {
        let mut controller = StepController::new();

        assert_eq!(
            controller.request_calculation().unwrap_err(),
            CalculationError::MissingInput
        );
        assert_eq!(controller.stage(), WizardStage::Choice);
    }

    #[test]
    fn out_of_order_submit_is_rejected_without_change() {
        let mut controller = StepController::new();

        let err = controller.submit_details(valid_form()).unwrap_err();

        assert!(matches!(err, SubmitError::Transition(_)));
        assert_eq!(controller.session(), &WizardSession::new());
    }

    #[test]
    fn compare_another_returns_to_choice() {
        let mut controller = at_results();

        let session = controller.compare_another().unwrap();

        assert_eq!(session, &WizardSession::new());
    }

    #[test]
    fn lead_only_available_on_results() {
        let mut controller = StepController::new();
        assert!(controller.lead(LeadContact::default()).is_none());

        controller.select_compare().unwrap();
        controller.submit_details(valid_form()).unwrap();
        assert!(controller.lead(LeadContact::default()).is_none());

        controller.request_calculation().unwrap();
        let contact = LeadContact {
            name: Some("Jordan".to_string()),
            ..Default::default()
        };
        let lead = controller.lead(contact.clone()).unwrap();

        assert_eq!(lead.contact, contact);
        assert_eq!(lead.input.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(lead.result.calculated_offer_amount, dec!(103229.29));
    }
}
