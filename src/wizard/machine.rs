use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::command::{DocumentCommand, DocumentError};
use super::document::{ApplicationDocument, PropertyId};
use super::gateway::{ApplicationGateway, SubmissionError, SubmissionReceipt};
use super::step::WizardStep;
use super::validation::{validate_document, validate_step, FieldErrors};

/// The wizard state machine: one document, a step pointer, the set of steps
/// completed via validated `next`, and the current field error map.
///
/// All transitions are synchronous; the only external effect is the single
/// gateway call made by [`submit`](ApplicationWizard::submit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWizard {
    step: WizardStep,
    completed: BTreeSet<WizardStep>,
    document: ApplicationDocument,
    errors: FieldErrors,
    submitting: bool,
    receipt: Option<SubmissionReceipt>,
}

/// Transition failures. Validation failures leave the error detail on the
/// wizard itself (see [`ApplicationWizard::errors`]) so callers can render
/// inline messages.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("the wizard already reached confirmation")]
    WizardComplete,
    #[error("already at the first step")]
    AlreadyAtFirstStep,
    #[error("the review step advances through submit only")]
    SubmitRequired,
    #[error("step '{0}' cannot be skipped")]
    StepNotSkippable(WizardStep),
    #[error("step '{step}' has validation errors")]
    ValidationFailed { step: WizardStep },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Submission failures; the document and step are preserved on every variant
/// so the applicant can retry without re-entering data.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submit is only available from the review step (currently '{0}')")]
    NotAtReview(WizardStep),
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("the application has {fields} unresolved validation error(s)")]
    DocumentInvalid { fields: usize },
    #[error(transparent)]
    Gateway(#[from] SubmissionError),
}

impl ApplicationWizard {
    pub fn new(property_id: PropertyId) -> Self {
        Self {
            step: WizardStep::PropertyInfo,
            completed: BTreeSet::new(),
            document: ApplicationDocument::new(property_id),
            errors: FieldErrors::new(),
            submitting: false,
            receipt: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn property_id(&self) -> &PropertyId {
        &self.document.property_id
    }

    pub fn document(&self) -> &ApplicationDocument {
        &self.document
    }

    pub fn completed_steps(&self) -> &BTreeSet<WizardStep> {
        &self.completed
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    /// Apply a document command, replacing the held document with the new
    /// value and clearing stale errors on the edited fields.
    pub fn update(&mut self, command: &DocumentCommand) -> Result<(), WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::WizardComplete);
        }

        let next = self.document.apply(command)?;
        for path in command.touched_paths() {
            self.errors.remove(&path);
        }
        self.document = next;
        Ok(())
    }

    /// Validate the current step and advance by one.
    ///
    /// On success the step joins the completed set; on validation failure the
    /// pointer stays put and the field error map is replaced with the step's
    /// freshly derived errors.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Confirmation => return Err(WizardError::WizardComplete),
            WizardStep::ReviewSubmit => return Err(WizardError::SubmitRequired),
            _ => {}
        }

        let errors = validate_step(self.step, &self.document);
        if !errors.is_empty() {
            self.errors = errors;
            return Err(WizardError::ValidationFailed { step: self.step });
        }

        self.errors.clear();
        self.completed.insert(self.step);
        let next = self.step.next().ok_or(WizardError::WizardComplete)?;
        self.step = next;
        Ok(next)
    }

    /// Step back without validating; document, completed marks, and errors
    /// all stay exactly as they were.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::WizardComplete);
        }
        let previous = self.step.previous().ok_or(WizardError::AlreadyAtFirstStep)?;
        self.step = previous;
        Ok(previous)
    }

    /// Advance past an optional section without validating and without
    /// marking it completed.
    pub fn skip(&mut self) -> Result<WizardStep, WizardError> {
        if !self.step.is_skippable() {
            return Err(WizardError::StepNotSkippable(self.step));
        }
        let next = self.step.next().ok_or(WizardError::WizardComplete)?;
        self.step = next;
        Ok(next)
    }

    /// Run whole-document validation and, if clean, issue the one terminal
    /// gateway call. Success stores the receipt and forces the pointer to
    /// Confirmation; any failure leaves step and document untouched.
    pub fn submit(
        &mut self,
        gateway: &dyn ApplicationGateway,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if self.step != WizardStep::ReviewSubmit {
            return Err(SubmitError::NotAtReview(self.step));
        }
        if self.submitting {
            return Err(SubmitError::AlreadyInFlight);
        }

        let errors = validate_document(&self.document);
        if !errors.is_empty() {
            let fields = errors.len();
            self.errors = errors;
            return Err(SubmitError::DocumentInvalid { fields });
        }
        self.errors.clear();

        self.submitting = true;
        let result = gateway.submit(&self.document);
        self.submitting = false;

        let receipt = result?;
        self.receipt = Some(receipt.clone());
        self.completed.insert(WizardStep::ReviewSubmit);
        self.step = WizardStep::Confirmation;
        Ok(receipt)
    }
}
