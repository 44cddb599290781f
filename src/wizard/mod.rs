//! Multi-step rental application intake wizard.
//!
//! The wizard collects one nested [`ApplicationDocument`] across ten ordered
//! steps with per-step validation, skip/previous/next navigation, and a
//! single terminal submission through the injected gateway. The session
//! service hosts one wizard per applicant behind the HTTP router.

pub mod command;
pub mod document;
pub mod gateway;
pub(crate) mod machine;
pub mod router;
pub mod service;
pub mod step;
pub mod store;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use command::{
    AdditionalInfoPatch, ContactPatch, CreditPatch, CurrentAddressPatch, DocumentCommand,
    DocumentError, ElectronicSignaturePatch, EmployerPatch, EmploymentPatch, PersonalPatch,
    PreviousAddressPatch, ReferencePatch, SignaturePatch, TermsPatch,
};
pub use document::{
    AdditionalInformation, ApplicationDocument, BankruptcyHistory, CreditBackgroundCheck,
    CreditScoreRange, CriminalBackground, CurrentAddress, CurrentEmployer, ElectronicSignature,
    EmergencyContact, EmploymentIncome, EvictionHistory, PersonalInformation, PreviousAddress,
    PropertyId, ReferenceEntry, References, ResidentialHistory, SignatureAcknowledgment,
    TermsAcknowledgment,
};
pub use gateway::{
    ApplicationGateway, ApplicationId, LookupError, PropertyDirectory, PropertySummary,
    SubmissionError, SubmissionReceipt,
};
pub use machine::{ApplicationWizard, SubmitError, WizardError};
pub use router::wizard_router;
pub use service::{SessionServiceError, WizardSessionService};
pub use step::WizardStep;
pub use store::{
    PropertyCard, SessionId, SessionRecord, SessionStore, SessionStoreError, SessionView,
};
pub use validation::{validate_document, validate_step, FieldErrors};
