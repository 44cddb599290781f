use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::infra::{InMemorySessionStore, StaticPropertyDirectory};
use crate::wizard::{
    ApplicationDocument, ApplicationGateway, ApplicationId, ApplicationWizard, DocumentCommand,
    PersonalPatch, PropertyId, PropertySummary, SessionId, SignaturePatch, SubmissionError,
    SubmissionReceipt, TermsPatch, WizardSessionService, WizardStep,
};

pub(super) const PLACEHOLDER_PHOTO: &str = "/media/property-placeholder.jpg";

pub(super) fn listed_property() -> PropertySummary {
    PropertySummary {
        property_id: PropertyId("prop-123".to_string()),
        title: "Apollo Flats #204".to_string(),
        street_address: "204 Apollo Ave".to_string(),
        city: "Des Moines".to_string(),
        state: "IA".to_string(),
        bedrooms: 2,
        bathrooms: 1.5,
        monthly_rent: 1180,
        photo_urls: vec!["/media/prop-123/front.jpg".to_string()],
    }
}

pub(super) fn photoless_property() -> PropertySummary {
    PropertySummary {
        property_id: PropertyId("prop-200".to_string()),
        title: "Cedar Duplex".to_string(),
        street_address: "9 Cedar Ln".to_string(),
        city: "Ames".to_string(),
        state: "IA".to_string(),
        bedrooms: 2,
        bathrooms: 1.0,
        monthly_rent: 990,
        photo_urls: vec![String::new()],
    }
}

pub(super) fn directory() -> StaticPropertyDirectory {
    StaticPropertyDirectory::with_properties([listed_property(), photoless_property()])
}

pub(super) fn personal_info_command() -> DocumentCommand {
    DocumentCommand::UpdatePersonalInformation(PersonalPatch {
        full_name: Some("Jane Doe".to_string()),
        email: Some("jane@example.com".to_string()),
        phone_number: Some("555-0100".to_string()),
        ..PersonalPatch::default()
    })
}

pub(super) fn terms_command() -> DocumentCommand {
    DocumentCommand::UpdateSignature(SignaturePatch {
        terms_acknowledgment: Some(TermsPatch {
            agree_to_lease_terms: Some(true),
            consent_to_background_credit_checks: Some(true),
            understand_rental_policies: Some(true),
        }),
        ..SignaturePatch::default()
    })
}

pub(super) fn empty_wizard() -> ApplicationWizard {
    ApplicationWizard::new(PropertyId("prop-123".to_string()))
}

/// Wizard with the two blocking sections already filled, positioned on the
/// requested step by repeated validated `next` calls.
pub(super) fn wizard_at(step: WizardStep) -> ApplicationWizard {
    assert!(
        step != WizardStep::Confirmation,
        "confirmation requires a submit"
    );
    let mut wizard = empty_wizard();
    wizard
        .update(&personal_info_command())
        .expect("personal info applies");
    wizard.update(&terms_command()).expect("terms apply");
    while wizard.step() != step {
        wizard.next().expect("scripted advance");
    }
    wizard
}

/// Gateway that accepts everything with a fixed receipt and records calls.
pub(super) struct StubGateway {
    receipt_id: String,
    calls: Arc<Mutex<Vec<ApplicationDocument>>>,
}

impl StubGateway {
    pub(super) fn with_receipt(receipt_id: &str) -> Self {
        Self {
            receipt_id: receipt_id.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(super) fn calls(&self) -> Vec<ApplicationDocument> {
        self.calls.lock().expect("gateway mutex poisoned").clone()
    }
}

impl ApplicationGateway for StubGateway {
    fn submit(&self, document: &ApplicationDocument) -> Result<SubmissionReceipt, SubmissionError> {
        self.calls
            .lock()
            .expect("gateway mutex poisoned")
            .push(document.clone());
        Ok(SubmissionReceipt {
            application_id: ApplicationId(self.receipt_id.clone()),
            message: None,
        })
    }
}

/// Gateway rejecting every submission with a server-provided message.
pub(super) struct RejectingGateway(pub(super) &'static str);

impl ApplicationGateway for RejectingGateway {
    fn submit(&self, _document: &ApplicationDocument) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Rejected(self.0.to_string()))
    }
}

/// Gateway whose transport always fails.
pub(super) struct OfflineGateway;

impl ApplicationGateway for OfflineGateway {
    fn submit(&self, _document: &ApplicationDocument) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Transport("connection reset".to_string()))
    }
}

pub(super) fn build_service<G>(
    gateway: Arc<G>,
) -> WizardSessionService<InMemorySessionStore, StaticPropertyDirectory, G>
where
    G: ApplicationGateway + 'static,
{
    WizardSessionService::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(directory()),
        gateway,
        PLACEHOLDER_PHOTO,
    )
}

/// Drive a freshly started session to the review step through the facade.
pub(super) fn session_to_review<G>(
    service: &WizardSessionService<InMemorySessionStore, StaticPropertyDirectory, G>,
    session_id: &SessionId,
) where
    G: ApplicationGateway + 'static,
{
    service.advance(session_id).expect("property info advances");
    service
        .update(session_id, personal_info_command())
        .expect("personal info applies");
    service.advance(session_id).expect("personal info advances");
    for _ in 0..5 {
        service.skip(session_id).expect("optional section skips");
    }
    service
        .update(session_id, terms_command())
        .expect("terms apply");
    service.advance(session_id).expect("signature advances");
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
