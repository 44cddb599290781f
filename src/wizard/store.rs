use serde::{Deserialize, Serialize};

use super::document::PropertyId;
use super::gateway::{PropertySummary, SubmissionReceipt};
use super::machine::ApplicationWizard;
use super::step::WizardStep;
use super::validation::FieldErrors;

/// Identifier of one wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Stored state for one applicant's wizard run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub property: Option<PropertySummary>,
    pub wizard: ApplicationWizard,
}

impl SessionRecord {
    /// Serialized snapshot for API responses.
    pub fn view(&self, placeholder_photo: &str) -> SessionView {
        SessionView {
            session_id: self.session_id.clone(),
            property_id: self.wizard.property_id().clone(),
            step: self.wizard.step(),
            step_number: self.wizard.step().number(),
            step_label: self.wizard.step().label(),
            skippable: self.wizard.step().is_skippable(),
            completed_steps: self.wizard.completed_steps().iter().copied().collect(),
            errors: self.wizard.errors().clone(),
            submitting: self.wizard.is_submitting(),
            property: self
                .property
                .as_ref()
                .map(|summary| PropertyCard::from_summary(summary, placeholder_photo)),
            receipt: self.wizard.receipt().cloned(),
        }
    }
}

/// Storage abstraction so the session service can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionStoreError>;
    fn update(&self, record: SessionRecord) -> Result<(), SessionStoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Client-facing snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub property_id: PropertyId,
    pub step: WizardStep,
    pub step_number: u8,
    pub step_label: &'static str,
    pub skippable: bool,
    pub completed_steps: Vec<WizardStep>,
    pub errors: FieldErrors,
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionReceipt>,
}

/// Property summary card rendered on the first step, with the placeholder
/// photo already substituted when the listing has no usable media.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyCard {
    pub title: String,
    pub address_line: String,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub monthly_rent: u32,
    pub photo_url: String,
}

impl PropertyCard {
    fn from_summary(summary: &PropertySummary, placeholder_photo: &str) -> Self {
        Self {
            title: summary.title.clone(),
            address_line: format!(
                "{}, {}, {}",
                summary.street_address, summary.city, summary.state
            ),
            bedrooms: summary.bedrooms,
            bathrooms: summary.bathrooms,
            monthly_rent: summary.monthly_rent,
            photo_url: summary.primary_photo(placeholder_photo).to_string(),
        }
    }
}
