use serde::{Deserialize, Serialize};

use super::document::{ApplicationDocument, PropertyId};

/// Identifier minted by the submission backend for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Receipt returned by the submission backend on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub application_id: ApplicationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outbound boundary accepting the completed document.
///
/// Transport, status-code handling, and error-message extraction live behind
/// this trait; the wizard issues exactly one call per successful submission
/// and never retries on its own.
pub trait ApplicationGateway: Send + Sync {
    fn submit(&self, document: &ApplicationDocument) -> Result<SubmissionReceipt, SubmissionError>;
}

const GENERIC_SUBMIT_FAILURE: &str =
    "We could not submit your application right now. Please try again.";

/// Submission failure as seen by the wizard.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The backend rejected the application with its own message.
    #[error("{0}")]
    Rejected(String),
    /// The backend could not be reached or answered abnormally.
    #[error("application service unavailable: {0}")]
    Transport(String),
}

impl SubmissionError {
    /// Server message verbatim when one exists, generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_SUBMIT_FAILURE.to_string(),
        }
    }
}

/// Lookup boundary for the property summary rendered on the first step.
pub trait PropertyDirectory: Send + Sync {
    fn lookup(&self, property_id: &PropertyId) -> Result<Option<PropertySummary>, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("property directory unavailable: {0}")]
    Unavailable(String),
}

/// Property record shown on the PropertyInfo step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub property_id: PropertyId,
    pub title: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub monthly_rent: u32,
    pub photo_urls: Vec<String>,
}

impl PropertySummary {
    /// First listed photo, or the configured placeholder when none exists.
    pub fn primary_photo<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.photo_urls
            .iter()
            .map(String::as_str)
            .find(|url| !url.trim().is_empty())
            .unwrap_or(placeholder)
    }
}
