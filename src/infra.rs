//! In-memory collaborator implementations backing the binary and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::wizard::{
    ApplicationDocument, ApplicationGateway, ApplicationId, LookupError, PropertyDirectory,
    PropertyId, PropertySummary, SessionId, SessionRecord, SessionStore, SessionStoreError,
    SubmissionError, SubmissionReceipt,
};

#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionStoreError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if guard.contains_key(&record.session_id) {
            guard.insert(record.session_id.clone(), record);
            Ok(())
        } else {
            Err(SessionStoreError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Directory serving a fixed set of listings.
#[derive(Default, Clone)]
pub struct StaticPropertyDirectory {
    properties: HashMap<PropertyId, PropertySummary>,
}

impl StaticPropertyDirectory {
    pub fn with_properties(properties: impl IntoIterator<Item = PropertySummary>) -> Self {
        Self {
            properties: properties
                .into_iter()
                .map(|summary| (summary.property_id.clone(), summary))
                .collect(),
        }
    }

    /// Listings used by the demo command and local development.
    pub fn seeded() -> Self {
        Self::with_properties([
            PropertySummary {
                property_id: PropertyId("prop-001".to_string()),
                title: "Maple Court Townhome".to_string(),
                street_address: "412 Maple Ct".to_string(),
                city: "Des Moines".to_string(),
                state: "IA".to_string(),
                bedrooms: 3,
                bathrooms: 2.5,
                monthly_rent: 1650,
                photo_urls: vec!["/media/prop-001/front.jpg".to_string()],
            },
            PropertySummary {
                property_id: PropertyId("prop-002".to_string()),
                title: "Riverside Studio".to_string(),
                street_address: "88 River St".to_string(),
                city: "Des Moines".to_string(),
                state: "IA".to_string(),
                bedrooms: 1,
                bathrooms: 1.0,
                monthly_rent: 925,
                photo_urls: Vec::new(),
            },
        ])
    }
}

impl PropertyDirectory for StaticPropertyDirectory {
    fn lookup(&self, property_id: &PropertyId) -> Result<Option<PropertySummary>, LookupError> {
        Ok(self.properties.get(property_id).cloned())
    }
}

/// Gateway that accepts every document, mints sequential receipt ids, and
/// retains submissions so callers can assert on them.
#[derive(Default, Clone)]
pub struct InMemoryApplicationGateway {
    submissions: Arc<Mutex<Vec<ApplicationDocument>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryApplicationGateway {
    pub fn submissions(&self) -> Vec<ApplicationDocument> {
        self.submissions
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }
}

impl ApplicationGateway for InMemoryApplicationGateway {
    fn submit(&self, document: &ApplicationDocument) -> Result<SubmissionReceipt, SubmissionError> {
        self.submissions
            .lock()
            .expect("gateway mutex poisoned")
            .push(document.clone());
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(SubmissionReceipt {
            application_id: ApplicationId(format!("app-{id:06}")),
            message: Some("Application received".to_string()),
        })
    }
}
