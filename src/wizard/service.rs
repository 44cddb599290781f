use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::command::DocumentCommand;
use super::document::PropertyId;
use super::gateway::{ApplicationGateway, LookupError, PropertyDirectory};
use super::machine::{ApplicationWizard, SubmitError, WizardError};
use super::store::{SessionId, SessionRecord, SessionStore, SessionStoreError, SessionView};

/// Facade composing the session store with the two injected collaborators.
///
/// Sessions are single-writer; every operation loads the record, drives the
/// wizard, and writes the record back.
pub struct WizardSessionService<S, P, G> {
    sessions: Arc<S>,
    directory: Arc<P>,
    gateway: Arc<G>,
    placeholder_photo: String,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("wiz-{id:06}"))
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error(transparent)]
    Directory(#[from] LookupError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl<S, P, G> WizardSessionService<S, P, G>
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    pub fn new(
        sessions: Arc<S>,
        directory: Arc<P>,
        gateway: Arc<G>,
        placeholder_photo: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            directory,
            gateway,
            placeholder_photo: placeholder_photo.into(),
        }
    }

    /// Open a session for a property. An unknown property id still opens a
    /// session; the view simply carries no property card.
    pub fn start(&self, property_id: PropertyId) -> Result<SessionView, SessionServiceError> {
        let property = self.directory.lookup(&property_id)?;
        let record = SessionRecord {
            session_id: next_session_id(),
            property,
            wizard: ApplicationWizard::new(property_id),
        };

        let stored = self.sessions.insert(record)?;
        info!(session_id = %stored.session_id.0, "application wizard session started");
        Ok(stored.view(&self.placeholder_photo))
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let record = self.fetch(session_id)?;
        Ok(record.view(&self.placeholder_photo))
    }

    /// Apply a document command to the session's wizard.
    pub fn update(
        &self,
        session_id: &SessionId,
        command: DocumentCommand,
    ) -> Result<SessionView, SessionServiceError> {
        let mut record = self.fetch(session_id)?;
        record.wizard.update(&command)?;
        self.persist(record)
    }

    /// Advance via `next`. A validation failure is session state, not a
    /// transport error: the record is persisted with its inline errors and
    /// returned so callers can render them.
    pub fn advance(&self, session_id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let mut record = self.fetch(session_id)?;
        match record.wizard.next() {
            Ok(_) | Err(WizardError::ValidationFailed { .. }) => {}
            Err(other) => return Err(other.into()),
        }
        self.persist(record)
    }

    pub fn retreat(&self, session_id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let mut record = self.fetch(session_id)?;
        record.wizard.previous()?;
        self.persist(record)
    }

    pub fn skip(&self, session_id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let mut record = self.fetch(session_id)?;
        record.wizard.skip()?;
        self.persist(record)
    }

    /// Submit the assembled document through the gateway.
    pub fn submit(&self, session_id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let mut record = self.fetch(session_id)?;
        match record.wizard.submit(self.gateway.as_ref()) {
            Ok(receipt) => {
                info!(
                    session_id = %record.session_id.0,
                    application_id = %receipt.application_id.0,
                    "application submitted"
                );
                self.persist(record)
            }
            Err(error) => {
                warn!(session_id = %record.session_id.0, %error, "application submission failed");
                // Validation errors belong to the session; keep them visible
                // for the retry. The document itself is never rolled back.
                self.sessions.update(record)?;
                Err(error.into())
            }
        }
    }

    fn fetch(&self, session_id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self
            .sessions
            .fetch(session_id)?
            .ok_or(SessionStoreError::NotFound)?;
        Ok(record)
    }

    fn persist(&self, record: SessionRecord) -> Result<SessionView, SessionServiceError> {
        let view = record.view(&self.placeholder_photo);
        self.sessions.update(record)?;
        Ok(view)
    }
}
