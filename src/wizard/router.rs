use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::command::DocumentCommand;
use super::document::PropertyId;
use super::gateway::{ApplicationGateway, PropertyDirectory};
use super::machine::SubmitError;
use super::service::{SessionServiceError, WizardSessionService};
use super::store::{SessionId, SessionStore, SessionStoreError};

/// Router builder exposing the wizard session endpoints.
pub fn wizard_router<S, P, G>(service: Arc<WizardSessionService<S, P, G>>) -> Router
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    Router::new()
        .route("/api/v1/wizard/sessions", post(start_handler::<S, P, G>))
        .route(
            "/api/v1/wizard/sessions/:session_id",
            get(session_handler::<S, P, G>),
        )
        .route(
            "/api/v1/wizard/sessions/:session_id/document",
            post(update_handler::<S, P, G>),
        )
        .route(
            "/api/v1/wizard/sessions/:session_id/next",
            post(next_handler::<S, P, G>),
        )
        .route(
            "/api/v1/wizard/sessions/:session_id/previous",
            post(previous_handler::<S, P, G>),
        )
        .route(
            "/api/v1/wizard/sessions/:session_id/skip",
            post(skip_handler::<S, P, G>),
        )
        .route(
            "/api/v1/wizard/sessions/:session_id/submit",
            post(submit_handler::<S, P, G>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartSessionRequest {
    property_id: String,
}

pub(crate) async fn start_handler<S, P, G>(
    State(service): State<Arc<WizardSessionService<S, P, G>>>,
    axum::Json(request): axum::Json<StartSessionRequest>,
) -> Response
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    match service.start(PropertyId(request.property_id)) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<S, P, G>(
    State(service): State<Arc<WizardSessionService<S, P, G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    respond(service.get(&SessionId(session_id)))
}

pub(crate) async fn update_handler<S, P, G>(
    State(service): State<Arc<WizardSessionService<S, P, G>>>,
    Path(session_id): Path<String>,
    axum::Json(command): axum::Json<DocumentCommand>,
) -> Response
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    respond(service.update(&SessionId(session_id), command))
}

pub(crate) async fn next_handler<S, P, G>(
    State(service): State<Arc<WizardSessionService<S, P, G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    respond(service.advance(&SessionId(session_id)))
}

pub(crate) async fn previous_handler<S, P, G>(
    State(service): State<Arc<WizardSessionService<S, P, G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    respond(service.retreat(&SessionId(session_id)))
}

pub(crate) async fn skip_handler<S, P, G>(
    State(service): State<Arc<WizardSessionService<S, P, G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    respond(service.skip(&SessionId(session_id)))
}

pub(crate) async fn submit_handler<S, P, G>(
    State(service): State<Arc<WizardSessionService<S, P, G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    P: PropertyDirectory + 'static,
    G: ApplicationGateway + 'static,
{
    respond(service.submit(&SessionId(session_id)))
}

fn respond(
    result: Result<super::store::SessionView, SessionServiceError>,
) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SessionServiceError) -> Response {
    match error {
        SessionServiceError::Store(SessionStoreError::NotFound) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        SessionServiceError::Store(SessionStoreError::Conflict) => {
            let payload = json!({ "error": "session already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        SessionServiceError::Submit(SubmitError::AlreadyInFlight) => {
            let payload = json!({ "error": "a submission is already in flight" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        SessionServiceError::Submit(SubmitError::DocumentInvalid { fields }) => {
            let payload = json!({
                "error": "please fix the highlighted validation errors",
                "invalid_fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        SessionServiceError::Submit(SubmitError::Gateway(gateway_error)) => {
            let payload = json!({ "error": gateway_error.user_message() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        SessionServiceError::Submit(other @ SubmitError::NotAtReview(_)) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        SessionServiceError::Wizard(wizard_error) => {
            let payload = json!({ "error": wizard_error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
