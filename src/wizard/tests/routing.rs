use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::infra::{InMemorySessionStore, StaticPropertyDirectory};
use crate::wizard::{wizard_router, ApplicationGateway, SessionId, WizardSessionService};

fn app_with<G>(
    gateway: Arc<G>,
) -> (
    Router,
    Arc<WizardSessionService<InMemorySessionStore, StaticPropertyDirectory, G>>,
)
where
    G: ApplicationGateway + 'static,
{
    let service = Arc::new(build_service(gateway));
    (wizard_router(service.clone()), service)
}

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn start_route_returns_created_with_the_opening_view() {
    let (app, _service) = app_with(Arc::new(StubGateway::with_receipt("A-1")));

    let response = app
        .oneshot(post_json(
            "/api/v1/wizard/sessions",
            json!({ "property_id": "prop-123" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["step"], "property_info");
    assert_eq!(body["step_number"], 1);
    assert_eq!(body["property"]["title"], "Apollo Flats #204");
    assert!(body["session_id"].as_str().is_some_and(|id| id.starts_with("wiz-")));
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let (app, _service) = app_with(Arc::new(StubGateway::with_receipt("A-1")));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/wizard/sessions/wiz-nope")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "session not found");
}

#[tokio::test]
async fn document_route_applies_a_tagged_command() {
    let (app, service) = app_with(Arc::new(StubGateway::with_receipt("A-1")));
    let started = service
        .start(crate::wizard::PropertyId("prop-123".to_string()))
        .expect("session starts");
    let session_id = started.session_id.0;

    let response = app
        .oneshot(post_json(
            &format!("/api/v1/wizard/sessions/{session_id}/document"),
            json!({
                "op": "update_personal_information",
                "full_name": "Jane Doe",
                "email": "jane@example.com",
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let view = service
        .get(&SessionId(session_id))
        .expect("session loads");
    // The view is a summary; confirm the patch landed through the service.
    assert!(view.errors.is_empty());
}

#[tokio::test]
async fn skip_on_a_required_step_is_unprocessable() {
    let (app, service) = app_with(Arc::new(StubGateway::with_receipt("A-1")));
    let started = service
        .start(crate::wizard::PropertyId("prop-123".to_string()))
        .expect("session starts");
    let session_id = started.session_id.0;

    let response = app
        .oneshot(post_empty(&format!(
            "/api/v1/wizard/sessions/{session_id}/skip"
        )))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "step 'Property Information' cannot be skipped");
}

#[tokio::test]
async fn blocked_next_still_returns_the_view_with_inline_errors() {
    let (app, service) = app_with(Arc::new(StubGateway::with_receipt("A-1")));
    let started = service
        .start(crate::wizard::PropertyId("prop-123".to_string()))
        .expect("session starts");
    let session_id = started.session_id.0;
    service
        .advance(&SessionId(session_id.clone()))
        .expect("property info advances");

    let response = app
        .oneshot(post_empty(&format!(
            "/api/v1/wizard/sessions/{session_id}/next"
        )))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["step"], "personal_info");
    assert_eq!(
        body["errors"]["personal_information.full_name"],
        "Full name is required"
    );
}

#[tokio::test]
async fn submit_with_an_incomplete_document_is_unprocessable() {
    let (app, service) = app_with(Arc::new(StubGateway::with_receipt("A-1")));
    let started = service
        .start(crate::wizard::PropertyId("prop-123".to_string()))
        .expect("session starts");
    let session_id = started.session_id.0;
    // Reach review with the signature step skipped.
    let id = SessionId(session_id.clone());
    service.advance(&id).expect("property info advances");
    service
        .update(&id, personal_info_command())
        .expect("personal info applies");
    service.advance(&id).expect("personal info advances");
    for _ in 0..6 {
        service.skip(&id).expect("optional section skips");
    }

    let response = app
        .oneshot(post_empty(&format!(
            "/api/v1/wizard/sessions/{session_id}/submit"
        )))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "please fix the highlighted validation errors");
    assert_eq!(body["invalid_fields"], 2);
}

#[tokio::test]
async fn successful_submit_returns_the_confirmation_view() {
    let (app, service) = app_with(Arc::new(StubGateway::with_receipt("A-9")));
    let started = service
        .start(crate::wizard::PropertyId("prop-123".to_string()))
        .expect("session starts");
    let session_id = started.session_id.0;
    session_to_review(&service, &SessionId(session_id.clone()));

    let response = app
        .oneshot(post_empty(&format!(
            "/api/v1/wizard/sessions/{session_id}/submit"
        )))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["step"], "confirmation");
    assert_eq!(body["receipt"]["application_id"], "A-9");
}

#[tokio::test]
async fn gateway_rejection_surfaces_the_server_message() {
    let (app, service) = app_with(Arc::new(RejectingGateway("duplicate application on file")));
    let started = service
        .start(crate::wizard::PropertyId("prop-123".to_string()))
        .expect("session starts");
    let session_id = started.session_id.0;
    session_to_review(&service, &SessionId(session_id.clone()));

    let response = app
        .oneshot(post_empty(&format!(
            "/api/v1/wizard/sessions/{session_id}/submit"
        )))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "duplicate application on file");
}

#[tokio::test]
async fn transport_failure_falls_back_to_the_generic_message() {
    let (app, service) = app_with(Arc::new(OfflineGateway));
    let started = service
        .start(crate::wizard::PropertyId("prop-123".to_string()))
        .expect("session starts");
    let session_id = started.session_id.0;
    session_to_review(&service, &SessionId(session_id.clone()));

    let response = app
        .oneshot(post_empty(&format!(
            "/api/v1/wizard/sessions/{session_id}/submit"
        )))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "We could not submit your application right now. Please try again."
    );
}
