//! Integration tests for [`PublishClient`] against a mock API server.
//!
//! Covers the request shape (path, headers, body), success decoding and
//! the error-message precedence for non-2xx responses.

use assert_matches::assert_matches;
use obitpub_client::{PublishClient, PublishError, Routing};
use obitpub_core::Environment;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PublishClient {
    PublishClient::new(Routing::Custom(server.uri()))
}

fn sample_payload() -> serde_json::Value {
    json!({
        "person": { "name": { "first": "Jane", "last": "Doe" } },
        "obituary": {
            "obituary_text": "Jane Doe passed away peacefully.",
            "publish_start_date": "2024-01-01",
            "obituary_type": "paid"
        },
        "source_info": {
            "source_type": "publisher",
            "source": "ipublish",
            "source_reference_id": "X1"
        },
        "version": "2024-01-01T09:00:00.000Z"
    })
}

// ---------------------------------------------------------------------------
// Success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn posts_payload_with_api_key_header() {
    let server = MockServer::start().await;
    let payload = sample_payload();

    Mock::given(method("POST"))
        .and(path("/v1/obituaries/"))
        .and(header("x-api-key", "secret-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "obituary_id": "ob-1",
            "redirector_url": "https://www.legacy.com/obit/ob-1",
            "warnings": ["email not verified"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .publish("secret-key", Environment::Stage, &payload)
        .await
        .expect("publish should succeed");

    assert_eq!(resp.obituary_id.as_deref(), Some("ob-1"));
    assert_eq!(
        resp.redirector_url.as_deref(),
        Some("https://www.legacy.com/obit/ob-1")
    );
    assert_eq!(resp.warnings, vec!["email not verified"]);
}

#[tokio::test]
async fn minimal_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/obituaries/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "obituary_id": 42 })))
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .unwrap();
    assert_eq!(resp.obituary_id.as_deref(), Some("42"));
    assert!(resp.redirector_url.is_none());
    assert!(resp.warnings.is_empty());
}

#[tokio::test]
async fn accepted_body_without_id_is_still_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/obituaries/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ob-1",
            "redirector_url": "https://x/ob-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .expect("a 2xx JSON body is an accepted submission");
    assert_eq!(resp.obituary_id, None);
    assert_eq!(resp.redirector_url.as_deref(), Some("https://x/ob-1"));
    assert_eq!(resp.extra["id"], "ob-1");
}

#[tokio::test]
async fn success_with_unparseable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .unwrap_err();
    assert_matches!(err, PublishError::InvalidResponse(_));
    assert_eq!(err.status_code(), None);
}

// ---------------------------------------------------------------------------
// Server errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn errors_array_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "errors": ["bad date"] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "bad date");
    assert_eq!(err.status_code(), Some(422));
    assert_matches!(err, PublishError::Api { body: Some(_), .. });
}

#[tokio::test]
async fn message_field_preferred_over_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Forbidden: invalid API key",
            "errors": ["ignored"]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Forbidden: invalid API key");
    assert_eq!(err.status_code(), Some(403));
}

#[tokio::test]
async fn bare_status_falls_back_to_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "detail": "nope" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 422: Unprocessable Entity");
    assert_eq!(err.status_code(), Some(422));
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        PublishError::Api { status: 502, ref message, body: None } if message == "HTTP 502: Bad Gateway"
    );
}

// ---------------------------------------------------------------------------
// Local and transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_api_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .publish("", Environment::Prod, &sample_payload())
        .await
        .unwrap_err();
    assert_matches!(err, PublishError::MissingApiKey);
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    // Grab a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = PublishClient::new(Routing::Custom(uri))
        .publish("k", Environment::Prod, &sample_payload())
        .await
        .unwrap_err();
    assert_matches!(err, PublishError::Transport(_));
    assert_eq!(err.status_code(), None);
}
