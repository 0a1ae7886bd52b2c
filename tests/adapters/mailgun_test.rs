//! Mailgun adapter tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use emailer::providers::{HttpMailgunClient, MailgunAdapter, MailgunClient, Payload};
use emailer::{DeliveryResult, Email, MailError, ServiceAdapter, ValidationError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn valid_email() -> Email {
    let mut email = Email::new();
    email
        .set_from("Tony Stark", "tony.stark@example.com")
        .unwrap()
        .set_to("to", "Steve Rogers", "steve.rogers@example.com")
        .unwrap();
    email
        .set_subject("Hello, Avengers!")
        .set_html("<h1>Hello</h1>");
    email
}

fn success_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "Queued. Thank you.",
        "id": "<20111114174239.25659.5817@samples.mailgun.org>"
    }))
}

/// Client that records every call instead of hitting the network.
#[derive(Clone, Default)]
struct RecordingClient {
    calls: Arc<Mutex<Vec<(String, Payload)>>>,
}

impl RecordingClient {
    fn calls(&self) -> Vec<(String, Payload)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailgunClient for RecordingClient {
    async fn send_message(
        &self,
        domain: &str,
        payload: &Payload,
    ) -> Result<DeliveryResult, MailError> {
        self.calls
            .lock()
            .unwrap()
            .push((domain.to_string(), payload.clone()));
        Ok(DeliveryResult::new("recorded"))
    }
}

fn http_adapter(server: &MockServer, domain: &str) -> MailgunAdapter {
    let client = HttpMailgunClient::new("fake-api-key").base_url(server.uri());
    MailgunAdapter::with_client(client, domain)
}

// ============================================================================
// Payload Tests
// ============================================================================

#[test]
fn build_message_formats_from() {
    let mut email = Email::new();
    email
        .set_from("Bob", "bob@host.com")
        .unwrap()
        .set_to("to", "Alice", "alice@x.com")
        .unwrap();
    email.set_text("Hi");

    let payload = MailgunAdapter::build_message(&email).unwrap();
    assert_eq!(payload.get("from"), Some("Bob <bob@host.com>"));
}

#[test]
fn build_message_joins_to_recipients_in_order() {
    let mut email = Email::new();
    email
        .set_from("Bob", "bob@host.com")
        .unwrap()
        .set_to("to", "Alice", "alice@x.com")
        .unwrap()
        .set_to("cc", "Zed", "zed@x.com")
        .unwrap()
        .set_to("to", "Carl", "carl@x.com")
        .unwrap();
    email.set_text("Hi");

    let payload = MailgunAdapter::build_message(&email).unwrap();
    assert_eq!(
        payload.get("to"),
        Some("Alice <alice@x.com>, Carl <carl@x.com>")
    );
    assert_eq!(payload.get("cc"), Some("Zed <zed@x.com>"));
    assert!(!payload.contains_key("bcc"));
}

#[test]
fn build_message_with_all_fields() {
    let mut email = Email::new();
    email
        .set_from("T Stark", "tony.stark@example.com")
        .unwrap()
        .set_to("to", "Steve Rogers", "steve.rogers@example.com")
        .unwrap()
        .set_to("cc", "Bruce Banner", "hulk.smash@example.com")
        .unwrap()
        .set_to("cc", "Thor Odinson", "thor.odinson@example.com")
        .unwrap()
        .set_to("bcc", "Clinton Francis Barton", "hawk.eye@example.com")
        .unwrap();
    email
        .set_subject("Hello, Avengers!")
        .set_html("<h1>Hello</h1>")
        .set_text("Hello")
        .set_header("X-Test", "1")
        .set_header("In-Reply-To", "<1234@example.com>")
        .set_tag("welcome");

    let payload = MailgunAdapter::build_message(&email).unwrap();

    assert_eq!(payload.get("from"), Some("T Stark <tony.stark@example.com>"));
    assert_eq!(
        payload.get("to"),
        Some("Steve Rogers <steve.rogers@example.com>")
    );
    assert_eq!(
        payload.get("cc"),
        Some("Bruce Banner <hulk.smash@example.com>, Thor Odinson <thor.odinson@example.com>")
    );
    assert_eq!(
        payload.get("bcc"),
        Some("Clinton Francis Barton <hawk.eye@example.com>")
    );
    assert_eq!(payload.get("subject"), Some("Hello, Avengers!"));
    assert_eq!(payload.get("html"), Some("<h1>Hello</h1>"));
    assert_eq!(payload.get("text"), Some("Hello"));
    assert_eq!(payload.get("h:X-Test"), Some("1"));
    assert_eq!(payload.get("h:In-Reply-To"), Some("<1234@example.com>"));
    assert_eq!(payload.get("o:tag"), Some("welcome"));
    assert_eq!(payload.len(), 10);
}

#[test]
fn build_message_without_from_fails() {
    let mut email = Email::new();
    email
        .set_to("to", "Steve Rogers", "steve.rogers@example.com")
        .unwrap();
    email.set_text("Hi");

    let err = MailgunAdapter::build_message(&email).unwrap_err();
    assert_eq!(err, ValidationError::MissingFrom);
    assert_eq!(err.to_string(), "From parameter is missing");
}

#[test]
fn build_message_with_only_cc_and_bcc_fails() {
    let mut email = Email::new();
    email
        .set_from("Tony Stark", "tony.stark@example.com")
        .unwrap()
        .set_to("cc", "Bruce Banner", "hulk.smash@example.com")
        .unwrap()
        .set_to("bcc", "Thor Odinson", "thor.odinson@example.com")
        .unwrap();
    email.set_text("Hi");

    let err = MailgunAdapter::build_message(&email).unwrap_err();
    assert_eq!(err, ValidationError::MissingRecipients);
    assert_eq!(
        err.to_string(),
        "An email must have at least a single recipient"
    );
}

#[test]
fn build_message_without_body_fails() {
    let mut email = Email::new();
    email
        .set_from("Tony Stark", "tony.stark@example.com")
        .unwrap()
        .set_to("to", "Steve Rogers", "steve.rogers@example.com")
        .unwrap();
    email.set_subject("Hello!");

    let err = MailgunAdapter::build_message(&email).unwrap_err();
    assert_eq!(err, ValidationError::MissingBody);
    assert_eq!(err.to_string(), "A message body in HTML or text is missing");
}

#[test]
fn build_message_omits_empty_body_variant() {
    let payload = MailgunAdapter::build_message(&valid_email()).unwrap();
    assert!(payload.contains_key("html"));
    assert!(!payload.contains_key("text"));
    assert!(!payload.contains_key("o:tag"));
}

// ============================================================================
// Client Boundary Tests
// ============================================================================

#[tokio::test]
async fn send_passes_domain_and_payload_to_client() {
    let client = RecordingClient::default();
    let adapter = MailgunAdapter::with_client(client.clone(), "avengers.com");

    let result = adapter.send(&valid_email()).await.unwrap();
    assert_eq!(result.message_id, "recorded");

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "avengers.com");
    assert_eq!(
        calls[0].1,
        MailgunAdapter::build_message(&valid_email()).unwrap()
    );
}

#[tokio::test]
async fn send_invalid_email_never_reaches_client() {
    let client = RecordingClient::default();
    let adapter = MailgunAdapter::with_client(client.clone(), "avengers.com");

    let err = adapter.send(&Email::new()).await.unwrap_err();
    assert!(matches!(
        err,
        MailError::Validation(ValidationError::MissingFrom)
    ));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn inspector_sees_payload_before_send() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&seen);

    let adapter = MailgunAdapter::with_client(RecordingClient::default(), "avengers.com")
        .inspect_with(move |domain: &str, payload: &Payload| {
            sink.lock()
                .unwrap()
                .push(format!("{}:{}", domain, payload.get("to").unwrap_or_default()));
        });

    adapter.send(&valid_email()).await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["avengers.com:Steve Rogers <steve.rogers@example.com>".to_string()]
    );
}

#[test]
fn domain_and_provider_name() {
    let adapter = MailgunAdapter::new("fake-api-key", "avengers.com");
    assert_eq!(adapter.domain(), "avengers.com");
    assert_eq!(adapter.provider_name(), "mailgun");
}

// ============================================================================
// HTTP Delivery Tests
// ============================================================================

#[tokio::test]
async fn successful_delivery_returns_ok() {
    let server = MockServer::start().await;
    let adapter = http_adapter(&server, "avengers.com");

    // Mailgun uses Basic auth with "api:key" format
    let expected_auth = format!(
        "Basic {}",
        base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            "api:fake-api-key"
        )
    );

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .and(header("Authorization", expected_auth.as_str()))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let delivery = adapter.send(&valid_email()).await.unwrap();
    assert_eq!(
        delivery.message_id,
        "<20111114174239.25659.5817@samples.mailgun.org>"
    );
    assert_eq!(
        delivery.provider_response.unwrap()["message"],
        "Queued. Thank you."
    );
}

#[tokio::test]
async fn delivery_sends_payload_fields_as_form() {
    let server = MockServer::start().await;
    let adapter = http_adapter(&server, "avengers.com");

    let mut email = valid_email();
    email.set_header("X-Test", "1").set_tag("unity");

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .and(body_string_contains("Tony Stark <tony.stark@example.com>"))
        .and(body_string_contains("Steve Rogers <steve.rogers@example.com>"))
        .and(body_string_contains("h:X-Test"))
        .and(body_string_contains("o:tag"))
        .and(body_string_contains("unity"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(adapter.send(&email).await.is_ok());
}

#[tokio::test]
async fn deliver_with_401_response() {
    let server = MockServer::start().await;
    let adapter = http_adapter(&server, "avengers.com");

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter.send(&valid_email()).await.unwrap_err();
    match err {
        MailError::ProviderError {
            provider,
            message,
            status,
        } => {
            assert_eq!(provider, "mailgun");
            assert_eq!(message, "Forbidden");
            assert_eq!(status, Some(401));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn deliver_with_500_json_response_uses_message() {
    let server = MockServer::start().await;
    let adapter = http_adapter(&server, "avengers.com");

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Domain not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter.send(&valid_email()).await.unwrap_err();
    assert!(err.to_string().contains("Domain not found"));
    assert!(!err.is_validation());
}

#[tokio::test]
async fn invalid_email_makes_no_request() {
    let server = MockServer::start().await;
    let adapter = http_adapter(&server, "avengers.com");

    Mock::given(method("POST"))
        .respond_with(success_response())
        .expect(0)
        .mount(&server)
        .await;

    let mut email = valid_email();
    email.set_html("");

    let err = adapter.send(&email).await.unwrap_err();
    assert!(matches!(
        err,
        MailError::Validation(ValidationError::MissingBody)
    ));
}

#[tokio::test]
async fn deliver_with_eu_base_url_returns_ok() {
    let server = MockServer::start().await;
    // Simulate EU endpoint by using custom base_url
    let adapter = http_adapter(&server, "avengers.eu");

    Mock::given(method("POST"))
        .and(path("/avengers.eu/messages"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(adapter.send(&valid_email()).await.is_ok());
}
