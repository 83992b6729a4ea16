//! End-to-end tests for the contact endpoint using a recording transport.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use contact_backend::domain::ports::SUBMISSION_ACCEPTED_MESSAGE;
use contact_backend::domain::{
    DELIVERY_FAILED_MESSAGE, MALFORMED_INPUT_MESSAGE, PAYLOAD_TOO_LARGE_MESSAGE,
    VALIDATION_FAILED_MESSAGE,
};
use contact_backend::inbound::http::contact::MAX_BODY_BYTES;
use contact_backend::middleware::trace::TRACE_ID_HEADER;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

mod contact_support;

use contact_support::{INBOX_EMAIL, RecordingTransport, contact_app};

#[fixture]
fn valid_payload() -> Value {
    json!({
        "name": "A",
        "email": "a@b.com",
        "phone": "123",
        "service": "fabrication",
        "message": "hi"
    })
}

struct Captured {
    status: StatusCode,
    trace_id: Option<String>,
    body: Value,
}

async fn post_contact(transport: Arc<RecordingTransport>, payload: String) -> Captured {
    let app = actix_test::init_service(contact_app(transport)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/contact/")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = actix_test::read_body(response).await;
    Captured {
        status,
        trace_id,
        body: serde_json::from_slice(&bytes).expect("json envelope"),
    }
}

#[rstest]
#[actix_web::test]
async fn valid_submission_notifies_business_and_sender(valid_payload: Value) {
    let transport = Arc::new(RecordingTransport::default());

    let captured = post_contact(transport.clone(), valid_payload.to_string()).await;

    assert_eq!(captured.status, StatusCode::OK);
    assert_eq!(
        captured.body,
        json!({"success": true, "message": SUBMISSION_ACCEPTED_MESSAGE})
    );
    assert!(captured.trace_id.is_some());

    let attempts = transport.attempts();
    assert_eq!(attempts.len(), 2);
    let business = &attempts[0];
    assert_eq!(business.to(), [INBOX_EMAIL]);
    assert_eq!(business.reply_to(), ["a@b.com"]);
    assert_eq!(business.subject(), "New Contact Form Submission from A");
    assert!(business.body().contains("Service Required: fabrication"));
    let confirmation = &attempts[1];
    assert_eq!(confirmation.to(), ["a@b.com"]);
    assert!(confirmation.body().starts_with("Dear A,"));
}

#[rstest]
#[case::broken_json("{not json")]
#[case::empty("")]
#[case::array("[1, 2, 3]")]
#[case::scalar("\"hello\"")]
#[actix_web::test]
async fn malformed_bodies_send_nothing(#[case] payload: &str) {
    let transport = Arc::new(RecordingTransport::default());

    let captured = post_contact(transport.clone(), payload.to_owned()).await;

    assert_eq!(captured.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        captured.body,
        json!({"success": false, "message": MALFORMED_INPUT_MESSAGE})
    );
    assert!(transport.attempts().is_empty());
}

#[actix_web::test]
async fn invalid_fields_are_reported_without_sending() {
    let transport = Arc::new(RecordingTransport::default());
    let payload = json!({
        "name": "",
        "email": "not-an-email",
        "phone": "1".repeat(21),
        "service": "welding",
        "message": "hi"
    });

    let captured = post_contact(transport.clone(), payload.to_string()).await;

    assert_eq!(captured.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        captured.body,
        json!({
            "success": false,
            "message": VALIDATION_FAILED_MESSAGE,
            "errors": {
                "name": ["This field is required."],
                "email": ["Enter a valid email address."],
                "phone": ["Ensure this value has at most 20 characters (it has 21)."],
                "service": ["Select a valid choice. welding is not one of the available choices."]
            }
        })
    );
    assert!(transport.attempts().is_empty());
}

#[rstest]
#[actix_web::test]
async fn primary_failure_skips_confirmation(valid_payload: Value) {
    let transport = Arc::new(RecordingTransport::failing_on([0]));

    let captured = post_contact(transport.clone(), valid_payload.to_string()).await;

    assert_eq!(captured.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        captured.body,
        json!({"success": false, "message": DELIVERY_FAILED_MESSAGE})
    );
    let attempts = transport.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].to(), [INBOX_EMAIL]);
}

#[rstest]
#[actix_web::test]
async fn confirmation_failure_is_invisible_to_the_sender(valid_payload: Value) {
    let transport = Arc::new(RecordingTransport::failing_on([1]));

    let captured = post_contact(transport.clone(), valid_payload.to_string()).await;

    assert_eq!(captured.status, StatusCode::OK);
    assert_eq!(captured.body.get("success"), Some(&Value::Bool(true)));
    assert_eq!(transport.attempts().len(), 2);
}

#[rstest]
#[actix_web::test]
async fn long_messages_are_delivered(mut valid_payload: Value) {
    let transport = Arc::new(RecordingTransport::default());
    let message = "m".repeat(300 * 1024);
    valid_payload["message"] = json!(message);

    let captured = post_contact(transport.clone(), valid_payload.to_string()).await;

    assert_eq!(captured.status, StatusCode::OK);
    let attempts = transport.attempts();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].body().contains(&message));
}

#[rstest]
#[actix_web::test]
async fn oversized_bodies_get_the_json_envelope(mut valid_payload: Value) {
    let transport = Arc::new(RecordingTransport::default());
    valid_payload["message"] = json!("m".repeat(MAX_BODY_BYTES));

    let captured = post_contact(transport.clone(), valid_payload.to_string()).await;

    assert_eq!(captured.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        captured.body,
        json!({"success": false, "message": PAYLOAD_TOO_LARGE_MESSAGE})
    );
    assert!(captured.trace_id.is_some());
    assert!(transport.attempts().is_empty());
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::put(actix_test::TestRequest::put())]
#[case::delete(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn contact_endpoint_only_accepts_post(#[case] request: actix_test::TestRequest) {
    let app =
        actix_test::init_service(contact_app(Arc::new(RecordingTransport::default()))).await;
    let response = actix_test::call_service(&app, request.uri("/api/contact/").to_request()).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn blank_form_is_served() {
    let app =
        actix_test::init_service(contact_app(Arc::new(RecordingTransport::default()))).await;
    let request = actix_test::TestRequest::get().uri("/contact/").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    let fields = body
        .get("fields")
        .and_then(Value::as_array)
        .expect("fields");
    assert_eq!(fields.len(), 5);
}
