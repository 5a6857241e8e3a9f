use std::sync::Arc;

use funchost_binding::TriggerBinder;
use funchost_models::{BindingError, TriggerRequest, WebHookPayload};
use funchost_testsupport as support;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn webhook_request(payload: WebHookPayload) -> TriggerRequest {
    let mut request = TriggerRequest::builder("POST", "/api/webhook")
        .header("content-type", "application/json")
        .body_json(&json!({"ignored": "the attached payload wins"}))
        .build();
    request.attach_webhook_payload(payload);
    request
}

#[tokio::test]
async fn attached_payload_is_materialized_by_identity() {
    support::init_tracing();
    let instance = Arc::new(support::SamplePoco {
        name: "Mathew Charles".to_string(),
        location: "Seattle".to_string(),
    });
    let payload = WebHookPayload::new(instance.clone()).unwrap();
    let request = Arc::new(webhook_request(payload));

    let binder = TriggerBinder::new(support::poco_descriptor("order", "support::SamplePoco"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    // Binding data comes from the payload's properties, not the body.
    assert_eq!(result.binding_data.len(), 2);
    assert_eq!(result.binding_data.get_str("Name"), Some("Mathew Charles"));
    assert_eq!(result.binding_data.get_str("Location"), Some("Seattle"));
    assert!(!result.binding_data.contains("ignored"));

    // The exact instance host dispatch attached, not a re-parsed copy.
    let bound = result.provider.materialize::<support::SamplePoco>().unwrap();
    assert!(Arc::ptr_eq(&bound, &instance));

    let again = result.provider.materialize::<support::SamplePoco>().unwrap();
    assert!(Arc::ptr_eq(&again, &instance));
}

#[tokio::test]
async fn payload_properties_keep_natural_values() {
    let instance = Arc::new(support::SampleStruct { count: 42 });
    let payload = WebHookPayload::new(instance).unwrap();
    let request = Arc::new(webhook_request(payload));

    let binder = TriggerBinder::new(support::poco_descriptor("item", "support::SampleStruct"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    // Natural representation: the count stays a number.
    assert_eq!(result.binding_data.get("Count"), Some(&json!(42)));
}

#[tokio::test]
async fn downcasting_to_the_wrong_type_fails() {
    let instance = Arc::new(support::SamplePoco {
        name: "Mathew Charles".to_string(),
        location: "Seattle".to_string(),
    });
    let payload = WebHookPayload::new(instance).unwrap();
    let request = Arc::new(webhook_request(payload));

    let binder = TriggerBinder::new(support::poco_descriptor("item", "support::SampleStruct"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    let err = result
        .provider
        .materialize::<support::SampleStruct>()
        .unwrap_err();
    assert!(matches!(err, BindingError::PayloadTypeMismatch { .. }));
    assert_eq!(err.to_error_shape().error_type, "ParameterBindingFailed");
}
