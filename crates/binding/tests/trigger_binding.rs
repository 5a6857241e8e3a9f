use std::sync::Arc;

use funchost_binding::{BindingTarget, TriggerBinder};
use funchost_models::{BinderConfig, BindingError};
use funchost_testsupport as support;
use serde_json::json;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn binds_raw_request_with_body_extraction() {
    support::init_tracing();
    let request = Arc::new(support::post_json(
        "/api/run",
        &json!({
            "test": "testing",
            "baz": 123,
            "nestedArray": [{"nesting": "yes"}],
            "nestedObject": {"name": "Mathew"}
        }),
    ));

    let binder = TriggerBinder::new(support::raw_request_descriptor("req"));
    assert_eq!(binder.target(), BindingTarget::RawRequest);

    let result = binder
        .bind(request.clone(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.binding_data.len(), 2);
    assert_eq!(result.binding_data.get_str("test"), Some("testing"));
    assert_eq!(result.binding_data.get_str("baz"), Some("123"));

    // The materialized value is the identical request instance.
    let bound = result.provider.request().unwrap();
    assert!(Arc::ptr_eq(bound, &request));
}

#[tokio::test]
async fn binds_raw_request_with_query_extraction() {
    let request = Arc::new(support::get(
        "/api/run?name=Mathew%20Charles&location=Seattle",
    ));

    let binder = TriggerBinder::new(support::raw_request_descriptor("req"));
    let result = binder
        .bind(request.clone(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.binding_data.len(), 2);
    assert_eq!(result.binding_data.get_str("name"), Some("Mathew Charles"));
    assert_eq!(result.binding_data.get_str("location"), Some("Seattle"));
    assert!(Arc::ptr_eq(result.provider.request().unwrap(), &request));
}

#[tokio::test]
async fn binds_string_parameter_to_raw_body_text() {
    let request = Arc::new(support::post_text("/api/run", "This is a test"));

    let binder = TriggerBinder::new(support::text_descriptor("input"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.binding_data.is_empty());
    assert_eq!(result.provider.text(), Some("This is a test"));
}

#[tokio::test]
async fn binds_string_parameter_without_body_to_empty_text() {
    let request = Arc::new(support::get("/api/run"));

    let binder = TriggerBinder::new(support::text_descriptor("input"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.binding_data.is_empty());
    assert_eq!(result.provider.text(), Some(""));
}

#[tokio::test]
async fn binds_poco_from_json_body() {
    let request = Arc::new(support::post_json(
        "/api/run",
        &json!({"Name": "Mathew Charles", "Location": "Seattle"}),
    ));

    let binder = TriggerBinder::new(support::poco_descriptor("order", "support::SamplePoco"));
    assert_eq!(binder.target(), BindingTarget::Poco);

    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.binding_data.len(), 2);
    assert_eq!(result.binding_data.get_str("Name"), Some("Mathew Charles"));
    assert_eq!(result.binding_data.get_str("Location"), Some("Seattle"));

    let value = result.provider.materialize::<support::SamplePoco>().unwrap();
    assert_eq!(value.name, "Mathew Charles");
    assert_eq!(value.location, "Seattle");

    // Mapped sources produce a fresh instance per call.
    let again = result.provider.materialize::<support::SamplePoco>().unwrap();
    assert_eq!(*value, *again);
    assert!(!Arc::ptr_eq(&value, &again));
}

#[tokio::test]
async fn binds_poco_from_query_string() {
    let request = Arc::new(support::get(
        "/api/run?Name=Mathew%20Charles&Location=Seattle",
    ));

    let binder = TriggerBinder::new(support::poco_descriptor("order", "support::SamplePoco"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.binding_data.len(), 2);
    let value = result.provider.materialize::<support::SamplePoco>().unwrap();
    assert_eq!(value.name, "Mathew Charles");
    assert_eq!(value.location, "Seattle");
}

#[tokio::test]
async fn malformed_body_degrades_then_fails_at_materialization() {
    let request = Arc::new(support::post_text("/api/run", "{not json"));

    let binder = TriggerBinder::new(support::poco_descriptor("order", "support::SamplePoco"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    // The bind itself never fails on a malformed body.
    assert!(result.binding_data.is_empty());

    let err = result
        .provider
        .materialize::<support::SamplePoco>()
        .unwrap_err();
    assert!(matches!(err, BindingError::Deserialize { .. }));
}

#[tokio::test]
async fn canceled_token_aborts_the_bind() {
    let request = Arc::new(support::get("/api/run?name=x"));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let binder = TriggerBinder::new(support::raw_request_descriptor("req"));
    let err = binder.bind(request, &cancel).await.unwrap_err();
    assert!(matches!(err, BindingError::Canceled));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let request = Arc::new(support::post_text("/api/run", "0123456789"));
    let config = BinderConfig { max_body_bytes: 4 };

    let binder = TriggerBinder::with_config(support::text_descriptor("input"), config);
    let err = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, BindingError::BodyTooLarge { max_bytes: 4 }));
    assert_eq!(err.http_status(), 413);
}

#[tokio::test]
async fn materializing_a_non_structured_binding_is_rejected() {
    let request = Arc::new(support::get("/api/run"));

    let binder = TriggerBinder::new(support::text_descriptor("input"));
    let result = binder
        .bind(request, &CancellationToken::new())
        .await
        .unwrap();

    let err = result
        .provider
        .materialize::<support::SamplePoco>()
        .unwrap_err();
    assert!(matches!(
        err,
        BindingError::UnsupportedMaterialization { target: "body text" }
    ));
}
