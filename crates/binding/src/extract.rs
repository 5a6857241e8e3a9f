use funchost_models::{json_kind, BindingData, TriggerRequest};
use serde_json::Value;
use tracing::debug;

/// Extract the flat binding-data mapping for one request.
///
/// Sources are mutually exclusive, checked in precedence order: web-hook
/// payload, then body JSON, then query string. Route values fill in last at
/// the lowest precedence.
pub fn extract_binding_data(request: &TriggerRequest) -> BindingData {
    let mut data = BindingData::new();

    if let Some(payload) = request.webhook_payload() {
        // One field per property, natural values, no re-stringification.
        for (name, value) in payload.fields() {
            data.insert(name.clone(), value.clone());
        }
        debug!(fields = data.len(), "extracted binding data from web-hook payload");
    } else if !request.body().is_empty() {
        extract_from_body(request, &mut data);
    } else {
        extract_from_query(request, &mut data);
    }

    // Route tokens never shadow body/query/web-hook fields.
    for (name, value) in request.route_values() {
        data.insert(name.clone(), Value::String(value.clone()));
    }

    data
}

/// Top-level scalar fields of a JSON object body. A body that is not valid
/// JSON, or not an object, contributes no fields; that is not a failure.
fn extract_from_body(request: &TriggerRequest, data: &mut BindingData) {
    match serde_json::from_slice::<Value>(request.body()) {
        Ok(Value::Object(map)) => {
            for (name, value) in map {
                match value {
                    Value::String(s) => data.insert(name, Value::String(s)),
                    Value::Number(n) => data.insert(name, Value::String(n.to_string())),
                    Value::Bool(b) => data.insert(name, Value::String(b.to_string())),
                    // Nested arrays/objects and nulls stay out of the flat view.
                    _ => {}
                }
            }
            debug!(
                fields = data.len(),
                content_type = request.content_type().unwrap_or("-"),
                "extracted binding data from body JSON"
            );
        }
        Ok(other) => {
            debug!(kind = json_kind(&other), "body is not a JSON object, no binding data extracted");
        }
        Err(e) => {
            debug!(error = %e, "body is not parseable JSON, no binding data extracted");
        }
    }
}

fn extract_from_query(request: &TriggerRequest, data: &mut BindingData) {
    let query = match request.query.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return,
    };
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        data.insert(name.into_owned(), Value::String(value.into_owned()));
    }
    debug!(fields = data.len(), "extracted binding data from query string");
}
