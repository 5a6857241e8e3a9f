use bytes::Bytes;
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::BindingError;

/// Well-known context key under which host dispatch attaches a pre-parsed
/// web-hook payload before binding begins.
pub const WEBHOOK_PAYLOAD_KEY: &str = "WebHookData";

/// An inbound HTTP request as seen by the trigger binder.
///
/// Owned by the host for the duration of one invocation. The binder never
/// mutates it; the only writer after construction is host dispatch attaching
/// the optional web-hook payload.
#[derive(Debug)]
pub struct TriggerRequest {
    pub request_id: uuid::Uuid,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    headers: HashMap<String, String>,
    body: Bytes,
    route_values: Vec<(String, String)>,
    context: HashMap<String, Arc<WebHookPayload>>,
}

impl TriggerRequest {
    pub fn builder(method: &str, path: &str) -> TriggerRequestBuilder {
        TriggerRequestBuilder::new(method, path)
    }

    /// Header lookup by lower-cased name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Advisory only: a missing or wrong content type never gates body parsing.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Route tokens resolved by host dispatch, in route-template order.
    pub fn route_values(&self) -> &[(String, String)] {
        &self.route_values
    }

    /// Attach the pre-parsed web-hook payload under the well-known key.
    /// Host dispatch calls this before handing the request to the binder.
    pub fn attach_webhook_payload(&mut self, payload: WebHookPayload) {
        self.context
            .insert(WEBHOOK_PAYLOAD_KEY.to_string(), Arc::new(payload));
    }

    pub fn webhook_payload(&self) -> Option<&Arc<WebHookPayload>> {
        self.context.get(WEBHOOK_PAYLOAD_KEY)
    }
}

pub struct TriggerRequestBuilder {
    method: String,
    path: String,
    query: Option<String>,
    headers: HashMap<String, String>,
    body: Bytes,
    route_values: Vec<(String, String)>,
}

impl TriggerRequestBuilder {
    fn new(method: &str, path: &str) -> Self {
        // Accept "/path?query" so callers can pass a full request target
        let (path, query) = match path.split_once('?') {
            Some((p, q)) if !q.is_empty() => (p.to_string(), Some(q.to_string())),
            Some((p, _)) => (p.to_string(), None),
            None => (path.to_string(), None),
        };
        Self {
            method: method.to_uppercase(),
            path,
            query,
            headers: HashMap::new(),
            body: Bytes::new(),
            route_values: Vec::new(),
        }
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn body_text(mut self, text: &str) -> Self {
        self.body = Bytes::from(text.to_string());
        self
    }

    pub fn body_json(mut self, value: &Value) -> Self {
        self.body = Bytes::from(value.to_string());
        self
    }

    pub fn route_value(mut self, name: &str, value: &str) -> Self {
        self.route_values.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> TriggerRequest {
        TriggerRequest {
            request_id: uuid::Uuid::new_v4(),
            method: self.method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: self.body,
            route_values: self.route_values,
            context: HashMap::new(),
        }
    }
}

/// A pre-parsed web-hook payload: the identity-preserved instance plus its
/// property view used for binding-data extraction.
///
/// Serialization is the single reflection facility: the property view is the
/// JSON object the instance serializes to, with natural (non-stringified)
/// values.
pub struct WebHookPayload {
    instance: Arc<dyn Any + Send + Sync>,
    fields: Map<String, Value>,
}

impl WebHookPayload {
    pub fn new<T>(instance: Arc<T>) -> Result<Self, BindingError>
    where
        T: serde::Serialize + Any + Send + Sync,
    {
        let value = serde_json::to_value(&*instance).map_err(|e| BindingError::Serialize {
            reason: e.to_string(),
        })?;
        match value {
            Value::Object(fields) => Ok(Self {
                instance,
                fields,
            }),
            other => Err(BindingError::NonObjectPayload {
                kind: json_kind(&other),
            }),
        }
    }

    /// One entry per public property of the attached object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The exact instance host dispatch attached, untyped.
    pub fn instance(&self) -> Arc<dyn Any + Send + Sync> {
        self.instance.clone()
    }

    /// Downcast back to the concrete payload type.
    pub fn instance_of<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instance.clone().downcast::<T>().ok()
    }
}

impl std::fmt::Debug for WebHookPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebHookPayload")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Short name of a JSON value's kind, for diagnostics and logs.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
