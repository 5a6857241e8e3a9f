use std::sync::Arc;

use funchost_models::{BinderConfig, BindingError, ParameterDescriptor, TriggerRequest};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::extract::extract_binding_data;
use crate::provider::{TriggerResult, ValueProvider};
use crate::target::BindingTarget;

/// Binds an inbound HTTP request to one declared function parameter.
///
/// The binding target is computed eagerly from the parameter descriptor; each
/// `bind` call then runs the two phases: binding-data extraction, value
/// provider construction. One request produces one independent result with no
/// shared mutable state across invocations.
#[derive(Debug)]
pub struct TriggerBinder {
    descriptor: ParameterDescriptor,
    target: BindingTarget,
    config: BinderConfig,
}

impl TriggerBinder {
    pub fn new(descriptor: ParameterDescriptor) -> Self {
        Self::with_config(descriptor, BinderConfig::default())
    }

    pub fn with_config(descriptor: ParameterDescriptor, config: BinderConfig) -> Self {
        let target = BindingTarget::resolve(&descriptor.type_info);
        Self {
            descriptor,
            target,
            config,
        }
    }

    pub fn target(&self) -> BindingTarget {
        self.target
    }

    pub fn descriptor(&self) -> &ParameterDescriptor {
        &self.descriptor
    }

    /// Produce the trigger result for one invocation.
    ///
    /// The cancellation token is owned by the host; a canceled bind aborts
    /// promptly between phases.
    #[instrument(skip(self, request, cancel), fields(req_id = %request.request_id, parameter = %self.descriptor.name))]
    pub async fn bind(
        &self,
        request: Arc<TriggerRequest>,
        cancel: &CancellationToken,
    ) -> Result<TriggerResult, BindingError> {
        if cancel.is_cancelled() {
            return Err(BindingError::Canceled);
        }
        if request.body().len() > self.config.max_body_bytes {
            return Err(BindingError::BodyTooLarge {
                max_bytes: self.config.max_body_bytes,
            });
        }

        let binding_data = extract_binding_data(&request);

        if cancel.is_cancelled() {
            return Err(BindingError::Canceled);
        }

        let provider = match self.target {
            BindingTarget::RawRequest => ValueProvider::Request(request.clone()),
            BindingTarget::BodyText => ValueProvider::Text(request.body_text()),
            BindingTarget::Poco => self.structured_provider(&request),
        };

        debug!(
            target = self.target.as_str(),
            fields = binding_data.len(),
            "bound trigger parameter"
        );

        Ok(TriggerResult {
            binding_data,
            provider,
        })
    }

    /// Choose the structured source: attached web-hook payload first (identity
    /// preserved, no re-deserialization), then body JSON, then query fields.
    fn structured_provider(&self, request: &TriggerRequest) -> ValueProvider {
        let parameter = self.descriptor.name.clone();

        if let Some(payload) = request.webhook_payload() {
            return ValueProvider::Attached {
                parameter,
                instance: payload.instance(),
            };
        }

        if !request.body().is_empty() {
            // An unparsable body is carried as null so the failure surfaces at
            // materialization time, where the host handles it.
            let source =
                serde_json::from_slice::<Value>(request.body()).unwrap_or(Value::Null);
            return ValueProvider::Mapped { parameter, source };
        }

        let mut fields = Map::new();
        if let Some(query) = request.query.as_deref() {
            for (name, value) in form_urlencoded::parse(query.as_bytes()) {
                fields
                    .entry(name.into_owned())
                    .or_insert(Value::String(value.into_owned()));
            }
        }
        ValueProvider::Mapped {
            parameter,
            source: Value::Object(fields),
        }
    }
}
