use funchost_models::{BindingData, BindingError, TriggerRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

/// Deferred capability producing the typed parameter value on demand.
///
/// The variant is fixed when the bind completes; repeated invocations are
/// consistent with the single underlying payload. Identity-carrying variants
/// return the same `Arc` every call; `Mapped` deserializes a fresh instance
/// per call.
pub enum ValueProvider {
    /// The original request object, no conversion.
    Request(Arc<TriggerRequest>),
    /// The raw body text (empty string when the request had no body).
    Text(String),
    /// The pre-attached web-hook object, identity preserved.
    Attached {
        parameter: String,
        instance: Arc<dyn Any + Send + Sync>,
    },
    /// A JSON source deserialized into the declared type at call time.
    Mapped { parameter: String, source: Value },
}

impl ValueProvider {
    /// The materialized value for a raw-request binding.
    pub fn request(&self) -> Option<&Arc<TriggerRequest>> {
        match self {
            ValueProvider::Request(request) => Some(request),
            _ => None,
        }
    }

    /// The materialized value for a string binding.
    pub fn text(&self) -> Option<&str> {
        match self {
            ValueProvider::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Materialize a structured binding as `T`.
    ///
    /// For an attached web-hook payload this is a downcast of the exact
    /// instance host dispatch supplied; a wrong `T` is a host bug surfaced as
    /// `PayloadTypeMismatch`. For a mapped source each call deserializes a new
    /// instance, and deserialization failures propagate to the host.
    pub fn materialize<T>(&self) -> Result<Arc<T>, BindingError>
    where
        T: DeserializeOwned + Any + Send + Sync,
    {
        match self {
            ValueProvider::Attached { instance, .. } => instance
                .clone()
                .downcast::<T>()
                .map_err(|_| BindingError::PayloadTypeMismatch {
                    type_name: std::any::type_name::<T>(),
                }),
            ValueProvider::Mapped { parameter, source } => {
                serde_json::from_value(source.clone())
                    .map(Arc::new)
                    .map_err(|e| BindingError::Deserialize {
                        parameter: parameter.clone(),
                        source: e,
                    })
            }
            ValueProvider::Request(_) => Err(BindingError::UnsupportedMaterialization {
                target: "raw request",
            }),
            ValueProvider::Text(_) => Err(BindingError::UnsupportedMaterialization {
                target: "body text",
            }),
        }
    }
}

impl std::fmt::Debug for ValueProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueProvider::Request(_) => f.write_str("ValueProvider::Request"),
            ValueProvider::Text(_) => f.write_str("ValueProvider::Text"),
            ValueProvider::Attached { parameter, .. } => {
                write!(f, "ValueProvider::Attached({})", parameter)
            }
            ValueProvider::Mapped { parameter, .. } => {
                write!(f, "ValueProvider::Mapped({})", parameter)
            }
        }
    }
}

/// The outcome of a successful bind: the flat binding data plus the deferred
/// value provider. Constructed once per invocation; immutable.
#[derive(Debug)]
pub struct TriggerResult {
    pub binding_data: BindingData,
    pub provider: ValueProvider,
}
