use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire shape the host uses when it reports a binding failure to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorShape {
    pub error_message: String,
    pub error_type: String,
}

/// Failures the binder itself can produce.
///
/// Malformed JSON bodies and unsupported structured types are NOT in this
/// taxonomy: the former degrades to empty binding data, the latter falls back
/// to non-structured handling.
#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Binding canceled before completion")]
    Canceled,

    #[error("Request body exceeds {max_bytes} bytes")]
    BodyTooLarge { max_bytes: usize },

    #[error("Web-hook payload must serialize to a JSON object, got {kind}")]
    NonObjectPayload { kind: &'static str },

    #[error("Web-hook payload could not be serialized: {reason}")]
    Serialize { reason: String },

    #[error("Attached web-hook payload is not a {type_name}")]
    PayloadTypeMismatch { type_name: &'static str },

    #[error("Failed to deserialize parameter '{parameter}': {source}")]
    Deserialize {
        parameter: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Parameter is bound as {target}, not as a structured type")]
    UnsupportedMaterialization { target: &'static str },
}

impl BindingError {
    pub fn to_error_shape(&self) -> ErrorShape {
        ErrorShape {
            error_message: self.to_string(),
            error_type: self.error_type().to_string(),
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            BindingError::Canceled => "BindingCanceled",
            BindingError::BodyTooLarge { .. } => "RequestTooLarge",
            BindingError::NonObjectPayload { .. } => "InvalidWebHookPayload",
            BindingError::Serialize { .. } => "InvalidWebHookPayload",
            BindingError::PayloadTypeMismatch { .. } => "ParameterBindingFailed",
            BindingError::Deserialize { .. } => "ParameterBindingFailed",
            BindingError::UnsupportedMaterialization { .. } => "ParameterBindingFailed",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            BindingError::Canceled => 499,
            BindingError::BodyTooLarge { .. } => 413,
            BindingError::NonObjectPayload { .. } => 400,
            BindingError::Serialize { .. } => 400,
            BindingError::PayloadTypeMismatch { .. } => 500,
            BindingError::Deserialize { .. } => 400,
            BindingError::UnsupportedMaterialization { .. } => 500,
        }
    }
}
