use funchost_models::{TypeInfo, TypeShape};
use tracing::debug;

/// Framework-reserved types that look like user structs to the signature
/// inspector but must never be materialized property-by-property.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "uuid::Uuid",
    "chrono::DateTime",
    "chrono::NaiveDateTime",
    "std::time::Duration",
    "std::time::SystemTime",
];

/// How a parameter will be materialized, resolved once at binder construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    /// Hand back the original request object, identity preserved.
    RawRequest,
    /// Hand back the raw body text.
    BodyText,
    /// Deserialize the chosen source into the declared structured type.
    Poco,
}

impl BindingTarget {
    pub fn resolve(type_info: &TypeInfo) -> Self {
        let target = match type_info.shape {
            TypeShape::Request => BindingTarget::RawRequest,
            TypeShape::Text => BindingTarget::BodyText,
            _ if is_bindable_user_type(type_info) => BindingTarget::Poco,
            // Interfaces, primitives, and identifier-like types fall back to
            // non-structured handling rather than failing the bind.
            _ => BindingTarget::BodyText,
        };
        debug!(
            type_name = %type_info.type_name,
            target = ?target,
            "resolved binding target"
        );
        target
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BindingTarget::RawRequest => "raw request",
            BindingTarget::BodyText => "body text",
            BindingTarget::Poco => "structured type",
        }
    }
}

/// Whether a declared type is eligible for property-mapped materialization:
/// any user class or struct that is not an interface, not a primitive, and
/// not a framework-reserved identifier type.
pub fn is_bindable_user_type(type_info: &TypeInfo) -> bool {
    if RESERVED_TYPE_NAMES.contains(&type_info.type_name.as_str()) {
        return false;
    }
    matches!(type_info.shape, TypeShape::Class | TypeShape::Struct)
}
