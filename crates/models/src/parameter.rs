use serde::{Deserialize, Serialize};

/// Metadata describing the function parameter a trigger binds to.
///
/// Produced once by the host when it inspects the function signature;
/// immutable afterwards. The binder branches on the shape, never on live
/// values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_info: TypeInfo,
}

impl ParameterDescriptor {
    pub fn new(name: &str, type_info: TypeInfo) -> Self {
        Self {
            name: name.to_string(),
            type_info,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TypeInfo {
    /// Fully qualified name as the signature inspector reports it.
    pub type_name: String,
    pub shape: TypeShape,
}

impl TypeInfo {
    pub fn new(type_name: &str, shape: TypeShape) -> Self {
        Self {
            type_name: type_name.to_string(),
            shape,
        }
    }
}

/// Closed classification of a declared parameter type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub enum TypeShape {
    /// The raw trigger request type itself.
    Request,
    /// A plain string parameter.
    Text,
    /// A user-defined reference type with public properties.
    Class,
    /// A user-defined value type with public properties.
    Struct,
    /// An interface or open capability contract.
    Interface,
    /// A primitive numeric/boolean/character type.
    Primitive,
    /// An opaque identifier-like value type (e.g. a UUID).
    Identifier,
}

impl std::str::FromStr for TypeShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Request" => Ok(TypeShape::Request),
            "Text" => Ok(TypeShape::Text),
            "Class" => Ok(TypeShape::Class),
            "Struct" => Ok(TypeShape::Struct),
            "Interface" => Ok(TypeShape::Interface),
            "Primitive" => Ok(TypeShape::Primitive),
            "Identifier" => Ok(TypeShape::Identifier),
            _ => Err(format!("Invalid type shape: {}", s)),
        }
    }
}
