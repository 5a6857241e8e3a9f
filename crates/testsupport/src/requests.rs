use funchost_models::{ParameterDescriptor, TriggerRequest, TypeInfo, TypeShape};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub fn get(target: &str) -> TriggerRequest {
    TriggerRequest::builder("GET", target).build()
}

pub fn post_json(target: &str, body: &Value) -> TriggerRequest {
    TriggerRequest::builder("POST", target)
        .header("content-type", "application/json")
        .body_json(body)
        .build()
}

pub fn post_text(target: &str, body: &str) -> TriggerRequest {
    TriggerRequest::builder("POST", target)
        .header("content-type", "text/plain")
        .body_text(body)
        .build()
}

pub fn raw_request_descriptor(name: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, TypeInfo::new("TriggerRequest", TypeShape::Request))
}

pub fn text_descriptor(name: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, TypeInfo::new("String", TypeShape::Text))
}

pub fn poco_descriptor(name: &str, type_name: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, TypeInfo::new(type_name, TypeShape::Class))
}

/// Sample user-defined payload types shared across binding tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplePoco {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location")]
    pub location: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SampleStruct {
    #[serde(rename = "Count")]
    pub count: u32,
}
