//! Type definitions for GraphQL introspection responses.
//!
//! These types mirror the structure of GraphQL introspection query responses
//! and can be deserialized from JSON using serde. Kinds are kept as raw strings
//! so that a schema using kinds this crate has never heard of still
//! deserializes; deciding what to do with a kind is left to consumers.

use crate::{IntrospectionError, Result};
use serde::{Deserialize, Serialize};

/// Top-level introspection response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: IntrospectionData,
}

/// Data field of the introspection response containing the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// Schema information from introspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: Option<IntrospectionTypeRef>,
    pub mutation_type: Option<IntrospectionTypeRef>,
    pub subscription_type: Option<IntrospectionTypeRef>,
    pub types: Vec<TypeDescriptor>,
}

impl IntrospectionResponse {
    /// Reads an introspection document from parsed JSON.
    ///
    /// Accepts the full response (`{"data": {"__schema": ...}}`), a bare
    /// `{"__schema": ...}` object, or just the `types` array as written by a
    /// model dump.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let value = match value {
            serde_json::Value::Object(mut map) if !map.contains_key("data") => {
                match map.remove("__schema") {
                    Some(schema) => serde_json::json!({ "data": { "__schema": schema } }),
                    None => {
                        return Err(IntrospectionError::Invalid(
                            "expected a `data` or `__schema` member".to_string(),
                        ))
                    }
                }
            }
            serde_json::Value::Array(types) => {
                serde_json::json!({ "data": { "__schema": { "types": types } } })
            }
            other => other,
        };

        serde_json::from_value(value).map_err(|e| IntrospectionError::Parse(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionTypeRef {
    pub name: String,
}

/// One named type as listed under `__schema.types`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub kind: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<FieldDescriptor>>,
    pub enum_values: Option<Vec<EnumValueDescriptor>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<InputValueDescriptor>,
    #[serde(rename = "type")]
    pub type_ref: TypeRefDescriptor,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValueDescriptor {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRefDescriptor,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDescriptor {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// A type reference as it appears on a field: either a named type or a
/// `NON_NULL`/`LIST` wrapper pointing at another reference through `ofType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRefDescriptor {
    pub kind: String,
    pub name: Option<String>,
    pub of_type: Option<Box<TypeRefDescriptor>>,
}

impl TypeRefDescriptor {
    /// Returns the name carried by this reference, treating an empty string
    /// the same as an absent one.
    #[must_use]
    pub fn named(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
