use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryGenError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryGenError {
    /// A field's `ofType` chain ended without reaching a named type.
    #[error("Field '{owner}.{field}' has a type reference that never reaches a named type")]
    MalformedTypeRef { owner: String, field: String },

    #[error("Encountered a {kind} type without a name")]
    UnnamedType { kind: String },

    #[error("Type '{name}' referenced by '{referenced_by}' is not in the schema model")]
    MissingType { name: String, referenced_by: String },

    #[error("Type '{name}' is a {kind}, expected an OBJECT")]
    NotAnObject { name: String, kind: String },

    #[error("Schema has no root query type (tried {})", .tried.join(", "))]
    MissingRootQueryType { tried: Vec<String> },

    #[error("No query named '{0}'")]
    UnknownQuery(String),

    #[error("Invalid introspection document: {0}")]
    InvalidDocument(String),
}
