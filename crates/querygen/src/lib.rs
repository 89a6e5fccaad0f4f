//! Query generation from GraphQL introspection.
//!
//! Builds a [`SchemaModel`] from an introspection result and derives a
//! selection-set body for every object-typed field of the root query type,
//! expanding nested objects up to a depth bound.
//!
//! # Examples
//!
//! ```
//! use graphql_querygen::{Arguments, QueryStore, SchemaModel, SelectionPolicy};
//! use serde_json::json;
//!
//! let document = json!({ "data": { "__schema": { "types": [
//!     { "kind": "SCALAR", "name": "String" },
//!     { "kind": "OBJECT", "name": "Query", "fields": [
//!         { "name": "vesselTypes", "type": { "kind": "OBJECT", "name": "VesselType" } }
//!     ]},
//!     { "kind": "OBJECT", "name": "VesselType", "fields": [
//!         { "name": "id", "type": { "kind": "SCALAR", "name": "String" } },
//!         { "name": "name", "type": { "kind": "SCALAR", "name": "String" } }
//!     ]}
//! ]}}});
//!
//! let model = SchemaModel::from_json(document)?;
//! let store = QueryStore::build(&model, &SelectionPolicy::default())?;
//!
//! let query = store.bind("vesselTypes", &Arguments::new().with("first", 10))?;
//! assert_eq!(query.text(), "vesselTypes(first: 10){ id name }");
//! # Ok::<(), graphql_querygen::QueryGenError>(())
//! ```

mod arguments;
mod error;
mod generator;
mod kind;
mod model;
mod policy;
mod query;
mod rules;
mod store;

pub use arguments::{ArgumentRendering, Arguments};
pub use error::{QueryGenError, Result};
pub use generator::QueryGenerator;
pub use kind::{dispatch, TypeKind};
pub use model::{
    unwrap_type_ref, EnumNode, ObjectNode, ScalarNode, SchemaModel, TypeNode, TypeRef,
    ROOT_QUERY_TYPE_NAMES,
};
pub use policy::{SelectionPolicy, DEFAULT_MAX_DEPTH};
pub use query::{BoundQuery, Query};
pub use rules::{CompositeRule, LeafRule, SelectionContext, SelectionRule};
pub use store::QueryStore;
