//! Registry of generated root queries.

use crate::arguments::{ArgumentRendering, Arguments};
use crate::generator::QueryGenerator;
use crate::model::SchemaModel;
use crate::query::{BoundQuery, Query};
use crate::{QueryGenError, Result, SelectionPolicy};
use indexmap::IndexMap;

/// Name-keyed generated queries for one schema.
///
/// Built once per introspection and replaced wholesale when the schema is
/// fetched again. Holds only immutable templates, so it can be shared across
/// threads behind an `Arc` and bound concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStore {
    queries: IndexMap<String, Query>,
}

impl QueryStore {
    /// Generates a query for every object-typed field of the root query type.
    ///
    /// Leaf-typed root fields and root fields whose whole selection is
    /// excluded are left out. The policy filters selection contents only, so
    /// a root field sharing a name with an ignored field is still generated.
    #[tracing::instrument(skip_all, fields(max_depth = policy.max_depth))]
    pub fn build(model: &SchemaModel, policy: &SelectionPolicy) -> Result<Self> {
        let root = model.root_query_type()?;
        let generator = QueryGenerator::new(model, policy);
        let mut queries = IndexMap::new();

        for (name, type_ref) in &root.fields {
            if !type_ref.kind.is_object() {
                tracing::debug!(query = %name, kind = %type_ref.kind, "Skipping leaf root field");
                continue;
            }

            model.object(&type_ref.name, &format!("{}.{name}", root.name))?;
            let body = generator.generate(type_ref)?;
            if body.is_empty() {
                tracing::warn!(query = %name, "Root field has nothing to select, skipping");
                continue;
            }

            queries.insert(name.clone(), Query::new(name.as_str(), body));
        }

        tracing::info!(root = %root.name, queries = queries.len(), "Generated queries");
        Ok(Self { queries })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Query> {
        self.queries.get(name)
    }

    /// Binds `args` to the named query with the default rendering.
    pub fn bind(&self, name: &str, args: &Arguments) -> Result<BoundQuery> {
        self.bind_with(name, args, ArgumentRendering::default())
    }

    pub fn bind_with(
        &self,
        name: &str,
        args: &Arguments,
        rendering: ArgumentRendering,
    ) -> Result<BoundQuery> {
        self.get(name)
            .map(|query| query.bind_with(args, rendering))
            .ok_or_else(|| QueryGenError::UnknownQuery(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Query> {
        self.queries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
