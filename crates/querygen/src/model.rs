//! In-memory schema model built from introspection type descriptors.
//!
//! Object fields store a [`TypeRef`] (kind + name) rather than an embedded
//! node, so building the model never follows cross-type references and cycles
//! in the schema graph are harmless here. They only matter during generation.

use crate::kind::{dispatch, TypeKind};
use crate::{QueryGenError, Result};
use graphql_introspect::{IntrospectionResponse, TypeDescriptor, TypeRefDescriptor};
use indexmap::{IndexMap, IndexSet};

/// Root type names tried, in order, when the document does not declare one
/// (or declares one that is missing from the model).
pub const ROOT_QUERY_TYPE_NAMES: &[&str] = &["Query", "Queries"];

/// The named type a field resolves to once `NON_NULL`/`LIST` wrappers are
/// peeled off.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub kind: TypeKind,
    pub name: String,
}

impl TypeRef {
    #[must_use]
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarNode {
    pub name: String,
}

impl ScalarNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNode {
    pub name: String,
    pub values: IndexSet<String>,
}

impl EnumNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexSet::new(),
        }
    }
}

/// An object type. Field order is schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectNode {
    pub name: String,
    pub fields: IndexMap<String, TypeRef>,
}

impl ObjectNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Adds a field, or replaces the type of an existing one in place.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.fields.insert(name.into(), type_ref);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TypeRef> {
        self.fields.get(name)
    }
}

/// One named schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Scalar(ScalarNode),
    Enum(EnumNode),
    Object(ObjectNode),
}

impl TypeNode {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(node) => &node.name,
            Self::Enum(node) => &node.name,
            Self::Object(node) => &node.name,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::Object(_) => TypeKind::Object,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Self::Object(node) => Some(node),
            _ => None,
        }
    }

    /// Fills in children from the descriptor this node was dispatched from.
    fn populate(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        match self {
            Self::Scalar(_) => {}
            Self::Enum(node) => {
                node.values = descriptor
                    .enum_values
                    .iter()
                    .flatten()
                    .map(|value| value.name.clone())
                    .collect();
            }
            Self::Object(node) => {
                for field in descriptor.fields.iter().flatten() {
                    let named = unwrap_type_ref(&field.type_ref).ok_or_else(|| {
                        QueryGenError::MalformedTypeRef {
                            owner: node.name.clone(),
                            field: field.name.clone(),
                        }
                    })?;

                    let Some((kind, name)) = named
                        .named()
                        .and_then(|name| Some((TypeKind::from_tag(&named.kind)?, name)))
                    else {
                        tracing::trace!(
                            owner = %node.name,
                            field = %field.name,
                            kind = %named.kind,
                            "Skipping field of unsupported kind"
                        );
                        continue;
                    };

                    node.fields
                        .insert(field.name.clone(), TypeRef::new(kind, name));
                }
            }
        }
        Ok(())
    }
}

/// Follows `ofType` until a descriptor carries a non-empty name.
///
/// Returns `None` if the chain runs out first, which only happens with a
/// malformed or truncated introspection result.
#[must_use]
pub fn unwrap_type_ref(type_ref: &TypeRefDescriptor) -> Option<&TypeRefDescriptor> {
    let mut current = type_ref;
    while current.named().is_none() {
        current = current.of_type.as_deref()?;
    }
    Some(current)
}

/// Mapping from type name to [`TypeNode`], built once per introspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    types: IndexMap<String, TypeNode>,
    query_type: Option<String>,
}

impl SchemaModel {
    /// Builds the model from a full introspection response, remembering the
    /// declared root query type name if there is one.
    pub fn from_introspection(introspection: &IntrospectionResponse) -> Result<Self> {
        let schema = &introspection.data.schema;
        let mut model = Self::from_types(&schema.types)?;
        model.query_type = schema.query_type.as_ref().map(|t| t.name.clone());
        Ok(model)
    }

    /// Builds the model from parsed JSON in any shape accepted by
    /// [`IntrospectionResponse::from_json`].
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let introspection = IntrospectionResponse::from_json(value)
            .map_err(|e| QueryGenError::InvalidDocument(e.to_string()))?;
        Self::from_introspection(&introspection)
    }

    /// Builds the model from the `__schema.types` list in a single pass.
    ///
    /// Types of unsupported kinds are left out. A later descriptor with the
    /// same name replaces an earlier one.
    #[tracing::instrument(skip_all, fields(descriptors = types.len()))]
    pub fn from_types(types: &[TypeDescriptor]) -> Result<Self> {
        let mut model = Self::default();

        for descriptor in types {
            let Some(kind) = TypeKind::from_tag(&descriptor.kind) else {
                tracing::debug!(
                    kind = %descriptor.kind,
                    name = descriptor.name.as_deref().unwrap_or_default(),
                    "Skipping type of unsupported kind"
                );
                continue;
            };

            let name = descriptor
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| QueryGenError::UnnamedType {
                    kind: kind.to_string(),
                })?;

            let Some(mut node) = dispatch(&descriptor.kind, name) else {
                continue;
            };
            node.populate(descriptor)?;
            model.insert(node);
        }

        tracing::debug!(types = model.len(), "Schema model built");
        Ok(model)
    }

    /// Inserts or replaces a node, keyed by its name.
    pub fn insert(&mut self, node: TypeNode) {
        self.types.insert(node.name().to_string(), node);
    }

    /// Sets the root query type name to try before the conventional ones.
    #[must_use]
    pub fn with_query_type(mut self, name: impl Into<String>) -> Self {
        self.query_type = Some(name.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeNode> {
        self.types.get(name)
    }

    /// Looks up an object type that something else refers to.
    ///
    /// Fails if the name is absent or is not an object: either means the
    /// model and the references in it disagree.
    pub fn object(&self, name: &str, referenced_by: &str) -> Result<&ObjectNode> {
        let node = self.get(name).ok_or_else(|| QueryGenError::MissingType {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })?;

        node.as_object().ok_or_else(|| QueryGenError::NotAnObject {
            name: name.to_string(),
            kind: node.kind().to_string(),
        })
    }

    /// Finds the root query type: the declared one if present in the model,
    /// then `Query`, then `Queries`.
    pub fn root_query_type(&self) -> Result<&ObjectNode> {
        let candidates: Vec<&str> = self
            .query_type
            .as_deref()
            .into_iter()
            .chain(ROOT_QUERY_TYPE_NAMES.iter().copied())
            .collect();

        candidates
            .iter()
            .find_map(|name| self.get(name).and_then(TypeNode::as_object))
            .ok_or_else(|| QueryGenError::MissingRootQueryType {
                tried: candidates.iter().map(ToString::to_string).collect(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
