//! Field expansion rules.
//!
//! A rule turns a type reference into the list of selection items for it.
//! Leaf types contribute nothing of their own (the field name is emitted by
//! the parent); object types expand into their fields, recursively, under the
//! [`SelectionPolicy`].

use crate::model::{ObjectNode, SchemaModel, TypeRef};
use crate::{Result, SelectionPolicy};

/// Read-only state shared by every rule invocation in one generation pass.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub model: &'a SchemaModel,
    pub policy: &'a SelectionPolicy,
}

impl<'a> SelectionContext<'a> {
    #[must_use]
    pub const fn new(model: &'a SchemaModel, policy: &'a SelectionPolicy) -> Self {
        Self { model, policy }
    }
}

pub trait SelectionRule {
    /// Selection items for `target` when it is reached at `depth`.
    fn select(
        &self,
        ctx: &SelectionContext<'_>,
        target: &TypeRef,
        depth: usize,
    ) -> Result<Vec<String>>;
}

/// Scalars and enums have no sub-selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafRule;

impl SelectionRule for LeafRule {
    fn select(
        &self,
        _ctx: &SelectionContext<'_>,
        _target: &TypeRef,
        _depth: usize,
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Expands an object type's fields in declaration order.
///
/// There is no visited set: a self-referential type is expanded again at
/// every level until the depth bound stops it, exactly like a long acyclic
/// chain would be.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeRule;

/// Reported as the referrer when the entry type of a selection is missing.
const SELECTION_ROOT: &str = "selection root";

impl SelectionRule for CompositeRule {
    fn select(
        &self,
        ctx: &SelectionContext<'_>,
        target: &TypeRef,
        depth: usize,
    ) -> Result<Vec<String>> {
        let object = ctx.model.object(&target.name, SELECTION_ROOT)?;
        self.select_object(ctx, object, depth)
    }
}

impl CompositeRule {
    /// Selection items for the fields of `object`.
    ///
    /// Excluded fields are skipped. Object fields are expanded only while the
    /// policy allows descending from `depth`, and are dropped when their own
    /// expansion comes back empty.
    pub fn select_object(
        &self,
        ctx: &SelectionContext<'_>,
        object: &ObjectNode,
        depth: usize,
    ) -> Result<Vec<String>> {
        let mut selection = Vec::with_capacity(object.fields.len());

        for (field, type_ref) in &object.fields {
            if ctx.policy.is_excluded(field) {
                tracing::trace!(owner = %object.name, %field, "Ignoring field");
                continue;
            }

            if !type_ref.kind.is_object() {
                selection.push(field.clone());
                continue;
            }

            if !ctx.policy.can_descend(depth) {
                tracing::trace!(owner = %object.name, %field, depth, "Depth bound reached");
                continue;
            }

            let nested = ctx
                .model
                .object(&type_ref.name, &format!("{}.{field}", object.name))?;
            let inner = self.select_object(ctx, nested, depth + 1)?;
            if inner.is_empty() {
                continue;
            }
            selection.push(format!("{field} {{ {} }}", inner.join(" ")));
        }

        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TypeKind;
    use crate::model::TypeNode;
    use crate::QueryGenError;

    fn scalar(name: &str) -> TypeRef {
        TypeRef::new(TypeKind::Scalar, name)
    }

    fn object(name: &str) -> TypeRef {
        TypeRef::new(TypeKind::Object, name)
    }

    fn node_model() -> SchemaModel {
        let mut model = SchemaModel::default();
        model.insert(TypeNode::Object(
            ObjectNode::new("Node")
                .with_field("id", scalar("String"))
                .with_field("parent", object("Node")),
        ));
        model
    }

    #[test]
    fn test_leaf_rule_is_empty() {
        let model = SchemaModel::default();
        let policy = SelectionPolicy::default();
        let ctx = SelectionContext::new(&model, &policy);
        assert!(LeafRule.select(&ctx, &scalar("String"), 0).unwrap().is_empty());
    }

    #[test]
    fn test_self_reference_stops_at_depth() {
        let model = node_model();
        let policy = SelectionPolicy::new().with_max_depth(2);
        let ctx = SelectionContext::new(&model, &policy);

        let selection = CompositeRule.select(&ctx, &object("Node"), 0).unwrap();
        assert_eq!(selection, ["id", "parent { id parent { id } }"]);
    }

    #[test]
    fn test_starting_depth_counts() {
        let model = node_model();
        let policy = SelectionPolicy::new().with_max_depth(2);
        let ctx = SelectionContext::new(&model, &policy);

        let selection = CompositeRule.select(&ctx, &object("Node"), 1).unwrap();
        assert_eq!(selection, ["id", "parent { id }"]);
    }

    #[test]
    fn test_empty_nested_selection_is_dropped() {
        let mut model = SchemaModel::default();
        model.insert(TypeNode::Object(
            ObjectNode::new("Ship")
                .with_field("id", scalar("ID"))
                .with_field("meta", object("Meta")),
        ));
        model.insert(TypeNode::Object(
            ObjectNode::new("Meta").with_field("cursor", scalar("String")),
        ));
        let policy = SelectionPolicy::new().with_ignore(["cursor"]);
        let ctx = SelectionContext::new(&model, &policy);

        let selection = CompositeRule.select(&ctx, &object("Ship"), 0).unwrap();
        assert_eq!(selection, ["id"]);
    }

    #[test]
    fn test_missing_nested_type_fails() {
        let mut model = SchemaModel::default();
        model.insert(TypeNode::Object(
            ObjectNode::new("Ship").with_field("flag", object("Flag")),
        ));
        let policy = SelectionPolicy::default();
        let ctx = SelectionContext::new(&model, &policy);

        assert_eq!(
            CompositeRule.select(&ctx, &object("Ship"), 0),
            Err(QueryGenError::MissingType {
                name: "Flag".to_string(),
                referenced_by: "Ship.flag".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_type_below_depth_bound_is_not_resolved() {
        let mut model = SchemaModel::default();
        model.insert(TypeNode::Object(
            ObjectNode::new("Ship")
                .with_field("id", scalar("ID"))
                .with_field("flag", object("Flag")),
        ));
        let policy = SelectionPolicy::new().with_max_depth(0);
        let ctx = SelectionContext::new(&model, &policy);

        assert_eq!(
            CompositeRule.select(&ctx, &object("Ship"), 0).unwrap(),
            ["id"]
        );
    }
}
