//! Query body generation.

use crate::model::{SchemaModel, TypeRef};
use crate::rules::{CompositeRule, LeafRule, SelectionContext, SelectionRule};
use crate::{Result, SelectionPolicy};

/// Produces selection-set bodies for root query fields.
///
/// Object-typed fields are expanded by the composite rule; anything else goes
/// through the leaf rule. Generation is a pure function of the model, the
/// policy and the field type, so one generator can be reused for every root
/// field in a pass.
#[derive(Debug, Clone, Copy)]
pub struct QueryGenerator<'a, L = LeafRule, C = CompositeRule> {
    ctx: SelectionContext<'a>,
    leaf: L,
    composite: C,
}

impl<'a> QueryGenerator<'a> {
    #[must_use]
    pub const fn new(model: &'a SchemaModel, policy: &'a SelectionPolicy) -> Self {
        Self::with_rules(model, policy, LeafRule, CompositeRule)
    }
}

impl<'a, L, C> QueryGenerator<'a, L, C>
where
    L: SelectionRule,
    C: SelectionRule,
{
    #[must_use]
    pub const fn with_rules(
        model: &'a SchemaModel,
        policy: &'a SelectionPolicy,
        leaf: L,
        composite: C,
    ) -> Self {
        Self {
            ctx: SelectionContext::new(model, policy),
            leaf,
            composite,
        }
    }

    /// Body for a root field of type `field_type`.
    ///
    /// For an object this is `{ a b c { d } }`. For a leaf type, or an object
    /// whose whole selection is excluded, the body is empty.
    #[tracing::instrument(level = "debug", skip(self), fields(target = %field_type.name))]
    pub fn generate(&self, field_type: &TypeRef) -> Result<String> {
        if !field_type.kind.is_object() {
            return Ok(self.leaf.select(&self.ctx, field_type, 0)?.join(" "));
        }

        let selection = self.composite.select(&self.ctx, field_type, 0)?;
        if selection.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{{ {} }}", selection.join(" ")))
    }

    /// The unbraced, space-joined selection of an object type's fields.
    pub fn selection_for(&self, field_type: &TypeRef) -> Result<String> {
        Ok(self.composite.select(&self.ctx, field_type, 0)?.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TypeKind;
    use crate::model::{ObjectNode, TypeNode};

    fn model() -> SchemaModel {
        let mut model = SchemaModel::default();
        model.insert(TypeNode::Object(
            ObjectNode::new("VesselType")
                .with_field("id", TypeRef::new(TypeKind::Scalar, "String"))
                .with_field("name", TypeRef::new(TypeKind::Scalar, "String")),
        ));
        model.insert(TypeNode::Object(
            ObjectNode::new("Node")
                .with_field("id", TypeRef::new(TypeKind::Scalar, "String"))
                .with_field("parent", TypeRef::new(TypeKind::Object, "Node")),
        ));
        model
    }

    #[test]
    fn test_generate_object_body() {
        let model = model();
        let policy = SelectionPolicy::default();
        let generator = QueryGenerator::new(&model, &policy);

        let body = generator
            .generate(&TypeRef::new(TypeKind::Object, "VesselType"))
            .unwrap();
        assert_eq!(body, "{ id name }");
    }

    #[test]
    fn test_generate_leaf_is_empty() {
        let model = model();
        let policy = SelectionPolicy::default();
        let generator = QueryGenerator::new(&model, &policy);

        let body = generator
            .generate(&TypeRef::new(TypeKind::Scalar, "String"))
            .unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn test_selection_for_self_reference() {
        let model = model();
        let policy = SelectionPolicy::new().with_max_depth(2);
        let generator = QueryGenerator::new(&model, &policy);

        let selection = generator
            .selection_for(&TypeRef::new(TypeKind::Object, "Node"))
            .unwrap();
        assert_eq!(selection, "id parent { id parent { id } }");
    }

    #[test]
    fn test_max_depth_zero_has_no_nested_braces() {
        let model = model();
        let policy = SelectionPolicy::new().with_max_depth(0);
        let generator = QueryGenerator::new(&model, &policy);

        let body = generator
            .generate(&TypeRef::new(TypeKind::Object, "Node"))
            .unwrap();
        assert_eq!(body, "{ id }");
    }

    #[test]
    fn test_fully_ignored_object_is_empty() {
        let model = model();
        let policy = SelectionPolicy::new().with_ignore(["id", "name"]);
        let generator = QueryGenerator::new(&model, &policy);

        let body = generator
            .generate(&TypeRef::new(TypeKind::Object, "VesselType"))
            .unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_custom_rules_are_used() {
        struct Fixed;

        impl SelectionRule for Fixed {
            fn select(
                &self,
                _ctx: &SelectionContext<'_>,
                target: &TypeRef,
                _depth: usize,
            ) -> Result<Vec<String>> {
                Ok(vec![format!("__typename_{}", target.name)])
            }
        }

        let model = model();
        let policy = SelectionPolicy::default();
        let generator = QueryGenerator::with_rules(&model, &policy, Fixed, Fixed);

        assert_eq!(
            generator
                .generate(&TypeRef::new(TypeKind::Object, "Anything"))
                .unwrap(),
            "{ __typename_Anything }"
        );
        assert_eq!(
            generator
                .generate(&TypeRef::new(TypeKind::Enum, "Color"))
                .unwrap(),
            "__typename_Color"
        );
    }
}
