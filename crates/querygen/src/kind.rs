//! Kind dispatch.
//!
//! Introspection reports every type with a `kind` tag. Only three of them are
//! modelled; everything else (wrappers, interfaces, unions, input objects,
//! and any tag a server invents) is unsupported and produces no node.

use crate::model::{EnumNode, ObjectNode, ScalarNode, TypeNode};
use std::fmt;

/// The kinds that have a [`TypeNode`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Enum,
}

/// Every recognized kind tag. Lookups outside this table are unsupported.
const KIND_REGISTRY: &[(&str, TypeKind)] = &[
    ("SCALAR", TypeKind::Scalar),
    ("OBJECT", TypeKind::Object),
    ("ENUM", TypeKind::Enum),
];

impl TypeKind {
    /// Looks up a raw kind tag. Returns `None` for unsupported kinds.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        KIND_REGISTRY
            .iter()
            .find(|(registered, _)| *registered == tag)
            .map(|(_, kind)| *kind)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Enum => "ENUM",
        }
    }

    #[must_use]
    pub const fn is_object(self) -> bool {
        matches!(self, Self::Object)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constructs an empty node of the variant registered for `kind`.
///
/// Children (enum values, object fields) are filled in by the schema model
/// builder. Returns `None` when no variant is registered; callers omit the
/// type or field rather than failing.
#[must_use]
pub fn dispatch(kind: &str, name: &str) -> Option<TypeNode> {
    let node = match TypeKind::from_tag(kind)? {
        TypeKind::Scalar => TypeNode::Scalar(ScalarNode::new(name)),
        TypeKind::Object => TypeNode::Object(ObjectNode::new(name)),
        TypeKind::Enum => TypeNode::Enum(EnumNode::new(name)),
    };
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_kinds() {
        assert_eq!(TypeKind::from_tag("SCALAR"), Some(TypeKind::Scalar));
        assert_eq!(TypeKind::from_tag("OBJECT"), Some(TypeKind::Object));
        assert_eq!(TypeKind::from_tag("ENUM"), Some(TypeKind::Enum));
    }

    #[test]
    fn test_unsupported_kinds() {
        for tag in [
            "LIST",
            "NON_NULL",
            "INTERFACE",
            "UNION",
            "INPUT_OBJECT",
            "JSON",
            "object",
            "",
        ] {
            assert_eq!(TypeKind::from_tag(tag), None, "{tag} should be unsupported");
            assert!(dispatch(tag, "Anything").is_none());
        }
    }

    #[test]
    fn test_dispatch_builds_matching_variant() {
        let node = dispatch("OBJECT", "Planet").unwrap();
        assert_eq!(node.name(), "Planet");
        assert_eq!(node.kind(), TypeKind::Object);

        let node = dispatch("ENUM", "Color").unwrap();
        assert_eq!(node.kind(), TypeKind::Enum);

        let node = dispatch("SCALAR", "String").unwrap();
        assert_eq!(node.kind(), TypeKind::Scalar);
    }

    #[test]
    fn test_kind_round_trips_through_tag() {
        for kind in [TypeKind::Scalar, TypeKind::Object, TypeKind::Enum] {
            assert_eq!(TypeKind::from_tag(kind.as_str()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
