//! Operation texts sent to the endpoint.

/// Standard GraphQL introspection query.
///
/// The query includes nested type references up to 7 levels deep to handle
/// complex type wrappers like `[[[String!]!]!]`.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
";

/// Wraps a root selection (`name(args){ ... }`) in an anonymous query
/// operation.
///
/// ```
/// # use graphql_introspect::query_envelope;
/// assert_eq!(query_envelope("ships{ id }"), "query { ships{ id } }");
/// ```
#[must_use]
pub fn query_envelope(selection: &str) -> String {
    format!("query {{ {selection} }}")
}
