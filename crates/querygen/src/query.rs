//! Root query templates and argument bindings.

use crate::arguments::{ArgumentRendering, Arguments};
use std::fmt;
use std::sync::Arc;

/// One generated root query: the field name and its selection body.
///
/// Templates never change after generation. Arguments are attached by
/// [`Query::bind`], which hands back an independent [`BoundQuery`], so two
/// callers binding the same query can never see each other's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    name: Arc<str>,
    body: Arc<str>,
}

impl Query {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, body: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The query text with no arguments: `name{ ... }`.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}{}", self.name, self.body)
    }

    /// Binds arguments using the default (bare) rendering.
    #[must_use]
    pub fn bind(&self, args: &Arguments) -> BoundQuery {
        self.bind_with(args, ArgumentRendering::default())
    }

    #[must_use]
    pub fn bind_with(&self, args: &Arguments, rendering: ArgumentRendering) -> BoundQuery {
        let mut bound = BoundQuery {
            query: self.clone(),
            args: String::new(),
            rendering,
        };
        bound.bind_arguments(args);
        bound
    }
}

/// A query template plus the rendered argument list of one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundQuery {
    query: Query,
    args: String,
    rendering: ArgumentRendering,
}

impl BoundQuery {
    /// Replaces the argument list. Earlier arguments are discarded, not
    /// merged.
    pub fn bind_arguments(&mut self, args: &Arguments) {
        self.args = args.render(self.rendering);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.query.name()
    }

    /// The rendered argument list, e.g. `(first: 1)`, or empty.
    #[must_use]
    pub fn args(&self) -> &str {
        &self.args
    }

    /// `name + args + body`, computed from the current arguments.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}{}{}", self.query.name, self.args, self.query.body)
    }
}

impl fmt::Display for BoundQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.query.name, self.args, self.query.body)
    }
}
