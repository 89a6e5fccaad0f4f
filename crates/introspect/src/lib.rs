//! GraphQL introspection wire types and HTTP transport.
//!
//! This crate fetches a schema's introspection result from a remote endpoint
//! and executes generated root selections against it. It knows nothing about
//! how queries are generated; that lives in `graphql-querygen`.
//!
//! # Examples
//!
//! ```no_run
//! use graphql_introspect::GraphQLClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GraphQLClient::new().with_retries(2);
//!     let url = "http://localhost:8080/graphql";
//!
//!     let introspection = client.introspect(url).await?;
//!     println!("{} types", introspection.data.schema.types.len());
//!
//!     let result = client.execute(url, "allPlanets{ id name }").await?;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod types;

pub use client::GraphQLClient;
pub use error::{IntrospectionError, Result};
pub use query::{query_envelope, INTROSPECTION_QUERY};
pub use types::*;
