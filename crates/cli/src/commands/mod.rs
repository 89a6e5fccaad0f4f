pub mod common;
pub mod generate;
pub mod introspect;
pub mod query;
