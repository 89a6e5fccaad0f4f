//! Configuration for gqla.
//!
//! A config file names the endpoint to introspect, the selection policy used
//! to generate queries, and where results are written. Files are YAML or
//! JSON and may describe a single project or several under `projects:`.

mod config;
mod error;
mod loader;

pub use config::{EndpointConfig, GenerationConfig, GqlaConfig, OutputConfig, ProjectConfig};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
