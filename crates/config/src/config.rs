use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::{ConfigError, Result};

/// Name under which a single-project config is exposed.
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GqlaConfig {
    /// Multi-project configuration
    Multi {
        projects: BTreeMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GqlaConfig {
    /// Get all projects as an iterator.
    /// For single project configs, yields a single item with name "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects } => projects.get(name),
        }
    }

    /// Like [`get_project`](Self::get_project), but a missing project is an
    /// error listing the ones that exist. `None` selects the default project,
    /// or the only project of a multi-project config.
    pub fn project(&self, name: Option<&str>) -> Result<&ProjectConfig> {
        let name = match (name, self) {
            (Some(name), _) => name,
            (None, Self::Multi { projects }) if projects.len() == 1 => projects
                .keys()
                .next()
                .map_or(DEFAULT_PROJECT, String::as_str),
            (None, _) => DEFAULT_PROJECT,
        };

        self.get_project(name)
            .ok_or_else(|| ConfigError::ProjectNotFound {
                name: name.to_string(),
                available: self.projects().map(|(name, _)| name.to_string()).collect(),
            })
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Configuration for one endpoint and how to generate queries for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Project name, used as the output folder when `output.dir` is not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointConfig>,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

impl ProjectConfig {
    /// Directory results are written to, if writing is enabled.
    #[must_use]
    pub fn output_dir(&self) -> Option<PathBuf> {
        let output = self.output.as_ref()?;
        output
            .dir
            .clone()
            .or_else(|| self.name.as_ref().map(PathBuf::from))
    }
}

/// The GraphQL endpoint to introspect and query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// Full endpoint URL. Takes precedence over `host`/`port`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// HTTP headers to include in every request (e.g., for authentication)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Request timeout in seconds (default: 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (default: 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
}

impl EndpointConfig {
    /// The endpoint URL: `url` if set, else `http://{host}:{port}/graphql`.
    #[must_use]
    pub fn resolved_url(&self) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        match (&self.host, self.port) {
            (Some(host), Some(port)) => Some(format!("http://{host}:{port}/graphql")),
            _ => None,
        }
    }
}

/// Field selection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Field names never selected
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Field names selected even when listed in `ignore`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub only: Vec<String>,

    /// Maximum nesting of object selections (default: 5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Where model dumps and query results are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_url_prefers_url() {
        let endpoint = EndpointConfig {
            url: Some("https://api.example.com/graphql".to_string()),
            host: Some("localhost".to_string()),
            port: Some(8080),
            ..Default::default()
        };
        assert_eq!(
            endpoint.resolved_url().as_deref(),
            Some("https://api.example.com/graphql")
        );
    }

    #[test]
    fn test_resolved_url_from_host_and_port() {
        let endpoint = EndpointConfig {
            host: Some("localhost".to_string()),
            port: Some(8080),
            ..Default::default()
        };
        assert_eq!(
            endpoint.resolved_url().as_deref(),
            Some("http://localhost:8080/graphql")
        );

        let partial = EndpointConfig {
            host: Some("localhost".to_string()),
            ..Default::default()
        };
        assert_eq!(partial.resolved_url(), None);
    }

    #[test]
    fn test_output_dir_falls_back_to_name() {
        let mut project = ProjectConfig {
            name: Some("solar".to_string()),
            ..Default::default()
        };
        assert_eq!(project.output_dir(), None);

        project.output = Some(OutputConfig::default());
        assert_eq!(project.output_dir(), Some(PathBuf::from("solar")));

        project.output = Some(OutputConfig {
            dir: Some(PathBuf::from("out")),
        });
        assert_eq!(project.output_dir(), Some(PathBuf::from("out")));
    }

    #[test]
    fn test_project_selection() {
        let single = GqlaConfig::Single(Box::default());
        assert!(single.project(None).is_ok());
        assert!(single.project(Some("default")).is_ok());
        assert!(matches!(
            single.project(Some("other")),
            Err(ConfigError::ProjectNotFound { .. })
        ));

        let mut projects = BTreeMap::new();
        projects.insert("only".to_string(), ProjectConfig::default());
        let multi = GqlaConfig::Multi { projects };
        assert!(multi.project(None).is_ok());

        let mut projects = BTreeMap::new();
        projects.insert("a".to_string(), ProjectConfig::default());
        projects.insert("b".to_string(), ProjectConfig::default());
        let multi = GqlaConfig::Multi { projects };
        let Err(ConfigError::ProjectNotFound { available, .. }) = multi.project(None) else {
            panic!("expected ProjectNotFound");
        };
        assert_eq!(available, ["a", "b"]);
    }
}
