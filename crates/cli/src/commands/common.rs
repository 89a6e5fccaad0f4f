//! Settings shared by every command: config lookup, endpoint resolution,
//! selection policy overrides, and model loading.

use anyhow::{Context, Result};
use graphql_config::{find_config, load_config, ProjectConfig};
use graphql_introspect::GraphQLClient;
use graphql_querygen::{Arguments, SchemaModel, SelectionPolicy, DEFAULT_MAX_DEPTH};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout in seconds for requests.
const DEFAULT_TIMEOUT: u64 = 30;

/// File the raw introspection `types` list is dumped to.
pub const MODEL_FILE: &str = "model.json";

/// Which config file and project the global flags point at.
#[derive(Debug, Default)]
pub struct ConfigTarget {
    pub path: Option<PathBuf>,
    pub project: Option<String>,
}

/// Endpoint flags, each overriding the config file.
#[derive(Debug, Default, clap::Args)]
pub struct EndpointArgs {
    /// GraphQL endpoint URL (optional if the config names one)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// HTTP headers to include in the request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    /// These are merged with headers from the config file (CLI takes precedence)
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (overrides config file)
    #[arg(long)]
    pub retry: Option<u32>,
}

/// Where the schema comes from: an introspection file or the endpoint.
#[derive(Debug, Default, clap::Args)]
pub struct SourceArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,

    /// Read the schema from an introspection JSON file instead of the endpoint
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,
}

/// Selection policy flags. Non-empty lists replace the configured ones.
#[derive(Debug, Default, clap::Args)]
pub struct SelectionArgs {
    /// Field names never selected (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Field names selected even when ignored (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Maximum nesting of object selections
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Resolved endpoint settings from config file and CLI arguments.
#[derive(Debug)]
pub struct EndpointSettings {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: u64,
    pub retry: u32,
}

impl EndpointSettings {
    pub fn client(&self) -> GraphQLClient {
        GraphQLClient::new()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retries(self.retry)
            .with_headers(self.headers.iter().cloned())
    }
}

/// Loads the selected project, or defaults when no config file exists.
///
/// An explicit `--config` that cannot be read is an error, as is `--project`
/// without any config file to look it up in.
#[tracing::instrument(skip_all)]
pub fn load_project(target: &ConfigTarget) -> Result<ProjectConfig> {
    let config_path = match &target.path {
        Some(path) => Some(path.clone()),
        None => {
            let current_dir = std::env::current_dir()?;
            find_config(&current_dir).context("Failed to search for config")?
        }
    };

    let Some(config_path) = config_path else {
        if let Some(project) = &target.project {
            anyhow::bail!(
                "Project '{project}' requested but no gqla config file was found. \
                Use --config to specify one."
            );
        }
        tracing::debug!("No config file found, using defaults");
        return Ok(ProjectConfig::default());
    };

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let project = config.project(target.project.as_deref())?;
    Ok(project.clone())
}

/// Parses a header string in "Name: Value" format.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parses a `key=value` argument. The value is read as JSON when it parses,
/// so `first=10` binds a number and `ids=[1,2]` a list; anything else is kept
/// as a string.
pub fn parse_arg(arg: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = arg.split_once('=') else {
        anyhow::bail!("Invalid argument format: '{arg}'. Expected 'key=value'");
    };
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Argument name cannot be empty");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

pub fn parse_arguments(args: &[String]) -> Result<Arguments> {
    args.iter()
        .map(|arg| parse_arg(arg))
        .collect::<Result<Arguments>>()
        .context("Failed to parse arguments")
}

/// Resolve endpoint settings from URL/config and CLI overrides.
pub fn resolve_endpoint(args: &EndpointArgs, project: &ProjectConfig) -> Result<EndpointSettings> {
    let endpoint = project.endpoint.clone().unwrap_or_default();

    let url = args
        .url
        .clone()
        .or_else(|| endpoint.resolved_url())
        .context(
            "No endpoint URL. Pass one as an argument or set endpoint.url in the gqla config.",
        )?;

    // Start with headers from config
    let mut headers: Vec<(String, String)> =
        endpoint.headers.unwrap_or_default().into_iter().collect();

    let cli_parsed = args
        .headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()
        .context("Failed to parse headers")?;

    for (name, value) in cli_parsed {
        // Remove existing header with same name (case-insensitive)
        headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    Ok(EndpointSettings {
        url,
        headers,
        timeout: args.timeout.or(endpoint.timeout).unwrap_or(DEFAULT_TIMEOUT),
        retry: args.retry.or(endpoint.retry).unwrap_or(0),
    })
}

/// Builds the selection policy from config, with CLI flags taking precedence.
pub fn resolve_policy(args: &SelectionArgs, project: &ProjectConfig) -> SelectionPolicy {
    let generation = &project.generation;
    let pick = |cli: &[String], config: &[String]| -> Vec<String> {
        if cli.is_empty() {
            config.to_vec()
        } else {
            cli.to_vec()
        }
    };

    SelectionPolicy::new()
        .with_ignore(pick(&args.ignore, &generation.ignore))
        .with_only(pick(&args.only, &generation.only))
        .with_max_depth(
            args.max_depth
                .or(generation.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
        )
}

/// Builds the schema model from `--schema` or by introspecting the endpoint.
///
/// A live introspection is dumped to the project's output directory when one
/// is configured.
#[tracing::instrument(skip_all)]
pub async fn load_model(source: &SourceArgs, project: &ProjectConfig) -> Result<SchemaModel> {
    let document = if let Some(path) = &source.schema {
        tracing::debug!(path = %path.display(), "Reading introspection file");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("{} is not valid JSON", path.display()))?
    } else {
        let settings = resolve_endpoint(&source.endpoint, project)?;
        let document = settings
            .client()
            .introspect_raw(&settings.url)
            .await
            .with_context(|| format!("Failed to introspect {}", settings.url))?;

        if let Some(dir) = project.output_dir() {
            dump_model(&dir, &document)?;
        }
        document
    };

    SchemaModel::from_json(document).context("Failed to build schema model")
}

/// Writes the `types` list of an introspection response to `model.json`.
pub fn dump_model(dir: &Path, document: &Value) -> Result<PathBuf> {
    let types = document.pointer("/data/__schema/types").unwrap_or(document);
    write_json(dir, MODEL_FILE, types)
}

/// Writes `value` as pretty JSON to `dir/file_name`, creating `dir` if needed.
pub fn write_json(dir: &Path, file_name: &str, value: &Value) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Wrote JSON");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_config::{EndpointConfig, GenerationConfig};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn project_with_endpoint(endpoint: EndpointConfig) -> ProjectConfig {
        ProjectConfig {
            endpoint: Some(endpoint),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_header_valid() {
        let (name, value) = parse_header("Authorization: Bearer token").unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer token");
    }

    #[test]
    fn test_parse_header_with_colons_in_value() {
        let (name, value) = parse_header("X-Custom: value:with:colons").unwrap();
        assert_eq!(name, "X-Custom");
        assert_eq!(value, "value:with:colons");
    }

    #[test]
    fn test_parse_header_invalid() {
        assert!(parse_header("InvalidHeader").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_parse_arg_reads_json_values() {
        assert_eq!(parse_arg("first=10").unwrap(), ("first".to_string(), json!(10)));
        assert_eq!(
            parse_arg("onlyIdentified=false").unwrap(),
            ("onlyIdentified".to_string(), json!(false))
        );
        assert_eq!(parse_arg("ids=[1, 2]").unwrap().1, json!([1, 2]));
        assert_eq!(parse_arg("after=null").unwrap().1, json!(null));
    }

    #[test]
    fn test_parse_arg_falls_back_to_string() {
        assert_eq!(parse_arg("after=YXJyYXk").unwrap().1, json!("YXJyYXk"));
        assert_eq!(parse_arg("filter=a=b").unwrap().1, json!("a=b"));
        assert_eq!(parse_arg("empty=").unwrap().1, json!(""));
    }

    #[test]
    fn test_parse_arg_invalid() {
        assert!(parse_arg("first").is_err());
        assert!(parse_arg("=1").is_err());
    }

    #[test]
    fn test_parse_arguments_keeps_order() {
        let args = parse_arguments(&["b=1".to_string(), "a=x".to_string()]).unwrap();
        assert_eq!(args.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn test_resolve_endpoint_with_url() {
        let args = EndpointArgs {
            url: Some("https://example.com/graphql".to_string()),
            headers: vec!["Authorization: Bearer token".to_string()],
            timeout: Some(60),
            retry: Some(3),
        };
        let settings = resolve_endpoint(&args, &ProjectConfig::default()).unwrap();

        assert_eq!(settings.url, "https://example.com/graphql");
        assert_eq!(
            settings.headers,
            [("Authorization".to_string(), "Bearer token".to_string())]
        );
        assert_eq!(settings.timeout, 60);
        assert_eq!(settings.retry, 3);
    }

    #[test]
    fn test_resolve_endpoint_defaults() {
        let args = EndpointArgs {
            url: Some("https://example.com/graphql".to_string()),
            ..Default::default()
        };
        let settings = resolve_endpoint(&args, &ProjectConfig::default()).unwrap();
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.retry, 0);
        assert!(settings.headers.is_empty());
    }

    #[test]
    fn test_resolve_endpoint_requires_url() {
        let result = resolve_endpoint(&EndpointArgs::default(), &ProjectConfig::default());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No endpoint URL"));
    }

    #[test]
    fn test_resolve_endpoint_from_config_with_overrides() {
        let mut headers = BTreeMap::new();
        headers.insert("authorization".to_string(), "Bearer old".to_string());
        headers.insert("X-Team".to_string(), "ships".to_string());
        let project = project_with_endpoint(EndpointConfig {
            host: Some("localhost".to_string()),
            port: Some(8080),
            headers: Some(headers),
            timeout: Some(5),
            retry: Some(2),
            ..Default::default()
        });

        let args = EndpointArgs {
            headers: vec!["Authorization: Bearer new".to_string()],
            retry: Some(0),
            ..Default::default()
        };
        let settings = resolve_endpoint(&args, &project).unwrap();

        assert_eq!(settings.url, "http://localhost:8080/graphql");
        assert_eq!(settings.timeout, 5);
        assert_eq!(settings.retry, 0);
        assert_eq!(
            settings.headers,
            [
                ("X-Team".to_string(), "ships".to_string()),
                ("Authorization".to_string(), "Bearer new".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_policy_cli_overrides_config() {
        let project = ProjectConfig {
            generation: GenerationConfig {
                ignore: vec!["pageInfo".to_string()],
                only: vec!["parent".to_string()],
                max_depth: Some(2),
            },
            ..Default::default()
        };

        let policy = resolve_policy(&SelectionArgs::default(), &project);
        assert!(policy.is_excluded("pageInfo"));
        assert!(!policy.is_excluded("parent"));
        assert_eq!(policy.max_depth, 2);

        let args = SelectionArgs {
            ignore: vec!["cursor".to_string()],
            only: Vec::new(),
            max_depth: Some(7),
        };
        let policy = resolve_policy(&args, &project);
        assert!(policy.is_excluded("cursor"));
        assert!(!policy.is_excluded("pageInfo"));
        assert_eq!(policy.max_depth, 7);
    }

    #[test]
    fn test_resolve_policy_defaults() {
        let policy = resolve_policy(&SelectionArgs::default(), &ProjectConfig::default());
        assert_eq!(policy, SelectionPolicy::default());
    }

    #[test]
    fn test_load_project_from_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gqlarc.yml");
        std::fs::write(
            &path,
            "projects:\n  solar:\n    generation:\n      maxDepth: 1\n  ships: {}\n",
        )
        .unwrap();

        let target = ConfigTarget {
            path: Some(path.clone()),
            project: Some("solar".to_string()),
        };
        let project = load_project(&target).unwrap();
        assert_eq!(project.generation.max_depth, Some(1));

        let missing = ConfigTarget {
            path: Some(path),
            project: Some("moons".to_string()),
        };
        assert!(load_project(&missing).is_err());
    }

    #[test]
    fn test_load_project_missing_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let target = ConfigTarget {
            path: Some(dir.path().join("absent.yml")),
            project: None,
        };
        assert!(load_project(&target).is_err());
    }

    #[tokio::test]
    async fn test_load_model_from_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        let document = json!({ "data": { "__schema": { "types": [
            { "kind": "SCALAR", "name": "String" },
            { "kind": "OBJECT", "name": "Query", "fields": [
                { "name": "version", "type": { "kind": "SCALAR", "name": "String" } }
            ]}
        ]}}});
        std::fs::write(&path, document.to_string()).unwrap();

        let source = SourceArgs {
            schema: Some(path),
            ..Default::default()
        };
        let model = load_model(&source, &ProjectConfig::default()).await.unwrap();
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_dump_model_writes_types_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("solar");
        let document = json!({ "data": { "__schema": { "types": [
            { "kind": "SCALAR", "name": "String" }
        ]}}});

        let path = dump_model(&out, &document).unwrap();
        assert_eq!(path, out.join(MODEL_FILE));

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, json!([{ "kind": "SCALAR", "name": "String" }]));
    }
}
