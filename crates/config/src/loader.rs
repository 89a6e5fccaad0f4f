use crate::{ConfigError, GqlaConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".gqlarc.yml",
    ".gqlarc.yaml",
    ".gqlarc.json",
    ".gqlarc",
    "gqla.config.yml",
    "gqla.config.yaml",
    "gqla.config.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GqlaConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        projects = config.project_count(),
        multi_project = config.is_multi_project(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GqlaConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        // .gqlarc without extension - try YAML first, then JSON
        "" if file_name == ".gqlarc" => {
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<GqlaConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<GqlaConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Validate the loaded configuration
#[tracing::instrument(skip(config, path), fields(path = %path.display(), projects = config.project_count()))]
fn validate_config(config: &GqlaConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    for (project_name, project_config) in config.projects() {
        tracing::trace!(project = project_name, "Validating project config");

        if let Some(endpoint) = &project_config.endpoint {
            if endpoint.url.as_deref().is_some_and(|url| url.trim().is_empty()) {
                return Err(invalid(format!("Project '{project_name}' has an empty endpoint url")));
            }
            if endpoint.url.is_none() && endpoint.resolved_url().is_none() {
                return Err(invalid(format!(
                    "Project '{project_name}' endpoint needs either 'url' or both 'host' and 'port'"
                )));
            }
        }

        let generation = &project_config.generation;
        for field in generation.ignore.iter().chain(&generation.only) {
            if field.trim().is_empty() {
                return Err(invalid(format!(
                    "Project '{project_name}' has an empty field name in ignore/only"
                )));
            }
        }

        if let Some(output) = &project_config.output {
            if output.dir.is_none() && project_config.name.is_none() {
                return Err(invalid(format!(
                    "Project '{project_name}' enables output without 'output.dir' or 'name'"
                )));
            }
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
