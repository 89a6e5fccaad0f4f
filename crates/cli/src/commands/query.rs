use super::common::{
    load_model, load_project, parse_arguments, resolve_endpoint, resolve_policy, write_json,
    ConfigTarget, SelectionArgs, SourceArgs,
};
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_querygen::{ArgumentRendering, QueryStore};
use std::path::PathBuf;

/// The query to run and how to bind it.
pub struct QueryRequest<'a> {
    pub name: &'a str,
    pub args: &'a [String],
    pub literal_args: bool,
    pub save: bool,
}

impl QueryRequest<'_> {
    const fn rendering(&self) -> ArgumentRendering {
        if self.literal_args {
            ArgumentRendering::Literal
        } else {
            ArgumentRendering::Bare
        }
    }
}

/// Name of the file a query's response is saved to.
pub fn result_file_name(query: &str) -> String {
    format!("_{query}.json")
}

#[tracing::instrument(skip_all, fields(query = request.name))]
pub async fn run(
    target: &ConfigTarget,
    request: QueryRequest<'_>,
    source: &SourceArgs,
    selection: &SelectionArgs,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();

    let project = load_project(target)?;
    let settings = resolve_endpoint(&source.endpoint, &project)?;
    let policy = resolve_policy(selection, &project);
    let model = load_model(source, &project).await?;
    let store = QueryStore::build(&model, &policy).context("Failed to generate queries")?;

    let arguments = parse_arguments(request.args)?;
    let bound = store
        .bind_with(request.name, &arguments, request.rendering())
        .with_context(|| {
            let available: Vec<_> = store.names().collect();
            format!("Available queries: {}", available.join(", "))
        })?;
    let text = bound.text();
    tracing::debug!(%text, "Executing query");

    let response = settings
        .client()
        .execute(&settings.url, &text)
        .await
        .with_context(|| format!("Failed to run '{}' against {}", request.name, settings.url))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to serialize response")?
    );

    if let Some(dir) = save_dir(request.save, project.output_dir()) {
        let path = write_json(&dir, &result_file_name(request.name), &response)?;
        if output_opts.show_info {
            eprintln!(
                "{} Saved response to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
        }
    }

    if response.get("errors").is_some() && output_opts.show_info {
        eprintln!("{} Response contains GraphQL errors", "⚠".yellow());
    }
    if output_opts.show_info {
        eprintln!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());
    }

    Ok(())
}

/// Responses are saved whenever an output directory is configured; `--save`
/// without one saves to the current directory.
fn save_dir(save: bool, configured: Option<PathBuf>) -> Option<PathBuf> {
    match (save, configured) {
        (_, Some(dir)) => Some(dir),
        (true, None) => Some(PathBuf::from(".")),
        (false, None) => None,
    }
}
