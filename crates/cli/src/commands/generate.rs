use super::common::{
    load_model, load_project, resolve_policy, ConfigTarget, SelectionArgs, SourceArgs,
};
use crate::{OutputFormat, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_querygen::QueryStore;

#[tracing::instrument(skip_all)]
pub async fn run(
    target: &ConfigTarget,
    source: &SourceArgs,
    selection: &SelectionArgs,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();

    let project = load_project(target)?;
    let policy = resolve_policy(selection, &project);
    let model = load_model(source, &project).await?;
    let store = QueryStore::build(&model, &policy).context("Failed to generate queries")?;

    print!("{}", render(&store, format)?);

    // Summaries go to stderr so stdout stays a plain query listing
    if matches!(format, OutputFormat::Human) && output_opts.show_info {
        eprintln!(
            "{} Generated {} queries from {} types (max depth {})",
            "✓".green(),
            store.len(),
            model.len(),
            policy.max_depth
        );
        eprintln!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());
    }

    Ok(())
}

/// Everything written to stdout for `format`.
fn render(store: &QueryStore, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(render_human(store)),
        OutputFormat::Json => Ok(format!("{}\n", render_json(store)?)),
    }
}

fn render_human(store: &QueryStore) -> String {
    store
        .iter()
        .map(|query| format!("{}\n  {}\n", query.name().cyan().bold(), query.text()))
        .collect()
}

/// Query name to query text, in schema order.
fn render_json(store: &QueryStore) -> Result<String> {
    let queries: serde_json::Map<String, serde_json::Value> = store
        .iter()
        .map(|query| {
            (
                query.name().to_string(),
                serde_json::Value::String(query.text()),
            )
        })
        .collect();
    serde_json::to_string_pretty(&queries).context("Failed to serialize queries")
}
