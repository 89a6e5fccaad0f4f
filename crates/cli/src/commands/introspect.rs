use super::common::{dump_model, load_project, resolve_endpoint, ConfigTarget, EndpointArgs};
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

#[tracing::instrument(skip_all)]
pub async fn run(
    target: &ConfigTarget,
    endpoint: &EndpointArgs,
    output: Option<PathBuf>,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();

    let project = load_project(target)?;
    let settings = resolve_endpoint(endpoint, &project)?;

    let introspection = settings
        .client()
        .introspect(&settings.url)
        .await
        .with_context(|| format!("Failed to fetch schema from {}", settings.url))?;
    let document =
        serde_json::to_value(&introspection).context("Failed to serialize introspection")?;

    if let Some(dir) = project.output_dir() {
        dump_model(&dir, &document)?;
    }

    let content =
        serde_json::to_string_pretty(&document).context("Failed to serialize introspection")?;

    if let Some(path) = output {
        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;

        if output_opts.show_info {
            println!(
                "{} Introspection of {} types written to {}",
                "✓".green(),
                introspection.data.schema.types.len(),
                path.display().to_string().cyan()
            );
            println!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());
        }
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        handle.write_all(b"\n").context("Failed to write to stdout")?;
    }

    Ok(())
}
