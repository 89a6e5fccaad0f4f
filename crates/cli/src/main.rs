mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gqla")]
#[command(about = "Generate and run GraphQL queries from endpoint introspection", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to gqla config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Project name (for multi-project configs)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors and results
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a query for every object-typed root field and print it
    Generate {
        #[command(flatten)]
        source: commands::common::SourceArgs,

        #[command(flatten)]
        selection: commands::common::SelectionArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Run one generated query against the endpoint and print the response
    Query {
        /// Root field to query
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        source: commands::common::SourceArgs,

        #[command(flatten)]
        selection: commands::common::SelectionArgs,

        /// Argument to bind, as key=value (can be specified multiple times).
        /// Values are read as JSON when they parse, otherwise as strings.
        #[arg(long = "arg", short = 'a', value_name = "KEY=VALUE")]
        args: Vec<String>,

        /// Render string arguments as quoted GraphQL literals
        #[arg(long)]
        literal_args: bool,

        /// Write the response to `_<NAME>.json` in the output directory
        #[arg(long)]
        save: bool,
    },

    /// Fetch the raw introspection result from an endpoint
    Introspect {
        #[command(flatten)]
        endpoint: commands::common::EndpointArgs,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON object of query name to query text
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };
    let target = commands::common::ConfigTarget {
        path: cli.config,
        project: cli.project,
    };

    match cli.command {
        Commands::Generate {
            source,
            selection,
            format,
        } => commands::generate::run(&target, &source, &selection, format, output_opts).await,
        Commands::Query {
            name,
            source,
            selection,
            args,
            literal_args,
            save,
        } => {
            commands::query::run(
                &target,
                commands::query::QueryRequest {
                    name: &name,
                    args: &args,
                    literal_args,
                    save,
                },
                &source,
                &selection,
                output_opts,
            )
            .await
        }
        Commands::Introspect { endpoint, output } => {
            commands::introspect::run(&target, &endpoint, output, output_opts).await
        }
    }
}

/// Initialize tracing, silent unless `RUST_LOG` says otherwise
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Applies `--color`/`--no-color`, then the `NO_COLOR` and `CLICOLOR*`
/// conventions (<https://no-color.org/>, <https://bixense.com/clicolors/>).
/// With none of them set, `colored` decides from TTY detection.
fn configure_colors(force_color: bool, no_color: bool) {
    if let Some(enabled) = color_override(force_color, no_color, |name| std::env::var(name).ok())
    {
        colored::control::set_override(enabled);
    }
}

/// The forced color setting, if any. `env` reads an environment variable.
fn color_override(
    force_color: bool,
    no_color: bool,
    env: impl Fn(&str) -> Option<String>,
) -> Option<bool> {
    if force_color {
        return Some(true);
    }
    if no_color || env("NO_COLOR").is_some() {
        return Some(false);
    }
    match env("CLICOLOR_FORCE") {
        Some(val) if !val.is_empty() && val != "0" => Some(true),
        Some(_) => None,
        None => (env("CLICOLOR").as_deref() == Some("0")).then_some(false),
    }
}
