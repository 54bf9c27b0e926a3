use clap::{Parser, ValueEnum};
use filedist_core::{load_nodes, load_workloads};
use filedist_planner::report::write_summary;
use filedist_planner::{
    write_plan, OutputFormat, Planner, PlannerConfig, PlannerError, DEFAULT_UNASSIGNED_SENTINEL,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "filedist",
    version,
    about = "Plan a balanced distribution of files across storage nodes"
)]
struct Cli {
    /// Input file for files, one `<name> <size>` per line
    #[arg(short = 'f', long = "files", env = "FILEDIST_FILES")]
    files: PathBuf,

    /// Input file for nodes, one `<name> <capacity>` per line
    #[arg(short = 'n', long = "nodes", env = "FILEDIST_NODES")]
    nodes: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long = "output", env = "FILEDIST_OUTPUT")]
    output: Option<PathBuf>,

    /// Destination written for files no node can take
    #[arg(long, default_value = DEFAULT_UNASSIGNED_SENTINEL, value_parser = parse_sentinel)]
    sentinel: String,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Print per-node totals (`<node> <remaining> <assigned> <files>`) to stderr
    #[arg(long)]
    summary: bool,

    /// Log line encoding on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => OutputFormat::Table,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// The sentinel is a table column, so it must be a single non-empty token
fn parse_sentinel(s: &str) -> Result<String, String> {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return Err(format!("'{}' must be a single word without whitespace", s));
    }
    Ok(s.to_string())
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_format);

    run(cli)
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Load both sources, plan, and write the result
fn run(cli: Cli) -> miette::Result<()> {
    let workloads = load_workloads(&cli.files)?;
    let nodes = load_nodes(&cli.nodes)?;

    info!(
        "Loaded {} files from {} and {} nodes from {}",
        workloads.len(),
        cli.files.display(),
        nodes.len(),
        cli.nodes.display()
    );

    let planner = Planner::new(PlannerConfig {
        unassigned_sentinel: cli.sentinel,
    });
    let plan = planner.plan(nodes, workloads)?;

    write_plan(&plan, cli.format.into(), cli.output.as_deref())?;

    if cli.summary {
        write_summary(&plan, &mut std::io::stderr().lock())
            .map_err(|e| PlannerError::output("stderr", e))?;
    }

    Ok(())
}
