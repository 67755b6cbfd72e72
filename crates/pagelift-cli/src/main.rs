use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pagelift_core::{rewrite, ContextAccess, PageShape};

mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "pagelift",
    version,
    about = "Rewrite elm-spa page modules between static, element, and advanced templates"
)]
struct Cli {
    /// Path to the page module to rewrite
    path: PathBuf,

    /// Target page template (static | element | advanced)
    shape: PageShape,

    /// Pass the shared model to the page functions
    #[arg(short, long)]
    shared: bool,

    /// Pass the request object to the page functions
    #[arg(short, long)]
    request: bool,

    /// Print the rewritten module to stdout without writing the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output format for the rewrite report
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.path)
        .with_context(|| format!("Failed to read {}", cli.path.display()))?;

    let access = ContextAccess {
        shared: cli.shared,
        request: cli.request,
    };
    let outcome = rewrite(&text, cli.shape, access)
        .with_context(|| format!("Failed to rewrite {}", cli.path.display()))?;

    if cli.dry_run {
        print!("{}", outcome.text);
        return Ok(());
    }

    write_atomic(&cli.path, &outcome.text)?;
    info!("wrote {}", cli.path.display());
    output::print_report(&cli.path, &outcome.report, cli.format)
}

/// Write the full text to a sibling temp file and rename it into place, so a
/// failed run never leaves a half-rewritten page behind.
fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let name = path.file_name().context("Path has no file name")?;
    let tmp = path.with_file_name(format!("{}.tmp", name.to_string_lossy()));
    fs::write(&tmp, text).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
