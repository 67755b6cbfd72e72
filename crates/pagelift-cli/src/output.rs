use std::path::Path;

use anyhow::Result;

use pagelift_core::RewriteReport;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_report(path: &Path, report: &RewriteReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            eprintln!(
                "Rewrote {}: {} -> {}",
                path.display(),
                report.detected,
                report.target
            );
            if !report.archived.is_empty() {
                eprintln!("  Archived: {}", report.archived.join(", "));
            }
            if !report.added.is_empty() {
                eprintln!("  Added: {}", report.added.join(", "));
            }
            if !report.imports_added.is_empty() {
                eprintln!("  Imports added: {}", report.imports_added.join(", "));
            }
            if !report.changed {
                eprintln!("  Already up to date");
            }
        }
    }
    Ok(())
}
