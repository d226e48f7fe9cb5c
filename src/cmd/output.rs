use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use table2csv::{BatchReport, DirectoryDownloader, ExportConfig, ExportedTable};

/// Read the page source from a path, or from stdin when `input` is `-`.
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read HTML from stdin")?;
        return Ok(source);
    }

    let bytes = fs::read(input).with_context(|| format!("failed to read {input}"))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write HTML to `output`, or to stdout when no path is given.
pub fn write_html(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("💾 Saved {} bytes to {}", html.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Downloader writing into `out_dir`, falling back to the configured directory.
pub fn downloader_for(out_dir: Option<PathBuf>, config: &ExportConfig) -> DirectoryDownloader {
    DirectoryDownloader::new(
        out_dir.unwrap_or_else(|| config.download_dir()),
        config.overwrite,
    )
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_exported(exported: &ExportedTable) {
    println!(
        "💾 {}  {}  {} rows × {} columns",
        exported.path.display(),
        exported.variant,
        exported.rows,
        exported.columns
    );
}

pub fn print_report(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }

    if report.is_empty() {
        println!("No tables found");
        return Ok(());
    }

    for exported in &report.exported {
        print_exported(exported);
    }
    for skipped in &report.skipped {
        println!("⚠️  Skipped table {}: {}", skipped.index, skipped.reason);
    }
    println!(
        "\n({} exported, {} skipped)",
        report.exported.len(),
        report.skipped.len()
    );

    Ok(())
}
