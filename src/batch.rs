//! Export pipelines: classify → extract → serialize → download.
//!
//! Every table is exported independently. A failure is recorded against
//! that table and the batch moves on; nothing here aborts a whole run.

use std::path::PathBuf;

use serde::Serialize;

use crate::adapter::{TableHandle, TableVariant};
use crate::config::ExportConfig;
use crate::download::{trigger_download, Downloader};
use crate::error::Result;
use crate::page::Page;
use crate::serialize::serialize;

/// One table that made it to disk (or wherever the downloader put it).
#[derive(Debug, Clone, Serialize)]
pub struct ExportedTable {
    /// Position in the batch, `None` for single-table exports.
    pub index: Option<usize>,
    pub file_name: String,
    pub path: PathBuf,
    pub variant: TableVariant,
    pub rows: usize,
    pub columns: usize,
}

/// A candidate that was skipped, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTable {
    pub index: usize,
    pub reason: String,
}

/// Outcome of [`download_all`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub exported: Vec<ExportedTable>,
    pub skipped: Vec<SkippedTable>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.exported.is_empty() && self.skipped.is_empty()
    }
}

/// Export every table on `page`, suffixing each file with its position.
pub fn download_all(
    page: &Page,
    config: &ExportConfig,
    downloader: &mut dyn Downloader,
) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, node) in page.candidates(&config.widget).into_iter().enumerate() {
        let outcome = TableHandle::classify(node, &config.widget)
            .and_then(|handle| export_table(&handle, &index.to_string(), config, downloader));

        match outcome {
            Ok(mut exported) => {
                exported.index = Some(index);
                report.exported.push(exported);
            }
            Err(e) => {
                tracing::warn!("Skipping table {index}: {e}");
                report.skipped.push(SkippedTable {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Exported {} tables, skipped {}",
        report.exported.len(),
        report.skipped.len()
    );
    report
}

/// Export the table owning trigger `trigger`.
pub fn click_trigger(
    page: &Page,
    trigger: usize,
    suffix: &str,
    config: &ExportConfig,
    downloader: &mut dyn Downloader,
) -> Result<ExportedTable> {
    let handle = page.trigger_table(trigger, &config.widget)?;
    export_table(&handle, suffix, config, downloader)
}

/// Run the single-table pipeline for an already classified table.
pub fn export_table(
    handle: &TableHandle<'_>,
    suffix: &str,
    config: &ExportConfig,
    downloader: &mut dyn Downloader,
) -> Result<ExportedTable> {
    let table = handle.try_extract(config.commas)?;
    let document = serialize(&table);
    let path = trigger_download(document, &config.file_prefix, suffix, downloader)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(
        "Exported {} table as {} ({} rows)",
        handle.variant(),
        file_name,
        table.row_count()
    );

    Ok(ExportedTable {
        index: None,
        file_name,
        path,
        variant: handle.variant(),
        rows: table.row_count(),
        columns: table.column_count(),
    })
}
