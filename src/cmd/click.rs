use std::path::PathBuf;

use anyhow::{Context, Result};

use table2csv::{click_trigger, ExportConfig, Page};

use super::output::{downloader_for, print_exported, read_input};

/// Export the table owning download button `trigger`.
pub fn cmd_click(
    input: &str,
    trigger: usize,
    suffix: &str,
    out_dir: Option<PathBuf>,
    config: &ExportConfig,
) -> Result<()> {
    let page = Page::parse(&read_input(input)?);

    if page.trigger_count() == 0 {
        anyhow::bail!("No download buttons in {input}. Run 'table2csv add-buttons' first.");
    }

    let mut downloader = downloader_for(out_dir, config);
    let exported = click_trigger(&page, trigger, suffix, config, &mut downloader)
        .with_context(|| format!("failed to export table for button {trigger}"))?;

    print_exported(&exported);
    Ok(())
}
