use std::path::{Path, PathBuf};

use anyhow::Result;

use table2csv::{handle, Action, ExportConfig, Page};

use super::output::{downloader_for, print_json, read_input, write_html};

/// Dispatch a raw action message against a page and print the outcome.
///
/// The (possibly modified) page is written to `html_out` when given.
pub fn cmd_message(
    message: &str,
    input: &str,
    out_dir: Option<PathBuf>,
    html_out: Option<&Path>,
    config: &ExportConfig,
) -> Result<()> {
    let action: Action = message.parse()?;
    let mut page = Page::parse(&read_input(input)?);
    let mut downloader = downloader_for(out_dir, config);

    let outcome = handle(action, &mut page, config, &mut downloader);
    print_json(&outcome)?;

    if html_out.is_some() {
        write_html(&page.to_html(), html_out)?;
    }
    Ok(())
}
