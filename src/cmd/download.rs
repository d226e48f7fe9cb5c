use std::path::PathBuf;

use anyhow::Result;

use table2csv::{download_all, ExportConfig, Page};

use super::output::{downloader_for, print_report, read_input};

pub fn cmd_download(
    input: &str,
    out_dir: Option<PathBuf>,
    json: bool,
    config: &ExportConfig,
) -> Result<()> {
    let page = Page::parse(&read_input(input)?);
    let mut downloader = downloader_for(out_dir, config);

    let report = download_all(&page, config, &mut downloader);
    print_report(&report, json)
}
