use std::path::Path;

use anyhow::Result;

use table2csv::{ExportConfig, Page};

use super::output::{read_input, write_html};

pub fn cmd_add_buttons(input: &str, output: Option<&Path>, config: &ExportConfig) -> Result<()> {
    let mut page = Page::parse(&read_input(input)?);
    let added = page.add_triggers(&config.trigger, &config.widget);
    eprintln!("➕ Added {added} download buttons");
    write_html(&page.to_html(), output)
}

pub fn cmd_remove_buttons(input: &str, output: Option<&Path>) -> Result<()> {
    let mut page = Page::parse(&read_input(input)?);
    let removed = page.remove_triggers();
    eprintln!("➖ Removed {removed} download buttons");
    write_html(&page.to_html(), output)
}
