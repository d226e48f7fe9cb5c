use anyhow::Result;
use serde::Serialize;

use table2csv::{ExportConfig, Page, TableHandle, TableVariant};

use super::output::{print_json, read_input};

/// One table candidate as shown by `table2csv list`.
#[derive(Debug, Serialize)]
struct ListedTable {
    index: usize,
    variant: TableVariant,
    tag: String,
    id: Option<String>,
    rows: usize,
    columns: usize,
    header: Vec<String>,
}

pub fn cmd_list(input: &str, json: bool, config: &ExportConfig) -> Result<()> {
    let page = Page::parse(&read_input(input)?);

    let mut listed = Vec::new();
    for (index, node) in page.candidates(&config.widget).into_iter().enumerate() {
        let extracted = TableHandle::classify(node, &config.widget)
            .and_then(|handle| Ok((handle.variant(), handle.try_extract(config.commas)?)));
        let (variant, table) = match extracted {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Skipping candidate {index}: {e}");
                continue;
            }
        };
        listed.push(ListedTable {
            index,
            variant,
            tag: node.value().name().to_string(),
            id: node.value().id().map(ToString::to_string),
            rows: table.row_count(),
            columns: table.column_count(),
            header: table.header,
        });
    }

    if json {
        return print_json(&listed);
    }

    if listed.is_empty() {
        println!("No tables found");
        return Ok(());
    }

    for table in &listed {
        let label = match &table.id {
            Some(id) => format!("<{}#{id}>", table.tag),
            None => format!("<{}>", table.tag),
        };
        println!(
            "{:>3}  {:<12} {:<24} {} rows × {} columns",
            table.index,
            table.variant.to_string(),
            label,
            table.rows,
            table.columns
        );
        if !table.header.is_empty() {
            println!("     header: {}", table.header.join(", "));
        }
    }
    println!("\n({} tables)", listed.len());

    Ok(())
}
