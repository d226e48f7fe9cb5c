//! Tables built from `div`s with ARIA roles.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::{RowLayout, TableAdapter, TableVariant};

static ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[role="row"]"#).expect("valid selector"));
static HEADER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[role="columnheader"]"#).expect("valid selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[role="cell"], [role="gridcell"], [role="rowheader"]"#)
        .expect("valid selector")
});

/// Rows by `role="row"`, header cells by `role="columnheader"` in the first
/// row, data cells by `role="cell"` (also `gridcell` and `rowheader`).
pub struct AriaGridAdapter;

impl TableAdapter for AriaGridAdapter {
    fn variant(&self) -> TableVariant {
        TableVariant::AriaGrid
    }

    fn layout<'a>(&self, root: ElementRef<'a>) -> RowLayout<'a> {
        RowLayout::first_row_as_header(root.select(&ROW))
    }

    fn header_cells<'a>(&self, header_row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        header_row.select(&HEADER_CELL).collect()
    }

    fn data_cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        row.select(&DATA_CELL).collect()
    }
}
