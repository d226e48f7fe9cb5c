//! Variant-aware table traversal.
//!
//! A table-like region can be written three ways in a page. Each way gets
//! its own [`TableAdapter`] that knows how to find the header row, the data
//! rows and the cells of a row; everything downstream (text extraction,
//! sanitization, CSV assembly) is shared.
//!
//! | Variant | Adapter | Rows | Header cells | Data cells |
//! |---------|---------|------|--------------|------------|
//! | [`TableVariant::Standard`] | [`StandardAdapter`] | `tr` | `th` | `td` |
//! | [`TableVariant::AriaGrid`] | [`AriaGridAdapter`] | `[role=row]` | `[role=columnheader]` | `[role=cell]` |
//! | [`TableVariant::WidgetView`] | [`WidgetViewAdapter`] | row attribute | header-cell class | cell class |
//!
//! # Example
//!
//! ```rust
//! use scraper::{Html, Selector};
//! use table2csv::adapter::{TableHandle, TableVariant};
//! use table2csv::config::WidgetMarkers;
//! use table2csv::sanitize::CommaPolicy;
//!
//! let html = Html::parse_document(
//!     "<table><tr><th>Name</th></tr><tr><td>Alice</td></tr></table>",
//! );
//! let table = html.select(&Selector::parse("table").unwrap()).next().unwrap();
//! let handle = TableHandle::classify(table, &WidgetMarkers::default()).unwrap();
//! assert_eq!(handle.variant(), TableVariant::Standard);
//!
//! let extracted = handle.extract(CommaPolicy::Strip);
//! assert_eq!(extracted.header, vec!["Name"]);
//! assert_eq!(extracted.rows, vec![vec!["Alice"]]);
//! ```

pub mod aria;
pub mod standard;
pub mod widget;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use scraper::ElementRef;
use serde::Serialize;

use crate::config::WidgetMarkers;
use crate::error::{Result, TableError};
use crate::sanitize::{sanitize, CommaPolicy};
use crate::text::rendered_text;

pub use aria::AriaGridAdapter;
pub use standard::StandardAdapter;
pub use widget::WidgetViewAdapter;

/// How a table-like region is structured in the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableVariant {
    /// `<table>` with `tr`/`th`/`td`.
    Standard,
    /// Elements carrying ARIA `role` attributes.
    AriaGrid,
    /// The Notion table view, marked up with classes and row attributes.
    WidgetView,
}

impl fmt::Display for TableVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "standard",
            Self::AriaGrid => "aria-grid",
            Self::WidgetView => "widget-view",
        })
    }
}

/// Header row and data rows located under a table root.
#[derive(Debug, Default)]
pub struct RowLayout<'a> {
    pub header_row: Option<ElementRef<'a>>,
    pub data_rows: Vec<ElementRef<'a>>,
}

impl<'a> RowLayout<'a> {
    /// Treat the first row as the header and the rest as data.
    pub fn first_row_as_header(rows: impl IntoIterator<Item = ElementRef<'a>>) -> Self {
        let mut rows = rows.into_iter();
        Self {
            header_row: rows.next(),
            data_rows: rows.collect(),
        }
    }
}

/// DOM query strategy for one [`TableVariant`].
pub trait TableAdapter {
    fn variant(&self) -> TableVariant;

    /// Locate the header row and data rows below `root`.
    fn layout<'a>(&self, root: ElementRef<'a>) -> RowLayout<'a>;

    fn header_cells<'a>(&self, header_row: ElementRef<'a>) -> Vec<ElementRef<'a>>;

    fn data_cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>>;
}

/// Decide which variant `node` is.
///
/// Checked in order: `<table>` tag, ARIA `role="table"`/`role="grid"`, then
/// membership in (or being) the widget's collection container.
pub fn classify(node: ElementRef<'_>, markers: &WidgetMarkers) -> Result<TableVariant> {
    let element = node.value();

    if element.name().eq_ignore_ascii_case("table") {
        return Ok(TableVariant::Standard);
    }

    if matches!(element.attr("role"), Some("table" | "grid")) {
        return Ok(TableVariant::AriaGrid);
    }

    let in_collection = std::iter::once(node)
        .chain(node.ancestors().filter_map(ElementRef::wrap))
        .any(|el| widget::has_class(el, &markers.collection_class));
    if in_collection {
        return Ok(TableVariant::WidgetView);
    }

    Err(TableError::UnsupportedVariant {
        tag: element.name().to_string(),
    })
}

/// Build the adapter for `variant`.
pub fn adapter_for(variant: TableVariant, markers: &WidgetMarkers) -> Box<dyn TableAdapter> {
    match variant {
        TableVariant::Standard => Box::new(StandardAdapter),
        TableVariant::AriaGrid => Box::new(AriaGridAdapter),
        TableVariant::WidgetView => Box::new(WidgetViewAdapter::new(markers.clone())),
    }
}

/// A classified table root with the adapter chosen for it.
pub struct TableHandle<'a> {
    root: ElementRef<'a>,
    adapter: Box<dyn TableAdapter>,
}

impl<'a> TableHandle<'a> {
    /// Classify `root` and select its adapter.
    pub fn classify(root: ElementRef<'a>, markers: &WidgetMarkers) -> Result<Self> {
        let variant = classify(root, markers)?;
        Ok(Self::with_variant(root, variant, markers))
    }

    /// Wrap `root` with an explicitly declared variant.
    pub fn with_variant(root: ElementRef<'a>, variant: TableVariant, markers: &WidgetMarkers) -> Self {
        Self::with_adapter(root, adapter_for(variant, markers))
    }

    /// Wrap `root` with a caller-supplied adapter.
    pub fn with_adapter(root: ElementRef<'a>, adapter: Box<dyn TableAdapter>) -> Self {
        Self { root, adapter }
    }

    pub fn variant(&self) -> TableVariant {
        self.adapter.variant()
    }

    pub fn root(&self) -> ElementRef<'a> {
        self.root
    }

    /// Extract sanitized header and row text.
    ///
    /// Never fails: a missing header row yields an empty header, zero rows
    /// yield an empty table, and ragged rows are kept as they are.
    pub fn extract(&self, commas: CommaPolicy) -> ExtractedTable {
        let layout = self.adapter.layout(self.root);
        let cell_text = |cell: ElementRef<'_>| sanitize(&rendered_text(cell), commas);

        let header: Vec<String> = match layout.header_row {
            Some(row) => {
                let cells = self.adapter.header_cells(row);
                if cells.is_empty() {
                    tracing::debug!("{} table has a first row without header cells", self.variant());
                }
                cells.into_iter().map(cell_text).collect()
            }
            None => {
                if !layout.data_rows.is_empty() {
                    let err = TableError::MalformedStructure {
                        variant: self.variant(),
                        detail: "no header row; header left empty".to_string(),
                    };
                    tracing::warn!("{err}");
                }
                Vec::new()
            }
        };

        let rows: Vec<Vec<String>> = layout
            .data_rows
            .into_iter()
            .map(|row| self.adapter.data_cells(row).into_iter().map(cell_text).collect())
            .collect();

        ExtractedTable { header, rows }
    }

    /// [`extract`](Self::extract), turning a panic inside traversal into
    /// [`TableError::ExtractionFailure`] so sibling tables are unaffected.
    pub fn try_extract(&self, commas: CommaPolicy) -> Result<ExtractedTable> {
        panic::catch_unwind(AssertUnwindSafe(|| self.extract(commas))).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic during traversal".to_string());
            TableError::ExtractionFailure(message)
        })
    }
}

/// Sanitized table text: the header followed by data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    /// `true` when there is neither a header nor any data row.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest line, header included.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// All lines in output order, header first.
    pub fn lines(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}
