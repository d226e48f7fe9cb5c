//! `table2csv` - Export HTML tables as CSV
//!
//! # Features
//!
//! - **Three table shapes**: `<table>` markup, ARIA `role="table"` grids and
//!   Notion-style table views, each behind its own [`TableAdapter`]
//! - **Flat CSV**: cell text is sanitized instead of quoted, so every row is
//!   exactly one line
//! - **Download triggers**: insert and remove per-table export buttons
//! - **Best effort**: one broken table never stops the rest of a batch
//!
//! # Example
//!
//! ```rust
//! use table2csv::{download_all, ExportConfig, MemoryDownloader, Page};
//!
//! let page = Page::parse(
//!     "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Alice</td><td>30</td></tr></table>",
//! );
//! let mut downloader = MemoryDownloader::new();
//! let report = download_all(&page, &ExportConfig::default(), &mut downloader);
//!
//! assert_eq!(report.exported.len(), 1);
//! assert_eq!(
//!     downloader.get("table0.csv").unwrap().document.as_str(),
//!     "Name,Age\nAlice,30"
//! );
//! ```

pub mod adapter;
pub mod batch;
pub mod config;
pub mod download;
pub mod error;
pub mod message;
pub mod page;
pub mod sanitize;
pub mod serialize;
pub mod text;

pub use adapter::{classify, ExtractedTable, TableAdapter, TableHandle, TableVariant};
pub use batch::{click_trigger, download_all, export_table, BatchReport, ExportedTable, SkippedTable};
pub use config::{ExportConfig, TriggerStyle, WidgetMarkers};
pub use download::{trigger_download, DirectoryDownloader, Download, Downloader, MemoryDownloader};
pub use error::TableError;
pub use message::{handle, Action, Outcome};
pub use page::Page;
pub use sanitize::{sanitize, CommaPolicy};
pub use serialize::{serialize, CsvDocument};

/// Version of table2csv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
