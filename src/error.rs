//! Error types for table classification, extraction and export.
//!
//! None of these are fatal to a batch: the orchestrator records them per
//! candidate and moves on to the next table.

use thiserror::Error;

use crate::adapter::TableVariant;

/// Errors raised while turning a DOM node into a downloaded CSV file.
#[derive(Debug, Error)]
pub enum TableError {
    /// The node does not match any known table shape.
    #[error("unsupported table variant: <{tag}> matches no known table shape")]
    UnsupportedVariant { tag: String },

    /// Expected rows or cells are missing (e.g. no header row).
    #[error("malformed {variant} table: {detail}")]
    MalformedStructure {
        variant: TableVariant,
        detail: String,
    },

    /// Traversal of a single table failed unexpectedly.
    #[error("extraction failed: {0}")]
    ExtractionFailure(String),

    /// No trigger element exists at the requested position.
    #[error("no download trigger at index {0}")]
    TriggerNotFound(usize),

    /// The download collaborator could not save the file.
    #[error("failed to save {file_name}: {source}")]
    Download {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TableError>;
