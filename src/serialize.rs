//! CSV assembly from sanitized table text.
//!
//! Fields are already sanitized by extraction, so serialization is a plain
//! join: `,` between fields, `\n` between lines, header first, and no
//! trailing line terminator.

use std::fmt;

use crate::adapter::ExtractedTable;

/// Serialized CSV text for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvDocument(String);

impl CsvDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for CsvDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for CsvDocument {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Render `table` as CSV text.
///
/// An empty table produces an empty document; a table with data rows but no
/// header produces an empty first line.
pub fn serialize(table: &ExtractedTable) -> CsvDocument {
    let mut out = String::new();

    for (i, line) in table.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&line.join(","));
    }

    CsvDocument(out)
}
