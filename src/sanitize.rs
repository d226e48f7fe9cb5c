//! Cell text sanitization applied before CSV assembly.
//!
//! Fields are never quoted. Instead every hazard is rewritten in place:
//!
//! | Input | Output |
//! |-------|--------|
//! | `"` | `""` |
//! | `,` | removed ([`CommaPolicy::Strip`]) or `\,` ([`CommaPolicy::Escape`]) |
//! | `'` | `\'` |
//! | `\n`, `\r\n`, `\r` | two spaces |
//!
//! Stripping commas loses information and cannot be undone.

use serde::Deserialize;

/// What to do with commas embedded in a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommaPolicy {
    /// Drop the comma entirely.
    #[default]
    Strip,
    /// Prefix the comma with a backslash.
    Escape,
}

/// Replacement for a line break inside a cell.
pub const NEWLINE_PLACEHOLDER: &str = "  ";

/// Sanitize one cell's text so it occupies exactly one CSV field on one line.
pub fn sanitize(text: &str, commas: CommaPolicy) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\"\""),
            ',' => {
                if commas == CommaPolicy::Escape {
                    out.push_str("\\,");
                }
            }
            '\'' => out.push_str("\\'"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(NEWLINE_PLACEHOLDER);
            }
            '\n' => out.push_str(NEWLINE_PLACEHOLDER),
            other => out.push(other),
        }
    }

    out
}
