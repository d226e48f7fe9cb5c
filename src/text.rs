//! Rendered-text extraction for table cells.
//!
//! Approximates what a browser reports as an element's visible text rather
//! than its raw markup: source formatting whitespace collapses to single
//! spaces, `<br>` and block boundaries become line breaks, and non-rendered
//! elements (scripts, styles, templates, injected download triggers) are
//! skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node};

use crate::page::TRIGGER_ATTR;

/// Runs of whitespace other than non-breaking spaces.
static COLLAPSIBLE_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\x{A0}]+").expect("whitespace pattern is valid"));

const SKIPPED: &[&str] = &["script", "style", "template", "noscript", "head"];

const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Return the rendered text of `element`, one logical line per `\n`.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect(element, false, &mut raw);

    raw.split('\n')
        .map(|line| COLLAPSIBLE_WS.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect(element: ElementRef<'_>, preformatted: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if preformatted {
                    out.push_str(text);
                } else {
                    // Source line breaks are layout whitespace, not rendered breaks
                    out.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED.contains(&name) || el.attr(TRIGGER_ATTR).is_some() {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCKS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect(child_ref, preformatted || name == "pre", out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
