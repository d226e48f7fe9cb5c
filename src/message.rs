//! Inbound action messages.
//!
//! A message is a JSON object with a single `action` tag, e.g.
//! `{"action": "downloadTable"}`. Each action maps to exactly one handler
//! that runs synchronously to completion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::batch::{download_all, BatchReport};
use crate::config::ExportConfig;
use crate::download::Downloader;
use crate::page::Page;

/// Action identifiers accepted from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    /// Export every table on the page.
    DownloadTable,
    /// Insert a download trigger into every table.
    AddDownloadButtons,
    /// Remove previously inserted triggers.
    RemoveDownloadButtons,
    /// Revert page styling; accepted but has nothing to do here.
    RemoveBootstrapChanges,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::DownloadTable,
        Action::AddDownloadButtons,
        Action::RemoveDownloadButtons,
        Action::RemoveBootstrapChanges,
    ];

    /// The wire identifier, e.g. `downloadTable`.
    pub fn id(self) -> &'static str {
        match self {
            Action::DownloadTable => "downloadTable",
            Action::AddDownloadButtons => "addDownloadButtons",
            Action::RemoveDownloadButtons => "removeDownloadButtons",
            Action::RemoveBootstrapChanges => "removeBootstrapChanges",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    /// Parse either a JSON message or a bare action identifier.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if s.starts_with('{') {
            return serde_json::from_str(s)
                .map_err(|e| anyhow::anyhow!("invalid action message: {e}"));
        }

        Action::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown action: {s}"))
    }
}

/// What handling a message did.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    Downloaded(BatchReport),
    ButtonsAdded { count: usize },
    ButtonsRemoved { count: usize },
    Ignored,
}

/// Dispatch `action` against `page`.
pub fn handle(
    action: Action,
    page: &mut Page,
    config: &ExportConfig,
    downloader: &mut dyn Downloader,
) -> Outcome {
    tracing::debug!("Handling action {action}");

    match action {
        Action::DownloadTable => Outcome::Downloaded(download_all(page, config, downloader)),
        Action::AddDownloadButtons => Outcome::ButtonsAdded {
            count: page.add_triggers(&config.trigger, &config.widget),
        },
        Action::RemoveDownloadButtons => Outcome::ButtonsRemoved {
            count: page.remove_triggers(),
        },
        Action::RemoveBootstrapChanges => {
            tracing::debug!("No page styling to revert");
            Outcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::MemoryDownloader;

    const PAGE: &str = r#"<table><tr><th>H</th></tr><tr><td>1</td></tr></table>
        <div role="table"><div role="row"><div role="columnheader">G</div></div></div>"#;

    #[test]
    fn parses_json_messages() {
        let action: Action = serde_json::from_str(r#"{"action": "downloadTable"}"#).unwrap();
        assert_eq!(action, Action::DownloadTable);
        let action: Action = r#"{"action":"removeDownloadButtons"}"#.parse().unwrap();
        assert_eq!(action, Action::RemoveDownloadButtons);
    }

    #[test]
    fn parses_bare_identifiers() {
        for action in Action::ALL {
            assert_eq!(action.id().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn rejects_unknown_actions() {
        assert!("explode".parse::<Action>().is_err());
        assert!(r#"{"action": "explode"}"#.parse::<Action>().is_err());
        assert!(r#"{"nope": "downloadTable"}"#.parse::<Action>().is_err());
    }

    #[test]
    fn serializes_back_to_wire_format() {
        let json = serde_json::to_string(&Action::AddDownloadButtons).unwrap();
        assert_eq!(json, r#"{"action":"addDownloadButtons"}"#);
    }

    #[test]
    fn add_then_remove_buttons_round_trip() {
        let mut page = Page::parse(PAGE);
        let config = ExportConfig::default();
        let mut downloader = MemoryDownloader::new();

        let added = handle(Action::AddDownloadButtons, &mut page, &config, &mut downloader);
        assert!(matches!(added, Outcome::ButtonsAdded { count: 2 }));

        let removed = handle(Action::RemoveDownloadButtons, &mut page, &config, &mut downloader);
        assert!(matches!(removed, Outcome::ButtonsRemoved { count: 2 }));
        assert_eq!(page.trigger_count(), 0);
        assert!(downloader.downloads.is_empty());
    }

    #[test]
    fn download_table_exports_every_table() {
        let mut page = Page::parse(PAGE);
        let mut downloader = MemoryDownloader::new();
        let outcome = handle(
            Action::DownloadTable,
            &mut page,
            &ExportConfig::default(),
            &mut downloader,
        );
        let Outcome::Downloaded(report) = outcome else {
            panic!("expected a download outcome");
        };
        assert_eq!(report.exported.len(), 2);
        assert_eq!(downloader.file_names(), vec!["table0.csv", "table1.csv"]);
    }

    #[test]
    fn bootstrap_changes_are_ignored() {
        let mut page = Page::parse(PAGE);
        let before = page.to_html();
        let mut downloader = MemoryDownloader::new();
        let outcome = handle(
            Action::RemoveBootstrapChanges,
            &mut page,
            &ExportConfig::default(),
            &mut downloader,
        );
        assert!(matches!(outcome, Outcome::Ignored));
        assert_eq!(page.to_html(), before);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_string(&Outcome::ButtonsAdded { count: 3 }).unwrap();
        assert_eq!(json, r#"{"outcome":"buttonsAdded","count":3}"#);
    }
}
