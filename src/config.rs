//! Export configuration loaded from `~/.config/table2csv/config.toml`.
//!
//! Every field has a default matching the markers the Notion table view and
//! the injected download buttons use, so a missing file is not an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::sanitize::CommaPolicy;

/// Top-level configuration for an export run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name prefix; files are named `<prefix><suffix>.csv`.
    pub file_prefix: String,
    /// Directory downloads are written to (defaults to the current directory).
    pub output_dir: Option<PathBuf>,
    /// Replace existing files instead of picking `table (1).csv`.
    pub overwrite: bool,
    /// How embedded commas are made harmless.
    pub commas: CommaPolicy,
    pub widget: WidgetMarkers,
    pub trigger: TriggerStyle,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "table".to_string(),
            output_dir: None,
            overwrite: false,
            commas: CommaPolicy::default(),
            widget: WidgetMarkers::default(),
            trigger: TriggerStyle::default(),
        }
    }
}

/// Class and attribute markers identifying the third-party table view.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetMarkers {
    /// Class on the container that holds the whole table view.
    pub collection_class: String,
    pub header_row_class: String,
    pub header_cell_class: String,
    /// Attribute present on every data row.
    pub row_attribute: String,
    pub cell_class: String,
}

impl Default for WidgetMarkers {
    fn default() -> Self {
        Self {
            collection_class: "notion-collection-view-body".to_string(),
            header_row_class: "notion-table-view-header-row".to_string(),
            header_cell_class: "notion-table-view-header-cell".to_string(),
            row_attribute: "data-index".to_string(),
            cell_class: "notion-table-view-cell".to_string(),
        }
    }
}

/// Classes applied to injected download triggers.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TriggerStyle {
    pub button_class: String,
    pub icon_class: String,
}

impl Default for TriggerStyle {
    fn default() -> Self {
        Self {
            button_class: "download-button".to_string(),
            icon_class: "bi bi-download icon-download".to_string(),
        }
    }
}

impl ExportConfig {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`.
    ///
    /// A missing default file yields [`ExportConfig::default`]. An explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = config_path();
                if !default.exists() {
                    tracing::debug!("No config at {}, using defaults", default.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let config: Self =
            toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Directory downloads land in.
    pub fn download_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Return the path to the config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("table2csv")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config: ExportConfig = toml::from_str("").unwrap();
        assert_eq!(config.file_prefix, "table");
        assert!(config.output_dir.is_none());
        assert!(!config.overwrite);
        assert_eq!(config.commas, CommaPolicy::Strip);
        assert_eq!(config.widget, WidgetMarkers::default());
        assert_eq!(config.trigger.button_class, "download-button");
    }

    #[test]
    fn parse_partial_widget_section() {
        let toml_str = r#"
file_prefix = "export"
commas = "escape"

[widget]
collection_class = "my-grid"
"#;
        let config: ExportConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.file_prefix, "export");
        assert_eq!(config.commas, CommaPolicy::Escape);
        assert_eq!(config.widget.collection_class, "my-grid");
        // Unspecified markers keep their defaults
        assert_eq!(config.widget.row_attribute, "data-index");
        assert_eq!(config.widget.cell_class, "notion-table-view-cell");
    }

    #[test]
    fn parse_trigger_and_output_dir() {
        let toml_str = r#"
output_dir = "/tmp/csv"
overwrite = true

[trigger]
button_class = "grab"
icon_class = "icon"
"#;
        let config: ExportConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/csv"));
        assert!(config.overwrite);
        assert_eq!(config.trigger.button_class, "grab");
        assert_eq!(config.trigger.icon_class, "icon");
    }

    #[test]
    fn rejects_unknown_comma_policy() {
        let result: std::result::Result<ExportConfig, _> = toml::from_str(r#"commas = "quote""#);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = std::env::temp_dir().join("table2csv-definitely-missing.toml");
        assert!(ExportConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn default_download_dir_is_current_directory() {
        assert_eq!(ExportConfig::default().download_dir(), PathBuf::from("."));
    }
}
