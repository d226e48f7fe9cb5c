//! Notion-style table views.
//!
//! The widget renders rows as `div`s carrying a row attribute (`data-index`)
//! and cells as `div`s carrying a cell class. The header row has its own
//! class and is not guaranteed to be rendered at all. All markers come from
//! [`WidgetMarkers`] so other class-based grids can be targeted by config.

use scraper::ElementRef;

use super::{RowLayout, TableAdapter, TableVariant};
use crate::config::WidgetMarkers;

/// Class- and attribute-driven adapter for the third-party table view.
pub struct WidgetViewAdapter {
    markers: WidgetMarkers,
}

impl WidgetViewAdapter {
    pub fn new(markers: WidgetMarkers) -> Self {
        Self { markers }
    }
}

impl TableAdapter for WidgetViewAdapter {
    fn variant(&self) -> TableVariant {
        TableVariant::WidgetView
    }

    fn layout<'a>(&self, root: ElementRef<'a>) -> RowLayout<'a> {
        let header_row =
            descendant_elements(root).find(|el| has_class(*el, &self.markers.header_row_class));

        let data_rows = descendant_elements(root)
            .filter(|el| el.value().attr(&self.markers.row_attribute).is_some())
            .filter(|el| !has_class(*el, &self.markers.header_row_class))
            .collect();

        RowLayout {
            header_row,
            data_rows,
        }
    }

    fn header_cells<'a>(&self, header_row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        descendant_elements(header_row)
            .filter(|el| has_class(*el, &self.markers.header_cell_class))
            .collect()
    }

    fn data_cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        descendant_elements(row)
            .filter(|el| has_class(*el, &self.markers.cell_class))
            .collect()
    }
}

/// Elements strictly below `root`, in document order.
fn descendant_elements(root: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// `true` if `el`'s class list contains `class` exactly.
pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    !class.is_empty() && el.value().classes().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{ExtractedTable, TableHandle};
    use crate::sanitize::CommaPolicy;
    use scraper::{Html, Selector};

    const VIEW: &str = r#"
        <div class="notion-collection-view-body">
            <div class="notion-table-view">
                <div class="notion-table-view-header-row">
                    <div class="notion-table-view-header-cell"><span>Task</span></div>
                    <div class="notion-table-view-header-cell"><span>Status</span></div>
                </div>
                <div data-index="0" class="row">
                    <div class="notion-table-view-cell">Write docs</div>
                    <div class="notion-table-view-cell">Done</div>
                </div>
                <div data-index="1" class="row">
                    <div class="notion-table-view-cell">Ship, finally</div>
                    <div class="notion-table-view-cell"></div>
                </div>
            </div>
        </div>"#;

    fn extract(source: &str) -> ExtractedTable {
        let html = Html::parse_document(source);
        let root = html
            .select(&Selector::parse(".notion-collection-view-body").unwrap())
            .next()
            .unwrap();
        let handle = TableHandle::classify(root, &WidgetMarkers::default()).unwrap();
        assert_eq!(handle.variant(), TableVariant::WidgetView);
        handle.extract(CommaPolicy::Strip)
    }

    #[test]
    fn extracts_header_and_rows_by_markers() {
        let table = extract(VIEW);
        assert_eq!(table.header, vec!["Task", "Status"]);
        assert_eq!(
            table.rows,
            vec![vec!["Write docs", "Done"], vec!["Ship finally", ""]]
        );
    }

    #[test]
    fn header_row_with_row_attribute_is_not_a_data_row() {
        let source = VIEW.replace(
            r#"class="notion-table-view-header-row""#,
            r#"class="notion-table-view-header-row" data-index="-1""#,
        );
        let table = extract(&source);
        assert_eq!(table.header.len(), 2);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn missing_header_row_gives_empty_header() {
        let table = extract(
            r#"<div class="notion-collection-view-body">
                <div data-index="0"><div class="notion-table-view-cell">only</div></div>
            </div>"#,
        );
        assert!(table.header.is_empty());
        assert_eq!(table.rows, vec![vec!["only"]]);
    }

    #[test]
    fn empty_view_is_empty_table() {
        assert!(extract(r#"<div class="notion-collection-view-body"></div>"#).is_empty());
    }

    #[test]
    fn custom_markers_target_other_grids() {
        let markers = WidgetMarkers {
            collection_class: "grid".into(),
            header_row_class: "grid-head".into(),
            header_cell_class: "grid-th".into(),
            row_attribute: "data-row".into(),
            cell_class: "grid-td".into(),
        };
        let html = Html::parse_document(
            r#"<div class="grid">
                <div class="grid-head"><b class="grid-th">k</b></div>
                <div data-row><i class="grid-td">v</i></div>
            </div>"#,
        );
        let root = html.select(&Selector::parse(".grid").unwrap()).next().unwrap();
        let table = TableHandle::classify(root, &markers)
            .unwrap()
            .extract(CommaPolicy::Strip);
        assert_eq!(table.header, vec!["k"]);
        assert_eq!(table.rows, vec![vec!["v"]]);
    }

    #[test]
    fn has_class_matches_whole_tokens_only() {
        let html = Html::parse_fragment(r#"<div class="notion-table-view-cell-extra"></div>"#);
        let el = html.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert!(!has_class(el, "notion-table-view-cell"));
        assert!(has_class(el, "notion-table-view-cell-extra"));
        assert!(!has_class(el, ""));
    }
}
