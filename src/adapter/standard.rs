//! Plain `<table>` markup.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::{RowLayout, TableAdapter, TableVariant};

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("valid selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));

/// Rows by `tr`, header cells by `th` in the first row, data cells by `td`.
pub struct StandardAdapter;

impl TableAdapter for StandardAdapter {
    fn variant(&self) -> TableVariant {
        TableVariant::Standard
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::TableHandle;
    use crate::config::WidgetMarkers;
    use crate::sanitize::CommaPolicy;
    use crate::serialize::serialize;
    use scraper::Html;

    fn extract(source: &str) -> crate::adapter::ExtractedTable {
        let html = Html::parse_document(source);
        let table = html.select(&Selector::parse("table").unwrap()).next().unwrap();
        TableHandle::classify(table, &WidgetMarkers::default())
            .unwrap()
            .extract(CommaPolicy::Strip)
    }

    #[test]
    fn extracts_header_and_rows() {
        let table = extract(
            "<table>
                <thead><tr><th>Name</th><th>Age</th></tr></thead>
                <tbody>
                    <tr><td>Alice</td><td>30</td></tr>
                    <tr><td>Bob</td><td>25</td></tr>
                </tbody>
            </table>",
        );
        assert_eq!(table.header, vec!["Name", "Age"]);
        assert_eq!(table.rows, vec![vec!["Alice", "30"], vec!["Bob", "25"]]);
    }

    #[test]
    fn well_formed_table_serializes_to_r_plus_one_lines() {
        let table = extract(
            "<table>
                <tr><th>A</th><th>B</th><th>C</th></tr>
                <tr><td>1</td><td>2</td><td>3</td></tr>
                <tr><td>4</td><td>5</td><td>6</td></tr>
                <tr><td>7</td><td>8</td><td>9</td></tr>
            </table>",
        );
        let csv = serialize(&table);
        let lines: Vec<&str> = csv.as_str().split('\n').collect();
        assert_eq!(lines.len(), 4);
        for line in lines {
            assert_eq!(line.split(',').count(), 3);
        }
    }

    #[test]
    fn ragged_rows_keep_only_present_cells() {
        let table = extract(
            "<table>
                <tr><th>A</th><th>B</th><th>C</th></tr>
                <tr><td>1</td></tr>
                <tr><td>1</td><td>2</td><td>3</td><td>4</td></tr>
            </table>",
        );
        assert_eq!(table.rows[0], vec!["1"]);
        assert_eq!(table.rows[1].len(), 4);
        assert_eq!(serialize(&table).as_str(), "A,B,C\n1\n1,2,3,4");
    }

    #[test]
    fn table_without_th_has_empty_header() {
        let table = extract("<table><tr><td>x</td></tr><tr><td>y</td></tr></table>");
        assert!(table.header.is_empty());
        assert_eq!(table.rows, vec![vec!["y"]]);
    }

    #[test]
    fn table_without_rows_is_empty() {
        let table = extract("<table></table>");
        assert!(table.is_empty());
        assert_eq!(serialize(&table).as_str(), "");
    }

    #[test]
    fn cells_are_sanitized() {
        let table = extract(
            "<table><tr><th>Quote</th></tr><tr><td>He said \"hi\", it's<br>fine</td></tr></table>",
        );
        assert_eq!(table.rows[0][0], "He said \"\"hi\"\" it\\'s  fine");
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = Html::parse_document(
            "<table><tr><th>K</th></tr><tr><td>v1</td></tr><tr><td>v2</td></tr></table>",
        );
        let root = html.select(&Selector::parse("table").unwrap()).next().unwrap();
        let handle = TableHandle::classify(root, &WidgetMarkers::default()).unwrap();
        assert_eq!(handle.extract(CommaPolicy::Strip), handle.extract(CommaPolicy::Strip));
    }
}
