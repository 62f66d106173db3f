use serde::Serialize;
use std::fmt::Write as _;

use crate::components::pagination::{render_pagination, PaginationView};
use crate::state::columns::Column;
use crate::state::table::{SortOrder, SortSpec, TablePage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    /// Set on the column the table is currently sorted by.
    pub sorted: Option<SortOrder>,
}

impl HeaderCell {
    pub fn caption(&self) -> String {
        match self.sorted {
            Some(SortOrder::Ascending) => format!("{} ▲", self.label),
            Some(SortOrder::Descending) => format!("{} ▼", self.label),
            _ => self.label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cell {
    Text(String),
    Image { src: String },
    Link { href: String, label: String },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn plain_text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Image { src } => src,
            Cell::Link { href, .. } => href,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<Cell>>,
    pub pagination: PaginationView,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn render_headers(columns: &[Column], sort: &SortSpec) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|column| HeaderCell {
            key: column.key,
            label: column.label,
            sortable: column.sortable,
            sorted: (sort.is_active() && sort.column == column.key).then_some(sort.order),
        })
        .collect()
}

/// Builds the view of one page, turning every row into cells with `cells`.
pub fn render_table<R>(
    columns: &[Column],
    page: &TablePage<'_, R>,
    sort: &SortSpec,
    cells: impl Fn(&R) -> Vec<Cell>,
) -> TableView {
    TableView {
        headers: render_headers(columns, sort),
        rows: page.rows.iter().map(|row| cells(*row)).collect(),
        pagination: render_pagination(page),
    }
}

/// Plain-text rendering with aligned columns, used by the command line.
pub fn render_text(view: &TableView) -> String {
    let captions: Vec<String> = view.headers.iter().map(HeaderCell::caption).collect();
    let mut widths: Vec<usize> = captions.iter().map(|c| c.chars().count()).collect();
    for row in &view.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.plain_text().chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
    };
    line(captions.iter().map(String::as_str).collect());
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    line(rule.iter().map(String::as_str).collect());
    for row in &view.rows {
        line(row.iter().map(Cell::plain_text).collect());
    }
    if view.is_empty() {
        out.push_str("No records found\n");
    }
    let _ = writeln!(out, "{}", view.pagination.summary);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [Column; 2] = [
        Column {
            key: "Name",
            label: "Name",
            sortable: true,
        },
        Column {
            key: "Photo",
            label: "Photo",
            sortable: false,
        },
    ];

    #[test]
    fn headers_mark_active_sort_only() {
        let headers = render_headers(&COLUMNS, &SortSpec::new("Name", SortOrder::Descending));
        assert_eq!(headers[0].sorted, Some(SortOrder::Descending));
        assert_eq!(headers[0].caption(), "Name ▼");
        assert_eq!(headers[1].sorted, None);

        let headers = render_headers(&COLUMNS, &SortSpec::new("Name", SortOrder::None));
        assert_eq!(headers[0].sorted, None);
    }

    #[test]
    fn text_rendering_aligns_cells() {
        let rows = ["alice".to_string(), "bo".to_string()];
        let page = TablePage {
            rows: rows.iter().collect(),
            total: 2,
            current_page: 1,
            page_size: 10,
            page_count: 1,
        };
        let view = render_table(&COLUMNS, &page, &SortSpec::default(), |name: &String| {
            vec![Cell::text(name.clone()), Cell::text("")]
        });
        let text = render_text(&view);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name  | Photo");
        assert_eq!(lines[2], "alice |");
        assert_eq!(lines[3], "bo    |");
        assert_eq!(lines[4], "1-2 of 2");
    }

    #[test]
    fn empty_table_says_so() {
        let page: TablePage<'_, String> = TablePage {
            rows: Vec::new(),
            total: 0,
            current_page: 1,
            page_size: 10,
            page_count: 0,
        };
        let view = render_table(&COLUMNS, &page, &SortSpec::default(), |_| Vec::new());
        assert!(render_text(&view).contains("No records found"));
    }
}
