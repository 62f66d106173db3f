use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::api::ApiError;

/// Comparable value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    /// Text keys compare case-insensitively.
    pub fn text(value: impl AsRef<str>) -> Self {
        SortKey::Text(value.as_ref().to_lowercase())
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            // Mixed kinds sort numbers first.
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// A record that can be shown in a sortable table.
pub trait TableRow {
    /// Key used when sorting by `column`. Unknown columns should return an
    /// empty text key so that the input order is kept.
    fn sort_key(&self, column: &str) -> SortKey;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.column.is_empty() && self.order != SortOrder::None
    }

    /// Header click: a new column starts ascending, the same column cycles
    /// ascending, descending, unsorted.
    pub fn toggle(&mut self, column: &str) {
        if self.column != column {
            self.column = column.to_string();
            self.order = SortOrder::Ascending;
            return;
        }
        self.order = match self.order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
            SortOrder::None => SortOrder::Ascending,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
}

/// One rendered slice of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<'a, R> {
    pub rows: Vec<&'a R>,
    pub total: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub page_count: usize,
}

pub fn compute_page_count(page_size: usize, total: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// 1-based first row, last row and total for a "showing x-y of z" summary.
pub fn compute_page_bounds(page: usize, page_size: usize, total: usize) -> (usize, usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if total == 0 || start >= total {
        (0, 0, total)
    } else {
        (start + 1, start.saturating_add(page_size).min(total), total)
    }
}

/// Sort and page state for one table. Filtering happens server-side, so the
/// controller only ever sees the rows of the latest load.
#[derive(Debug, Clone)]
pub struct TableController<R> {
    rows: Vec<R>,
    sort: SortSpec,
    page: PageState,
}

impl<R: TableRow> TableController<R> {
    pub fn new(sort: SortSpec, page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            sort,
            page: PageState {
                current_page: 1,
                page_size: page_size.max(1),
            },
        }
    }

    pub fn set_dataset(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.page.current_page = 1;
    }

    pub fn set_sort(&mut self, column: &str) {
        self.sort.toggle(column);
        tracing::debug!(column, order = ?self.sort.order, "table sort changed");
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ApiError> {
        if page_size == 0 {
            return Err(ApiError::validation("Page size must be a positive number."));
        }
        self.page.page_size = page_size;
        self.page.current_page = 1;
        Ok(())
    }

    /// Pages past the end are allowed and render as an empty slice.
    pub fn goto_page(&mut self, page: usize) {
        self.page.current_page = page.max(1);
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_count(&self) -> usize {
        compute_page_count(self.page.page_size, self.rows.len())
    }

    pub fn clear(&mut self) {
        self.set_dataset(Vec::new());
    }

    /// Rows in display order: sorted when a sort is active, otherwise as loaded.
    pub fn sorted(&self) -> Vec<&R> {
        if !self.sort.is_active() {
            return self.rows.iter().collect();
        }
        let column = self.sort.column.as_str();
        let mut keyed: Vec<(SortKey, &R)> = self
            .rows
            .iter()
            .map(|row| (row.sort_key(column), row))
            .collect();
        // `sort_by` is stable, so ties keep their loaded order in both directions.
        match self.sort.order {
            SortOrder::Ascending => keyed.sort_by(|a, b| a.0.compare(&b.0)),
            SortOrder::Descending => keyed.sort_by(|a, b| b.0.compare(&a.0)),
            SortOrder::None => {}
        }
        keyed.into_iter().map(|(_, row)| row).collect()
    }

    pub fn page(&self) -> TablePage<'_, R> {
        let PageState {
            current_page,
            page_size,
        } = self.page;
        let start = current_page.saturating_sub(1).saturating_mul(page_size);
        let rows = self
            .sorted()
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect();
        TablePage {
            rows,
            total: self.rows.len(),
            current_page,
            page_size,
            page_count: self.page_count(),
        }
    }
}
