use serde::Serialize;

use crate::config::PAGE_SIZE_OPTIONS;
use crate::state::table::{compute_page_bounds, TablePage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub page: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub buttons: Vec<PageButton>,
    pub summary: String,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

/// One button per page.
pub fn render_pagination<R>(page: &TablePage<'_, R>) -> PaginationView {
    let buttons = (1..=page.page_count)
        .map(|number| PageButton {
            page: number,
            active: number == page.current_page,
        })
        .collect();
    let (first, last, total) = compute_page_bounds(page.current_page, page.page_size, page.total);
    let summary = if first == 0 {
        format!("0 of {}", total)
    } else {
        format!("{}-{} of {}", first, last, total)
    };
    let mut page_size_options = PAGE_SIZE_OPTIONS.to_vec();
    if !page_size_options.contains(&page.page_size) {
        page_size_options.push(page.page_size);
        page_size_options.sort_unstable();
    }
    PaginationView {
        buttons,
        summary,
        page_size: page.page_size,
        page_size_options,
    }
}
