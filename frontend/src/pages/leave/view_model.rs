use crate::api::LeaveRecord;
use crate::components::table::{render_table, Cell, TableView};
use crate::state::columns::LEAVE_COLUMNS;
use crate::state::table::{SortSpec, TablePage};

fn leave_cells(record: &LeaveRecord) -> Vec<Cell> {
    vec![
        Cell::text(record.employee_id.as_str()),
        Cell::text(record.employee_name.as_str()),
        Cell::text(record.checkin_date.as_str()),
        Cell::text(record.checkin_time.as_str()),
        Cell::text(record.tasks.join(", ")),
        Cell::text(record.approval_date1.as_str()),
        Cell::text(record.status1.as_str()),
        Cell::text(record.approval_date2.as_str()),
        Cell::text(record.status2.as_str()),
        Cell::text(record.note.as_str()),
    ]
}

pub fn render_leave_page(page: &TablePage<'_, LeaveRecord>, sort: &SortSpec) -> TableView {
    render_table(&LEAVE_COLUMNS, page, sort, leave_cells)
}
