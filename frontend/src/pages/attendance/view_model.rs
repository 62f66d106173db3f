use crate::components::table::{render_table, Cell, TableView};
use crate::state::columns::ATTENDANCE_COLUMNS;
use crate::state::hours::AugmentedAttendanceRecord;
use crate::state::table::{SortSpec, TablePage};

pub fn map_link(latitude: f64, longitude: f64) -> String {
    format!("https://maps.google.com/?q={},{}", latitude, longitude)
}

fn attendance_cells(row: &AugmentedAttendanceRecord) -> Vec<Cell> {
    let record = &row.record;
    let photo = record
        .photo()
        .map(|src| Cell::Image {
            src: src.to_string(),
        })
        .unwrap_or_else(|| Cell::text(""));
    let map = record
        .coordinates()
        .map(|(lat, lng)| Cell::Link {
            href: map_link(lat, lng),
            label: "View".to_string(),
        })
        .unwrap_or_else(|| Cell::text(""));
    vec![
        Cell::text(record.employee_id.as_str()),
        Cell::text(record.employee_name.as_str()),
        Cell::text(record.checkin_date.as_str()),
        Cell::text(record.checkin_time.as_str()),
        Cell::text(record.check_type.label()),
        Cell::text(record.project_id.as_str()),
        Cell::text(record.tasks.join(", ")),
        photo,
        Cell::text(record.address.as_str()),
        map,
        Cell::text(record.checkin_note.as_str()),
        Cell::text(row.daily_hours.as_str()),
        Cell::text(row.monthly_hours.as_str()),
    ]
}

pub fn render_attendance_page(
    page: &TablePage<'_, AugmentedAttendanceRecord>,
    sort: &SortSpec,
) -> TableView {
    render_table(&ATTENDANCE_COLUMNS, page, sort, attendance_cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AttendanceRecord, CheckType};
    use crate::state::hours::aggregate_hours;

    #[test]
    fn row_cells_follow_column_order() {
        let rows = aggregate_hours(vec![AttendanceRecord {
            employee_id: "E1".into(),
            employee_name: "Nguyen Van A".into(),
            checkin_date: "2025-03-05".into(),
            check_type: CheckType::Checkout,
            tasks: vec!["Survey".into(), "Report".into()],
            face_image: Some("https://cdn.example.com/face.jpg".into()),
            photo_url: Some("https://cdn.example.com/photo.jpg".into()),
            latitude: Some(10.77),
            longitude: Some(106.7),
            ..Default::default()
        }]);
        let page = TablePage {
            rows: rows.iter().collect(),
            total: 1,
            current_page: 1,
            page_size: 10,
            page_count: 1,
        };
        let view = render_attendance_page(&page, &SortSpec::default());

        assert_eq!(view.headers.len(), view.rows[0].len());
        let cells = &view.rows[0];
        assert_eq!(cells[4], Cell::text("Check Out"));
        assert_eq!(cells[6], Cell::text("Survey, Report"));
        assert_eq!(
            cells[7],
            Cell::Image {
                src: "https://cdn.example.com/face.jpg".into()
            }
        );
        assert_eq!(
            cells[9],
            Cell::Link {
                href: "https://maps.google.com/?q=10.77,106.7".into(),
                label: "View".into()
            }
        );
        assert_eq!(cells[11], Cell::text("0h 0m"));
        assert_eq!(cells[12], Cell::text("0h 0m"));
    }

    #[test]
    fn missing_photo_and_coordinates_render_empty() {
        let rows = aggregate_hours(vec![AttendanceRecord {
            latitude: Some(10.0),
            ..Default::default()
        }]);
        let page = TablePage {
            rows: rows.iter().collect(),
            total: 1,
            current_page: 1,
            page_size: 10,
            page_count: 1,
        };
        let view = render_attendance_page(&page, &SortSpec::default());
        assert_eq!(view.rows[0][7], Cell::text(""));
        assert_eq!(view.rows[0][9], Cell::text(""));
        assert_eq!(view.rows[0][12], Cell::text("N/A"));
    }
}
