use crate::api::LeaveRecord;
use crate::state::hours::AugmentedAttendanceRecord;
use crate::state::table::{SortKey, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

const fn sortable(key: &'static str, label: &'static str) -> Column {
    Column {
        key,
        label,
        sortable: true,
    }
}

const fn fixed(key: &'static str, label: &'static str) -> Column {
    Column {
        key,
        label,
        sortable: false,
    }
}

pub const ATTENDANCE_COLUMNS: [Column; 13] = [
    sortable("EmployeeId", "Employee ID"),
    sortable("EmployeeName", "Name"),
    sortable("CheckinDate", "Date"),
    sortable("CheckinTime", "Time"),
    sortable("CheckType", "Type"),
    sortable("ProjectId", "Project"),
    sortable("Tasks", "Tasks"),
    fixed("Photo", "Photo"),
    sortable("Address", "Address"),
    fixed("Map", "Map"),
    sortable("CheckinNote", "Note"),
    sortable("DailyHours", "Daily hours"),
    sortable("MonthlyHours", "Monthly hours"),
];

pub const LEAVE_COLUMNS: [Column; 10] = [
    sortable("EmployeeId", "Employee ID"),
    sortable("EmployeeName", "Name"),
    sortable("CheckinDate", "Date"),
    sortable("CheckinTime", "Time"),
    sortable("Tasks", "Leave type"),
    sortable("ApprovalDate1", "Approval date 1"),
    sortable("Status1", "Status 1"),
    sortable("ApprovalDate2", "Approval date 2"),
    sortable("Status2", "Status 2"),
    sortable("Note", "Note"),
];

pub const ATTENDANCE_DEFAULT_SORT: &str = "CreationTime";
pub const LEAVE_DEFAULT_SORT: &str = "CheckinTime";

pub fn find_column<'a>(columns: &'a [Column], key: &str) -> Option<&'a Column> {
    columns
        .iter()
        .find(|column| column.key.eq_ignore_ascii_case(key.trim()))
}

/// Numeric ids compare as numbers so that 2 sorts before 10.
fn employee_id_key(id: &str) -> SortKey {
    match id.trim().parse::<i64>() {
        Ok(number) => SortKey::Number(number as f64),
        Err(_) => SortKey::text(id),
    }
}

impl TableRow for AugmentedAttendanceRecord {
    fn sort_key(&self, column: &str) -> SortKey {
        let record = &self.record;
        match column {
            "DailyHours" => SortKey::Number(self.daily_seconds as f64),
            "MonthlyHours" => SortKey::Number(self.monthly_seconds as f64),
            "Latitude" => SortKey::Number(record.latitude.unwrap_or_default()),
            "Longitude" => SortKey::Number(record.longitude.unwrap_or_default()),
            "EmployeeId" => employee_id_key(record.employee_id.as_str()),
            "EmployeeName" => SortKey::text(&record.employee_name),
            "CheckinDate" => SortKey::text(&record.checkin_date),
            "CheckinTime" => SortKey::text(&record.checkin_time),
            "CreationTime" => SortKey::text(&record.creation_time),
            "CheckType" => SortKey::text(record.check_type.as_str()),
            "ProjectId" => SortKey::text(&record.project_id),
            "Tasks" => SortKey::text(record.tasks.join(", ")),
            "Address" => SortKey::text(&record.address),
            "CheckinNote" => SortKey::text(&record.checkin_note),
            _ => SortKey::text(""),
        }
    }
}

impl TableRow for LeaveRecord {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "EmployeeId" => employee_id_key(self.employee_id.as_str()),
            "EmployeeName" => SortKey::text(&self.employee_name),
            "CheckinDate" => SortKey::text(&self.checkin_date),
            "CheckinTime" => SortKey::text(&self.checkin_time),
            "Tasks" => SortKey::text(self.tasks.join(", ")),
            "ApprovalDate1" => SortKey::text(&self.approval_date1),
            "Status1" => SortKey::text(&self.status1),
            "ApprovalDate2" => SortKey::text(&self.approval_date2),
            "Status2" => SortKey::text(&self.status2),
            "Note" => SortKey::text(&self.note),
            _ => SortKey::text(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AttendanceRecord, EmployeeId};
    use crate::state::hours::aggregate_hours;
    use crate::state::table::{SortSpec, TableController};

    fn worked(employee: &str, day: &str, start: &str, end: &str) -> Vec<AttendanceRecord> {
        let dmy = format!("{}/{}/{}", &day[8..10], &day[5..7], &day[..4]);
        [("checkin", start), ("checkout", end)]
            .into_iter()
            .map(|(check_type, time)| AttendanceRecord {
                employee_id: EmployeeId::from(employee),
                checkin_date: day.to_string(),
                creation_time: format!("{} {}", dmy, time),
                check_type: check_type.into(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn daily_hours_sort_by_seconds_not_text() {
        let mut records = worked("E1", "2025-03-05", "08:00:00", "18:00:00");
        records.extend(worked("E2", "2025-03-05", "08:00:00", "10:00:00"));
        let mut table = TableController::new(SortSpec::default(), 10);
        table.set_dataset(aggregate_hours(records));

        table.set_sort("DailyHours");
        let hours: Vec<&str> = table
            .page()
            .rows
            .iter()
            .map(|row| row.daily_hours.as_str())
            .collect();
        assert_eq!(hours, vec!["2h 0m", "2h 0m", "10h 0m", "10h 0m"]);
    }

    #[test]
    fn missing_coordinates_sort_as_zero() {
        let rows = aggregate_hours(vec![
            AttendanceRecord {
                latitude: Some(10.5),
                ..Default::default()
            },
            AttendanceRecord::default(),
        ]);
        assert_eq!(rows[1].sort_key("Latitude"), SortKey::Number(0.0));
        assert_eq!(rows[0].sort_key("Latitude"), SortKey::Number(10.5));
    }

    #[test]
    fn leave_text_columns_are_case_insensitive() {
        let record = LeaveRecord {
            status1: "Approved".into(),
            ..Default::default()
        };
        assert_eq!(record.sort_key("Status1"), SortKey::Text("approved".into()));
        assert_eq!(record.sort_key("Unknown"), SortKey::Text(String::new()));
    }

    #[test]
    fn find_column_matches_keys_case_insensitively() {
        assert_eq!(
            find_column(&ATTENDANCE_COLUMNS, "dailyhours").map(|c| c.key),
            Some("DailyHours")
        );
        assert!(!find_column(&ATTENDANCE_COLUMNS, "Photo").unwrap().sortable);
        assert!(find_column(&LEAVE_COLUMNS, "Address").is_none());
        assert_eq!(
            find_column(&LEAVE_COLUMNS, " note ").map(|c| c.key),
            Some("Note")
        );
    }

    #[test]
    fn numeric_employee_ids_sort_as_numbers() {
        let mut table = TableController::new(SortSpec::default(), 10);
        table.set_dataset(
            ["10", "2", "x7", "1"]
                .into_iter()
                .map(|id| LeaveRecord {
                    employee_id: id.into(),
                    ..Default::default()
                })
                .collect(),
        );
        table.set_sort("EmployeeId");
        let ids: Vec<&str> = table
            .page()
            .rows
            .iter()
            .map(|row| row.employee_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "10", "x7"]);
    }
}
