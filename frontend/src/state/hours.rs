use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::{AttendanceRecord, CheckType, EmployeeId};
use crate::utils::time::{format_hours, parse_creation_time};

/// Shown as `MonthlyHours` for records that belong to no day bucket.
pub const MONTHLY_HOURS_MISSING: &str = "N/A";

/// Attendance event together with the worked hours of its day and the running
/// total of its month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AugmentedAttendanceRecord {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub daily_hours: String,
    pub monthly_hours: String,
    pub daily_seconds: i64,
    pub monthly_seconds: i64,
}

impl AugmentedAttendanceRecord {
    fn unbucketed(record: AttendanceRecord) -> Self {
        Self {
            record,
            daily_hours: format_hours(0),
            monthly_hours: MONTHLY_HOURS_MISSING.to_string(),
            daily_seconds: 0,
            monthly_seconds: 0,
        }
    }
}

/// Earliest checkin and latest checkout seen on one day.
#[derive(Debug, Default, Clone, Copy)]
struct DaySpan {
    first_checkin: Option<NaiveDateTime>,
    last_checkout: Option<NaiveDateTime>,
}

impl DaySpan {
    fn observe(&mut self, record: &AttendanceRecord) {
        let Some(at) = parse_creation_time(&record.creation_time) else {
            return;
        };
        match record.check_type {
            CheckType::Checkin => {
                self.first_checkin = Some(self.first_checkin.map_or(at, |prev| prev.min(at)));
            }
            CheckType::Checkout => {
                self.last_checkout = Some(self.last_checkout.map_or(at, |prev| prev.max(at)));
            }
            _ => {}
        }
    }

    fn worked_seconds(&self) -> i64 {
        match (self.first_checkin, self.last_checkout) {
            (Some(start), Some(end)) if end > start => (end - start).num_seconds(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayTotals {
    daily_seconds: i64,
    monthly_seconds: i64,
}

/// employee -> month key -> day key -> indices into the input.
type Buckets<'a> = BTreeMap<&'a EmployeeId, BTreeMap<&'a str, BTreeMap<&'a str, Vec<usize>>>>;

fn month_key(day: &str) -> &str {
    day.get(..7).unwrap_or(day)
}

/// Computes daily and running monthly worked hours for every record.
///
/// Output has the same length and order as the input. Records without a
/// `CheckinDate` are kept with zero hours and the `"N/A"` monthly sentinel.
pub fn aggregate_hours(records: Vec<AttendanceRecord>) -> Vec<AugmentedAttendanceRecord> {
    let mut buckets: Buckets<'_> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        let day = record.checkin_date.as_str();
        if day.is_empty() {
            continue;
        }
        buckets
            .entry(&record.employee_id)
            .or_default()
            .entry(month_key(day))
            .or_default()
            .entry(day)
            .or_default()
            .push(index);
    }

    let mut totals: Vec<Option<DayTotals>> = vec![None; records.len()];
    for months in buckets.values() {
        for days in months.values() {
            let mut monthly_seconds = 0;
            for indices in days.values() {
                let mut span = DaySpan::default();
                for &index in indices {
                    span.observe(&records[index]);
                }
                let daily_seconds = span.worked_seconds();
                monthly_seconds += daily_seconds;
                for &index in indices {
                    totals[index] = Some(DayTotals {
                        daily_seconds,
                        monthly_seconds,
                    });
                }
            }
        }
    }
    tracing::debug!(records = records.len(), employees = buckets.len(), "aggregated worked hours");

    records
        .into_iter()
        .zip(totals)
        .map(|(record, totals)| match totals {
            Some(totals) => AugmentedAttendanceRecord {
                record,
                daily_hours: format_hours(totals.daily_seconds),
                monthly_hours: format_hours(totals.monthly_seconds),
                daily_seconds: totals.daily_seconds,
                monthly_seconds: totals.monthly_seconds,
            },
            None => AugmentedAttendanceRecord::unbucketed(record),
        })
        .collect()
}
