use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Date portion of a `CreationTime` value, e.g. `"31/01/2025"`.
const CREATION_DATE_FORMAT: &str = "%d/%m/%Y";
const CREATION_TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M:%S"];

/// Parses a `"DD/MM/YYYY HH:MM:SS"` timestamp as written by the check-in app.
///
/// Returns `None` for missing, malformed, or impossible values. The result is a
/// naive local time: values are only ever compared against each other.
pub fn parse_creation_time(value: &str) -> Option<NaiveDateTime> {
    let mut parts = value.split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next()?;

    let date = NaiveDate::parse_from_str(date_part, CREATION_DATE_FORMAT).ok()?;
    let time = CREATION_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time_part, format).ok())?;
    Some(date.and_time(time))
}

/// Formats a number of seconds as `"{h}h {m}m"`, truncating leftover seconds.
pub fn format_hours(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

pub fn now_in_tz(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

pub fn today_in_tz(tz: &Tz) -> NaiveDate {
    now_in_tz(tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parse_creation_time_reads_day_month_year_order() {
        let parsed = parse_creation_time("05/03/2025 08:30:15").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (8, 30, 15));
    }

    #[test]
    fn parse_creation_time_keeps_fractional_seconds() {
        let parsed = parse_creation_time("05/03/2025 08:30:15.250").unwrap();
        assert_eq!(parsed.nanosecond(), 250_000_000);
    }

    #[test]
    fn parse_creation_time_rejects_missing_time_part() {
        assert!(parse_creation_time("05/03/2025").is_none());
        assert!(parse_creation_time("").is_none());
        assert!(parse_creation_time("   ").is_none());
    }

    #[test]
    fn parse_creation_time_rejects_malformed_values() {
        assert!(parse_creation_time("2025-03-05 08:30:15").is_none());
        assert!(parse_creation_time("31/02/2025 08:00:00").is_none());
        assert!(parse_creation_time("05/03/2025 25:00:00").is_none());
        assert!(parse_creation_time("05/03/2025 08:30").is_none());
        assert!(parse_creation_time("not a timestamp").is_none());
    }

    #[test]
    fn parse_creation_time_orders_instants() {
        let earlier = parse_creation_time("31/01/2025 23:59:59").unwrap();
        let later = parse_creation_time("01/02/2025 00:00:00").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn format_hours_truncates_to_minutes() {
        assert_eq!(format_hours(0), "0h 0m");
        assert_eq!(format_hours(59), "0h 0m");
        assert_eq!(format_hours(33_300), "9h 15m");
        assert_eq!(format_hours(36_000 + 119), "10h 1m");
        assert_eq!(format_hours(200 * 3600), "200h 0m");
    }

    #[test]
    fn format_hours_clamps_negative_values() {
        assert_eq!(format_hours(-30), "0h 0m");
    }

    #[test]
    fn today_in_tz_matches_now_in_tz() {
        let tz = chrono_tz::UTC;
        let today = today_in_tz(&tz);
        assert_eq!(today, now_in_tz(&tz).date_naive());
    }
}
