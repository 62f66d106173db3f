use std::fmt;
use std::str::FromStr;
use url::Url;

use super::{client::ApiClient, records::record_params, types::ApiError};
use crate::state::filters::FetchQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Attendance,
    Leave,
    /// Attendance and leave in one workbook, filtered like the active tab.
    Combined,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Attendance, ExportKind::Leave, ExportKind::Combined];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Attendance => "attendance",
            ExportKind::Leave => "leave",
            ExportKind::Combined => "combined",
        }
    }

    fn path(self) -> &'static str {
        match self {
            ExportKind::Attendance => "/api/export-excel",
            ExportKind::Leave => "/api/export-leaves-excel",
            ExportKind::Combined => "/api/export-combined-excel",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ExportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| ApiError::validation(format!("Unknown export type: {}", raw.trim())))
    }
}

/// Month and year printed on the exported workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportPeriod {
    pub month: u32,
    pub year: i32,
}

impl ExportPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, ApiError> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::validation("Month must be between 1 and 12."));
        }
        if !(1..=9999).contains(&year) {
            return Err(ApiError::validation("Year is out of range."));
        }
        Ok(Self { month, year })
    }
}

impl ApiClient {
    /// Builds the download link for an Excel export. The export endpoint is
    /// reached by navigation, so nothing is sent here.
    pub fn export_url(
        &self,
        identity: &str,
        kind: ExportKind,
        query: &FetchQuery,
        period: ExportPeriod,
    ) -> Result<String, ApiError> {
        if identity.trim().is_empty() {
            return Err(ApiError::unauthorized("Not logged in"));
        }
        let mut url = Url::parse(&self.endpoint(kind.path()))
            .map_err(|e| ApiError::unknown(format!("Invalid export URL: {}", e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in record_params(identity, query) {
                pairs.append_pair(name, &value);
            }
            pairs.append_pair("month", &period.month.to_string());
            pairs.append_pair("year", &period.year.to_string());
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::filters::{FilterState, QuickFilter};

    fn client() -> ApiClient {
        ApiClient::new_with_base_url("http://localhost:5000")
    }

    #[test]
    fn attendance_export_url_encodes_filter_and_period() {
        let url = client()
            .export_url(
                "admin@example.com",
                ExportKind::Attendance,
                &FilterState::for_attendance().to_query(),
                ExportPeriod::new(3, 2025).unwrap(),
            )
            .unwrap();
        assert_eq!(
            url,
            "http://localhost:5000/api/export-excel?email=admin%40example.com&filter=h%C3%B4m+nay&month=3&year=2025"
        );
    }

    #[test]
    fn leave_export_url_carries_range_search_and_date_type() {
        let mut filters = FilterState::for_leave();
        filters.set_date_range("2025-02-01", "2025-02-28").unwrap();
        filters.set_search("Tran B");
        let url = client()
            .export_url(
                "admin@example.com",
                ExportKind::Leave,
                &filters.to_query(),
                ExportPeriod::new(2, 2025).unwrap(),
            )
            .unwrap();
        assert!(url.starts_with("http://localhost:5000/api/export-leaves-excel?"));
        assert!(url.contains("filter=custom"));
        assert!(url.contains("startDate=2025-02-01&endDate=2025-02-28"));
        assert!(url.contains("search=Tran+B"));
        assert!(url.contains("dateType=CheckinTime"));
        assert!(url.ends_with("month=2&year=2025"));
    }

    #[test]
    fn combined_export_uses_given_query() {
        let mut filters = FilterState::for_attendance();
        filters.set_quick_filter(QuickFilter::All).unwrap();
        let url = client()
            .export_url(
                "admin@example.com",
                ExportKind::Combined,
                &filters.to_query(),
                ExportPeriod::new(12, 2024).unwrap(),
            )
            .unwrap();
        assert!(url.starts_with("http://localhost:5000/api/export-combined-excel?"));
        assert!(url.contains("filter=t%E1%BA%A5t+c%E1%BA%A3"));
        assert!(!url.contains("dateType"));
    }

    #[test]
    fn export_url_requires_identity() {
        let err = client()
            .export_url(
                " ",
                ExportKind::Leave,
                &FilterState::for_leave().to_query(),
                ExportPeriod::new(1, 2025).unwrap(),
            )
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn export_period_validates_month_and_year() {
        assert!(ExportPeriod::new(0, 2025).is_err());
        assert!(ExportPeriod::new(13, 2025).is_err());
        assert!(ExportPeriod::new(6, 0).is_err());
        assert_eq!(
            ExportPeriod::new(6, 2025).unwrap(),
            ExportPeriod { month: 6, year: 2025 }
        );
    }

    #[test]
    fn export_kind_parses_names() {
        assert_eq!("Combined".parse::<ExportKind>().unwrap(), ExportKind::Combined);
        assert!("payroll".parse::<ExportKind>().is_err());
    }
}
