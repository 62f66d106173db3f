use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::api::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Preset date windows understood by the backend. The wire labels are the
/// backend's own filter names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuickFilter {
    #[default]
    Today,
    Week,
    Month,
    Year,
    All,
    /// Set whenever an explicit date range is in effect.
    Custom,
}

impl QuickFilter {
    pub const PRESETS: [QuickFilter; 5] = [
        QuickFilter::Today,
        QuickFilter::Week,
        QuickFilter::Month,
        QuickFilter::Year,
        QuickFilter::All,
    ];

    pub fn wire_label(self) -> &'static str {
        match self {
            QuickFilter::Today => "hôm nay",
            QuickFilter::Week => "tuần",
            QuickFilter::Month => "tháng",
            QuickFilter::Year => "năm",
            QuickFilter::All => "tất cả",
            QuickFilter::Custom => "custom",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            QuickFilter::Today => "Today",
            QuickFilter::Week => "This week",
            QuickFilter::Month => "This month",
            QuickFilter::Year => "This year",
            QuickFilter::All => "All",
            QuickFilter::Custom => "Custom range",
        }
    }
}

impl FromStr for QuickFilter {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "today" | "hôm nay" => Ok(QuickFilter::Today),
            "week" | "tuần" => Ok(QuickFilter::Week),
            "month" | "tháng" => Ok(QuickFilter::Month),
            "year" | "năm" => Ok(QuickFilter::Year),
            "all" | "tất cả" => Ok(QuickFilter::All),
            other => Err(ApiError::validation(format!(
                "Unknown quick filter: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

/// Which leave field a date window applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateType {
    #[default]
    CheckinTime,
    ApprovalDate1,
    ApprovalDate2,
    LeaveDate,
}

impl DateType {
    pub const ALL: [DateType; 4] = [
        DateType::CheckinTime,
        DateType::ApprovalDate1,
        DateType::ApprovalDate2,
        DateType::LeaveDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateType::CheckinTime => "CheckinTime",
            DateType::ApprovalDate1 => "ApprovalDate1",
            DateType::ApprovalDate2 => "ApprovalDate2",
            DateType::LeaveDate => "LeaveDate",
        }
    }
}

impl FromStr for DateType {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        DateType::ALL
            .into_iter()
            .find(|date_type| date_type.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| ApiError::validation(format!("Unknown date type: {}", raw.trim())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn parse(start_raw: &str, end_raw: &str) -> Result<Self, ApiError> {
        let start = parse_date_input(start_raw, "Start date")?;
        let end = parse_date_input(end_raw, "End date")?;
        if start > end {
            return Err(ApiError::validation(
                "Start date must be on or before the end date.",
            ));
        }
        Ok(Self { start, end })
    }
}

fn parse_date_input(value: &str, label: &str) -> Result<NaiveDate, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required.", label)));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ApiError::validation(format!("{} must use the YYYY-MM-DD format.", label)))
}

/// Filters of one table. Every setter describes a new server-side query;
/// the caller reloads after changing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    quick_filter: QuickFilter,
    range: Option<DateRange>,
    search: String,
    date_type: Option<DateType>,
}

impl FilterState {
    pub fn for_attendance() -> Self {
        Self {
            quick_filter: QuickFilter::default(),
            range: None,
            search: String::new(),
            date_type: None,
        }
    }

    pub fn for_leave() -> Self {
        Self {
            date_type: Some(DateType::default()),
            ..Self::for_attendance()
        }
    }

    pub fn quick_filter(&self) -> QuickFilter {
        self.quick_filter
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn date_type(&self) -> Option<DateType> {
        self.date_type
    }

    /// Selects a preset window; any explicit range is dropped. `Custom` is
    /// only reachable through [`FilterState::set_date_range`].
    pub fn set_quick_filter(&mut self, filter: QuickFilter) -> Result<(), ApiError> {
        if filter == QuickFilter::Custom {
            return Err(ApiError::validation(
                "A custom filter needs a start and end date.",
            ));
        }
        self.quick_filter = filter;
        self.range = None;
        Ok(())
    }

    /// Applies an explicit range; it replaces the quick filter until the next
    /// preset is chosen.
    pub fn set_date_range(&mut self, start_raw: &str, end_raw: &str) -> Result<(), ApiError> {
        let range = DateRange::parse(start_raw, end_raw)?;
        self.range = Some(range);
        self.quick_filter = QuickFilter::Custom;
        Ok(())
    }

    pub fn set_search(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.clear_search();
        } else {
            self.search = trimmed.to_string();
        }
    }

    /// Empties the search box together with any explicit range.
    pub fn clear_search(&mut self) {
        self.search.clear();
        if self.range.take().is_some() || self.quick_filter == QuickFilter::Custom {
            self.quick_filter = QuickFilter::default();
        }
    }

    pub fn set_date_type(&mut self, date_type: DateType) -> Result<(), ApiError> {
        match self.date_type {
            Some(_) => {
                self.date_type = Some(date_type);
                Ok(())
            }
            None => Err(ApiError::validation(
                "Date type only applies to leave records.",
            )),
        }
    }

    pub fn reset(&mut self) {
        let is_leave = self.date_type.is_some();
        *self = if is_leave {
            Self::for_leave()
        } else {
            Self::for_attendance()
        };
    }

    /// Snapshot used for exactly one fetch or export.
    pub fn to_query(&self) -> FetchQuery {
        FetchQuery {
            filter: self.quick_filter,
            range: self.range,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            date_type: self.date_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub filter: QuickFilter,
    pub range: Option<DateRange>,
    pub search: Option<String>,
    pub date_type: Option<DateType>,
}

impl FetchQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("filter", self.filter.wire_label().to_string())];
        if let Some(range) = self.range {
            params.push(("startDate", range.start.format(DATE_FORMAT).to_string()));
            params.push(("endDate", range.end.format(DATE_FORMAT).to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(date_type) = self.date_type {
            params.push(("dateType", date_type.as_str().to_string()));
        }
        params
    }
}
