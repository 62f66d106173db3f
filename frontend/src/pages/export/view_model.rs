use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::api::{ApiError, ExportKind, ExportPeriod};

/// How many past years the year selector offers besides the current one.
const YEARS_BACK: i32 = 5;

pub fn export_kind_label(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Attendance => "Attendance",
        ExportKind::Leave => "Leave",
        ExportKind::Combined => "Attendance and leave",
    }
}

pub fn year_options(today: NaiveDate) -> Vec<i32> {
    let current = today.year();
    (current - YEARS_BACK..=current).collect()
}

/// Values of the export controls. The kind starts unselected and the period
/// starts at the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportForm {
    pub kind: Option<ExportKind>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl ExportForm {
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            kind: None,
            month: Some(today.month()),
            year: Some(today.year()),
        }
    }

    pub fn validate(&self) -> Result<(ExportKind, ExportPeriod), ApiError> {
        let kind = self
            .kind
            .ok_or_else(|| ApiError::validation("Please choose the data to export"))?;
        let (Some(month), Some(year)) = (self.month, self.year) else {
            return Err(ApiError::validation("Please choose month and year"));
        };
        Ok((kind, ExportPeriod::new(month, year)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFormView {
    pub kinds: Vec<ExportOption>,
    pub months: Vec<u32>,
    pub years: Vec<i32>,
    pub selected_month: Option<u32>,
    pub selected_year: Option<i32>,
    /// Month and year pickers stay hidden until a kind is chosen.
    pub show_period: bool,
}

pub fn render_export_form(form: &ExportForm, today: NaiveDate) -> ExportFormView {
    ExportFormView {
        kinds: ExportKind::ALL
            .into_iter()
            .map(|kind| ExportOption {
                value: kind.as_str(),
                label: export_kind_label(kind),
                selected: form.kind == Some(kind),
            })
            .collect(),
        months: (1..=12).collect(),
        years: year_options(today),
        selected_month: form.month,
        selected_year: form.year,
        show_period: form.kind.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn form_defaults_to_current_month_without_kind() {
        let form = ExportForm::for_today(today());
        assert_eq!(form.kind, None);
        assert_eq!((form.month, form.year), (Some(3), Some(2025)));
        assert!(!render_export_form(&form, today()).show_period);
    }

    #[test]
    fn validation_requires_kind_then_period() {
        let mut form = ExportForm::for_today(today());
        assert_eq!(
            form.validate().unwrap_err().error,
            "Please choose the data to export"
        );

        form.kind = Some(ExportKind::Leave);
        form.month = None;
        assert_eq!(form.validate().unwrap_err().error, "Please choose month and year");

        form.month = Some(13);
        assert_eq!(form.validate().unwrap_err().code, "VALIDATION_ERROR");

        form.month = Some(2);
        let (kind, period) = form.validate().unwrap();
        assert_eq!(kind, ExportKind::Leave);
        assert_eq!(period, ExportPeriod { month: 2, year: 2025 });
    }

    #[test]
    fn year_selector_covers_last_five_years() {
        assert_eq!(year_options(today()), vec![2020, 2021, 2022, 2023, 2024, 2025]);
    }

    #[test]
    fn view_marks_selected_kind() {
        let form = ExportForm {
            kind: Some(ExportKind::Combined),
            ..ExportForm::for_today(today())
        };
        let view = render_export_form(&form, today());
        let selected: Vec<&str> = view
            .kinds
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect();
        assert_eq!(selected, vec!["combined"]);
        assert!(view.show_period);
        assert_eq!(view.months.len(), 12);
    }
}
