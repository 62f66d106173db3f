use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;

use crate::api::{
    ApiError, AttendanceRecord, DashboardApi, ExportKind, ExportPeriod, LeaveRecord,
};
use crate::config::Config;
use crate::state::{
    columns::{
        find_column, Column, ATTENDANCE_COLUMNS, ATTENDANCE_DEFAULT_SORT, LEAVE_COLUMNS,
        LEAVE_DEFAULT_SORT,
    },
    filters::{DateType, FetchQuery, FilterState, QuickFilter},
    hours::{aggregate_hours, AugmentedAttendanceRecord},
    messages::FlashMessage,
    session::{LoginForm, Session},
    table::{SortOrder, SortSpec, TableController, TableRow},
};

const NOT_LOGGED_IN: &str = "Not logged in";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Attendance,
    Leave,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Attendance => "attendance",
            Tab::Leave => "leave",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "attendance" => Ok(Tab::Attendance),
            "leave" => Ok(Tab::Leave),
            other => Err(ApiError::validation(format!("Unknown tab: {}", other))),
        }
    }
}

/// Table, filters and request counter of one tab.
#[derive(Debug, Clone)]
pub struct TabState<R> {
    pub table: TableController<R>,
    pub filters: FilterState,
    generation: u64,
}

impl<R: TableRow> TabState<R> {
    fn new(filters: FilterState, default_sort: &str, page_size: usize) -> Self {
        Self {
            table: TableController::new(
                SortSpec::new(default_sort, SortOrder::Descending),
                page_size,
            ),
            filters,
            generation: 0,
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One issued fetch. Only the ticket with the latest generation of its tab
/// may update the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub tab: Tab,
    pub generation: u64,
    pub identity: String,
    pub query: FetchQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied { rows: usize },
    /// A newer request was issued for the tab; the response was dropped.
    Stale,
    /// Nothing changed in the table; the error is also shown as a message.
    Failed(ApiError),
}

impl LoadOutcome {
    pub fn into_result(self) -> Result<usize, ApiError> {
        match self {
            LoadOutcome::Applied { rows } => Ok(rows),
            LoadOutcome::Stale => Ok(0),
            LoadOutcome::Failed(err) => Err(err),
        }
    }
}

/// Whole admin screen: session, both tabs, and the flash message. Every user
/// event goes through one of its methods.
#[derive(Debug, Clone)]
pub struct Dashboard {
    session: Option<Session>,
    active_tab: Tab,
    attendance: TabState<AugmentedAttendanceRecord>,
    leave: TabState<LeaveRecord>,
    message: Option<FlashMessage>,
    message_ttl: Duration,
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        Self {
            session: None,
            active_tab: Tab::default(),
            attendance: TabState::new(
                FilterState::for_attendance(),
                ATTENDANCE_DEFAULT_SORT,
                config.page_size,
            ),
            leave: TabState::new(FilterState::for_leave(), LEAVE_DEFAULT_SORT, config.page_size),
            message: None,
            message_ttl: config.message_dismiss_after(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Changes the visible tab without fetching anything.
    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn attendance(&self) -> &TabState<AugmentedAttendanceRecord> {
        &self.attendance
    }

    pub fn leave(&self) -> &TabState<LeaveRecord> {
        &self.leave
    }

    pub fn filters(&self, tab: Tab) -> &FilterState {
        match tab {
            Tab::Attendance => &self.attendance.filters,
            Tab::Leave => &self.leave.filters,
        }
    }

    /// Filters of `tab`, for callers that configure a query before loading.
    pub fn filters_mut(&mut self, tab: Tab) -> &mut FilterState {
        match tab {
            Tab::Attendance => &mut self.attendance.filters,
            Tab::Leave => &mut self.leave.filters,
        }
    }

    pub fn message(&self) -> Option<&FlashMessage> {
        self.message.as_ref()
    }

    /// The current message, unless it has been up longer than the dismiss delay.
    pub fn visible_message_at(&self, now: DateTime<Utc>) -> Option<&FlashMessage> {
        self.message
            .as_ref()
            .filter(|message| message.is_visible_at(now, self.message_ttl))
    }

    fn show_success(&mut self, text: impl Into<String>) {
        self.message = Some(FlashMessage::success(text, Utc::now()));
    }

    fn show_error(&mut self, err: &ApiError) {
        self.message = Some(FlashMessage::error(err.error.clone(), Utc::now()));
    }

    fn require_identity(&mut self) -> Result<String, ApiError> {
        match &self.session {
            Some(session) => Ok(session.identity().to_string()),
            None => {
                let err = ApiError::unauthorized(NOT_LOGGED_IN);
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// Starts a reload of `tab`, superseding any request still in flight.
    pub fn begin_load(&mut self, tab: Tab) -> Result<LoadTicket, ApiError> {
        let identity = self.require_identity()?;
        let (generation, query) = match tab {
            Tab::Attendance => (
                self.attendance.next_generation(),
                self.attendance.filters.to_query(),
            ),
            Tab::Leave => (self.leave.next_generation(), self.leave.filters.to_query()),
        };
        tracing::debug!(tab = %tab, generation, "issuing data request");
        Ok(LoadTicket {
            tab,
            generation,
            identity,
            query,
        })
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        let latest = match ticket.tab {
            Tab::Attendance => self.attendance.generation,
            Tab::Leave => self.leave.generation,
        };
        ticket.generation == latest
    }

    fn fail_load(&mut self, ticket: &LoadTicket, err: ApiError) -> LoadOutcome {
        tracing::warn!(tab = %ticket.tab, code = %err.code, error = %err.error, "data request failed");
        if err.is_unauthorized() {
            self.session = None;
        }
        self.show_error(&err);
        LoadOutcome::Failed(err)
    }

    pub fn apply_attendance(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<AttendanceRecord>, ApiError>,
    ) -> LoadOutcome {
        if ticket.tab != Tab::Attendance || !self.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "discarding stale attendance response");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(records) => {
                let rows = aggregate_hours(records);
                let count = rows.len();
                self.attendance.table.set_dataset(rows);
                LoadOutcome::Applied { rows: count }
            }
            Err(err) => self.fail_load(ticket, err),
        }
    }

    pub fn apply_leave(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<LeaveRecord>, ApiError>,
    ) -> LoadOutcome {
        if ticket.tab != Tab::Leave || !self.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "discarding stale leave response");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(records) => {
                let count = records.len();
                self.leave.table.set_dataset(records);
                LoadOutcome::Applied { rows: count }
            }
            Err(err) => self.fail_load(ticket, err),
        }
    }

    pub async fn load<A>(&mut self, api: &A, tab: Tab) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        let ticket = match self.begin_load(tab) {
            Ok(ticket) => ticket,
            Err(err) => return LoadOutcome::Failed(err),
        };
        match tab {
            Tab::Attendance => {
                let result = api.fetch_attendances(&ticket.identity, &ticket.query).await;
                self.apply_attendance(&ticket, result)
            }
            Tab::Leave => {
                let result = api.fetch_leaves(&ticket.identity, &ticket.query).await;
                self.apply_leave(&ticket, result)
            }
        }
    }

    pub async fn refresh<A>(&mut self, api: &A) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        self.load(api, self.active_tab).await
    }

    /// Logs in, then shows the active tab, loading it if it has no rows yet.
    pub async fn login<A>(
        &mut self,
        api: &A,
        form: &LoginForm,
    ) -> Result<Option<LoadOutcome>, ApiError>
    where
        A: DashboardApi + ?Sized,
    {
        let request = form.validate().inspect_err(|err| self.show_error(err))?;
        let response = api
            .login(&request)
            .await
            .inspect_err(|err| self.show_error(err))?;
        let session = Session::from_login(&request, &response);
        tracing::info!(email = %session.email, "logged in");
        self.session = Some(session);
        self.show_success("Logged in successfully");
        Ok(self.switch_tab(api, self.active_tab).await)
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(email = %session.email, "logged out");
        }
        // Responses to requests issued before logout must not land.
        self.attendance.next_generation();
        self.leave.next_generation();
        self.attendance.table.clear();
        self.leave.table.clear();
        self.attendance.filters.reset();
        self.leave.filters.reset();
        self.show_success("Logged out");
    }

    /// Shows `tab`; data is fetched only when the tab has nothing loaded yet.
    pub async fn switch_tab<A>(&mut self, api: &A, tab: Tab) -> Option<LoadOutcome>
    where
        A: DashboardApi + ?Sized,
    {
        self.active_tab = tab;
        let empty = match tab {
            Tab::Attendance => self.attendance.table.is_empty(),
            Tab::Leave => self.leave.table.is_empty(),
        };
        if empty {
            Some(self.load(api, tab).await)
        } else {
            None
        }
    }

    pub async fn apply_quick_filter<A>(&mut self, api: &A, filter: QuickFilter) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        let tab = self.active_tab;
        if let Err(err) = self.filters_mut(tab).set_quick_filter(filter) {
            self.show_error(&err);
            return LoadOutcome::Failed(err);
        }
        self.load(api, tab).await
    }

    pub async fn apply_date_range<A>(&mut self, api: &A, start: &str, end: &str) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        let tab = self.active_tab;
        if let Err(err) = self.filters_mut(tab).set_date_range(start, end) {
            self.show_error(&err);
            return LoadOutcome::Failed(err);
        }
        self.load(api, tab).await
    }

    pub async fn apply_search<A>(&mut self, api: &A, text: &str) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        let tab = self.active_tab;
        self.filters_mut(tab).set_search(text);
        self.load(api, tab).await
    }

    pub async fn clear_search<A>(&mut self, api: &A) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        let tab = self.active_tab;
        self.filters_mut(tab).clear_search();
        self.load(api, tab).await
    }

    /// Leave tab only; the selector is kept even when another tab is active.
    pub async fn apply_leave_date_type<A>(&mut self, api: &A, date_type: DateType) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        if let Err(err) = self.leave.filters.set_date_type(date_type) {
            self.show_error(&err);
            return LoadOutcome::Failed(err);
        }
        self.load(api, Tab::Leave).await
    }

    pub async fn reset_filters<A>(&mut self, api: &A) -> LoadOutcome
    where
        A: DashboardApi + ?Sized,
    {
        let tab = self.active_tab;
        self.filters_mut(tab).reset();
        self.load(api, tab).await
    }

    /// Header click on the active table. Keys match case-insensitively and
    /// must name a sortable column of that table.
    pub fn sort_by(&mut self, column: &str) -> Result<(), ApiError> {
        let columns: &[Column] = match self.active_tab {
            Tab::Attendance => &ATTENDANCE_COLUMNS,
            Tab::Leave => &LEAVE_COLUMNS,
        };
        let key = match find_column(columns, column) {
            Some(found) if found.sortable => found.key,
            Some(found) => {
                return Err(ApiError::validation(format!(
                    "Column {} cannot be sorted.",
                    found.label
                )))
            }
            None => {
                return Err(ApiError::validation(format!(
                    "Unknown column: {}",
                    column.trim()
                )))
            }
        };
        match self.active_tab {
            Tab::Attendance => self.attendance.table.set_sort(key),
            Tab::Leave => self.leave.table.set_sort(key),
        }
        Ok(())
    }

    pub fn goto_page(&mut self, page: usize) {
        match self.active_tab {
            Tab::Attendance => self.attendance.table.goto_page(page),
            Tab::Leave => self.leave.table.goto_page(page),
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ApiError> {
        let result = match self.active_tab {
            Tab::Attendance => self.attendance.table.set_page_size(page_size),
            Tab::Leave => self.leave.table.set_page_size(page_size),
        };
        result.inspect_err(|err| self.show_error(err))
    }

    /// Download link for an export. Attendance and leave exports use their own
    /// tab's filters; the combined export follows the active tab.
    pub fn export_url<A>(
        &mut self,
        api: &A,
        kind: ExportKind,
        period: ExportPeriod,
    ) -> Result<String, ApiError>
    where
        A: DashboardApi + ?Sized,
    {
        let identity = self.require_identity()?;
        let query = match kind {
            ExportKind::Attendance => self.attendance.filters.to_query(),
            ExportKind::Leave => self.leave.filters.to_query(),
            ExportKind::Combined => self.filters(self.active_tab).to_query(),
        };
        let url = api
            .export_url(&identity, kind, &query, period)
            .inspect_err(|err| self.show_error(err))?;
        tracing::info!(kind = %kind, month = period.month, year = period.year, "export requested");
        self.show_success("Preparing the export file");
        Ok(url)
    }
}
