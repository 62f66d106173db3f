mod auth;
pub mod client;
pub mod export;
mod records;
pub mod types;

use async_trait::async_trait;

pub use client::*;
pub use export::{ExportKind, ExportPeriod};
pub use types::*;

use crate::state::filters::FetchQuery;

/// The backend as seen by the dashboard: login, the two record feeds, and
/// the export links.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn fetch_attendances(
        &self,
        identity: &str,
        query: &FetchQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError>;

    async fn fetch_leaves(
        &self,
        identity: &str,
        query: &FetchQuery,
    ) -> Result<Vec<LeaveRecord>, ApiError>;

    fn export_url(
        &self,
        identity: &str,
        kind: ExportKind,
        query: &FetchQuery,
        period: ExportPeriod,
    ) -> Result<String, ApiError>;
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        ApiClient::login(self, request).await
    }

    async fn fetch_attendances(
        &self,
        identity: &str,
        query: &FetchQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        ApiClient::fetch_attendances(self, identity, query).await
    }

    async fn fetch_leaves(
        &self,
        identity: &str,
        query: &FetchQuery,
    ) -> Result<Vec<LeaveRecord>, ApiError> {
        ApiClient::fetch_leaves(self, identity, query).await
    }

    fn export_url(
        &self,
        identity: &str,
        kind: ExportKind,
        query: &FetchQuery,
        period: ExportPeriod,
    ) -> Result<String, ApiError> {
        ApiClient::export_url(self, identity, kind, query, period)
    }
}
