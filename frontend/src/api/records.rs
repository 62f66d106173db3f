use super::{
    client::ApiClient,
    types::{ApiError, AttendanceRecord, LeaveRecord},
};
use crate::state::filters::FetchQuery;

const ATTENDANCE_LOAD_FAILED: &str = "Failed to load attendance data";
const LEAVE_LOAD_FAILED: &str = "Failed to load leave data";

pub(crate) fn record_params(identity: &str, query: &FetchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("email", identity.to_string())];
    params.extend(query.params());
    params
}

impl ApiClient {
    pub async fn fetch_attendances(
        &self,
        identity: &str,
        query: &FetchQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let params = record_params(identity, query);
        let response = self
            .http_client()
            .get(self.endpoint("/api/attendances"))
            .query(&params)
            .send()
            .await
            .map_err(Self::map_request_error)?;
        self.map_json_response(response, ATTENDANCE_LOAD_FAILED).await
    }

    pub async fn fetch_leaves(
        &self,
        identity: &str,
        query: &FetchQuery,
    ) -> Result<Vec<LeaveRecord>, ApiError> {
        let params = record_params(identity, query);
        let response = self
            .http_client()
            .get(self.endpoint("/api/leaves"))
            .query(&params)
            .send()
            .await
            .map_err(Self::map_request_error)?;
        self.map_json_response(response, LEAVE_LOAD_FAILED).await
    }
}
