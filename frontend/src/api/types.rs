use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Employee identifier as stored by the check-in backend.
///
/// The backend is not strict about the JSON type, so numbers are accepted and
/// kept in their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_string(deserializer).map(EmployeeId)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckType {
    Checkin,
    Checkout,
    #[default]
    Unknown,
    Other(String),
}

impl CheckType {
    pub fn as_str(&self) -> &str {
        match self {
            CheckType::Checkin => "checkin",
            CheckType::Checkout => "checkout",
            CheckType::Unknown => "",
            CheckType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CheckType::Checkin => "Check In",
            CheckType::Checkout => "Check Out",
            other => other.as_str(),
        }
    }
}

impl From<String> for CheckType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "checkin" => CheckType::Checkin,
            "checkout" => CheckType::Checkout,
            "" => CheckType::Unknown,
            _ => CheckType::Other(raw),
        }
    }
}

impl From<&str> for CheckType {
    fn from(raw: &str) -> Self {
        CheckType::from(raw.to_string())
    }
}

impl Serialize for CheckType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CheckType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_string(deserializer).map(CheckType::from)
    }
}

/// Raw check-in event as returned by `GET /api/attendances`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttendanceRecord {
    #[serde(default)]
    pub employee_id: EmployeeId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub checkin_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub checkin_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub creation_time: String,
    #[serde(default)]
    pub check_type: CheckType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_id: String,
    #[serde(default, deserialize_with = "task_list")]
    pub tasks: Vec<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub face_image: Option<String>,
    #[serde(
        rename = "PhotoURL",
        default,
        deserialize_with = "optional_string"
    )]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "coordinate")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub checkin_note: String,
}

impl AttendanceRecord {
    /// Photo shown for the event; the face capture wins over the uploaded photo.
    pub fn photo(&self) -> Option<&str> {
        self.face_image
            .as_deref()
            .or(self.photo_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Leave request row as returned by `GET /api/leaves`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeaveRecord {
    #[serde(default)]
    pub employee_id: EmployeeId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub checkin_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub checkin_time: String,
    #[serde(default, deserialize_with = "task_list")]
    pub tasks: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub approval_date1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub approval_date2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Failure body of the backend. Login answers with `message`, data
/// endpoints with `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string).unwrap_or_default())
}

fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(value_to_string)
        .filter(|text| !text.trim().is_empty()))
}

fn task_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(value_to_string)
            .filter(|task| !task.is_empty())
            .collect(),
        Some(other) => value_to_string(other)
            .filter(|task| !task.is_empty())
            .into_iter()
            .collect(),
        None => Vec::new(),
    })
}

fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|coord| coord.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_attendance_record_with_all_fields() {
        let raw = json!({
            "EmployeeId": "E001",
            "EmployeeName": "Nguyen Van A",
            "CheckinDate": "2025-03-05",
            "CheckinTime": "08:00:00",
            "CreationTime": "05/03/2025 08:00:00",
            "CheckType": "checkin",
            "ProjectId": "P-9",
            "Tasks": ["Survey", "Report"],
            "FaceImage": "https://cdn.example.com/face.jpg",
            "Latitude": 10.77,
            "Longitude": "106.70",
            "Address": "District 1",
            "CheckinNote": "on site"
        });
        let record: AttendanceRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.employee_id, EmployeeId::from("E001"));
        assert_eq!(record.check_type, CheckType::Checkin);
        assert_eq!(record.tasks, vec!["Survey", "Report"]);
        assert_eq!(record.photo(), Some("https://cdn.example.com/face.jpg"));
        assert_eq!(record.coordinates(), Some((10.77, 106.70)));
        assert_eq!(record.checkin_note, "on site");
    }

    #[test]
    fn deserialize_attendance_record_tolerates_missing_and_null_fields() {
        let raw = json!({
            "EmployeeId": 42,
            "CheckinDate": null,
            "Tasks": null,
            "Latitude": "n/a",
            "PhotoURL": "https://cdn.example.com/photo.jpg"
        });
        let record: AttendanceRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.employee_id.as_str(), "42");
        assert_eq!(record.checkin_date, "");
        assert!(record.tasks.is_empty());
        assert_eq!(record.latitude, None);
        assert_eq!(record.coordinates(), None);
        assert_eq!(record.check_type, CheckType::Unknown);
        assert_eq!(record.photo(), Some("https://cdn.example.com/photo.jpg"));
    }

    #[test]
    fn single_task_string_is_normalized_to_list() {
        let record: LeaveRecord =
            serde_json::from_value(json!({ "Tasks": "Nghỉ phép" })).unwrap();
        assert_eq!(record.tasks, vec!["Nghỉ phép"]);

        let empty: LeaveRecord = serde_json::from_value(json!({ "Tasks": "" })).unwrap();
        assert!(empty.tasks.is_empty());
    }

    #[test]
    fn unexpected_check_type_passes_through() {
        let record: AttendanceRecord =
            serde_json::from_value(json!({ "CheckType": "break" })).unwrap();
        assert_eq!(record.check_type, CheckType::Other("break".into()));
        assert_eq!(record.check_type.label(), "break");
        assert_eq!(CheckType::Checkout.label(), "Check Out");
    }

    #[test]
    fn check_type_serializes_as_raw_string() {
        let record = AttendanceRecord {
            check_type: CheckType::Checkout,
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["CheckType"], json!("checkout"));
        assert_eq!(value["PhotoURL"], Value::Null);
    }

    #[test]
    fn deserialize_leave_record() {
        let raw = json!({
            "EmployeeId": "E002",
            "EmployeeName": "Tran Thi B",
            "CheckinDate": "2025-03-01",
            "CheckinTime": "09:00:00",
            "Tasks": "Nghỉ phép",
            "ApprovalDate1": "02/03/2025",
            "Status1": "Approved",
            "ApprovalDate2": "",
            "Status2": "Pending",
            "Note": "family"
        });
        let record: LeaveRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.status1, "Approved");
        assert_eq!(record.status2, "Pending");
        assert_eq!(record.note, "family");
    }

    #[test]
    fn error_payload_prefers_error_over_message() {
        let payload: ErrorPayload =
            serde_json::from_value(json!({ "error": "boom", "message": "other" })).unwrap();
        assert_eq!(payload.text(), Some("boom"));

        let payload: ErrorPayload =
            serde_json::from_value(json!({ "success": false, "message": "bad login" })).unwrap();
        assert_eq!(payload.text(), Some("bad login"));

        let payload: ErrorPayload = serde_json::from_value(json!({ "error": "  " })).unwrap();
        assert_eq!(payload.text(), None);
    }

    #[test]
    fn api_error_helpers_set_expected_codes() {
        let validation = ApiError::validation("invalid payload");
        assert_eq!(validation.code, "VALIDATION_ERROR");
        assert_eq!(validation.error, "invalid payload");
        assert!(validation.details.is_none());

        assert_eq!(ApiError::unknown("x").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("x").code, "REQUEST_FAILED");
        assert!(ApiError::unauthorized("x").is_unauthorized());
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }
}
