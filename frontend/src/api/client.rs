use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{api::types::*, config::Config};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self::new_with_base_url(config.api_base_url.as_str())
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn map_request_error(err: reqwest::Error) -> ApiError {
        ApiError::request_failed(format!("Request failed: {}", err))
    }

    /// Decodes a JSON body on success, or turns the backend's error payload
    /// into an `ApiError`. `fallback` is used when the payload carries no text.
    pub(crate) async fn map_json_response<T: DeserializeOwned>(
        &self,
        response: Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::map_error_response(response, fallback).await)
        }
    }

    pub(crate) async fn map_error_response(response: Response, fallback: &str) -> ApiError {
        let status = response.status();
        let payload = response.json::<ErrorPayload>().await.unwrap_or_default();
        let message = payload.text().unwrap_or(fallback).to_string();
        Self::error_for_status(status, message)
    }

    pub(crate) fn error_for_status(status: StatusCode, message: String) -> ApiError {
        let error = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::unauthorized(message),
            StatusCode::BAD_REQUEST => ApiError::validation(message),
            _ => ApiError::request_failed(message),
        };
        error.with_details(serde_json::json!({ "status": status.as_u16() }))
    }
}
