use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse},
};

const LOGIN_FAILED: &str = "Incorrect email or password";

impl ApiClient {
    /// Submits the login form. Empty credentials never reach the network.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let email = request.email.trim();
        if email.is_empty() || request.password.is_empty() {
            return Err(ApiError::validation("Enter your email and password"));
        }

        let form = [("email", email), ("password", request.password.as_str())];
        let response = self
            .http_client()
            .post(self.endpoint("/login"))
            .form(&form)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let login: LoginResponse = self.map_json_response(response, LOGIN_FAILED).await?;
        if login.success {
            Ok(login)
        } else {
            Err(ApiError::unauthorized(
                login
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| LOGIN_FAILED.to_string()),
            ))
        }
    }
}
