use serde::{Deserialize, Serialize};

use crate::api::{ApiError, LoginRequest, LoginResponse};

/// Logged-in admin. The email doubles as the identity token sent with every
/// data request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl Session {
    /// Builds the session from a successful login. The email typed into the
    /// form is kept as identity, as that is what the backend looks up.
    pub fn from_login(request: &LoginRequest, response: &LoginResponse) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };
        Self {
            email: request.email.trim().to_string(),
            username: non_empty(&response.username),
            role: non_empty(&response.role),
        }
    }

    pub fn identity(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }

    pub fn greeting(&self) -> String {
        format!("Hello, {}!", self.display_name())
    }

    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"))
    }
}

/// Login form input before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, ApiError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(ApiError::validation("Enter your email and password"));
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
