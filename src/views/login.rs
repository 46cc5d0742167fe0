use crate::api::{ApiError, RealtyApi};
use crate::models::LoginRequest;
use crate::session::Session;
use tracing::{error, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Admin sign-in form
#[derive(Debug, Default)]
pub struct LoginPage {
    pub username: String,
    pub password: String,
    loading: bool,
    error: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message shown above the form after a failed attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exchange the credentials for a token and start the session.
    ///
    /// Returns true when the session is now authenticated.
    pub async fn submit(&mut self, api: &dyn RealtyApi, session: &mut Session) -> bool {
        self.loading = true;
        self.error = None;

        let credentials = LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        };
        let outcome = api.login(&credentials).await;
        self.loading = false;

        let response = match outcome {
            Ok(response) => response,
            Err(err @ ApiError::Status { .. }) => {
                warn!(error = %err, "login rejected");
                self.error = Some(INVALID_CREDENTIALS.to_string());
                return false;
            }
            Err(err) => {
                error!(error = %err, "login request failed");
                self.error = Some(LOGIN_FAILED.to_string());
                return false;
            }
        };

        match session.login(response.access_token) {
            Ok(()) => {
                self.password.clear();
                true
            }
            Err(err) => {
                error!(error = %err, "could not persist admin token");
                self.error = Some(LOGIN_FAILED.to_string());
                false
            }
        }
    }
}
