//! Login, signup, forgot-password and reset-password screens
//!
//! Each form validates locally, then the request runs and `finish` maps the
//! result onto inline messages and a navigation outcome.

use super::{Fields, FormField};
use crate::api::auth::extract_token;
use crate::api::{ApiClient, ApiError};
use crate::router::Route;
use crate::session::SessionStore;
use serde_json::Value;
use std::time::Duration;

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const NETWORK_ERROR: &str = "Network error. Try again.";
pub const LOGIN_REJECTED: &str = "Invalid email or password.";
pub const LOGIN_NO_TOKEN: &str = "Login failed: No token received from server.";
pub const SIGNUP_OK: &str = "Account created successfully! You can now log in.";
pub const SIGNUP_REJECTED: &str = "Failed to create account.";
pub const FORGOT_EMPTY: &str = "Please enter your email";
pub const FORGOT_OK: &str = "Check your email for reset instructions.";
pub const FORGOT_REJECTED: &str = "Something went wrong";
pub const RESET_MISMATCH: &str = "Passwords do not match.";
pub const RESET_OK: &str = "Password has been reset successfully!";
pub const RESET_REJECTED: &str = "Failed to reset password.";

/// What the screen should do once a request finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Stay,
    /// Navigate, replacing the current history entry
    Replace(Route),
    Push(Route),
    /// Navigate after a delay, so the success notice can be read
    PushAfter(Route, Duration),
}

/// Shared state of an auth screen
#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub fields: Fields,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub busy: bool,
}

impl AuthForm {
    fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields: Fields::new(fields),
            error: None,
            notice: None,
            busy: false,
        }
    }

    /// Clear messages and check required fields; `None` means do not send
    fn start(&mut self, blank_message: &str) -> Option<()> {
        if self.busy {
            return None;
        }
        self.error = None;
        self.notice = None;
        if self.fields.any_blank() {
            self.error = Some(blank_message.to_string());
            return None;
        }
        self.busy = true;
        Some(())
    }

    /// Record a failed request: server message for non-2xx, network text otherwise
    fn fail(&mut self, e: &ApiError, rejected: &str) {
        tracing::warn!("Auth request failed: {}", e);
        self.error = Some(match e {
            ApiError::Status { .. } => e.message_or(rejected).to_string(),
            _ => NETWORK_ERROR.to_string(),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub form: AuthForm,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            form: AuthForm::new(vec![FormField::new("Email"), FormField::secret("Password")]),
        }
    }
}

impl LoginForm {
    /// Validated (email, password)
    pub fn begin(&mut self) -> Option<(String, String)> {
        self.form.start(FILL_ALL_FIELDS)?;
        Some((
            self.form.fields.value(0).to_string(),
            self.form.fields.value(1).to_string(),
        ))
    }

    pub fn finish(&mut self, result: Result<Value, ApiError>, session: &SessionStore) -> AuthOutcome {
        self.form.busy = false;
        match result {
            Ok(body) => match extract_token(&body) {
                Some(token) => {
                    session.login(token);
                    self.form.fields.clear();
                    AuthOutcome::Replace(Route::Dashboard)
                }
                None => {
                    tracing::warn!("Login response carried no token");
                    self.form.error = Some(LOGIN_NO_TOKEN.to_string());
                    AuthOutcome::Stay
                }
            },
            Err(e) => {
                self.form.fail(&e, LOGIN_REJECTED);
                AuthOutcome::Stay
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> AuthOutcome {
        let Some((email, password)) = self.begin() else {
            return AuthOutcome::Stay;
        };
        let result = api.login(&email, &password).await;
        self.finish(result, session)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Signup
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SignupForm {
    pub form: AuthForm,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            form: AuthForm::new(vec![FormField::new("Email"), FormField::secret("Password")]),
        }
    }
}

impl SignupForm {
    pub fn begin(&mut self) -> Option<(String, String)> {
        self.form.start(FILL_ALL_FIELDS)?;
        Some((
            self.form.fields.value(0).to_string(),
            self.form.fields.value(1).to_string(),
        ))
    }

    pub fn finish(&mut self, result: Result<Value, ApiError>) -> AuthOutcome {
        self.form.busy = false;
        match result {
            Ok(_) => {
                self.form.notice = Some(SIGNUP_OK.to_string());
                self.form.fields.clear();
                AuthOutcome::Push(Route::Login)
            }
            Err(e) => {
                self.form.fail(&e, SIGNUP_REJECTED);
                AuthOutcome::Stay
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) -> AuthOutcome {
        let Some((email, password)) = self.begin() else {
            return AuthOutcome::Stay;
        };
        let result = api.signup(&email, &password).await;
        self.finish(result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Forgot password
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ForgotForm {
    pub form: AuthForm,
}

impl Default for ForgotForm {
    fn default() -> Self {
        Self {
            form: AuthForm::new(vec![FormField::new("Email")]),
        }
    }
}

impl ForgotForm {
    pub fn begin(&mut self) -> Option<String> {
        self.form.start(FORGOT_EMPTY)?;
        Some(self.form.fields.value(0).to_string())
    }

    pub fn finish(&mut self, result: Result<Value, ApiError>) -> AuthOutcome {
        self.form.busy = false;
        match result {
            Ok(_) => {
                self.form.notice = Some(FORGOT_OK.to_string());
                self.form.fields.clear();
            }
            Err(e) => self.form.fail(&e, FORGOT_REJECTED),
        }
        AuthOutcome::Stay
    }

    pub async fn submit(&mut self, api: &ApiClient) -> AuthOutcome {
        let Some(email) = self.begin() else {
            return AuthOutcome::Stay;
        };
        let result = api.forgot_password(&email).await;
        self.finish(result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reset password
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ResetForm {
    /// Reset token from the `/reset-password/:token` route
    pub token: String,
    pub form: AuthForm,
    redirect_after: Duration,
}

impl ResetForm {
    pub fn new(token: impl Into<String>, redirect_after: Duration) -> Self {
        Self {
            token: token.into(),
            form: AuthForm::new(vec![
                FormField::secret("New password"),
                FormField::secret("Confirm password"),
            ]),
            redirect_after,
        }
    }

    pub fn begin(&mut self) -> Option<String> {
        self.form.start(FILL_ALL_FIELDS)?;
        let (password, confirm) = (self.form.fields.value(0), self.form.fields.value(1));
        if password != confirm {
            self.form.busy = false;
            self.form.error = Some(RESET_MISMATCH.to_string());
            return None;
        }
        Some(password.to_string())
    }

    pub fn finish(&mut self, result: Result<Value, ApiError>) -> AuthOutcome {
        self.form.busy = false;
        match result {
            Ok(_) => {
                self.form.notice = Some(RESET_OK.to_string());
                self.form.fields.clear();
                AuthOutcome::PushAfter(Route::Login, self.redirect_after)
            }
            Err(e) => {
                self.form.fail(&e, RESET_REJECTED);
                AuthOutcome::Stay
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) -> AuthOutcome {
        let Some(password) = self.begin() else {
            return AuthOutcome::Stay;
        };
        let result = api.reset_password(&self.token, &password).await;
        self.finish(result)
    }
}
