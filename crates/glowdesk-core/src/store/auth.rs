// ── Session slice ──
//
// Holds the authenticated user and the `auth_checked` latch. Consumers
// must not draw conclusions from `user == None` until `auth_checked`
// is true; before that the session status is simply unknown.

use std::sync::Arc;

use glowdesk_api::ApiClient;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{RegisterRequest, User};

/// Observable session state.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    /// Set once the first session probe has resolved, success or not.
    pub auth_checked: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// Per-field messages from a rejected register/reset form.
    pub field_errors: Option<std::collections::HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

pub struct AuthSlice {
    api: Arc<ApiClient>,
    state: watch::Sender<AuthState>,
}

impl AuthSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { api, state }
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, message: String) -> CoreError {
        self.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(message.clone());
        });
        CoreError::AuthenticationFailed { message }
    }

    /// Authenticate with email and password. On success the session
    /// cookie lands in the shared jar and `user` is populated.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        self.begin();
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        match self.api.post::<UserEnvelope, _>("login", &body).await {
            Ok(envelope) => {
                debug!(user = %envelope.user.email, "login succeeded");
                self.state.send_modify(|s| {
                    s.user = Some(envelope.user);
                    s.auth_checked = true;
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(e.to_string())),
        }
    }

    /// Probe the identity endpoint for an existing session. Sets
    /// `auth_checked` whether or not a session exists; a failed probe
    /// is not an error, just an unauthenticated state.
    pub async fn check_auth(&self) {
        self.begin();
        match self.api.get::<UserEnvelope>("user").await {
            Ok(envelope) => self.state.send_modify(|s| {
                s.user = Some(envelope.user);
                s.auth_checked = true;
                s.loading = false;
            }),
            Err(e) => {
                debug!("session probe failed: {e}");
                self.state.send_modify(|s| {
                    s.user = None;
                    s.auth_checked = true;
                    s.loading = false;
                });
            }
        }
    }

    /// End the session. The local user is cleared even when the server
    /// call fails; a half-dead session must not look signed in.
    pub async fn logout(&self) -> Result<(), CoreError> {
        self.begin();
        let result = self.api.post_empty("logout", &json!({})).await;
        self.state.send_modify(|s| {
            s.user = None;
            s.loading = false;
        });
        match result {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e.to_string())),
        }
    }

    /// Create an account. Does not sign in; callers follow up with
    /// [`Self::login`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), CoreError> {
        self.begin();
        let body = json!({
            "name": request.name,
            "email": request.email,
            "password": request.password.expose_secret(),
            "password_confirmation": request.password_confirmation.expose_secret(),
            "role": request.role,
            "phone": request.phone,
        });
        match self.api.post_empty("register", &body).await {
            Ok(()) => {
                self.state.send_modify(|s| s.loading = false);
                Ok(())
            }
            Err(e) => Err(self.record_write_failure(e)),
        }
    }

    /// Request a password-reset email.
    pub async fn send_password_reset_link(&self, email: &str) -> Result<(), CoreError> {
        self.begin();
        match self
            .api
            .post_empty("password/email", &json!({ "email": email }))
            .await
        {
            Ok(()) => {
                self.state.send_modify(|s| s.loading = false);
                Ok(())
            }
            Err(e) => Err(self.record_write_failure(e)),
        }
    }

    /// Complete a password reset with the emailed token.
    pub async fn reset_password(
        &self,
        email: &str,
        password: &SecretString,
        token: &str,
    ) -> Result<(), CoreError> {
        self.begin();
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
            "password_confirmation": password.expose_secret(),
            "token": token,
        });
        match self.api.post_empty("password/reset", &body).await {
            Ok(()) => {
                self.state.send_modify(|s| s.loading = false);
                Ok(())
            }
            Err(e) => Err(self.record_write_failure(e)),
        }
    }

    /// Update the signed-in user's profile, then refresh the session
    /// user from the response.
    pub async fn update_user(&self, changes: &serde_json::Value) -> Result<(), CoreError> {
        self.begin();
        match self.api.post::<UserEnvelope, _>("user", changes).await {
            Ok(envelope) => {
                self.state.send_modify(|s| {
                    s.user = Some(envelope.user);
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.record_write_failure(e)),
        }
    }

    fn record_write_failure(&self, err: glowdesk_api::Error) -> CoreError {
        let err = CoreError::from(err);
        match &err {
            CoreError::Validation { errors } => {
                let errors = errors.clone();
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.field_errors = Some(errors);
                });
            }
            other => {
                let message = other.to_string();
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(message);
                });
            }
        }
        err
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    pub fn clear_field_errors(&self) {
        self.state.send_modify(|s| s.field_errors = None);
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
