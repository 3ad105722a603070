use std::collections::HashMap;

use thiserror::Error;

/// Top-level error type for the `glowdesk-api` crate.
///
/// Covers every failure mode of a request through [`ApiClient`]:
/// transport, authentication, validation, and response decoding.
/// `glowdesk-core` maps these into slice state and domain errors.
///
/// [`ApiClient`]: crate::ApiClient
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Authentication ──────────────────────────────────────────────
    /// 401/419-class response: no session, expired session, or bad
    /// credentials. The message is the server's, when it sent one.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Validation ──────────────────────────────────────────────────
    /// 422-class response carrying a per-field error map
    /// (`{"errors": {"name": ["Name is required"]}}`).
    #[error("Validation failed ({} field(s))", errors.len())]
    Validation { errors: HashMap<String, Vec<String>> },

    // ── Data ────────────────────────────────────────────────────────
    /// 404-class response.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The per-field validation map, if this is a 422-class error.
    pub fn validation_errors(&self) -> Option<&HashMap<String, Vec<String>>> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the server rejected the session or credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
