// ── Core error types ──
//
// User-facing errors from glowdesk-core. Consumers never see raw
// reqwest failures or HTTP status codes directly; the
// `From<glowdesk_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use std::collections::HashMap;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// 422-class rejection with a field → messages map. Slices route
    /// this into `field_errors`, never into the generic `error` slot.
    #[error("Validation failed ({} field(s))", errors.len())]
    Validation { errors: HashMap<String, Vec<String>> },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Client-side upload cap exceeded; the request is never sent.
    #[error("File {file_name} is {size_bytes} bytes, over the {limit_bytes} byte limit")]
    AssetTooLarge {
        file_name: String,
        size_bytes: usize,
        limit_bytes: usize,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The per-field validation map, if this is a 422-class error.
    pub fn validation_errors(&self) -> Option<&HashMap<String, Vec<String>>> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<glowdesk_api::Error> for CoreError {
    fn from(err: glowdesk_api::Error) -> Self {
        match err {
            glowdesk_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            glowdesk_api::Error::Validation { errors } => CoreError::Validation { errors },
            glowdesk_api::Error::NotFound { path } => CoreError::NotFound { resource: path },
            glowdesk_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            glowdesk_api::Error::Transport(e) => CoreError::Api {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            glowdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            glowdesk_api::Error::Tls(message) => CoreError::Config { message },
            glowdesk_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response shape: {message}"),
                status: None,
            },
        }
    }
}
