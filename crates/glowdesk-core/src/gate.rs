// ── Session gate ──
//
// Route authorization for the admin area. Given an inbound request's
// path and cookies, decide whether to let it through or bounce it to
// the login page. Fail closed: any doubt — transport error, odd
// response shape, missing or non-admin user — means redirect.

use percent_encoding::percent_decode_str;
use reqwest::header::{COOKIE, REFERER};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::CoreError;
use crate::model::User;

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not an admin route, or the session belongs to an admin.
    Allow,
    /// Admin route without a verified admin session.
    RedirectToLogin,
}

/// Identity endpoint response. `user` may be absent or null for an
/// anonymous session.
#[derive(Debug, Deserialize)]
struct IdentityResponse {
    #[serde(default)]
    user: Option<User>,
}

/// Checks admin-area requests against the backend's identity endpoint.
///
/// The gate never trusts anything client-side: the role claim is
/// re-validated on every check by replaying the request's cookies to
/// `GET {api_base}/user`.
pub struct SessionGate {
    http: reqwest::Client,
    api_base: Url,
    admin_prefix: String,
    login_path: String,
}

impl SessionGate {
    /// Build a gate against the given API base URL.
    ///
    /// Uses a jar-less HTTP client: the gate forwards the inbound
    /// request's `Cookie` header verbatim and must never mix in cookies
    /// of its own.
    pub fn new(api_base: Url) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("glowdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::Config {
                message: format!("failed to build gate HTTP client: {e}"),
            })?;
        // Trailing slash so `join("user")` appends instead of replacing
        // the last path segment.
        let api_base = if api_base.path().ends_with('/') {
            api_base
        } else {
            let mut url = api_base;
            let path = format!("{}/", url.path());
            url.set_path(&path);
            url
        };
        Ok(Self {
            http,
            api_base,
            admin_prefix: "/admin".to_owned(),
            login_path: "/login".to_owned(),
        })
    }

    pub fn with_admin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.admin_prefix = prefix.into();
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Where to send rejected requests.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Whether `path` falls under the protected prefix. `/admin` and
    /// `/admin/...` are protected; `/administrator` is not.
    fn is_admin_route(&self, path: &str) -> bool {
        path == self.admin_prefix || path.starts_with(&format!("{}/", self.admin_prefix))
    }

    /// Decide whether a request may proceed.
    ///
    /// `cookie_header` is the raw inbound `Cookie` header, forwarded to
    /// the identity endpoint as-is. `referer` is the page the request
    /// came from, if any.
    pub async fn check(
        &self,
        path: &str,
        cookie_header: Option<&str>,
        referer: Option<&str>,
    ) -> GateDecision {
        if !self.is_admin_route(path) {
            return GateDecision::Allow;
        }

        let Some(cookies) = cookie_header else {
            debug!(path, "admin route without cookies");
            return GateDecision::RedirectToLogin;
        };

        match self.fetch_identity(cookies, referer).await {
            Ok(Some(user)) if user.role.is_admin() => {
                debug!(path, user = %user.email, "admin session verified");
                GateDecision::Allow
            }
            Ok(Some(user)) => {
                debug!(path, role = %user.role, "non-admin session rejected");
                GateDecision::RedirectToLogin
            }
            Ok(None) => {
                debug!(path, "no session user");
                GateDecision::RedirectToLogin
            }
            Err(e) => {
                debug!(path, "identity check failed: {e}");
                GateDecision::RedirectToLogin
            }
        }
    }

    /// Replay the inbound session to the identity endpoint.
    async fn fetch_identity(
        &self,
        cookies: &str,
        referer: Option<&str>,
    ) -> Result<Option<User>, CoreError> {
        let url = self.api_base.join("user").map_err(|e| CoreError::Config {
            message: format!("invalid identity URL: {e}"),
        })?;

        let mut req = self
            .http
            .get(url)
            .header(COOKIE, cookies)
            .header("Accept", "application/json")
            .header("X-Requested-With", "XMLHttpRequest");
        if let Some(token) = extract_xsrf_token(cookies) {
            req = req.header("X-XSRF-TOKEN", token);
        }
        if let Some(referer) = referer {
            req = req.header(REFERER, referer);
        }

        let resp = req.send().await.map_err(|e| CoreError::Api {
            status: None,
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                status: Some(status.as_u16()),
                message: format!("identity endpoint answered {status}"),
            });
        }

        let identity: IdentityResponse = resp.json().await.map_err(|e| CoreError::Api {
            status: None,
            message: format!("unexpected identity response: {e}"),
        })?;
        Ok(identity.user)
    }
}

/// Pull the XSRF token out of a raw `Cookie` header. The backend sets it
/// URL-encoded, so it is decoded before being echoed back in the
/// `X-XSRF-TOKEN` header.
fn extract_xsrf_token(cookies: &str) -> Option<String> {
    let start = cookies.find("XSRF-TOKEN=")? + "XSRF-TOKEN=".len();
    let rest = &cookies[start..];
    let raw = rest.split(';').next()?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xsrf_token_is_decoded() {
        let cookies = "session=abc; XSRF-TOKEN=eyJpdiI6%3D%3D; other=1";
        assert_eq!(extract_xsrf_token(cookies).as_deref(), Some("eyJpdiI6=="));
    }

    #[test]
    fn missing_token_is_none() {
        assert!(extract_xsrf_token("session=abc").is_none());
        assert!(extract_xsrf_token("XSRF-TOKEN=; other=1").is_none());
    }
}
