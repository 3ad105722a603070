// HTTP client for the salon backend.
//
// Wraps `reqwest::Client` with base-URL joining, JSON/multipart body
// encoding, and uniform response handling. The session cookie jar in the
// underlying client forwards credentials on every request; callers only
// deal with paths and typed bodies.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::payload::{MethodOverride, Payload};
use crate::transport::TransportConfig;

/// Error body shape the backend uses for non-2xx responses.
///
/// 422 responses carry `errors`; most others carry `message`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<std::collections::HashMap<String, Vec<String>>>,
}

/// Async client for the Glowdesk REST backend.
///
/// All verbs reject with a structured [`Error`] on non-2xx status; the
/// 422 validation map and 401/404 classes are parsed here so consumers
/// can branch without touching raw responses.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a base URL and transport config.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically — session auth requires cookies.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap a pre-built `reqwest::Client` (tests, shared sessions).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        // A trailing slash makes `Url::join` treat the last path segment
        // as a directory, which is what relative API paths expect.
        let base_url = if base_url.path().ends_with('/') {
            base_url
        } else {
            let mut url = base_url;
            let path = format!("{}/", url.path());
            url.set_path(&path);
            url
        };
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Join a relative path (e.g. `"admin/products"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(Error::InvalidUrl)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(path, resp).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(path, resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(path, resp).await
    }

    pub async fn post_empty<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_empty(path, resp).await
    }

    /// POST that only succeeds on HTTP 201 (public booking submission).
    pub async fn post_created<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url} (expect 201)");

        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if status == StatusCode::CREATED {
            return Ok(());
        }
        if status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: "expected HTTP 201 Created".into(),
            });
        }
        Err(Self::parse_error(path, status, resp).await)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(path, resp).await
    }

    pub async fn put_empty<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_empty(path, resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(path, resp).await
    }

    /// Send a tagged [`Payload`] — JSON bodies go out under their own
    /// verb; multipart bodies always go out as POST, with `_method=PUT`
    /// appended when the logical operation is an update.
    pub async fn send_payload(
        &self,
        path: &str,
        payload: &Payload,
        method: MethodOverride,
    ) -> Result<(), Error> {
        let url = self.url(path)?;

        match payload {
            Payload::Json(value) => match method {
                MethodOverride::None => {
                    debug!("POST {url} (json)");
                    let resp = self.http.post(url).json(value).send().await?;
                    Self::handle_empty(path, resp).await
                }
                MethodOverride::Put => {
                    debug!("PUT {url} (json)");
                    let resp = self.http.put(url).json(value).send().await?;
                    Self::handle_empty(path, resp).await
                }
            },
            Payload::Multipart { fields, files } => {
                debug!(
                    "POST {url} (multipart, {} field(s), {} file(s))",
                    fields.len(),
                    files.len()
                );

                let mut form = reqwest::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name.clone(), value.clone());
                }
                for file in files {
                    let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.content_type)
                        .map_err(|e| Error::Api {
                            status: 0,
                            message: format!("invalid content type {:?}: {e}", file.content_type),
                        })?;
                    form = form.part(file.name.clone(), part);
                }

                let mut builder = self.http.post(url).multipart(form);
                if method == MethodOverride::Put {
                    builder = builder.query(&[("_method", "PUT")]);
                }

                let resp = builder.send().await?;
                Self::handle_empty(path, resp).await
            }
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(path, status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = truncate_utf8(&body, 200);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn handle_empty(path: &str, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(path, status, resp).await)
        }
    }

    /// Classify a non-2xx response into the error taxonomy.
    async fn parse_error(path: &str, status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::NOT_FOUND {
            return Error::NotFound { path: path.into() };
        }

        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorBody>(&raw).ok();

        // 419 is the backend's "session/CSRF token expired" status.
        if status == StatusCode::UNAUTHORIZED || status.as_u16() == 419 {
            let message = parsed
                .and_then(|b| b.message)
                .unwrap_or_else(|| "unauthenticated".into());
            return Error::Authentication { message };
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            if let Some(errors) = parsed.as_ref().and_then(|b| b.errors.clone()) {
                return Error::Validation { errors };
            }
        }

        let message = parsed.and_then(|b| b.message).unwrap_or_else(|| {
            if raw.is_empty() {
                status.to_string()
            } else {
                truncate_utf8(&raw, 200).to_owned()
            }
        });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Truncate to at most `max` bytes, backing off to the nearest char
/// boundary so multibyte UTF-8 never gets split.
fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
