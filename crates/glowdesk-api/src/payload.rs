// Request body encoding.
//
// Forms either carry plain structured data or mix fields with binary
// attachments (avatars, product/service images, gallery uploads). The
// tag decides the wire encoding; callers never sniff value types.

use bytes::Bytes;

/// A binary attachment inside a multipart request.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name (e.g. `"avatar"`, `"images[]"`).
    pub name: String,
    /// Original file name sent in the part headers.
    pub file_name: String,
    /// MIME type (e.g. `"image/jpeg"`).
    pub content_type: String,
    pub bytes: Bytes,
}

impl FilePart {
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// A request body, tagged by encoding.
#[derive(Debug, Clone)]
pub enum Payload {
    /// `application/json` body.
    Json(serde_json::Value),
    /// `multipart/form-data` body: text fields plus file attachments.
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<FilePart>,
    },
}

impl Payload {
    /// Serialize any `Serialize` value into a JSON payload.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, crate::error::Error> {
        let value = serde_json::to_value(value).map_err(|e| crate::error::Error::Deserialization {
            message: format!("failed to encode request body: {e}"),
            body: String::new(),
        })?;
        Ok(Self::Json(value))
    }

    /// All file attachments, empty for JSON payloads.
    pub fn files(&self) -> &[FilePart] {
        match self {
            Self::Json(_) => &[],
            Self::Multipart { files, .. } => files,
        }
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// Whether a write should be tunneled through POST with a method override.
///
/// The backend accepts multipart bodies only on POST, so multipart updates
/// go out as `POST {path}?_method=PUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodOverride {
    None,
    Put,
}
