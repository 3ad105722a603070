// ── Gallery slice ──

use std::sync::Arc;

use glowdesk_api::{ApiClient, FilePart, MethodOverride, Payload};
use tokio::sync::watch;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::GalleryImage;

const PATH: &str = "admin/gallery";

/// Per-file upload cap, enforced before anything leaves the process.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Salon photo gallery. Uploads are multipart-only and size-capped
/// client-side; there is no update operation, only add and remove.
pub struct GallerySlice {
    api: Arc<ApiClient>,
    slice: Slice<GalleryImage>,
}

impl GallerySlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            slice: Slice::new(),
        }
    }

    pub async fn fetch_all(&self) {
        self.slice.begin();
        match self.api.get::<Vec<GalleryImage>>(PATH).await {
            Ok(items) => self.slice.finish_items(items),
            Err(e) => self.slice.fail(e.to_string()),
        }
    }

    /// Upload one or more images, then refetch so the server-assigned
    /// ids and stored paths land in `items`.
    ///
    /// Any file over [`MAX_IMAGE_BYTES`] rejects the whole batch before
    /// the request is built; the failure is recorded in state like any
    /// other write failure.
    pub async fn upload(&self, files: Vec<FilePart>) -> Result<(), CoreError> {
        for file in &files {
            if file.size() > MAX_IMAGE_BYTES {
                let err = CoreError::AssetTooLarge {
                    file_name: file.file_name.clone(),
                    size_bytes: file.size(),
                    limit_bytes: MAX_IMAGE_BYTES,
                };
                self.slice.fail(err.to_string());
                return Err(err);
            }
        }

        // The server expects every file under the same array field.
        let files = files
            .into_iter()
            .map(|mut f| {
                f.name = "images[]".to_owned();
                f
            })
            .collect();
        let payload = Payload::Multipart {
            fields: Vec::new(),
            files,
        };

        match self
            .api
            .send_payload(PATH, &payload, MethodOverride::None)
            .await
        {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    pub async fn delete(&self, id: u64) -> Result<(), CoreError> {
        match self.api.delete(&format!("{PATH}/{id}")).await {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    pub fn clear_error(&self) {
        self.slice.clear_error();
    }

    pub fn clear_field_errors(&self) {
        self.slice.clear_field_errors();
    }

    pub fn snapshot(&self) -> SliceState<GalleryImage> {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SliceState<GalleryImage>> {
        self.slice.subscribe()
    }
}
