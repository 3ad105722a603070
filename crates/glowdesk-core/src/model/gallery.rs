// ── Gallery image domain type ──

use serde::{Deserialize, Serialize};

/// A stored gallery image. No metadata beyond the path reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: u64,
    pub image_path: String,
}
