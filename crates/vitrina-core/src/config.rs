//! Fixed gallery limits.

/// Maximum number of images per listing.
pub const MAX_IMAGES: usize = 8;

/// Upload size ceiling in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Minimum accepted width in pixels.
pub const MIN_WIDTH: u32 = 400;

/// Minimum accepted height in pixels.
pub const MIN_HEIGHT: u32 = 300;

/// Raster formats the gallery accepts.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Gallery limits bundle.
///
/// The application always runs with `Default`; the struct exists so tests can
/// exercise the limits without multi-megabyte fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Maximum number of entries the gallery holds.
    pub max_entries: usize,
    /// Per-file upload size ceiling in bytes.
    pub max_upload_bytes: usize,
    /// Minimum accepted pixel width.
    pub min_width: u32,
    /// Minimum accepted pixel height.
    pub min_height: u32,
    /// Whether candidate files are decoded to check their dimensions.
    pub validate_dimensions: bool,
    /// Accepted MIME types.
    pub accepted_mime_types: &'static [&'static str],
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_IMAGES,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            validate_dimensions: true,
            accepted_mime_types: ACCEPTED_MIME_TYPES,
        }
    }
}

impl GalleryConfig {
    /// Whether `mime_type` is on the accepted list.
    ///
    /// Comparison is case-insensitive and treats the common `image/jpg`
    /// misspelling as JPEG.
    #[must_use]
    pub fn accepts_mime_type(&self, mime_type: &str) -> bool {
        let normalized = mime_type.trim().to_ascii_lowercase();
        let normalized = if normalized == "image/jpg" {
            "image/jpeg".to_string()
        } else {
            normalized
        };
        self.accepted_mime_types.contains(&normalized.as_str())
    }
}
