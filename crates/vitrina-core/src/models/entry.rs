//! Gallery entry model

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::preview::PreviewId;

/// Server-assigned identifier for an image persisted before this edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteImageId(i64);

impl RemoteImageId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RemoteImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session-local identifier for a not-yet-uploaded image, using UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalImageId(Uuid);

impl LocalImageId {
    /// Create a new unique local ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID.
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for LocalImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocalImageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Stable identifier for a gallery entry.
///
/// Existing images keep the id the server assigned them; new images carry a
/// session-unique local id until the server takes over after submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryId {
    Remote(RemoteImageId),
    Local(LocalImageId),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(id) => write!(f, "remote:{id}"),
            Self::Local(id) => write!(f, "local:{id}"),
        }
    }
}

/// A locally-selected file held until the surrounding form submits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original file name.
    pub file_name: String,
    /// Content MIME type.
    pub mime_type: String,
    /// Raw file bytes, shared between the entry and the form mirror.
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Wrap a selected file.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// File size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Discriminant of an entry's origin, used for badges and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginKind {
    Existing,
    New,
}

impl OriginKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::New => "new",
        }
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a gallery entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Persisted server-side before this edit session; displayed from its
    /// remote URL and never re-uploaded.
    Existing { id: RemoteImageId, url: String },
    /// Selected locally during this session; displayed through a transient
    /// preview handle until the form submits the file.
    New {
        id: LocalImageId,
        file: SelectedFile,
        preview: PreviewId,
    },
}

impl ImageOrigin {
    #[must_use]
    pub const fn kind(&self) -> OriginKind {
        match self {
            Self::Existing { .. } => OriginKind::Existing,
            Self::New { .. } => OriginKind::New,
        }
    }
}

/// One image occupying one gallery slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Origin and the payload that comes with it.
    pub origin: ImageOrigin,
    /// User-editable alt text, initialized from the file name or slot number.
    pub alt_text: String,
    /// Cover designation. At most one entry carries it at any time.
    pub is_cover: bool,
    /// 1-based position, contiguous across the live collection.
    pub slot: u32,
    /// Human-readable label shown on the card.
    pub display_name: String,
}

impl ImageEntry {
    /// Stable identifier for this entry.
    #[must_use]
    pub const fn id(&self) -> EntryId {
        match &self.origin {
            ImageOrigin::Existing { id, .. } => EntryId::Remote(*id),
            ImageOrigin::New { id, .. } => EntryId::Local(*id),
        }
    }

    /// Whether this entry was selected during the current session.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self.origin, ImageOrigin::New { .. })
    }

    /// The transient preview handle, for new entries.
    #[must_use]
    pub const fn preview_id(&self) -> Option<PreviewId> {
        match &self.origin {
            ImageOrigin::Existing { .. } => None,
            ImageOrigin::New { preview, .. } => Some(*preview),
        }
    }
}
