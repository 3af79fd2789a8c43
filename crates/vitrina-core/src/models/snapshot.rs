//! Read-only projections of the gallery state.

use super::entry::{EntryId, OriginKind};

/// Where the renderer should load an entry's preview from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    /// Remote URL of an image already persisted server-side.
    RemoteUrl(String),
    /// Resolved transient handle for a not-yet-uploaded file.
    DataUri(String),
    /// The handle was already released; the renderer shows a placeholder.
    Missing,
}

/// One entry as the renderer and other in-page consumers see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    pub id: EntryId,
    pub origin: OriginKind,
    pub preview: PreviewSource,
    pub alt_text: String,
    pub is_cover: bool,
    pub slot: u32,
    pub display_name: String,
}

/// Read-only projection of the whole gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySnapshot {
    /// Entries in slot order.
    pub entries: Vec<EntrySnapshot>,
    /// Count of entries selected during this session.
    pub new_count: usize,
    /// Count of entries persisted before this session.
    pub existing_count: usize,
    /// Id of the current cover entry, if the gallery is non-empty.
    pub cover_id: Option<EntryId>,
    /// Monotonic revision, bumped on every image-set mutation.
    pub revision: u64,
}

impl GallerySnapshot {
    /// Total number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the gallery holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
