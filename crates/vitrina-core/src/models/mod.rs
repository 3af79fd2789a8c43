//! Data models for the gallery editor.

mod entry;
mod snapshot;

pub use entry::{
    EntryId, ImageEntry, ImageOrigin, LocalImageId, OriginKind, RemoteImageId, SelectedFile,
};
pub use snapshot::{EntrySnapshot, GallerySnapshot, PreviewSource};
