//! View projection for gallery snapshots.
//!
//! The store knows nothing about how cards are drawn; any surface that can
//! turn a snapshot into something visible implements [`GalleryView`]. The
//! projection is rebuilt from scratch on every change (user-paced
//! interactions only, no diffing).

use crate::models::{EntryId, GallerySnapshot, OriginKind, PreviewSource};

/// Capability interface: given a snapshot, produce a view.
pub trait GalleryView {
    fn render(&mut self, snapshot: &GallerySnapshot);
}

/// One visual card, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard {
    pub id: EntryId,
    pub slot: u32,
    pub preview: PreviewSource,
    /// Badge label, `"existing"` or `"new"`.
    pub origin_label: &'static str,
    pub is_cover: bool,
    pub alt_text: String,
    pub display_name: String,
}

/// What the gallery surface should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryViewModel {
    /// No entries: render the placeholder state instead of cards.
    Empty,
    /// One card per entry, in slot order.
    Cards(Vec<GalleryCard>),
}

/// Project a snapshot into the card list the renderer draws.
#[must_use]
pub fn build_view_model(snapshot: &GallerySnapshot) -> GalleryViewModel {
    if snapshot.is_empty() {
        return GalleryViewModel::Empty;
    }

    let cards = snapshot
        .entries
        .iter()
        .map(|entry| GalleryCard {
            id: entry.id,
            slot: entry.slot,
            preview: entry.preview.clone(),
            origin_label: entry.origin.as_str(),
            is_cover: entry.is_cover,
            alt_text: entry.alt_text.clone(),
            display_name: entry.display_name.clone(),
        })
        .collect();
    GalleryViewModel::Cards(cards)
}
