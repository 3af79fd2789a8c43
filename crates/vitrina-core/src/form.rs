//! Native form field mirror for the surrounding listing form.
//!
//! The submission mechanism itself is out of scope; this module models the
//! form at its boundary. Per slot `i` (1-based) the form carries a file field
//! `image_{i}`, an alt-text field `image_alt_{i}`, a cover flag
//! `image_cover_{i}`, and, for images already persisted server-side, a
//! descriptor with the remote id and URL. One hidden field holds the
//! JSON-encoded list of deleted remote ids, created on first use.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ImageEntry, ImageOrigin, RemoteImageId, SelectedFile};

/// Name of the hidden field carrying deleted remote ids.
pub const DELETED_IDS_FIELD: &str = "deleted_image_ids";

/// Form-field name for slot `slot`'s file input.
#[must_use]
pub fn file_field_name(slot: u32) -> String {
    format!("image_{slot}")
}

/// Form-field name for slot `slot`'s alt-text input.
#[must_use]
pub fn alt_field_name(slot: u32) -> String {
    format!("image_alt_{slot}")
}

/// Form-field name for slot `slot`'s cover flag.
#[must_use]
pub fn cover_field_name(slot: u32) -> String {
    format!("image_cover_{slot}")
}

/// Descriptor attributes for an image persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDescriptor {
    pub remote_id: RemoteImageId,
    pub url: String,
    pub is_cover: bool,
}

/// Native fields backing one gallery slot.
///
/// `file` and `existing` are mutually exclusive: existing images are never
/// re-uploaded, so their file field stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotFields {
    pub file: Option<SelectedFile>,
    pub alt_text: String,
    pub is_cover: bool,
    pub existing: Option<ExistingDescriptor>,
}

impl SlotFields {
    fn clear(&mut self) {
        self.file = None;
        self.alt_text.clear();
        self.is_cover = false;
        self.existing = None;
    }
}

/// In-memory mirror of the external form the gallery synchronizes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDocument {
    slots: Vec<SlotFields>,
    deleted_ids: Option<String>,
}

impl FormDocument {
    /// An empty form with `capacity` slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![SlotFields::default(); capacity],
            deleted_ids: None,
        }
    }

    /// Number of slots the form carries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Fields for 1-based `slot`, if within capacity.
    #[must_use]
    pub fn slot(&self, slot: u32) -> Option<&SlotFields> {
        self.slots.get(slot.checked_sub(1)? as usize)
    }

    /// Mutable fields for 1-based `slot`, if within capacity.
    pub fn slot_mut(&mut self, slot: u32) -> Option<&mut SlotFields> {
        self.slots.get_mut(slot.checked_sub(1)? as usize)
    }

    /// Slots in order, 1-based numbering alongside.
    pub fn slots(&self) -> impl Iterator<Item = (u32, &SlotFields)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, fields)| (index as u32 + 1, fields))
    }

    /// Raw value of the hidden deleted-ids field, if it was created.
    #[must_use]
    pub fn deleted_ids_field(&self) -> Option<&str> {
        self.deleted_ids.as_deref()
    }

    fn set_deleted_ids(&mut self, value: String) {
        self.deleted_ids = Some(value);
    }
}

/// Rewrite the form's native fields from the current gallery state.
///
/// Live entries are written to their slot in order; every slot with no
/// corresponding entry is cleared. The deleted-ids field is created the
/// first time the queue is non-empty and updated thereafter.
pub fn sync_form(
    form: &mut FormDocument,
    entries: &[ImageEntry],
    deleted: &[RemoteImageId],
) -> Result<()> {
    for fields in &mut form.slots {
        fields.clear();
    }

    for entry in entries {
        let Some(fields) = form.slot_mut(entry.slot) else {
            tracing::warn!(slot = entry.slot, "entry slot beyond form capacity");
            continue;
        };

        fields.alt_text = entry.alt_text.clone();
        fields.is_cover = entry.is_cover;
        match &entry.origin {
            ImageOrigin::New { file, .. } => {
                fields.file = Some(file.clone());
                fields.existing = None;
            }
            ImageOrigin::Existing { id, url } => {
                fields.file = None;
                fields.existing = Some(ExistingDescriptor {
                    remote_id: *id,
                    url: url.clone(),
                    is_cover: entry.is_cover,
                });
            }
        }
    }

    if !deleted.is_empty() || form.deleted_ids.is_some() {
        form.set_deleted_ids(serde_json::to_string(deleted)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{ImageOrigin, LocalImageId};
    use crate::preview::PreviewRegistry;

    fn new_entry(slot: u32, alt: &str, is_cover: bool) -> (ImageEntry, PreviewRegistry) {
        let mut previews = PreviewRegistry::new();
        let file = SelectedFile::new("side.png", "image/png", vec![0_u8; 4]);
        let preview = previews.allocate(&file.mime_type, &file.bytes);
        let entry = ImageEntry {
            origin: ImageOrigin::New {
                id: LocalImageId::new(),
                file,
                preview,
            },
            alt_text: alt.to_string(),
            is_cover,
            slot,
            display_name: "side".to_string(),
        };
        (entry, previews)
    }

    fn existing_entry(slot: u32, remote: i64, is_cover: bool) -> ImageEntry {
        ImageEntry {
            origin: ImageOrigin::Existing {
                id: RemoteImageId::new(remote),
                url: format!("https://cdn.example.com/laptops/{remote}.jpg"),
            },
            alt_text: format!("photo {remote}"),
            is_cover,
            slot,
            display_name: format!("{remote}.jpg"),
        }
    }

    #[test]
    fn field_names_follow_the_slot_convention() {
        assert_eq!(file_field_name(3), "image_3");
        assert_eq!(alt_field_name(1), "image_alt_1");
        assert_eq!(cover_field_name(8), "image_cover_8");
    }

    #[test]
    fn sync_writes_each_entry_to_its_slot() {
        let mut form = FormDocument::new(4);
        let existing = existing_entry(1, 11, true);
        let (added, mut previews) = new_entry(2, "rear view", false);

        sync_form(&mut form, &[existing, added], &[]).unwrap();

        let first = form.slot(1).unwrap();
        assert_eq!(first.alt_text, "photo 11");
        assert!(first.is_cover);
        assert!(first.file.is_none(), "existing images are not re-uploaded");
        let descriptor = first.existing.as_ref().unwrap();
        assert_eq!(descriptor.remote_id, RemoteImageId::new(11));
        assert!(descriptor.is_cover);

        let second = form.slot(2).unwrap();
        assert_eq!(second.alt_text, "rear view");
        assert!(!second.is_cover);
        assert!(second.file.is_some());
        assert!(second.existing.is_none());

        previews.release_all();
    }

    #[test]
    fn sync_clears_slots_without_entries() {
        let mut form = FormDocument::new(3);
        let stale = form.slot_mut(3).unwrap();
        stale.alt_text = "stale".to_string();
        stale.is_cover = true;

        let entry = existing_entry(1, 5, true);
        sync_form(&mut form, &[entry], &[]).unwrap();

        let third = form.slot(3).unwrap();
        assert_eq!(third, &SlotFields::default());
    }

    #[test]
    fn deleted_ids_field_is_created_on_first_use() {
        let mut form = FormDocument::new(2);

        sync_form(&mut form, &[], &[]).unwrap();
        assert_eq!(form.deleted_ids_field(), None);

        let deleted = [RemoteImageId::new(3), RemoteImageId::new(7)];
        sync_form(&mut form, &[], &deleted).unwrap();
        assert_eq!(form.deleted_ids_field(), Some("[3,7]"));

        // Once created the field keeps tracking the queue.
        sync_form(&mut form, &[], &deleted).unwrap();
        assert_eq!(form.deleted_ids_field(), Some("[3,7]"));
    }

    #[test]
    fn slot_lookup_is_one_based() {
        let form = FormDocument::new(2);
        assert!(form.slot(0).is_none());
        assert!(form.slot(1).is_some());
        assert!(form.slot(2).is_some());
        assert!(form.slot(3).is_none());
    }
}
