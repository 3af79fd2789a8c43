//! Gallery state store.
//!
//! Owns the ordered collection of existing and new image entries, the
//! deletion queue, the cover designation, and the preview handles backing
//! not-yet-uploaded files. All mutations run synchronously inside an event
//! handler except validation decoding, which is awaited per file.
//!
//! Invariants held after every mutation:
//! - `entries.len() <= config.max_entries`
//! - slots are the contiguous permutation `1..=entries.len()`
//! - a non-empty gallery has exactly one cover entry
//! - a remote id is never live and queued for deletion at the same time
//! - every preview handle is released exactly once

use std::fmt;

use crate::config::GalleryConfig;
use crate::error::{Error, Result};
use crate::form::{self, FormDocument};
use crate::models::{
    EntryId, EntrySnapshot, GallerySnapshot, ImageEntry, ImageOrigin, LocalImageId, OriginKind,
    PreviewSource, RemoteImageId, SelectedFile,
};
use crate::preview::PreviewRegistry;
use crate::util;
use crate::validate;

/// Callback invoked after every image-set mutation.
pub type ChangeListener = Box<dyn FnMut(&GallerySnapshot)>;

/// One file rejected during an `add_images` batch.
#[derive(Debug)]
pub struct RejectedFile {
    pub file_name: String,
    pub error: Error,
}

/// Outcome of one `add_images` batch. Rejections are per-file and never
/// abort the batch; the capacity warning is reported at most once.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Files accepted and appended as new entries.
    pub accepted: usize,
    /// Files rejected by validation, in input order.
    pub rejected: Vec<RejectedFile>,
    /// Set when files were dropped for lack of free slots.
    pub capacity_error: Option<Error>,
}

impl BatchOutcome {
    /// User-visible messages: one per rejected file plus the capacity
    /// warning, if any.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        let mut notices: Vec<String> = self
            .rejected
            .iter()
            .map(|rejected| rejected.error.to_string())
            .collect();
        if let Some(error) = &self.capacity_error {
            notices.push(error.to_string());
        }
        notices
    }

    /// Whether every input file was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.capacity_error.is_none()
    }
}

/// Capacity-gated portion of an incoming batch. Files beyond the remaining
/// capacity are dropped before validation.
#[derive(Debug)]
pub struct AdditionPlan {
    pub to_validate: Vec<SelectedFile>,
    pub capacity_error: Option<Error>,
}

/// The gallery state store. See the module docs for the invariants.
pub struct GalleryStore {
    config: GalleryConfig,
    entries: Vec<ImageEntry>,
    deletion_queue: Vec<RemoteImageId>,
    previews: PreviewRegistry,
    revision: u64,
    dirty: bool,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for GalleryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryStore")
            .field("entries", &self.entries)
            .field("deletion_queue", &self.deletion_queue)
            .field("revision", &self.revision)
            .field("dirty", &self.dirty)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for GalleryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryStore {
    /// An empty store with the fixed production limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GalleryConfig::default())
    }

    /// An empty store with explicit limits.
    #[must_use]
    pub fn with_config(config: GalleryConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            deletion_queue: Vec::new(),
            previews: PreviewRegistry::new(),
            revision: 0,
            dirty: false,
            listeners: Vec::new(),
        }
    }

    /// Rebuild the gallery from the external form's current fields.
    ///
    /// A slot whose file input already holds a locally-selected file (left
    /// over from a failed submission) becomes a New entry with a fresh
    /// preview handle; a slot carrying persisted-image attributes becomes an
    /// Existing entry. Returns the number of entries loaded. If none of the
    /// loaded entries is flagged as cover, the lowest slot is promoted.
    pub fn hydrate(&mut self, document: &FormDocument) -> usize {
        self.reset();

        let scan = self.config.max_entries.min(document.capacity()) as u32;
        for slot in 1..=scan {
            let Some(fields) = document.slot(slot) else {
                continue;
            };

            if let Some(file) = &fields.file {
                let preview = self.previews.allocate(&file.mime_type, &file.bytes);
                let alt_text = if fields.alt_text.trim().is_empty() {
                    util::default_alt_text(&file.file_name, slot)
                } else {
                    fields.alt_text.clone()
                };
                self.entries.push(ImageEntry {
                    display_name: file.file_name.clone(),
                    origin: ImageOrigin::New {
                        id: LocalImageId::new(),
                        file: file.clone(),
                        preview,
                    },
                    alt_text,
                    is_cover: fields.is_cover,
                    slot,
                });
            } else if let Some(descriptor) = &fields.existing {
                let display_name = util::file_name_from_url(&descriptor.url)
                    .map_or_else(|| format!("Image {slot}"), ToString::to_string);
                let alt_text = if fields.alt_text.trim().is_empty() {
                    util::default_alt_text(&display_name, slot)
                } else {
                    fields.alt_text.clone()
                };
                self.entries.push(ImageEntry {
                    origin: ImageOrigin::Existing {
                        id: descriptor.remote_id,
                        url: descriptor.url.clone(),
                    },
                    alt_text,
                    is_cover: descriptor.is_cover || fields.is_cover,
                    slot,
                    display_name,
                });
            }
        }

        self.renumber_slots();
        self.enforce_single_cover();

        let count = self.entries.len();
        if count > 0 {
            self.revision += 1;
            tracing::info!(count, "hydrated gallery entries from form");
            self.notify();
        }
        count
    }

    /// Split an incoming batch at the remaining capacity. Excess files are
    /// dropped without being validated and reported once.
    pub fn plan_addition(&self, mut files: Vec<SelectedFile>) -> AdditionPlan {
        let free = self.config.max_entries.saturating_sub(self.entries.len());
        let dropped = files.len().saturating_sub(free);
        files.truncate(free);
        AdditionPlan {
            to_validate: files,
            capacity_error: (dropped > 0).then(|| Error::CapacityExceeded {
                dropped,
                max_entries: self.config.max_entries,
            }),
        }
    }

    /// Append already-validated files as New entries.
    ///
    /// Re-checks capacity in case the store changed while validation was in
    /// flight. If no entry currently carries the cover flag, the first file
    /// appended here becomes the cover. Returns the number appended.
    pub fn commit_addition(&mut self, files: Vec<SelectedFile>) -> usize {
        let free = self.config.max_entries.saturating_sub(self.entries.len());
        let dropped_late = files.len().saturating_sub(free);
        if dropped_late > 0 {
            tracing::warn!(
                dropped_late,
                "capacity shrank while validating; dropping validated files"
            );
        }

        let had_cover = self.entries.iter().any(|entry| entry.is_cover);
        let mut added = 0;
        for file in files.into_iter().take(free) {
            let slot = self.entries.len() as u32 + 1;
            let preview = self.previews.allocate(&file.mime_type, &file.bytes);
            let alt_text = util::default_alt_text(&file.file_name, slot);
            let display_name = file.file_name.clone();
            self.entries.push(ImageEntry {
                origin: ImageOrigin::New {
                    id: LocalImageId::new(),
                    file,
                    preview,
                },
                alt_text,
                is_cover: false,
                slot,
                display_name,
            });
            added += 1;
        }

        if added > 0 {
            if !had_cover {
                let first_of_batch = self.entries.len() - added;
                self.entries[first_of_batch].is_cover = true;
            }
            self.touch();
            self.notify();
        }
        added
    }

    /// Validate and append a batch of candidate files.
    ///
    /// Files are processed in order until capacity is exhausted; each
    /// rejection is reported per file and never aborts the rest of the
    /// batch. Decoding awaits sequentially so slot assignment stays
    /// deterministic.
    pub async fn add_images(&mut self, files: Vec<SelectedFile>) -> BatchOutcome {
        let config = self.config;
        let AdditionPlan {
            to_validate,
            mut capacity_error,
        } = self.plan_addition(files);

        let mut accepted_files = Vec::new();
        let mut rejected = Vec::new();
        for file in to_validate {
            match validate::validate_candidate(&file, &config).await {
                Ok(()) => accepted_files.push(file),
                Err(error) => {
                    tracing::debug!(file_name = %file.file_name, %error, "rejected candidate file");
                    rejected.push(RejectedFile {
                        file_name: file.file_name.clone(),
                        error,
                    });
                }
            }
        }

        let validated = accepted_files.len();
        let accepted = self.commit_addition(accepted_files);
        if accepted < validated {
            let late = validated - accepted;
            capacity_error = Some(match capacity_error {
                Some(Error::CapacityExceeded { dropped, max_entries }) => {
                    Error::CapacityExceeded {
                        dropped: dropped + late,
                        max_entries,
                    }
                }
                _ => Error::CapacityExceeded {
                    dropped: late,
                    max_entries: config.max_entries,
                },
            });
        }

        BatchOutcome {
            accepted,
            rejected,
            capacity_error,
        }
    }

    /// Designate `id` as the cover, clearing the flag everywhere else.
    pub fn set_cover(&mut self, id: EntryId) -> Result<()> {
        let index = self.position(id).ok_or(Error::UnknownEntry(id))?;
        for entry in &mut self.entries {
            entry.is_cover = false;
        }
        self.entries[index].is_cover = true;
        self.touch();
        self.notify();
        Ok(())
    }

    /// Remove `id` from the gallery.
    ///
    /// Interactive confirmation is the caller's responsibility. Existing
    /// entries join the deletion queue for the server; New entries release
    /// their preview handle. If the cover was removed and entries remain,
    /// the lowest surviving slot is promoted.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<()> {
        let index = self.position(id).ok_or(Error::UnknownEntry(id))?;
        let removed = self.entries.remove(index);

        match removed.origin {
            ImageOrigin::Existing { id: remote_id, .. } => {
                if self.deletion_queue.contains(&remote_id) {
                    tracing::warn!(%remote_id, "remote id already queued for deletion");
                } else {
                    self.deletion_queue.push(remote_id);
                }
            }
            ImageOrigin::New { preview, .. } => {
                self.previews.release(preview);
            }
        }

        if removed.is_cover {
            if let Some(first) = self.entries.first_mut() {
                first.is_cover = true;
            }
        }
        self.renumber_slots();
        self.touch();
        self.notify();
        Ok(())
    }

    /// Move the entry at `from` to `to` (array-move semantics, 0-based).
    ///
    /// The cover designation travels with the entry. Returns `false`
    /// without touching anything when the indices are equal or out of
    /// bounds.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.renumber_slots();
        self.touch();
        self.notify();
        true
    }

    /// Update an entry's alt text.
    ///
    /// Marks the session dirty for the next synchronization pass; no
    /// re-render and no change notification (the editing input already
    /// shows the text).
    pub fn update_alt_text(&mut self, id: EntryId, text: impl Into<String>) -> Result<()> {
        let index = self.position(id).ok_or(Error::UnknownEntry(id))?;
        self.entries[index].alt_text = text.into();
        self.dirty = true;
        Ok(())
    }

    /// Read-only projection of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GallerySnapshot {
        let entries: Vec<EntrySnapshot> = self
            .entries
            .iter()
            .map(|entry| {
                let preview = match &entry.origin {
                    ImageOrigin::Existing { url, .. } => PreviewSource::RemoteUrl(url.clone()),
                    ImageOrigin::New { preview, .. } => {
                        self.previews.resolve(*preview).map_or_else(
                            || {
                                tracing::warn!(id = %entry.id(), "preview handle missing for live entry");
                                PreviewSource::Missing
                            },
                            |uri| PreviewSource::DataUri(uri.to_string()),
                        )
                    }
                };
                EntrySnapshot {
                    id: entry.id(),
                    origin: entry.origin.kind(),
                    preview,
                    alt_text: entry.alt_text.clone(),
                    is_cover: entry.is_cover,
                    slot: entry.slot,
                    display_name: entry.display_name.clone(),
                }
            })
            .collect();

        let new_count = entries
            .iter()
            .filter(|entry| entry.origin == OriginKind::New)
            .count();
        GallerySnapshot {
            existing_count: entries.len() - new_count,
            new_count,
            cover_id: self.cover_id(),
            revision: self.revision,
            entries,
        }
    }

    /// Rewrite the external form's fields from the current state and clear
    /// the dirty flag.
    pub fn sync_into(&mut self, document: &mut FormDocument) -> Result<()> {
        form::sync_form(document, &self.entries, &self.deletion_queue)?;
        self.dirty = false;
        Ok(())
    }

    /// Register a listener invoked after every image-set mutation.
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    /// Release every live preview handle and drop all session state.
    pub fn teardown(&mut self) {
        self.entries.clear();
        self.deletion_queue.clear();
        let released = self.previews.release_all();
        if released > 0 {
            tracing::debug!(released, "released preview handles at teardown");
        }
    }

    /// Live entries in slot order.
    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Remote ids queued for server-side deletion on submit.
    #[must_use]
    pub fn deletion_queue(&self) -> &[RemoteImageId] {
        &self.deletion_queue
    }

    /// Id of the current cover entry.
    #[must_use]
    pub fn cover_id(&self) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|entry| entry.is_cover)
            .map(ImageEntry::id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The limits this store was built with.
    #[must_use]
    pub const fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Monotonic revision, bumped on every image-set mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the state has diverged from the last synchronization pass.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Preview handle bookkeeping, for diagnostics.
    #[must_use]
    pub const fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    fn renumber_slots(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.slot = index as u32 + 1;
        }
    }

    /// Keep the first flagged cover, clear any others, promote the first
    /// entry when none is flagged.
    fn enforce_single_cover(&mut self) {
        let mut seen = false;
        for entry in &mut self.entries {
            if entry.is_cover {
                if seen {
                    entry.is_cover = false;
                } else {
                    seen = true;
                }
            }
        }
        if !seen {
            if let Some(first) = self.entries.first_mut() {
                first.is_cover = true;
            }
        }
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.deletion_queue.clear();
        self.previews.release_all();
        self.dirty = false;
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.dirty = true;
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    use image::{ImageBuffer, ImageFormat, Rgba};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::form::ExistingDescriptor;

    fn png_file(name: &str, width: u32, height: u32) -> SelectedFile {
        let pixels = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_fn(width, height, |_x, _y| {
            Rgba([90, 120, 240, 255])
        });

        let mut cursor = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        SelectedFile::new(name, "image/png", cursor.into_inner())
    }

    fn valid_files(count: usize) -> Vec<SelectedFile> {
        (1..=count)
            .map(|index| png_file(&format!("photo-{index}.png"), 640, 480))
            .collect()
    }

    fn assert_slots_contiguous(store: &GalleryStore) {
        let slots: Vec<u32> = store.entries().iter().map(|entry| entry.slot).collect();
        let expected: Vec<u32> = (1..=store.len() as u32).collect();
        assert_eq!(slots, expected, "slots must be the permutation 1..=len");
    }

    fn assert_single_cover(store: &GalleryStore) {
        let covers = store
            .entries()
            .iter()
            .filter(|entry| entry.is_cover)
            .count();
        if store.is_empty() {
            assert_eq!(covers, 0);
        } else {
            assert_eq!(covers, 1, "non-empty gallery must have exactly one cover");
        }
    }

    #[tokio::test]
    async fn adding_three_valid_files_fills_slots_and_promotes_cover() {
        let mut store = GalleryStore::new();
        let outcome = store.add_images(valid_files(3)).await;

        assert_eq!(outcome.accepted, 3);
        assert!(outcome.is_clean());
        assert_eq!(store.len(), 3);
        assert_slots_contiguous(&store);
        assert_single_cover(&store);
        assert!(store.entries()[0].is_cover, "slot 1 becomes the cover");
        assert_eq!(store.cover_id(), Some(store.entries()[0].id()));
    }

    #[tokio::test]
    async fn unsupported_format_is_rejected_without_touching_the_store() {
        let mut store = GalleryStore::new();
        let bmp = SelectedFile::new("scan.bmp", "image/bmp", vec![0_u8; 32]);

        let outcome = store.add_images(vec![bmp]).await;

        assert_eq!(outcome.accepted, 0);
        assert_eq!(outcome.rejected.len(), 1);
        let rejection = &outcome.rejected[0];
        assert_eq!(rejection.file_name, "scan.bmp");
        assert!(matches!(rejection.error, Error::InvalidFormat { .. }));
        assert!(rejection.error.is_per_file());
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn rejections_do_not_abort_the_batch() {
        let mut store = GalleryStore::new();
        let files = vec![
            png_file("good-one.png", 640, 480),
            SelectedFile::new("scan.bmp", "image/bmp", vec![0_u8; 32]),
            png_file("good-two.png", 640, 480),
        ];

        let outcome = store.add_images(files).await;

        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(store.len(), 2);
        assert_slots_contiguous(&store);
        assert_single_cover(&store);
    }

    #[tokio::test]
    async fn full_gallery_rejects_the_whole_batch_with_one_capacity_error() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(8)).await;
        assert_eq!(store.len(), 8);

        let outcome = store.add_images(valid_files(2)).await;

        assert_eq!(outcome.accepted, 0);
        assert!(outcome.rejected.is_empty(), "excess files are not validated");
        assert!(matches!(
            outcome.capacity_error,
            Some(Error::CapacityExceeded {
                dropped: 2,
                max_entries: 8
            })
        ));
        assert_eq!(store.len(), 8);
    }

    #[tokio::test]
    async fn overflow_accepts_up_to_the_remaining_capacity() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(6)).await;

        let outcome = store.add_images(valid_files(3)).await;

        assert_eq!(outcome.accepted, 2);
        assert!(matches!(
            outcome.capacity_error,
            Some(Error::CapacityExceeded { dropped: 1, .. })
        ));
        assert_eq!(store.len(), 8);
        assert_slots_contiguous(&store);
        assert_eq!(outcome.notices().len(), 1);
    }

    #[tokio::test]
    async fn deleting_the_cover_renumbers_and_promotes_the_next_entry() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(3)).await;
        let cover = store.entries()[0].id();
        let runner_up = store.entries()[1].id();

        store.delete_entry(cover).unwrap();

        assert_eq!(store.len(), 2);
        assert_slots_contiguous(&store);
        assert_single_cover(&store);
        assert_eq!(store.cover_id(), Some(runner_up));
        assert_eq!(store.entries()[0].slot, 1);
    }

    #[tokio::test]
    async fn deleting_a_new_entry_releases_its_preview_exactly_once() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(2)).await;
        let id = store.entries()[1].id();

        assert_eq!(store.previews().live_count(), 2);
        store.delete_entry(id).unwrap();

        assert_eq!(store.previews().live_count(), 1);
        assert_eq!(store.previews().released_count(), 1);
        assert!(store.deletion_queue().is_empty());
    }

    #[test]
    fn deleting_an_existing_entry_queues_its_remote_id() {
        let mut form = FormDocument::new(8);
        form.slot_mut(1).unwrap().existing = Some(ExistingDescriptor {
            remote_id: RemoteImageId::new(31),
            url: "https://cdn.example.com/laptops/31.jpg".to_string(),
            is_cover: true,
        });
        form.slot_mut(2).unwrap().existing = Some(ExistingDescriptor {
            remote_id: RemoteImageId::new(32),
            url: "https://cdn.example.com/laptops/32.jpg".to_string(),
            is_cover: false,
        });

        let mut store = GalleryStore::new();
        assert_eq!(store.hydrate(&form), 2);

        store
            .delete_entry(EntryId::Remote(RemoteImageId::new(32)))
            .unwrap();

        assert_eq!(store.deletion_queue(), &[RemoteImageId::new(32)]);
        assert_eq!(store.len(), 1);
        assert_single_cover(&store);
    }

    #[tokio::test]
    async fn reorder_moves_the_entry_and_cover_identity_follows() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(3)).await;
        let ids: Vec<EntryId> = store.entries().iter().map(ImageEntry::id).collect();
        let cover = store.cover_id().unwrap();

        assert!(store.reorder(0, 2));

        let reordered: Vec<EntryId> = store.entries().iter().map(ImageEntry::id).collect();
        assert_eq!(reordered, vec![ids[1], ids[2], ids[0]]);
        assert_slots_contiguous(&store);
        assert_eq!(store.cover_id(), Some(cover), "cover follows the entry");
        assert_eq!(store.entries()[2].slot, 3);
        assert!(store.entries()[2].is_cover);
    }

    #[tokio::test]
    async fn reorder_is_a_noop_on_equal_or_out_of_bounds_indices() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(2)).await;
        let before = store.revision();

        assert!(!store.reorder(1, 1));
        assert!(!store.reorder(0, 2));
        assert!(!store.reorder(5, 0));
        assert_eq!(store.revision(), before);
    }

    #[tokio::test]
    async fn set_cover_moves_the_designation() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(3)).await;
        let target = store.entries()[2].id();

        store.set_cover(target).unwrap();

        assert_single_cover(&store);
        assert_eq!(store.cover_id(), Some(target));
    }

    #[test]
    fn set_cover_on_unknown_id_is_an_error() {
        let mut store = GalleryStore::new();
        let missing = EntryId::Remote(RemoteImageId::new(999));
        let err = store.set_cover(missing).unwrap_err();
        assert!(matches!(err, Error::UnknownEntry(_)));
    }

    #[tokio::test]
    async fn update_alt_text_marks_dirty_without_a_rerender() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(1)).await;
        let id = store.entries()[0].id();
        let mut form = FormDocument::new(8);
        store.sync_into(&mut form).unwrap();
        let revision = store.revision();

        store.update_alt_text(id, "silver laptop, lid open").unwrap();

        assert!(store.is_dirty());
        assert_eq!(store.revision(), revision);
        assert_eq!(store.entries()[0].alt_text, "silver laptop, lid open");
    }

    #[tokio::test]
    async fn slots_stay_contiguous_through_mixed_operations() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(4)).await;
        assert_slots_contiguous(&store);

        store.reorder(3, 0);
        assert_slots_contiguous(&store);
        assert_single_cover(&store);

        let middle = store.entries()[2].id();
        store.delete_entry(middle).unwrap();
        assert_slots_contiguous(&store);
        assert_single_cover(&store);

        store.add_images(valid_files(1)).await;
        assert_slots_contiguous(&store);
        assert_single_cover(&store);
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn listeners_hear_about_image_set_mutations() {
        let mut store = GalleryStore::new();
        let notified = Rc::new(Cell::new(0_usize));
        let seen = Rc::clone(&notified);
        store.subscribe(Box::new(move |snapshot| {
            seen.set(seen.get() + 1);
            assert_eq!(snapshot.len(), snapshot.entries.len());
        }));

        store.add_images(valid_files(2)).await;
        let id = store.entries()[0].id();
        store.set_cover(id).unwrap();
        store.delete_entry(id).unwrap();

        assert_eq!(notified.get(), 3);

        // Alt-text edits mark the session dirty but fire no event.
        let remaining = store.entries()[0].id();
        store.update_alt_text(remaining, "rear ports").unwrap();
        assert_eq!(notified.get(), 3);
    }

    #[test]
    fn hydrate_wraps_prepopulated_files_and_descriptors() {
        let mut form = FormDocument::new(8);
        form.slot_mut(1).unwrap().existing = Some(ExistingDescriptor {
            remote_id: RemoteImageId::new(5),
            url: "https://cdn.example.com/laptops/5/front.jpg".to_string(),
            is_cover: false,
        });
        {
            let fields = form.slot_mut(3).unwrap();
            fields.file = Some(png_file("retry-upload.png", 640, 480));
            fields.alt_text = "kept after failed submit".to_string();
        }

        let mut store = GalleryStore::new();
        assert_eq!(store.hydrate(&form), 2);

        // The gap at slot 2 closes up.
        assert_slots_contiguous(&store);
        assert_eq!(store.entries()[0].origin.kind(), OriginKind::Existing);
        assert_eq!(store.entries()[0].display_name, "front.jpg");
        assert_eq!(store.entries()[1].origin.kind(), OriginKind::New);
        assert_eq!(store.entries()[1].alt_text, "kept after failed submit");
        assert_eq!(store.previews().live_count(), 1);

        // No descriptor was flagged as cover, so the first entry is promoted.
        assert!(store.entries()[0].is_cover);
    }

    #[test]
    fn hydrate_keeps_the_flagged_cover() {
        let mut form = FormDocument::new(8);
        for (slot, remote, is_cover) in [(1, 21, false), (2, 22, true)] {
            form.slot_mut(slot).unwrap().existing = Some(ExistingDescriptor {
                remote_id: RemoteImageId::new(remote),
                url: format!("https://cdn.example.com/laptops/{remote}.jpg"),
                is_cover,
            });
        }

        let mut store = GalleryStore::new();
        store.hydrate(&form);

        assert_single_cover(&store);
        assert_eq!(store.cover_id(), Some(EntryId::Remote(RemoteImageId::new(22))));
    }

    #[tokio::test]
    async fn snapshot_reports_counts_and_preview_sources() {
        let mut form = FormDocument::new(8);
        form.slot_mut(1).unwrap().existing = Some(ExistingDescriptor {
            remote_id: RemoteImageId::new(9),
            url: "https://cdn.example.com/laptops/9.jpg".to_string(),
            is_cover: true,
        });

        let mut store = GalleryStore::new();
        store.hydrate(&form);
        store.add_images(valid_files(1)).await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.existing_count, 1);
        assert_eq!(snapshot.new_count, 1);
        assert_eq!(snapshot.cover_id, store.cover_id());
        assert!(matches!(
            snapshot.entries[0].preview,
            PreviewSource::RemoteUrl(_)
        ));
        assert!(matches!(
            snapshot.entries[1].preview,
            PreviewSource::DataUri(_)
        ));
    }

    #[tokio::test]
    async fn sync_into_mirrors_state_and_clears_the_dirty_flag() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(2)).await;
        let mut form = FormDocument::new(8);

        store.sync_into(&mut form).unwrap();

        assert!(!store.is_dirty());
        assert!(form.slot(1).unwrap().file.is_some());
        assert!(form.slot(1).unwrap().is_cover);
        assert!(form.slot(2).unwrap().file.is_some());
        assert!(form.slot(3).unwrap().file.is_none());
        assert_eq!(form.deleted_ids_field(), None);
    }

    #[tokio::test]
    async fn teardown_releases_every_live_preview() {
        let mut store = GalleryStore::new();
        store.add_images(valid_files(3)).await;
        assert_eq!(store.previews().live_count(), 3);

        store.teardown();

        assert!(store.is_empty());
        assert_eq!(store.previews().live_count(), 0);
        assert_eq!(store.previews().released_count(), 3);
    }
}
