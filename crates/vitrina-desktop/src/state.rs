//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;

use vitrina_core::form::FormDocument;
use vitrina_core::models::EntryId;
use vitrina_core::GalleryStore;

use crate::theme::ResolvedTheme;

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// The gallery store driving the editor
    pub store: Signal<GalleryStore>,
    /// Mirror of the surrounding listing form's native fields
    pub form: Signal<FormDocument>,
    /// Resolved theme (light/dark)
    pub theme: Signal<ResolvedTheme>,
    /// Transient user-visible notices (validation failures, capacity warnings)
    pub notices: Signal<Vec<String>>,
    /// Entry awaiting delete confirmation
    pub pending_delete: Signal<Option<EntryId>>,
    /// Guard against overlapping add batches
    pub adding: Signal<bool>,
    /// Card index recorded at drag start for in-gallery reorder
    pub drag_origin: Signal<Option<usize>>,
}

impl AppState {
    /// Run a synchronization pass into the form mirror.
    pub fn sync_form(&mut self) {
        let mut form = self.form;
        let mut store = self.store;
        if let Err(error) = store.write().sync_into(&mut form.write()) {
            tracing::error!(%error, "failed to synchronize the form mirror");
        }
    }

    /// Queue user-visible notices.
    pub fn push_notices(&mut self, messages: Vec<String>) {
        if !messages.is_empty() {
            self.notices.write().extend(messages);
        }
    }
}
