//! Gallery editor panel.
//!
//! Drop surface and card grid over the gallery store. A drop carrying file
//! payloads routes to the add pipeline; a drop from one of our own cards
//! carries only the origin index recorded at drag start and routes to
//! reorder.

use dioxus::html::HasFileData;
use dioxus::prelude::*;
use rfd::AsyncFileDialog;

use vitrina_core::models::{EntryId, SelectedFile};
use vitrina_core::render::{build_view_model, GalleryViewModel};
use vitrina_core::store::AdditionPlan;
use vitrina_core::validate::validate_candidate;

use super::gallery_card::GalleryCardView;
use crate::state::AppState;

#[component]
pub fn GalleryPanel() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let mut drag_over = use_signal(|| false);

    let snapshot = state.store.read().snapshot();
    let capacity = state.store.read().config().max_entries;
    let view_model = build_view_model(&snapshot);
    let notices = (state.notices)();

    let on_drag_over = move |evt: Event<DragData>| {
        evt.prevent_default();
        drag_over.set(true);
    };

    let on_drag_leave = move |_: Event<DragData>| {
        drag_over.set(false);
    };

    let on_drop_surface = move |evt: Event<DragData>| {
        evt.prevent_default();
        drag_over.set(false);

        let files = evt.files();
        if files.is_empty() {
            // One of our own cards, dropped outside any card target.
            state.drag_origin.set(None);
            return;
        }
        if (state.adding)() {
            return;
        }
        state.adding.set(true);

        spawn(async move {
            let mut candidates = Vec::new();
            for file in files {
                let name = file.name();
                let content_type = file.content_type();
                match file.read_bytes().await {
                    Ok(bytes) => {
                        let mime_type = infer_mime_type(content_type.as_deref(), &name);
                        candidates.push(SelectedFile::new(name, mime_type, bytes.to_vec()));
                    }
                    Err(error) => {
                        state
                            .notices
                            .write()
                            .push(format!("Could not read \"{name}\": {error}"));
                    }
                }
            }
            add_candidates(state, candidates).await;
            state.adding.set(false);
        });
    };

    let on_pick = move |_: MouseEvent| {
        if (state.adding)() {
            return;
        }
        state.adding.set(true);

        spawn(async move {
            let picked = AsyncFileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp", "gif"])
                .pick_files()
                .await;

            let mut candidates = Vec::new();
            if let Some(handles) = picked {
                for handle in handles {
                    let file_name = handle.file_name();
                    let bytes = handle.read().await;
                    let mime_type = infer_mime_type(None, &file_name);
                    candidates.push(SelectedFile::new(file_name, mime_type, bytes));
                }
            }
            add_candidates(state, candidates).await;
            state.adding.set(false);
        });
    };

    let on_drag_start = move |index: usize| {
        state.drag_origin.set(Some(index));
    };

    let on_drop_on_card = move |target: usize| {
        if let Some(origin) = (state.drag_origin)() {
            if state.store.write().reorder(origin, target) {
                state.sync_form();
            }
        }
        state.drag_origin.set(None);
    };

    let on_set_cover = move |id: EntryId| {
        if let Err(error) = state.store.write().set_cover(id) {
            state.notices.write().push(error.to_string());
            return;
        }
        state.sync_form();
    };

    let on_request_delete = move |id: EntryId| {
        state.pending_delete.set(Some(id));
    };

    let on_commit_alt = move |(id, text): (EntryId, String)| {
        if let Err(error) = state.store.write().update_alt_text(id, text) {
            // The card was removed while the edit was buffered.
            tracing::debug!(%error, "dropped buffered alt-text commit");
            return;
        }
        state.sync_form();
    };

    let border_color = if drag_over() { colors.accent } else { colors.border };
    let pending = (state.pending_delete)();
    let delete_hint = match pending {
        Some(EntryId::Remote(_)) => "It will be deleted from the server when the listing is saved.",
        Some(EntryId::Local(_)) => "The file has not been uploaded; it will simply be discarded.",
        None => "",
    };

    rsx! {
        section {
            style: "display: flex; flex-direction: column; gap: 12px;",

            div {
                style: "display: flex; align-items: center; justify-content: space-between; gap: 12px;",
                div {
                    style: "font-size: 12px; color: {colors.text_muted}; text-transform: uppercase; letter-spacing: 0.04em;",
                    "Images"
                }
                div {
                    style: "display: flex; align-items: center; gap: 10px;",
                    span {
                        style: "font-size: 12px; color: {colors.text_secondary};",
                        "{snapshot.len()} / {capacity}"
                    }
                    button {
                        style: "
                            padding: 4px 12px;
                            font-size: 12px;
                            border: 1px solid {colors.border};
                            border-radius: 6px;
                            background: {colors.accent};
                            color: {colors.accent_text};
                            cursor: pointer;
                        ",
                        disabled: (state.adding)(),
                        onclick: on_pick,
                        if (state.adding)() { "Adding..." } else { "+ Add images" }
                    }
                }
            }

            if !notices.is_empty() {
                div {
                    style: "
                        display: flex;
                        flex-direction: column;
                        gap: 4px;
                        padding: 8px 12px;
                        border: 1px solid {colors.error};
                        border-radius: 8px;
                        font-size: 12px;
                        color: {colors.error};
                    ",
                    for notice in notices.iter() {
                        div { "{notice}" }
                    }
                    button {
                        style: "
                            align-self: flex-end;
                            padding: 2px 8px;
                            font-size: 11px;
                            border: none;
                            background: transparent;
                            color: {colors.text_secondary};
                            cursor: pointer;
                        ",
                        onclick: move |_| state.notices.write().clear(),
                        "Dismiss"
                    }
                }
            }

            div {
                style: "
                    border: 1px dashed {border_color};
                    border-radius: 10px;
                    padding: 12px;
                    min-height: 220px;
                ",
                ondragover: on_drag_over,
                ondragleave: on_drag_leave,
                ondrop: on_drop_surface,

                {match view_model {
                    GalleryViewModel::Empty => rsx! {
                        div {
                            style: "
                                display: flex;
                                align-items: center;
                                justify-content: center;
                                min-height: 200px;
                                font-size: 13px;
                                color: {colors.text_muted};
                            ",
                            "No images yet. Drop files here or use \"+ Add images\"."
                        }
                    },
                    GalleryViewModel::Cards(cards) => rsx! {
                        div {
                            style: "
                                display: grid;
                                grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
                                gap: 12px;
                            ",
                            for (index, card) in cards.iter().enumerate() {
                                GalleryCardView {
                                    key: "{card.id}",
                                    index,
                                    card: card.clone(),
                                    on_drag_start,
                                    on_drop_on_card,
                                    on_set_cover,
                                    on_request_delete,
                                    on_commit_alt,
                                }
                            }
                        }
                    },
                }}
            }

            if let Some(id) = pending {
                div {
                    style: "
                        position: fixed;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.4);
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    ",
                    div {
                        style: "
                            background: {colors.bg_primary};
                            color: {colors.text_primary};
                            border: 1px solid {colors.border};
                            border-radius: 10px;
                            padding: 20px;
                            width: min(360px, 90vw);
                            display: flex;
                            flex-direction: column;
                            gap: 14px;
                        ",
                        div {
                            style: "font-weight: 600;",
                            "Remove this image?"
                        }
                        div {
                            style: "font-size: 12px; color: {colors.text_secondary};",
                            "{delete_hint}"
                        }
                        div {
                            style: "display: flex; justify-content: flex-end; gap: 8px;",
                            button {
                                style: "
                                    padding: 4px 12px;
                                    font-size: 12px;
                                    border: 1px solid {colors.border};
                                    border-radius: 6px;
                                    background: {colors.bg_secondary};
                                    color: {colors.text_primary};
                                    cursor: pointer;
                                ",
                                onclick: move |_| state.pending_delete.set(None),
                                "Cancel"
                            }
                            button {
                                style: "
                                    padding: 4px 12px;
                                    font-size: 12px;
                                    border: none;
                                    border-radius: 6px;
                                    background: {colors.error};
                                    color: {colors.accent_text};
                                    cursor: pointer;
                                ",
                                onclick: move |_| {
                                    let deleted = state.store.write().delete_entry(id);
                                    match deleted {
                                        Ok(()) => state.sync_form(),
                                        Err(error) => state.notices.write().push(error.to_string()),
                                    }
                                    state.pending_delete.set(None);
                                },
                                "Remove"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Capacity-gate, validate, and commit a batch of selected files.
///
/// The store borrow is never held across an await: planning and committing
/// are short synchronous sections around the per-file validation.
async fn add_candidates(mut state: AppState, candidates: Vec<SelectedFile>) {
    if candidates.is_empty() {
        return;
    }

    let (plan, config) = {
        let store = state.store.read();
        (store.plan_addition(candidates), *store.config())
    };
    let AdditionPlan {
        to_validate,
        capacity_error,
    } = plan;

    let mut messages = Vec::new();
    let mut accepted_files = Vec::new();
    for file in to_validate {
        match validate_candidate(&file, &config).await {
            Ok(()) => accepted_files.push(file),
            Err(error) => messages.push(error.to_string()),
        }
    }

    let added = state.store.write().commit_addition(accepted_files);
    if added > 0 {
        state.sync_form();
    }
    if let Some(error) = capacity_error {
        messages.push(error.to_string());
    }
    state.push_notices(messages);
    tracing::debug!(added, "processed selected files");
}

/// Prefer the payload's declared content type, fall back to the extension.
fn infer_mime_type(content_type: Option<&str>, file_name: &str) -> String {
    if let Some(content_type) = content_type {
        let trimmed = content_type.trim();
        if !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("application/octet-stream") {
            return trimmed.to_string();
        }
    }
    mime_guess::from_path(file_name)
        .first_raw()
        .map_or_else(|| "application/octet-stream".to_string(), str::to_string)
}
