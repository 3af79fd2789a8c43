//! Live view of the native form fields the gallery synchronizes.
//!
//! The real submission mechanism is outside this app; this panel shows what
//! it would transmit and carries the submit-time hook that forces a final
//! synchronization pass.

use dioxus::prelude::*;

use vitrina_core::form::{alt_field_name, cover_field_name, file_field_name, DELETED_IDS_FIELD};

use crate::state::AppState;

#[derive(Clone, PartialEq)]
struct SlotRow {
    file_name: String,
    alt_name: String,
    cover_name: String,
    file_label: String,
    alt_text: String,
    is_cover: bool,
    descriptor: Option<String>,
}

#[component]
pub fn FormPreview() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let document = state.form.read().clone();
    let rows: Vec<SlotRow> = document
        .slots()
        .map(|(slot, fields)| SlotRow {
            file_name: file_field_name(slot),
            alt_name: alt_field_name(slot),
            cover_name: cover_field_name(slot),
            file_label: fields
                .file
                .as_ref()
                .map_or_else(|| "(empty)".to_string(), |file| file.file_name.clone()),
            alt_text: fields.alt_text.clone(),
            is_cover: fields.is_cover,
            descriptor: fields
                .existing
                .as_ref()
                .map(|descriptor| format!("id {} - {}", descriptor.remote_id, descriptor.url)),
        })
        .collect();
    let deleted_value = document
        .deleted_ids_field()
        .unwrap_or("(not created)")
        .to_string();

    let on_save = move |_: MouseEvent| {
        // Submit hook: make sure a synchronization pass ran before handoff.
        state.sync_form();
        let store = state.store.read();
        tracing::info!(
            entries = store.len(),
            queued_deletions = store.deletion_queue().len(),
            "listing form synchronized for submission"
        );
    };

    rsx! {
        aside {
            style: "
                display: flex;
                flex-direction: column;
                gap: 10px;
                padding: 12px;
                border: 1px solid {colors.border};
                border-radius: 10px;
                background: {colors.bg_secondary};
            ",

            div {
                style: "display: flex; align-items: center; justify-content: space-between; gap: 12px;",
                div {
                    style: "font-size: 12px; color: {colors.text_muted}; text-transform: uppercase; letter-spacing: 0.04em;",
                    "Form fields"
                }
                button {
                    style: "
                        padding: 4px 12px;
                        font-size: 12px;
                        border: none;
                        border-radius: 6px;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        cursor: pointer;
                    ",
                    onclick: on_save,
                    "Save listing"
                }
            }

            for row in rows {
                div {
                    style: "
                        display: flex;
                        flex-direction: column;
                        gap: 2px;
                        padding: 6px 8px;
                        border: 1px solid {colors.border};
                        border-radius: 6px;
                        font-size: 11px;
                        color: {colors.text_secondary};
                    ",
                    div {
                        style: "display: flex; justify-content: space-between; gap: 8px;",
                        span {
                            style: "font-family: ui-monospace, SFMono-Regular, Menlo, monospace;",
                            "{row.file_name}"
                        }
                        span {
                            style: "overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                            "{row.file_label}"
                        }
                    }
                    div {
                        style: "display: flex; justify-content: space-between; gap: 8px;",
                        span {
                            style: "font-family: ui-monospace, SFMono-Regular, Menlo, monospace;",
                            "{row.alt_name}"
                        }
                        span { "{row.alt_text}" }
                    }
                    div {
                        style: "display: flex; justify-content: space-between; gap: 8px;",
                        span {
                            style: "font-family: ui-monospace, SFMono-Regular, Menlo, monospace;",
                            "{row.cover_name}"
                        }
                        span { "{row.is_cover}" }
                    }
                    if let Some(descriptor) = &row.descriptor {
                        div {
                            style: "color: {colors.text_muted}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                            "{descriptor}"
                        }
                    }
                }
            }

            div {
                style: "font-size: 11px; color: {colors.text_secondary};",
                span {
                    style: "font-family: ui-monospace, SFMono-Regular, Menlo, monospace;",
                    "{DELETED_IDS_FIELD}: "
                }
                span { "{deleted_value}" }
            }
        }
    }
}
