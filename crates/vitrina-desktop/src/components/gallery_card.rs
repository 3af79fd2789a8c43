//! One gallery card: preview, badges, affordances, and the alt-text editor.

use dioxus::html::HasFileData;
use dioxus::prelude::*;

use vitrina_core::debounce::{DebounceGate, ALT_TEXT_DEBOUNCE};
use vitrina_core::models::{EntryId, PreviewSource};
use vitrina_core::render::GalleryCard;

use crate::state::AppState;

#[component]
pub fn GalleryCardView(
    index: usize,
    card: GalleryCard,
    on_drag_start: EventHandler<usize>,
    on_drop_on_card: EventHandler<usize>,
    on_set_cover: EventHandler<EntryId>,
    on_request_delete: EventHandler<EntryId>,
    on_commit_alt: EventHandler<(EntryId, String)>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    // Buffered alt-text commits. A card that leaves the gallery cancels the
    // gate so stale text never reaches the store.
    let gate = use_hook(DebounceGate::new);
    let unmount_gate = gate.clone();
    use_drop(move || unmount_gate.cancel());

    let id = card.id;
    let alt_value = card.alt_text.clone();

    let on_alt_input = move |evt: Event<FormData>| {
        let ticket = gate.arm();
        let text = evt.value();
        spawn(async move {
            tokio::time::sleep(ALT_TEXT_DEBOUNCE).await;
            if ticket.is_current() {
                on_commit_alt.call((id, text));
            }
        });
    };

    let border = if card.is_cover {
        format!("2px solid {}", colors.accent)
    } else {
        format!("1px solid {}", colors.border)
    };

    rsx! {
        div {
            draggable: true,
            ondragstart: move |_| on_drag_start.call(index),
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                // A drop carrying file payloads belongs to the surrounding
                // surface; only our own index-token drags reorder.
                if !evt.files().is_empty() {
                    return;
                }
                evt.prevent_default();
                evt.stop_propagation();
                on_drop_on_card.call(index);
            },
            style: "
                display: flex;
                flex-direction: column;
                gap: 6px;
                padding: 8px;
                border: {border};
                border-radius: 8px;
                background: {colors.bg_secondary};
                cursor: grab;
            ",

            div {
                style: "
                    position: relative;
                    height: 120px;
                    border-radius: 6px;
                    overflow: hidden;
                    background: {colors.bg_tertiary};
                ",
                {match &card.preview {
                    PreviewSource::RemoteUrl(url) => rsx! {
                        img {
                            src: "{url}",
                            alt: "{card.alt_text}",
                            style: "display: block; width: 100%; height: 100%; object-fit: cover;",
                        }
                    },
                    PreviewSource::DataUri(uri) => rsx! {
                        img {
                            src: "{uri}",
                            alt: "{card.alt_text}",
                            style: "display: block; width: 100%; height: 100%; object-fit: cover;",
                        }
                    },
                    PreviewSource::Missing => rsx! {
                        div {
                            style: "
                                display: flex;
                                align-items: center;
                                justify-content: center;
                                height: 100%;
                                font-size: 11px;
                                color: {colors.text_muted};
                            ",
                            "Preview unavailable"
                        }
                    },
                }}
                if card.is_cover {
                    span {
                        style: "
                            position: absolute;
                            top: 6px;
                            left: 6px;
                            padding: 1px 8px;
                            font-size: 10px;
                            border-radius: 999px;
                            background: {colors.accent};
                            color: {colors.accent_text};
                        ",
                        "Cover"
                    }
                }
            }

            div {
                style: "display: flex; align-items: center; gap: 6px; font-size: 11px; color: {colors.text_muted};",
                span { "#{card.slot}" }
                span {
                    style: "
                        padding: 0 6px;
                        border: 1px solid {colors.border};
                        border-radius: 999px;
                        text-transform: uppercase;
                        letter-spacing: 0.04em;
                    ",
                    "{card.origin_label}"
                }
                span {
                    style: "
                        flex: 1;
                        min-width: 0;
                        overflow: hidden;
                        text-overflow: ellipsis;
                        white-space: nowrap;
                        color: {colors.text_secondary};
                    ",
                    "{card.display_name}"
                }
            }

            input {
                r#type: "text",
                value: "{alt_value}",
                placeholder: "Alt text",
                oninput: on_alt_input,
                style: "
                    padding: 4px 8px;
                    font-size: 12px;
                    border: 1px solid {colors.border};
                    border-radius: 6px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                ",
            }

            div {
                style: "display: flex; justify-content: flex-end; gap: 6px;",
                if !card.is_cover {
                    button {
                        style: "
                            padding: 2px 8px;
                            font-size: 11px;
                            border: 1px solid {colors.border};
                            border-radius: 6px;
                            background: transparent;
                            color: {colors.text_primary};
                            cursor: pointer;
                        ",
                        onclick: move |_| on_set_cover.call(id),
                        "Set cover"
                    }
                }
                button {
                    style: "
                        padding: 2px 8px;
                        font-size: 11px;
                        border: 1px solid {colors.error};
                        border-radius: 6px;
                        background: transparent;
                        color: {colors.error};
                        cursor: pointer;
                    ",
                    onclick: move |_| on_request_delete.call(id),
                    "Remove"
                }
            }
        }
    }
}
