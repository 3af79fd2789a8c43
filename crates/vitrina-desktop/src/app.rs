//! Main application component

use dioxus::prelude::*;

use vitrina_core::config::MAX_IMAGES;
use vitrina_core::form::FormDocument;
use vitrina_core::GalleryStore;

use crate::components::{FormPreview, GalleryPanel};
use crate::state::AppState;
use crate::theme::ResolvedTheme;

/// Root application component
#[component]
pub fn App() -> Element {
    let form = use_signal(|| FormDocument::new(MAX_IMAGES));
    let mut store = use_signal(GalleryStore::new);
    let mut theme = use_signal(ResolvedTheme::default);
    let notices = use_signal(Vec::new);
    let pending_delete = use_signal(|| None);
    let adding = use_signal(|| false);
    let drag_origin = use_signal(|| None);

    // Hydrate once from the (possibly pre-populated) form mirror, and wire
    // the change event other in-page consumers would listen to.
    let mut hydrated = use_signal(|| false);
    use_effect(move || {
        if hydrated() {
            return;
        }
        hydrated.set(true);

        let count = {
            let document = form.peek();
            store.write().hydrate(&document)
        };
        if count > 0 {
            tracing::info!(count, "restored gallery entries from the form");
        }
        store.write().subscribe(Box::new(|snapshot| {
            tracing::debug!(
                entries = snapshot.len(),
                revision = snapshot.revision,
                "gallery changed"
            );
        }));
    });

    // Release every preview handle when the editor goes away.
    use_drop(move || store.write().teardown());

    use_context_provider(|| AppState {
        store,
        form,
        theme,
        notices,
        pending_delete,
        adding,
        drag_origin,
    });

    let current_theme = theme();
    let colors = current_theme.palette();
    let toggle_label = if current_theme.is_dark() {
        "Light mode"
    } else {
        "Dark mode"
    };

    rsx! {
        div {
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
                display: flex;
                flex-direction: column;
            ",

            header {
                style: "
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    padding: 12px 20px;
                    border-bottom: 1px solid {colors.border};
                ",
                div {
                    style: "font-weight: 600; letter-spacing: 0.02em;",
                    "Vitrina"
                }
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
                    onclick: move |_| theme.set(theme().toggled()),
                    "{toggle_label}"
                }
            }

            main {
                style: "display: flex; gap: 20px; padding: 20px; align-items: flex-start; flex: 1;",
                div {
                    style: "flex: 2; min-width: 0;",
                    GalleryPanel {}
                }
                div {
                    style: "flex: 1; min-width: 280px;",
                    FormPreview {}
                }
            }
        }
    }
}
