//! UI Components
//!
//! Components for the gallery editor.

mod form_preview;
mod gallery_card;
mod gallery_panel;

pub use form_preview::FormPreview;
pub use gallery_panel::GalleryPanel;
