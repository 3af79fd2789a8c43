//! Vitrina Desktop Application
//!
//! Gallery editor for product listings: reorder, cover selection, and
//! deletion over existing and newly selected images, synchronized into the
//! listing form's native fields.

mod app;
mod components;
mod state;
mod theme;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vitrina=debug".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Vitrina...");

    dioxus::LaunchBuilder::new().launch(app::App);
}
