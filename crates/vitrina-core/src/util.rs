//! Small helpers shared across the gallery modules.

/// Human-readable label derived from a file name.
///
/// Strips the extension and replaces `-`/`_` separators with spaces.
/// Returns an empty string when nothing readable remains.
#[must_use]
pub fn display_label(file_name: &str) -> String {
    let stem = file_name
        .trim()
        .rsplit_once('.')
        .map_or_else(|| file_name.trim(), |(left, _)| left);

    stem.chars()
        .map(|ch| if ch == '-' || ch == '_' { ' ' } else { ch })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Default alt text for an image added at `slot`.
///
/// Derived from the file name when it yields a readable label, otherwise
/// falls back to the slot number.
#[must_use]
pub fn default_alt_text(file_name: &str, slot: u32) -> String {
    let label = display_label(file_name);
    if label.is_empty() {
        format!("Image {slot}")
    } else {
        label
    }
}

/// File name portion of a remote image URL, if any.
#[must_use]
pub fn file_name_from_url(url: &str) -> Option<&str> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && name.contains('.'))
}
