//! Transient preview handles for not-yet-uploaded images.
//!
//! The store is the only owner: it allocates a handle when a file enters the
//! gallery and releases it exactly once, on entry deletion or at session
//! teardown. The renderer only resolves handles, never destroys them.

use std::collections::{HashMap, HashSet};
use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

/// Opaque handle to a preview allocated for one selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(u64);

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

/// Registry of live and released preview handles.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next: u64,
    live: HashMap<PreviewId, String>,
    released: HashSet<PreviewId>,
}

impl PreviewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle whose preview is a `data:` URI over `bytes`.
    pub fn allocate(&mut self, mime_type: &str, bytes: &[u8]) -> PreviewId {
        self.next += 1;
        let id = PreviewId(self.next);
        let encoded = BASE64_STANDARD.encode(bytes);
        self.live
            .insert(id, format!("data:{mime_type};base64,{encoded}"));
        id
    }

    /// Resolve a live handle to its displayable source.
    ///
    /// Returns `None` for released or unknown handles.
    #[must_use]
    pub fn resolve(&self, id: PreviewId) -> Option<&str> {
        self.live.get(&id).map(String::as_str)
    }

    /// Release a handle. Each handle must be released exactly once; a second
    /// release or a release of an unknown handle is a defect and is logged.
    pub fn release(&mut self, id: PreviewId) -> bool {
        if self.live.remove(&id).is_some() {
            self.released.insert(id);
            return true;
        }
        if self.released.contains(&id) {
            tracing::warn!(%id, "preview handle released twice");
        } else {
            tracing::warn!(%id, "released a preview handle that was never allocated");
        }
        false
    }

    /// Release every live handle (session teardown). Returns how many were
    /// still live.
    pub fn release_all(&mut self) -> usize {
        let count = self.live.len();
        for (id, _) in self.live.drain() {
            self.released.insert(id);
        }
        count
    }

    /// Number of handles currently live.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of handles released so far.
    #[must_use]
    pub fn released_count(&self) -> usize {
        self.released.len()
    }
}

impl Drop for PreviewRegistry {
    fn drop(&mut self) {
        if !self.live.is_empty() {
            tracing::warn!(
                leaked = self.live.len(),
                "preview registry dropped with live handles; call teardown before discarding the store"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_then_resolve() {
        let mut registry = PreviewRegistry::new();
        let id = registry.allocate("image/png", &[1, 2, 3]);

        let uri = registry.resolve(id).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn release_revokes_the_handle() {
        let mut registry = PreviewRegistry::new();
        let id = registry.allocate("image/jpeg", &[0; 8]);

        assert!(registry.release(id));
        assert_eq!(registry.resolve(id), None);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.released_count(), 1);
    }

    #[test]
    fn double_release_is_flagged() {
        let mut registry = PreviewRegistry::new();
        let id = registry.allocate("image/png", &[0; 8]);

        assert!(registry.release(id));
        assert!(!registry.release(id));
        assert_eq!(registry.released_count(), 1);
    }

    #[test]
    fn release_of_unknown_handle_is_flagged() {
        // A handle from another registry is unknown here.
        let mut other = PreviewRegistry::new();
        let foreign = other.allocate("image/png", &[0; 8]);

        let mut registry = PreviewRegistry::new();
        assert!(!registry.release(foreign));
        assert_eq!(registry.released_count(), 0);
    }

    #[test]
    fn release_all_drains_live_handles() {
        let mut registry = PreviewRegistry::new();
        registry.allocate("image/png", &[0; 4]);
        registry.allocate("image/gif", &[0; 4]);

        assert_eq!(registry.release_all(), 2);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.released_count(), 2);
        assert_eq!(registry.release_all(), 0);
    }
}
