//! Ephemeral overlay registry
//!
//! A keyed map from overlay key to renderable content. Components register
//! transient overlays (dialogs, prompts) and control their visibility; the
//! app root paints every visible entry each frame. The registry is created
//! once at the application root and passed by clone wherever needed; there is
//! no ambient singleton.
//!
//! Mutations replace the whole map copy-on-write, so registrations from
//! unrelated components never clobber each other: readers keep a consistent
//! snapshot, writers race only per key (last writer wins).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Renderable content producer, re-evaluated on every host paint
pub type OverlayContent = Arc<dyn Fn(&mut egui::Ui) + Send + Sync>;

#[derive(Clone)]
struct OverlayEntry {
    content: OverlayContent,
    visible: bool,
}

/// Keyed registry of transient overlays
#[derive(Clone, Default)]
pub struct OverlayRegistry {
    inner: Arc<RwLock<Arc<HashMap<Uuid, OverlayEntry>>>>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register content under a fresh key. The overlay starts hidden; the
    /// returned handle clears it on drop, so it can never outlive its owner.
    pub fn register(&self, content: OverlayContent) -> OverlayHandle {
        self.register_with(|_| content)
    }

    /// Register content that needs to know its own key (e.g. to render a
    /// close control calling `hide(key)`).
    pub fn register_with(
        &self,
        build: impl FnOnce(Uuid) -> OverlayContent,
    ) -> OverlayHandle {
        let key = Uuid::new_v4();
        let content = build(key);
        self.mutate(|map| {
            map.insert(
                key,
                OverlayEntry {
                    content,
                    visible: false,
                },
            );
        });
        debug!("Registered overlay {}", key);
        OverlayHandle {
            key,
            registry: self.clone(),
        }
    }

    /// Make a registered overlay visible. Idempotent; unknown keys are a no-op.
    pub fn show(&self, key: Uuid) {
        self.mutate(|map| {
            if let Some(entry) = map.get_mut(&key) {
                entry.visible = true;
            }
        });
    }

    /// Hide a registered overlay. Idempotent; unknown keys are a no-op.
    pub fn hide(&self, key: Uuid) {
        self.mutate(|map| {
            if let Some(entry) = map.get_mut(&key) {
                entry.visible = false;
            }
        });
    }

    /// Remove an overlay entirely: content and visibility go atomically, so
    /// the host never paints stale content. A later `show` of the key is a
    /// no-op.
    pub fn clear(&self, key: Uuid) {
        self.mutate(|map| {
            if map.remove(&key).is_some() {
                debug!("Cleared overlay {}", key);
            }
        });
    }

    pub fn is_registered(&self, key: Uuid) -> bool {
        self.inner.read().contains_key(&key)
    }

    pub fn is_visible(&self, key: Uuid) -> bool {
        self.inner
            .read()
            .get(&key)
            .map(|e| e.visible)
            .unwrap_or(false)
    }

    /// Snapshot of the currently visible overlays for the host paint pass
    pub fn visible(&self) -> Vec<(Uuid, OverlayContent)> {
        self.inner
            .read()
            .iter()
            .filter(|(_, entry)| entry.visible)
            .map(|(key, entry)| (*key, Arc::clone(&entry.content)))
            .collect()
    }

    fn mutate(&self, f: impl FnOnce(&mut HashMap<Uuid, OverlayEntry>)) {
        let mut guard = self.inner.write();
        let mut map = (**guard).clone();
        f(&mut map);
        *guard = Arc::new(map);
    }
}

/// Owning handle for one registered overlay
///
/// Dropping the handle clears the entry, tying the overlay's lifetime to its
/// owning component.
pub struct OverlayHandle {
    key: Uuid,
    registry: OverlayRegistry,
}

impl OverlayHandle {
    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn show(&self) {
        self.registry.show(self.key);
    }

    pub fn hide(&self) {
        self.registry.hide(self.key);
    }
}

impl Drop for OverlayHandle {
    fn drop(&mut self) {
        self.registry.clear(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_content() -> OverlayContent {
        Arc::new(|_ui: &mut egui::Ui| {})
    }

    #[test]
    fn test_register_starts_hidden() {
        let registry = OverlayRegistry::new();
        let handle = registry.register(noop_content());

        assert!(registry.is_registered(handle.key()));
        assert!(!registry.is_visible(handle.key()));
        assert!(registry.visible().is_empty());
    }

    #[test]
    fn test_hide_then_show_restores_visibility() {
        let registry = OverlayRegistry::new();
        let handle = registry.register(noop_content());

        handle.show();
        assert!(registry.is_visible(handle.key()));

        handle.hide();
        assert!(!registry.is_visible(handle.key()));

        handle.show();
        assert!(registry.is_visible(handle.key()));
        assert_eq!(registry.visible().len(), 1);
    }

    #[test]
    fn test_hide_is_idempotent() {
        let registry = OverlayRegistry::new();
        let handle = registry.register(noop_content());

        handle.show();
        handle.hide();
        handle.hide();
        assert!(!registry.is_visible(handle.key()));
        assert!(registry.is_registered(handle.key()));
    }

    #[test]
    fn test_clear_while_visible_removes_everything() {
        let registry = OverlayRegistry::new();
        let handle = registry.register(noop_content());
        let key = handle.key();

        handle.show();
        registry.clear(key);

        assert!(!registry.is_registered(key));
        assert!(!registry.is_visible(key));
        assert!(registry.visible().is_empty());

        // A cleared key no longer responds to show.
        registry.show(key);
        assert!(!registry.is_visible(key));
    }

    #[test]
    fn test_handle_drop_clears_entry() {
        let registry = OverlayRegistry::new();
        let key = {
            let handle = registry.register(noop_content());
            handle.show();
            handle.key()
        };

        assert!(!registry.is_registered(key));
        assert!(registry.visible().is_empty());
    }

    #[test]
    fn test_distinct_keys_never_interfere() {
        let registry = OverlayRegistry::new();
        let a = registry.register(noop_content());
        let b = registry.register(noop_content());

        a.show();
        assert!(registry.is_visible(a.key()));
        assert!(!registry.is_visible(b.key()));

        registry.clear(a.key());
        assert!(registry.is_registered(b.key()));
    }

    #[test]
    fn test_concurrent_registration_from_threads() {
        let registry = OverlayRegistry::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let handle = registry.register(noop_content());
                    handle.show();
                    let key = handle.key();
                    std::mem::forget(handle);
                    key
                })
            })
            .collect();

        let keys: Vec<Uuid> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Every registration survived the racing copy-on-write updates.
        for key in &keys {
            assert!(registry.is_registered(*key));
            assert!(registry.is_visible(*key));
        }
        assert_eq!(registry.visible().len(), 8);
    }

    #[test]
    fn test_register_with_passes_its_key() {
        let registry = OverlayRegistry::new();
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let seen_clone = Arc::clone(&seen);

        let handle = registry.register_with(move |key| {
            *seen_clone.lock() = Some(key);
            Arc::new(|_ui: &mut egui::Ui| {})
        });

        assert_eq!(*seen.lock(), Some(handle.key()));
    }
}
