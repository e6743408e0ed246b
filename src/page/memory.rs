//! In-memory host page.
//!
//! Records every adapter effect instead of touching a real DOM. Containers
//! are added and removed explicitly; [`dispatch`](MemoryPage::dispatch)
//! plays the role of the browser delivering a cross-document message to
//! every registered listener.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::identifiers::ListenerId;

use super::{HostPage, IframeConfig, InboundMessage, MessageListener};

// ============================================================================
// MemoryPage
// ============================================================================

/// In-memory [`HostPage`] implementation.
///
/// Cloning is shallow: clones share the same page state, mirroring how every
/// handle to a real page sees the same document.
#[derive(Clone, Default)]
pub struct MemoryPage {
    inner: Arc<PageState>,
}

#[derive(Default)]
struct PageState {
    /// Container id → mounted frames.
    containers: Mutex<FxHashMap<String, Vec<IframeConfig>>>,
    /// Registered message listeners.
    listeners: Mutex<FxHashMap<ListenerId, MessageListener>>,
    /// Every URL passed to `navigate`, in order.
    navigations: Mutex<Vec<String>>,
}

impl MemoryPage {
    /// Creates an empty page with no containers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a page with a single empty container.
    #[must_use]
    pub fn with_container(container_id: impl Into<String>) -> Self {
        let page = Self::new();
        page.insert_container(container_id);
        page
    }

    /// Adds an empty container to the page.
    pub fn insert_container(&self, container_id: impl Into<String>) {
        self.inner
            .containers
            .lock()
            .insert(container_id.into(), Vec::new());
    }

    /// Removes a container and its children from the page.
    pub fn remove_container(&self, container_id: &str) {
        self.inner.containers.lock().remove(container_id);
    }

    /// Delivers a message to every registered listener.
    ///
    /// Listeners are collected before any is invoked, so a listener may
    /// register or remove listeners without deadlocking.
    pub fn dispatch(&self, origin: impl Into<String>, data: Value) {
        let message = InboundMessage::new(origin, data);
        let listeners: Vec<MessageListener> =
            self.inner.listeners.lock().values().cloned().collect();

        for listener in listeners {
            listener(&message);
        }
    }

    /// Returns the frames currently mounted in a container.
    #[must_use]
    pub fn frames_in(&self, container_id: &str) -> Vec<IframeConfig> {
        self.inner
            .containers
            .lock()
            .get(container_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of registered message listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Returns every navigation performed, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.inner.navigations.lock().clone()
    }

    /// Returns the most recent navigation, if any.
    #[must_use]
    pub fn last_navigation(&self) -> Option<String> {
        self.inner.navigations.lock().last().cloned()
    }
}

// ============================================================================
// HostPage Implementation
// ============================================================================

impl HostPage for MemoryPage {
    fn container_exists(&self, container_id: &str) -> bool {
        self.inner.containers.lock().contains_key(container_id)
    }

    fn mount_frame(&self, container_id: &str, frame: IframeConfig) {
        let mut containers = self.inner.containers.lock();
        if let Some(children) = containers.get_mut(container_id) {
            children.clear();
            children.push(frame);
        }
    }

    fn unmount_frame(&self, container_id: &str) {
        let mut containers = self.inner.containers.lock();
        if let Some(children) = containers.get_mut(container_id) {
            children.clear();
        }
    }

    fn set_frame_min_height(&self, container_id: &str, min_height: u32) {
        let mut containers = self.inner.containers.lock();
        if let Some(children) = containers.get_mut(container_id) {
            for frame in children {
                frame.min_height = min_height;
            }
        }
    }

    fn add_message_listener(&self, listener: MessageListener) -> ListenerId {
        let listener_id = ListenerId::generate();
        self.inner.listeners.lock().insert(listener_id, listener);
        listener_id
    }

    fn remove_message_listener(&self, listener_id: ListenerId) {
        self.inner.listeners.lock().remove(&listener_id);
    }

    fn navigate(&self, url: &str) {
        self.inner.navigations.lock().push(url.to_string());
    }
}

// ============================================================================
// Tests
// ============================================================================
