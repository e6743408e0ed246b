//! Host page adapter.
//!
//! The widget never touches a DOM directly. Every side-effecting primitive
//! it needs from the host page (mounting and unmounting the iframe,
//! resizing it, listening on the cross-document message channel, and
//! navigating the top-level page) goes through the [`HostPage`] trait.
//!
//! Real integrations implement the trait against their platform (a wasm
//! binding, a webview bridge). [`MemoryPage`] is an in-memory
//! implementation that records every effect, useful for exercising host
//! glue without a browser.

// ============================================================================
// Modules
// ============================================================================

mod memory;

pub use memory::MemoryPage;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use crate::identifiers::ListenerId;

// ============================================================================
// Constants
// ============================================================================

/// Default minimum height of a mounted iframe, in pixels.
pub const DEFAULT_IFRAME_MIN_HEIGHT: u32 = 175;

// ============================================================================
// IframeConfig
// ============================================================================

/// Configuration of a mounted iframe element.
///
/// The frame fills its container and grows with the remote content; the
/// minimum height keeps the form usable before the first resize message
/// arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IframeConfig {
    /// Source URL of the hosted payment form.
    pub src: String,

    /// CSS width (`100%`).
    pub width: String,

    /// CSS height (`100%`).
    pub height: String,

    /// Minimum height in pixels.
    pub min_height: u32,

    /// Border width in pixels (`0`).
    pub border_width: u32,
}

impl IframeConfig {
    /// Creates a frame configuration with the standard fill styling.
    #[must_use]
    pub fn new(src: impl Into<String>, min_height: u32) -> Self {
        Self {
            src: src.into(),
            width: "100%".to_string(),
            height: "100%".to_string(),
            min_height,
            border_width: 0,
        }
    }
}

// ============================================================================
// InboundMessage
// ============================================================================

/// A message delivered on the host page's cross-document channel.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Declared origin of the sender (scheme + host + port).
    pub origin: String,

    /// Raw message payload.
    pub data: Value,
}

impl InboundMessage {
    /// Creates an inbound message.
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

// ============================================================================
// MessageListener
// ============================================================================

/// Message listener callback type.
///
/// Called for each message arriving on the host page's channel, whatever
/// its origin; trust filtering is the relay's job, not the page's.
pub type MessageListener = Arc<dyn Fn(&InboundMessage) + Send + Sync>;

// ============================================================================
// HostPage
// ============================================================================

/// Platform adapter over the host page.
///
/// All operations are synchronous and must be cheap: they run on whatever
/// thread delivers the message or drives the widget.
///
/// # Contract
///
/// - [`mount_frame`](Self::mount_frame) replaces the container's children
///   with the single configured iframe.
/// - [`unmount_frame`](Self::unmount_frame) removes all children of the
///   container and is a no-op when the container no longer exists.
/// - [`remove_message_listener`](Self::remove_message_listener) is a no-op
///   for an unknown id.
/// - [`navigate`](Self::navigate) replaces the current history entry rather
///   than pushing a new one.
pub trait HostPage: Send + Sync {
    /// Returns `true` if the container element exists in the page.
    fn container_exists(&self, container_id: &str) -> bool;

    /// Mounts an iframe into the container, replacing its children.
    fn mount_frame(&self, container_id: &str, frame: IframeConfig);

    /// Removes all children of the container.
    fn unmount_frame(&self, container_id: &str);

    /// Updates the minimum height of the iframe inside the container.
    fn set_frame_min_height(&self, container_id: &str, min_height: u32);

    /// Registers a listener on the message channel.
    fn add_message_listener(&self, listener: MessageListener) -> ListenerId;

    /// Removes a previously registered listener.
    fn remove_message_listener(&self, listener_id: ListenerId);

    /// Navigates the top-level page, replacing the current history entry.
    fn navigate(&self, url: &str);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iframe_config_fill_styling() {
        let frame = IframeConfig::new("https://example.com/form", DEFAULT_IFRAME_MIN_HEIGHT);

        assert_eq!(frame.width, "100%");
        assert_eq!(frame.height, "100%");
        assert_eq!(frame.min_height, 175);
        assert_eq!(frame.border_width, 0);
    }
}
