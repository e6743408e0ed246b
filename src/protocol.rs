//! Relay message types.
//!
//! Relay messages are the payloads the hosted payment iframe posts to the
//! host page through the browser's cross-document message channel.
//!
//! # Message Types
//!
//! | Semantic | Shape |
//! |----------|-------|
//! | Resize | `{ "iframeHeight": number }` |
//! | Completion | `{ "message": string, "details"?: string, "return_url": string }` |
//!
//! A message carries exactly one semantic: the presence of `iframeHeight`
//! marks it as a resize notification, everything else is treated as a
//! completion. Payloads that are not JSON objects fail to parse and are
//! dropped by the relay.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// RelayPayload
// ============================================================================

/// An inbound payload from the hosted payment iframe.
///
/// All fields are optional on the wire; [`classify`](Self::classify) decides
/// which semantic the payload carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    /// Status code of a finished operation (`payment_success`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Extra human-readable description of the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// URL the host page should return to once the operation finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,

    /// Current content height of the iframe, in pixels.
    #[serde(
        rename = "iframeHeight",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub iframe_height: Option<u32>,
}

impl RelayPayload {
    /// Parses a raw message-channel value into a payload.
    ///
    /// Returns `None` when the value is not an object of the expected shape;
    /// the relay drops such messages silently.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Classifies the payload into its single semantic.
    #[must_use]
    pub fn classify(&self) -> RelayEvent {
        match self.iframe_height {
            Some(height) => RelayEvent::Resize { height },
            None => RelayEvent::Completion(self.clone()),
        }
    }
}

// ============================================================================
// RelayEvent
// ============================================================================

/// Parsed relay semantics for type-safe handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// The iframe content grew or shrank; the mounted frame should follow.
    ///
    /// Not a terminal message: the relay stays registered.
    Resize {
        /// Reported content height in pixels.
        height: u32,
    },

    /// The hosted operation finished.
    ///
    /// Dispatched to the custom handler when one was registered at creation
    /// time, otherwise the default redirect runs.
    Completion(RelayPayload),
}

// ============================================================================
// Tests
// ============================================================================
