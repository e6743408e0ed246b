//! Form creation options.
//!
//! Options are per-mount: styles travel to the remote form through the
//! iframe URL, the handler decides what happens when the operation
//! completes.
//!
//! # Example
//!
//! ```ignore
//! use vpos_checkout::FormOptions;
//!
//! let options = FormOptions::new()
//!     .with_style("header-show", false)
//!     .with_handler(|payload| println!("finished: {payload:?}"));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::protocol::RelayPayload;
use crate::styles::{StyleMap, StyleValue};

// ============================================================================
// ResponseHandler
// ============================================================================

/// What to do with a completion message.
#[derive(Clone, Default)]
pub enum ResponseHandler {
    /// Redirect the top-level page to the payload's return URL, carrying the
    /// status (and description, when present) as query parameters.
    #[default]
    Default,

    /// Invoke the callback with the raw payload; no redirect happens.
    Custom(Arc<dyn Fn(&RelayPayload) + Send + Sync>),
}

impl ResponseHandler {
    /// Wraps a callback as a custom handler.
    #[must_use]
    pub fn custom(handler: impl Fn(&RelayPayload) + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(handler))
    }

    /// Returns `true` for the default redirect behavior.
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for ResponseHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("ResponseHandler::Default"),
            Self::Custom(_) => f.write_str("ResponseHandler::Custom(..)"),
        }
    }
}

// ============================================================================
// FormOptions
// ============================================================================

/// Optional per-mount configuration.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Styles forwarded to the remote form.
    pub styles: Option<StyleMap>,

    /// Completion handling.
    pub handler: ResponseHandler,
}

// ============================================================================
// Builder Methods
// ============================================================================

impl FormOptions {
    /// Creates empty options: no styles, default redirect.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single style entry.
    #[must_use]
    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.styles
            .get_or_insert_with(StyleMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replaces the style map wholesale.
    #[inline]
    #[must_use]
    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Registers a custom completion handler, replacing the default redirect.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Fn(&RelayPayload) + Send + Sync + 'static) -> Self {
        self.handler = ResponseHandler::custom(handler);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
