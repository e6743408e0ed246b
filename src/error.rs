//! Error types for the checkout widget.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use vpos_checkout::{Result, Error};
//!
//! fn example(widget: &CheckoutWidget) -> Result<()> {
//!     widget.create_checkout_form("payment-div", "1234", FormOptions::new())?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Caller contract | [`Error::InvalidParameter`], [`Error::DivDoesNotExist`] |
//! | Configuration | [`Error::Config`] |
//! | External | [`Error::Json`], [`Error::Http`] |
//!
//! Style validation findings are *not* errors: they are advisory warnings
//! emitted through `tracing` and never abort form creation. Cross-origin
//! messages from untrusted origins are silently ignored, not surfaced here.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Caller Contract Errors
    // ========================================================================
    /// A required identifier was empty or otherwise unusable.
    ///
    /// Returned synchronously by the form-creation operations when the
    /// container id, process id, or alias token is empty.
    #[error("{parameter} must be a non empty string.")]
    InvalidParameter {
        /// Human-readable name of the offending parameter.
        parameter: String,
    },

    /// The named container element does not exist in the host page.
    ///
    /// Returned synchronously by the form-creation operations.
    #[error("Div with id: {div_id} could not be found.")]
    DivDoesNotExist {
        /// The container id that could not be resolved.
        div_id: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Widget configuration error.
    ///
    /// Returned when [`WidgetBuilder`](crate::WidgetBuilder) validation fails.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error from the allowed-styles fetch.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an invalid parameter error.
    #[inline]
    pub fn invalid_parameter(parameter: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
        }
    }

    /// Creates a missing container error.
    #[inline]
    pub fn div_does_not_exist(div_id: impl Into<String>) -> Self {
        Self::DivDoesNotExist {
            div_id: div_id.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error was caused by bad caller input.
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::DivDoesNotExist { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
