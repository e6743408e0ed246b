//! Embeddable hosted-checkout iframe widget.
//!
//! This library lets a host application embed a hosted payment form: it
//! mounts an iframe pointing at the checkout service, relays sizing and
//! completion messages from that iframe, and tears everything down again.
//!
//! # Architecture
//!
//! The widget never touches a DOM directly:
//!
//! - **Widget (Rust)**: validates input, composes the iframe URL, decides
//!   what each relayed message means
//! - **Host page (adapter)**: performs the actual DOM effects behind the
//!   [`HostPage`] trait
//!
//! Key design principles:
//!
//! - Each [`CheckoutWidget`] owns its own state: no globals, so multiple
//!   independent mounts coexist safely
//! - At most one iframe/listener pair per widget instance, by construction
//! - Messages from untrusted origins are dropped silently; origin equality
//!   is the sole trust boundary
//! - Style validation is advisory and detached: it never blocks or fails
//!   a mount
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use vpos_checkout::{CheckoutWidget, FormOptions, MemoryPage, Result};
//!
//! fn main() -> Result<()> {
//!     // MemoryPage stands in for a real DOM adapter here.
//!     let page = MemoryPage::with_container("payment-div");
//!
//!     let widget = CheckoutWidget::builder()
//!         .page(Arc::new(page))
//!         .sandbox()
//!         .build()?;
//!
//!     // Mount the payment form for a process started server-side.
//!     widget.create_checkout_form("payment-div", "1234", FormOptions::new())?;
//!
//!     // ... the hosted form drives the payment from here ...
//!
//!     widget.destroy();
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`widget`] | [`CheckoutWidget`], its builder and options |
//! | [`page`] | Host page adapter trait and [`MemoryPage`] |
//! | [`protocol`] | Relay message types |
//! | [`styles`] | Style maps, allow-list, validation |
//! | [`fetch`] | Allow-list retrieval ([`StyleSource`]) |
//! | [`url`] | Endpoint table and query composer |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for widget entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Allow-list retrieval.
///
/// [`StyleSource`] is the validation seam; [`HttpStyleSource`] fetches the
/// published allow-list over HTTP.
pub mod fetch;

/// Host page adapter.
///
/// The [`HostPage`] trait carries every DOM side effect; [`MemoryPage`] is
/// the in-memory implementation.
pub mod page;

/// Relay message types.
///
/// Payloads posted by the hosted iframe and their classification.
pub mod protocol;

/// Style customization and validation.
pub mod styles;

/// URL composition for the hosted checkout endpoints.
pub mod url;

/// Checkout widget: mount controller, message relay, and configuration.
pub mod widget;

// ============================================================================
// Re-exports
// ============================================================================

// Widget types
pub use widget::{CheckoutWidget, FormOptions, ResponseHandler, WidgetBuilder};

// Page adapter types
pub use page::{
    DEFAULT_IFRAME_MIN_HEIGHT, HostPage, IframeConfig, InboundMessage, MemoryPage, MessageListener,
};

// Protocol types
pub use protocol::{RelayEvent, RelayPayload};

// Style types
pub use styles::{AllowedStyles, StyleKind, StyleMap, StyleValue, StyleWarning, validate_styles};

// Allow-list sources
pub use fetch::{HttpStyleSource, StyleSource};

// URL helpers
pub use crate::url::{ALLOWED_STYLES_PATH, IframeKind, PRODUCTION_ORIGIN, SANDBOX_ORIGIN, add_param};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ListenerId, WidgetId};
