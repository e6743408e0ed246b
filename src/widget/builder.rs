//! Builder pattern for widget configuration.
//!
//! Provides a fluent API for configuring and creating [`CheckoutWidget`]
//! instances.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vpos_checkout::{CheckoutWidget, MemoryPage};
//!
//! # fn example() -> vpos_checkout::Result<()> {
//! let page = MemoryPage::with_container("payment-div");
//! let widget = CheckoutWidget::builder()
//!     .page(Arc::new(page))
//!     .sandbox()
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use url::Url;

use crate::error::{Error, Result};
use crate::fetch::{HttpStyleSource, StyleSource};
use crate::page::{DEFAULT_IFRAME_MIN_HEIGHT, HostPage};
use crate::url::{PRODUCTION_ORIGIN, SANDBOX_ORIGIN};

use super::core::CheckoutWidget;

// ============================================================================
// WidgetBuilder
// ============================================================================

/// Builder for configuring a [`CheckoutWidget`] instance.
///
/// Use [`CheckoutWidget::builder()`] to create a new builder.
#[derive(Default)]
pub struct WidgetBuilder {
    /// Host page adapter.
    page: Option<Arc<dyn HostPage>>,
    /// Trusted service origin.
    origin: Option<String>,
    /// Minimum iframe height override.
    min_height: Option<u32>,
    /// Allow-list source override.
    style_source: Option<Arc<dyn StyleSource>>,
    /// Whether style validation is disabled entirely.
    validation_disabled: bool,
}

// ============================================================================
// WidgetBuilder Implementation
// ============================================================================

impl WidgetBuilder {
    /// Creates a new widget builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host page adapter the widget operates through.
    #[inline]
    #[must_use]
    pub fn page(mut self, page: Arc<dyn HostPage>) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the trusted origin of the hosted checkout service.
    ///
    /// Inbound messages are accepted only when their declared origin matches
    /// this value exactly. Defaults to the production origin.
    #[inline]
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Targets the sandbox environment instead of production.
    #[inline]
    #[must_use]
    pub fn sandbox(mut self) -> Self {
        self.origin = Some(SANDBOX_ORIGIN.to_string());
        self
    }

    /// Overrides the default minimum iframe height (175 px).
    #[inline]
    #[must_use]
    pub fn min_height(mut self, min_height: u32) -> Self {
        self.min_height = Some(min_height);
        self
    }

    /// Overrides the allow-list source used for style validation.
    #[inline]
    #[must_use]
    pub fn style_source(mut self, source: Arc<dyn StyleSource>) -> Self {
        self.style_source = Some(source);
        self
    }

    /// Disables style validation entirely.
    ///
    /// Styles are still serialized into the iframe URL; they are just never
    /// checked against the allow-list.
    #[inline]
    #[must_use]
    pub fn without_style_validation(mut self) -> Self {
        self.validation_disabled = true;
        self
    }

    /// Builds the widget with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no page adapter was set
    /// - [`Error::Config`] if the origin is not a valid absolute URL
    pub fn build(self) -> Result<CheckoutWidget> {
        let origin = self.validate_origin()?;

        let Self {
            page,
            min_height,
            style_source,
            validation_disabled,
            ..
        } = self;

        let page = page.ok_or_else(|| Error::config("host page adapter not set"))?;

        let style_source = if validation_disabled {
            None
        } else {
            Some(style_source.unwrap_or_else(|| {
                let http: Arc<dyn StyleSource> = Arc::new(HttpStyleSource::new(&origin));
                http
            }))
        };

        Ok(CheckoutWidget::new(
            page,
            origin,
            min_height.unwrap_or(DEFAULT_IFRAME_MIN_HEIGHT),
            style_source,
        ))
    }

    /// Validates and normalizes the configured origin.
    fn validate_origin(&self) -> Result<String> {
        let origin = self
            .origin
            .clone()
            .unwrap_or_else(|| PRODUCTION_ORIGIN.to_string());
        let origin = origin.trim_end_matches('/').to_string();

        let parsed = Url::parse(&origin)
            .map_err(|err| Error::config(format!("invalid origin {origin:?}: {err}")))?;

        if !parsed.has_host() {
            return Err(Error::config(format!("origin {origin:?} has no host")));
        }

        Ok(origin)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::page::MemoryPage;

    fn page() -> Arc<dyn HostPage> {
        Arc::new(MemoryPage::new())
    }

    #[test]
    fn test_build_requires_page() {
        let result = WidgetBuilder::new().build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_build_defaults_to_production_origin() {
        let widget = WidgetBuilder::new().page(page()).build().expect("build");
        assert_eq!(widget.origin(), PRODUCTION_ORIGIN);
    }

    #[test]
    fn test_sandbox_selects_sandbox_origin() {
        let widget = WidgetBuilder::new()
            .page(page())
            .sandbox()
            .build()
            .expect("build");
        assert_eq!(widget.origin(), SANDBOX_ORIGIN);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let widget = WidgetBuilder::new()
            .page(page())
            .origin("https://vpos.example.com/")
            .build()
            .expect("build");
        assert_eq!(widget.origin(), "https://vpos.example.com");
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let result = WidgetBuilder::new()
            .page(page())
            .origin("not a url")
            .build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
