//! Allow-list retrieval.
//!
//! The remote service publishes which styles the hosted form accepts.
//! [`StyleSource`] is the seam the widget validates through, so tests can
//! substitute a canned allow-list; [`HttpStyleSource`] is the production
//! implementation fetching `GET /checkout/allowed_styles`.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::styles::{AllowedStyles, AllowedStylesResponse};
use crate::url::ALLOWED_STYLES_PATH;

// ============================================================================
// StyleSource
// ============================================================================

/// Source of the style allow-list.
///
/// Fetch failures are non-fatal to the mount flow: the widget logs them at
/// debug level and skips validation.
#[async_trait]
pub trait StyleSource: Send + Sync {
    /// Fetches the current allow-list.
    async fn fetch_allowed_styles(&self) -> Result<AllowedStyles>;
}

// ============================================================================
// HttpStyleSource
// ============================================================================

/// HTTP-backed allow-list source.
pub struct HttpStyleSource {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Fully composed allow-list endpoint.
    endpoint: String,
}

impl HttpStyleSource {
    /// Creates a source fetching from `origin`'s allow-list endpoint.
    #[must_use]
    pub fn new(origin: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{origin}{ALLOWED_STYLES_PATH}"),
        }
    }

    /// Returns the endpoint this source fetches from.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StyleSource for HttpStyleSource {
    async fn fetch_allowed_styles(&self) -> Result<AllowedStyles> {
        debug!(endpoint = %self.endpoint, "Fetching style allow-list");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;

        let body: AllowedStylesResponse = response.json().await?;

        debug!(count = body.allowed_styles.len(), "Fetched style allow-list");
        Ok(body.allowed_styles)
    }
}

// ============================================================================
// Tests
// ============================================================================
