//! URL composition for the hosted checkout endpoints.
//!
//! The remote service routes each checkout flow to a fixed path under the
//! service origin; [`IframeKind`] owns that table. [`add_param`] is the
//! append-only query composer every URL in the crate is built with.
//!
//! # Example
//!
//! ```
//! use vpos_checkout::{add_param, IframeKind, PRODUCTION_ORIGIN};
//!
//! let base = IframeKind::Checkout.url(PRODUCTION_ORIGIN);
//! let url = add_param(&base, "process_id", "1234");
//! assert_eq!(url, "https://vpos.infonet.com.py/checkout/new?process_id=1234");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Production origin of the hosted checkout service.
pub const PRODUCTION_ORIGIN: &str = "https://vpos.infonet.com.py";

/// Sandbox origin of the hosted checkout service.
pub const SANDBOX_ORIGIN: &str = "https://vpos.infonet.com.py:8888";

/// Path serving the style allow-list (GET).
pub const ALLOWED_STYLES_PATH: &str = "/checkout/allowed_styles";

// ============================================================================
// add_param
// ============================================================================

/// Appends a `key=value` query parameter to a URL.
///
/// The separator depends on what the URL already carries:
///
/// - ends in `&` or `?` → no separator is added;
/// - contains a `?` anywhere → `&` is used;
/// - otherwise → `?` is used.
///
/// The result is purely textual: the composer never encodes, deduplicates,
/// or reorders. Structured values (such as JSON style maps) must be
/// percent-encoded by the caller before being passed in.
#[must_use]
pub fn add_param(url: &str, key: &str, value: &str) -> String {
    let separator = match url.chars().last() {
        Some('&' | '?') => "",
        _ if url.contains('?') => "&",
        _ => "?",
    };

    format!("{url}{separator}{key}={value}")
}

// ============================================================================
// IframeKind
// ============================================================================

/// The fixed checkout flows, each bound to a distinct remote path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IframeKind {
    /// Occasional payment form (`/checkout/new`).
    Checkout,
    /// Card registration form (`/checkout/register_card/new`).
    NewCard,
    /// Zimple wallet payment form (`/checkout/zimple/new`).
    Zimple,
    /// Preauthorization form (`/checkout/preauthorization/new`).
    Preauthorization,
    /// PIN-pad confirmation for a registered alias (`/alias_token/confirmation/new`).
    Confirmation,
}

impl IframeKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Checkout,
        Self::NewCard,
        Self::Zimple,
        Self::Preauthorization,
        Self::Confirmation,
    ];

    /// Returns the remote path for this kind.
    #[inline]
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Checkout => "/checkout/new",
            Self::NewCard => "/checkout/register_card/new",
            Self::Zimple => "/checkout/zimple/new",
            Self::Preauthorization => "/checkout/preauthorization/new",
            Self::Confirmation => "/alias_token/confirmation/new",
        }
    }

    /// Returns the query parameter carrying this kind's identifier.
    ///
    /// Every flow is keyed by a `process_id` except [`Confirmation`](Self::Confirmation),
    /// which resolves a registered card through an `alias_token`.
    #[inline]
    #[must_use]
    pub const fn token_param(self) -> &'static str {
        match self {
            Self::Confirmation => "alias_token",
            _ => "process_id",
        }
    }

    /// Returns the human-readable identifier name used in error messages.
    #[inline]
    #[must_use]
    pub const fn token_label(self) -> &'static str {
        match self {
            Self::Confirmation => "Alias token",
            _ => "Process id",
        }
    }

    /// Composes the full base URL for this kind under `origin`.
    #[inline]
    #[must_use]
    pub fn url(self, origin: &str) -> String {
        format!("{origin}{}", self.path())
    }
}

impl fmt::Display for IframeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Checkout => "Checkout",
            Self::NewCard => "NewCard",
            Self::Zimple => "Zimple",
            Self::Preauthorization => "Preauthorization",
            Self::Confirmation => "Confirmation",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_add_param_plain_url() {
        assert_eq!(
            add_param("http://example.com", "status", "ok"),
            "http://example.com?status=ok"
        );
    }

    #[test]
    fn test_add_param_existing_query() {
        assert_eq!(
            add_param("http://example.com?a=1", "status", "ok"),
            "http://example.com?a=1&status=ok"
        );
    }

    #[test]
    fn test_add_param_trailing_question_mark() {
        assert_eq!(
            add_param("http://example.com?", "status", "ok"),
            "http://example.com?status=ok"
        );
    }

    #[test]
    fn test_add_param_trailing_ampersand() {
        assert_eq!(
            add_param("http://example.com?a=1&", "status", "ok"),
            "http://example.com?a=1&status=ok"
        );
    }

    #[test]
    fn test_add_param_accumulates() {
        let url = add_param("http://example.com", "a", "1");
        let url = add_param(&url, "a", "2");
        assert_eq!(url, "http://example.com?a=1&a=2");
    }

    #[test]
    fn test_kind_urls() {
        assert_eq!(
            IframeKind::Checkout.url(PRODUCTION_ORIGIN),
            "https://vpos.infonet.com.py/checkout/new"
        );
        assert_eq!(
            IframeKind::NewCard.url(PRODUCTION_ORIGIN),
            "https://vpos.infonet.com.py/checkout/register_card/new"
        );
        assert_eq!(
            IframeKind::Zimple.url(PRODUCTION_ORIGIN),
            "https://vpos.infonet.com.py/checkout/zimple/new"
        );
        assert_eq!(
            IframeKind::Preauthorization.url(PRODUCTION_ORIGIN),
            "https://vpos.infonet.com.py/checkout/preauthorization/new"
        );
        assert_eq!(
            IframeKind::Confirmation.url(PRODUCTION_ORIGIN),
            "https://vpos.infonet.com.py/alias_token/confirmation/new"
        );
    }

    #[test]
    fn test_token_params() {
        for kind in IframeKind::ALL {
            let expected = if kind == IframeKind::Confirmation {
                "alias_token"
            } else {
                "process_id"
            };
            assert_eq!(kind.token_param(), expected);
        }
    }

    proptest! {
        #[test]
        fn prop_no_query_gets_question_mark(
            url in "[a-z]{1,10}://[a-z.]{1,20}(/[a-z]{0,10})*",
            key in "[a-z_]{1,10}",
            value in "[a-zA-Z0-9]{0,10}",
        ) {
            prop_assume!(!url.contains('?'));
            prop_assert_eq!(add_param(&url, &key, &value), format!("{url}?{key}={value}"));
        }

        #[test]
        fn prop_trailing_separator_appends_directly(
            base in "[a-z]{1,10}://[a-z.]{1,20}\\?([a-z]=[0-9]&)*",
            key in "[a-z_]{1,10}",
            value in "[a-zA-Z0-9]{0,10}",
        ) {
            prop_assert_eq!(add_param(&base, &key, &value), format!("{base}{key}={value}"));
        }

        #[test]
        fn prop_existing_query_gets_ampersand(
            base in "[a-z]{1,10}://[a-z.]{1,20}\\?[a-z]{1,5}=[0-9]{1,5}",
            key in "[a-z_]{1,10}",
            value in "[a-zA-Z0-9]{0,10}",
        ) {
            prop_assert_eq!(add_param(&base, &key, &value), format!("{base}&{key}={value}"));
        }
    }
}
