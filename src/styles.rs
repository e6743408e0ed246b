//! Style customization for the hosted payment form.
//!
//! Callers may pass a map of style names to values; the map is JSON-encoded
//! into the iframe URL so the remote form can apply it. The remote service
//! also publishes an allow-list (`/checkout/allowed_styles`) describing
//! which names it accepts and what kind of value each expects.
//!
//! Validation against that allow-list is advisory: findings are returned as
//! [`StyleWarning`]s (and logged by the widget), never as errors, and never
//! abort form creation.

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Matches `#` followed by exactly 3 or 6 hex digits.
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern")
});

// ============================================================================
// StyleValue
// ============================================================================

/// A caller-supplied style value: a string or a native boolean.
///
/// Both `"header-show": true` and `"header-show": "true"` are accepted for
/// boolean-like styles; color styles must be hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Native boolean.
    Bool(bool),
    /// String value (hex color or boolean literal).
    Text(String),
}

impl StyleValue {
    /// Returns `true` if the value is a valid 3- or 6-digit hex color.
    #[must_use]
    pub fn is_hex_color(&self) -> bool {
        match self {
            Self::Text(text) => HEX_COLOR.is_match(text),
            Self::Bool(_) => false,
        }
    }

    /// Returns `true` if the value is one of the boolean representations.
    #[must_use]
    pub fn is_boolean_like(&self) -> bool {
        match self {
            Self::Bool(_) => true,
            Self::Text(text) => matches!(text.as_str(), "true" | "false"),
        }
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::Text(text) => text.fmt(f),
        }
    }
}

// ============================================================================
// StyleMap
// ============================================================================

/// Ordered mapping from style name to value.
///
/// Ordered so the JSON serialization embedded in the iframe URL is stable.
pub type StyleMap = BTreeMap<String, StyleValue>;

// ============================================================================
// Allow-List
// ============================================================================

/// Kind of value a style accepts, as published by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// 3- or 6-digit hex color string.
    Color,
    /// Boolean flag (native or `"true"`/`"false"`).
    Boolean,
}

/// Mapping from style name to expected kind.
pub type AllowedStyles = BTreeMap<String, StyleKind>;

/// Wire shape of the `/checkout/allowed_styles` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedStylesResponse {
    /// The published allow-list.
    pub allowed_styles: AllowedStyles,
}

// ============================================================================
// StyleWarning
// ============================================================================

/// Advisory finding from style validation.
///
/// Display strings match what integrators grep their consoles for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleWarning {
    /// The style name is not in the allow-list.
    #[error("Invalid Style Object: the style {name} is not allowed")]
    NotAllowed {
        /// The rejected style name.
        name: String,
    },

    /// The value does not match the kind the allow-list declares.
    #[error("Invalid Value: the value {value} for the style {name} is not valid.")]
    InvalidValue {
        /// The style name.
        name: String,
        /// The offending value.
        value: StyleValue,
    },
}

// ============================================================================
// Validation
// ============================================================================

/// Validates a caller style map against the published allow-list.
///
/// Returns one warning per offending entry, in map order. An empty result
/// means every supplied style is acceptable.
#[must_use]
pub fn validate_styles(styles: &StyleMap, allowed: &AllowedStyles) -> Vec<StyleWarning> {
    let mut warnings = Vec::new();

    for (name, value) in styles {
        let Some(kind) = allowed.get(name) else {
            warnings.push(StyleWarning::NotAllowed { name: name.clone() });
            continue;
        };

        let valid = match kind {
            StyleKind::Color => value.is_hex_color(),
            StyleKind::Boolean => value.is_boolean_like(),
        };

        if !valid {
            warnings.push(StyleWarning::InvalidValue {
                name: name.clone(),
                value: value.clone(),
            });
        }
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================
