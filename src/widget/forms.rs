//! Per-flow form operations.
//!
//! Thin wrappers binding [`create_form`](CheckoutWidget::create_form) to
//! each checkout flow. All of them share the same preconditions and side
//! effects; only the remote endpoint and the identifier parameter differ.

use crate::error::Result;
use crate::url::IframeKind;

use super::core::CheckoutWidget;
use super::options::FormOptions;

// ============================================================================
// CheckoutWidget - Form Operations
// ============================================================================

impl CheckoutWidget {
    /// Mounts an occasional payment form.
    ///
    /// # Errors
    ///
    /// See [`create_form`](Self::create_form).
    pub fn create_checkout_form(
        &self,
        container_id: &str,
        process_id: &str,
        options: FormOptions,
    ) -> Result<()> {
        self.create_form(container_id, IframeKind::Checkout, process_id, options)
    }

    /// Mounts a card registration form.
    ///
    /// # Errors
    ///
    /// See [`create_form`](Self::create_form).
    pub fn create_new_card_form(
        &self,
        container_id: &str,
        process_id: &str,
        options: FormOptions,
    ) -> Result<()> {
        self.create_form(container_id, IframeKind::NewCard, process_id, options)
    }

    /// Mounts a Zimple wallet payment form.
    ///
    /// # Errors
    ///
    /// See [`create_form`](Self::create_form).
    pub fn create_zimple_form(
        &self,
        container_id: &str,
        process_id: &str,
        options: FormOptions,
    ) -> Result<()> {
        self.create_form(container_id, IframeKind::Zimple, process_id, options)
    }

    /// Mounts a preauthorization form.
    ///
    /// # Errors
    ///
    /// See [`create_form`](Self::create_form).
    pub fn create_preauthorization_form(
        &self,
        container_id: &str,
        process_id: &str,
        options: FormOptions,
    ) -> Result<()> {
        self.create_form(
            container_id,
            IframeKind::Preauthorization,
            process_id,
            options,
        )
    }

    /// Mounts the PIN-pad confirmation for a registered card alias.
    ///
    /// Keyed by `alias_token` rather than `process_id`.
    ///
    /// # Errors
    ///
    /// See [`create_form`](Self::create_form).
    pub fn load_confirmation(
        &self,
        container_id: &str,
        alias_token: &str,
        options: FormOptions,
    ) -> Result<()> {
        self.create_form(container_id, IframeKind::Confirmation, alias_token, options)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::page::MemoryPage;
    use crate::url::SANDBOX_ORIGIN;

    use super::*;

    fn widget_on(page: &MemoryPage) -> CheckoutWidget {
        CheckoutWidget::builder()
            .page(Arc::new(page.clone()))
            .sandbox()
            .without_style_validation()
            .build()
            .expect("build widget")
    }

    #[test]
    fn test_each_flow_hits_its_endpoint() {
        let cases: [(&str, fn(&CheckoutWidget) -> crate::Result<()>); 5] = [
            ("/checkout/new?process_id=1234", |w| {
                w.create_checkout_form("target", "1234", FormOptions::new())
            }),
            ("/checkout/register_card/new?process_id=1234", |w| {
                w.create_new_card_form("target", "1234", FormOptions::new())
            }),
            ("/checkout/zimple/new?process_id=1234", |w| {
                w.create_zimple_form("target", "1234", FormOptions::new())
            }),
            ("/checkout/preauthorization/new?process_id=1234", |w| {
                w.create_preauthorization_form("target", "1234", FormOptions::new())
            }),
            ("/alias_token/confirmation/new?alias_token=1234", |w| {
                w.load_confirmation("target", "1234", FormOptions::new())
            }),
        ];

        for (suffix, mount) in cases {
            let page = MemoryPage::with_container("target");
            let widget = widget_on(&page);

            mount(&widget).expect("mount");

            let frames = page.frames_in("target");
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].src, format!("{SANDBOX_ORIGIN}{suffix}"));
        }
    }
}
