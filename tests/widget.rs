//! End-to-end widget behavior over the in-memory host page.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use vpos_checkout::{
    AllowedStyles, CheckoutWidget, Error, FormOptions, MemoryPage, RelayPayload, Result,
    SANDBOX_ORIGIN, StyleKind, StyleSource,
};

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn sandbox_widget(page: &MemoryPage) -> CheckoutWidget {
    init_tracing();
    CheckoutWidget::builder()
        .page(Arc::new(page.clone()))
        .sandbox()
        .without_style_validation()
        .build()
        .expect("build widget")
}

/// Canned allow-list source counting how often it was hit.
struct StubStyleSource {
    calls: AtomicUsize,
    allowed: AllowedStyles,
    fail: bool,
}

impl StubStyleSource {
    fn new(allowed: AllowedStyles) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            allowed,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            allowed: AllowedStyles::new(),
            fail: true,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StyleSource for StubStyleSource {
    async fn fetch_allowed_styles(&self) -> Result<AllowedStyles> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::config("allow-list unreachable"));
        }
        Ok(self.allowed.clone())
    }
}

/// Lets detached tasks on the current runtime run to completion.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn checkout_mount_builds_expected_url() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    let frames = page.frames_in("validDiv");
    assert_eq!(frames.len(), 1);
    assert_eq!(
        frames[0].src,
        format!("{SANDBOX_ORIGIN}/checkout/new?process_id=1234")
    );
    assert_eq!(frames[0].min_height, 175);
}

#[test]
fn missing_container_fails_with_div_does_not_exist() {
    let page = MemoryPage::new();
    let widget = sandbox_widget(&page);

    let err = widget
        .create_checkout_form("missingDiv", "1234", FormOptions::new())
        .unwrap_err();

    assert!(matches!(err, Error::DivDoesNotExist { .. }));
    assert_eq!(err.to_string(), "Div with id: missingDiv could not be found.");
}

#[test]
fn empty_process_id_fails_with_invalid_parameter() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    let err = widget
        .create_checkout_form("validDiv", "", FormOptions::new())
        .unwrap_err();

    assert!(matches!(err, Error::InvalidParameter { .. }));
}

#[test]
fn styles_are_json_encoded_into_url() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    let options = FormOptions::new().with_style("header-show", true);
    widget
        .create_checkout_form("validDiv", "1234", options)
        .expect("mount");

    let frames = page.frames_in("validDiv");
    assert_eq!(
        frames[0].src,
        format!(
            "{SANDBOX_ORIGIN}/checkout/new?process_id=1234&styles=%7B%22header-show%22%3Atrue%7D"
        )
    );
}

#[test]
fn empty_style_map_adds_no_parameter() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    let options = FormOptions::new().with_styles(Default::default());
    widget
        .create_checkout_form("validDiv", "1234", options)
        .expect("mount");

    assert!(!page.frames_in("validDiv")[0].src.contains("styles="));
}

// ============================================================================
// Relay: completion
// ============================================================================

#[test]
fn trusted_completion_triggers_default_redirect() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    page.dispatch(
        SANDBOX_ORIGIN,
        json!({ "return_url": "http://example.com", "message": "sample" }),
    );

    assert_eq!(
        page.last_navigation().as_deref(),
        Some("http://example.com?status=sample")
    );
}

#[test]
fn completion_details_become_description_parameter() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    page.dispatch(
        SANDBOX_ORIGIN,
        json!({
            "return_url": "http://example.com",
            "message": "payment_fail",
            "details": "InsufficientFunds",
        }),
    );

    assert_eq!(
        page.last_navigation().as_deref(),
        Some("http://example.com?status=payment_fail&description=InsufficientFunds")
    );
}

#[test]
fn untrusted_origin_triggers_nothing() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    page.dispatch(
        "https://evil.example.com",
        json!({ "return_url": "http://example.com", "message": "sample" }),
    );

    assert!(page.last_navigation().is_none());
}

#[test]
fn malformed_payload_is_dropped() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    page.dispatch(SANDBOX_ORIGIN, json!("not an object"));
    page.dispatch(SANDBOX_ORIGIN, json!({ "message": "sample" }));

    assert!(page.last_navigation().is_none());
}

#[test]
fn custom_handler_receives_payload_and_suppresses_redirect() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    let seen: Arc<Mutex<Vec<RelayPayload>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let options = FormOptions::new().with_handler(move |payload| {
        seen_clone.lock().push(payload.clone());
    });

    widget
        .create_checkout_form("validDiv", "1234", options)
        .expect("mount");

    page.dispatch(
        SANDBOX_ORIGIN,
        json!({ "return_url": "http://example.com", "message": "sample" }),
    );

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message.as_deref(), Some("sample"));
    assert!(page.last_navigation().is_none());
}

#[test]
fn custom_handler_may_destroy_the_widget() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    let widget_clone = widget.clone();
    let options = FormOptions::new().with_handler(move |_| widget_clone.destroy());

    widget
        .create_checkout_form("validDiv", "1234", options)
        .expect("mount");

    page.dispatch(
        SANDBOX_ORIGIN,
        json!({ "return_url": "http://example.com", "message": "sample" }),
    );

    assert!(!widget.is_mounted());
    assert_eq!(page.listener_count(), 0);
}

// ============================================================================
// Relay: resize
// ============================================================================

#[test]
fn resize_message_bumps_min_height() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    page.dispatch(SANDBOX_ORIGIN, json!({ "iframeHeight": 410 }));

    assert_eq!(page.frames_in("validDiv")[0].min_height, 411);
    // Not a terminal message: the relay keeps listening.
    assert_eq!(page.listener_count(), 1);
}

#[test]
fn resize_from_untrusted_origin_is_ignored() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    page.dispatch("https://evil.example.com", json!({ "iframeHeight": 9999 }));

    assert_eq!(page.frames_in("validDiv")[0].min_height, 175);
}

// ============================================================================
// Destroy
// ============================================================================

#[test]
fn destroy_clears_container_and_listener() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    widget.destroy();

    assert!(page.frames_in("validDiv").is_empty());
    assert_eq!(page.listener_count(), 0);

    page.dispatch(
        SANDBOX_ORIGIN,
        json!({ "return_url": "http://example.com", "message": "sample" }),
    );
    assert!(page.last_navigation().is_none());
}

#[test]
fn destroy_is_idempotent() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    widget.destroy();
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");
    widget.destroy();
    widget.destroy();

    assert!(!widget.is_mounted());
}

#[test]
fn destroy_tolerates_container_removed_from_page() {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);
    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    page.remove_container("validDiv");
    widget.destroy();

    assert_eq!(page.listener_count(), 0);
}

#[test]
fn widget_can_remount_after_destroy() -> anyhow::Result<()> {
    let page = MemoryPage::with_container("validDiv");
    let widget = sandbox_widget(&page);

    widget.create_checkout_form("validDiv", "1234", FormOptions::new())?;
    widget.destroy();
    widget.create_checkout_form("validDiv", "5678", FormOptions::new())?;

    let frames = page.frames_in("validDiv");
    assert_eq!(frames.len(), 1);
    assert!(frames[0].src.ends_with("process_id=5678"));
    assert_eq!(page.listener_count(), 1);
    Ok(())
}

#[test]
fn independent_widgets_coexist() {
    let page = MemoryPage::new();
    page.insert_container("first");
    page.insert_container("second");

    let hits = Arc::new(AtomicUsize::new(0));

    let first = sandbox_widget(&page);
    let second = sandbox_widget(&page);

    for (widget, container) in [(&first, "first"), (&second, "second")] {
        let hits = Arc::clone(&hits);
        let options = FormOptions::new().with_handler(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        widget
            .create_checkout_form(container, "1234", options)
            .expect("mount");
    }

    assert_eq!(page.listener_count(), 2);

    // Both relays see the shared channel; each handles the completion.
    page.dispatch(SANDBOX_ORIGIN, json!({ "message": "sample", "return_url": "http://x" }));
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    first.destroy();
    assert_eq!(page.listener_count(), 1);
    assert!(second.is_mounted());
}

// ============================================================================
// Style validation (detached)
// ============================================================================

#[tokio::test]
async fn style_validation_fetches_allow_list_without_blocking_mount() -> anyhow::Result<()> {
    let page = MemoryPage::with_container("validDiv");
    let source = Arc::new(StubStyleSource::new(AllowedStyles::from([(
        "header-show".to_string(),
        StyleKind::Boolean,
    )])));

    init_tracing();
    let widget = CheckoutWidget::builder()
        .page(Arc::new(page.clone()))
        .sandbox()
        .style_source(source.clone())
        .build()?;

    let options = FormOptions::new().with_style("header-show", "wrong-value");
    widget.create_checkout_form("validDiv", "1234", options)?;

    // The frame is up before the allow-list round-trip finishes.
    assert_eq!(page.frames_in("validDiv").len(), 1);

    settle().await;
    assert_eq!(source.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn style_fetch_failure_does_not_affect_the_mount() {
    let page = MemoryPage::with_container("validDiv");
    let source = Arc::new(StubStyleSource::failing());

    init_tracing();
    let widget = CheckoutWidget::builder()
        .page(Arc::new(page.clone()))
        .sandbox()
        .style_source(source.clone())
        .build()
        .expect("build widget");

    let options = FormOptions::new().with_style("header-show", true);
    widget
        .create_checkout_form("validDiv", "1234", options)
        .expect("mount");

    settle().await;

    assert_eq!(source.calls(), 1);
    assert_eq!(page.frames_in("validDiv").len(), 1);
    assert!(widget.is_mounted());
}

#[tokio::test]
async fn mount_without_styles_never_fetches() {
    let page = MemoryPage::with_container("validDiv");
    let source = Arc::new(StubStyleSource::new(AllowedStyles::new()));

    init_tracing();
    let widget = CheckoutWidget::builder()
        .page(Arc::new(page.clone()))
        .sandbox()
        .style_source(source.clone())
        .build()
        .expect("build widget");

    widget
        .create_checkout_form("validDiv", "1234", FormOptions::new())
        .expect("mount");

    settle().await;
    assert_eq!(source.calls(), 0);
}
