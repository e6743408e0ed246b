//! Widget core: mount controller and message relay.
//!
//! A [`CheckoutWidget`] owns one mount at a time: the container it rendered
//! into, the completion handler chosen at creation time, and the single
//! relay listener registered on the host page. Re-mounting through the same
//! widget first tears the previous mount down, so one listener per instance
//! holds by construction.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::fetch::StyleSource;
use crate::identifiers::{ListenerId, WidgetId};
use crate::page::{HostPage, IframeConfig, InboundMessage};
use crate::protocol::{RelayEvent, RelayPayload};
use crate::styles::{StyleMap, validate_styles};
use crate::url::{IframeKind, add_param};

use super::builder::WidgetBuilder;
use super::options::{FormOptions, ResponseHandler};

// ============================================================================
// CheckoutWidget
// ============================================================================

/// An embeddable checkout widget bound to one host page.
///
/// Construct through [`CheckoutWidget::builder()`]. Clones share the same
/// mount state. Dropping the last handle tears down any live mount, so a
/// forgotten [`destroy`](Self::destroy) cannot leave a listener behind.
#[derive(Clone)]
pub struct CheckoutWidget {
    inner: Arc<WidgetInner>,
}

/// Shared widget state.
pub(crate) struct WidgetInner {
    /// Instance ID attached to every log line.
    id: WidgetId,
    /// Host page adapter.
    page: Arc<dyn HostPage>,
    /// Trusted origin of the hosted checkout service.
    origin: String,
    /// Minimum iframe height in pixels.
    min_height: u32,
    /// Allow-list source; `None` disables style validation.
    style_source: Option<Arc<dyn StyleSource>>,
    /// Live mount, when one exists.
    mounted: Mutex<Option<Mounted>>,
}

/// State of a live mount.
struct Mounted {
    /// Container the iframe was rendered into.
    container_id: String,
    /// Relay listener registration.
    listener_id: ListenerId,
    /// Completion handling chosen at creation time.
    handler: ResponseHandler,
}

// ============================================================================
// Construction
// ============================================================================

impl CheckoutWidget {
    /// Creates a builder for configuring a widget.
    #[inline]
    #[must_use]
    pub fn builder() -> WidgetBuilder {
        WidgetBuilder::new()
    }

    pub(crate) fn new(
        page: Arc<dyn HostPage>,
        origin: String,
        min_height: u32,
        style_source: Option<Arc<dyn StyleSource>>,
    ) -> Self {
        Self {
            inner: Arc::new(WidgetInner {
                id: WidgetId::generate(),
                page,
                origin,
                min_height,
                style_source,
                mounted: Mutex::new(None),
            }),
        }
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl CheckoutWidget {
    /// Returns this instance's ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.inner.id
    }

    /// Returns the trusted service origin.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.inner.origin
    }

    /// Returns `true` while a form is mounted.
    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.lock().is_some()
    }
}

// ============================================================================
// Mount / Destroy
// ============================================================================

impl CheckoutWidget {
    /// Mounts a payment form of the given kind into a container.
    ///
    /// Composes the iframe URL from the kind's endpoint, the identifier
    /// token, and the optional percent-encoded style map; replaces the
    /// container's children with the frame; and registers the relay
    /// listener. Style validation runs detached afterwards and never affects
    /// the result.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] when `container_id` or `token` is empty
    /// - [`Error::DivDoesNotExist`] when the container is not in the page
    pub fn create_form(
        &self,
        container_id: &str,
        kind: IframeKind,
        token: &str,
        options: FormOptions,
    ) -> Result<()> {
        ensure_non_empty(container_id, "Div id")?;
        ensure_non_empty(token, kind.token_label())?;

        if !self.inner.page.container_exists(container_id) {
            return Err(Error::div_does_not_exist(container_id));
        }

        debug!(
            widget_id = %self.inner.id,
            container_id,
            kind = %kind,
            "Creating form"
        );

        // Replace any previous mount before registering a new listener.
        self.inner.teardown();

        let mut url = add_param(&kind.url(&self.inner.origin), kind.token_param(), token);

        let styles = options.styles.filter(|styles| !styles.is_empty());
        if let Some(styles) = &styles {
            let serialized = serde_json::to_string(styles)?;
            url = add_param(&url, "styles", &urlencoding::encode(&serialized));
        }

        self.inner.page.mount_frame(
            container_id,
            IframeConfig::new(url.clone(), self.inner.min_height),
        );

        let weak = Arc::downgrade(&self.inner);
        let listener_id = self
            .inner
            .page
            .add_message_listener(Arc::new(move |message: &InboundMessage| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_message(message);
                }
            }));

        *self.inner.mounted.lock() = Some(Mounted {
            container_id: container_id.to_string(),
            listener_id,
            handler: options.handler,
        });

        if let Some(styles) = styles {
            self.inner.spawn_style_validation(styles);
        }

        debug!(widget_id = %self.inner.id, url = %url, "Form created");
        Ok(())
    }

    /// Tears down the current mount.
    ///
    /// Removes the relay listener and clears the container. Safe to call
    /// when nothing is mounted, and safe to call repeatedly; no listener
    /// fires afterwards.
    pub fn destroy(&self) {
        debug!(widget_id = %self.inner.id, "Destroying mount");
        self.inner.teardown();
    }
}

// ============================================================================
// Relay
// ============================================================================

impl WidgetInner {
    /// Handles one inbound message while the relay is registered.
    fn on_message(&self, message: &InboundMessage) {
        if message.origin != self.origin {
            trace!(
                widget_id = %self.id,
                origin = %message.origin,
                "Dropping message from untrusted origin"
            );
            return;
        }

        let Some(payload) = RelayPayload::from_value(&message.data) else {
            trace!(widget_id = %self.id, "Dropping malformed message");
            return;
        };

        match payload.classify() {
            RelayEvent::Resize { height } => {
                let container_id = self
                    .mounted
                    .lock()
                    .as_ref()
                    .map(|mounted| mounted.container_id.clone());

                if let Some(container_id) = container_id {
                    debug!(widget_id = %self.id, height, "Resizing frame");
                    // +1 so the remote content never shows its own scrollbar.
                    self.page.set_frame_min_height(&container_id, height + 1);
                }
            }
            RelayEvent::Completion(payload) => {
                let handler = self
                    .mounted
                    .lock()
                    .as_ref()
                    .map(|mounted| mounted.handler.clone());

                match handler {
                    Some(ResponseHandler::Custom(callback)) => callback(&payload),
                    Some(ResponseHandler::Default) => self.redirect(&payload),
                    None => {}
                }
            }
        }
    }

    /// Performs the default completion redirect.
    fn redirect(&self, payload: &RelayPayload) {
        let (Some(return_url), Some(message)) =
            (payload.return_url.as_deref(), payload.message.as_deref())
        else {
            trace!(widget_id = %self.id, "Dropping completion without return_url/message");
            return;
        };

        let mut url = add_param(return_url, "status", message);
        if let Some(details) = payload.details.as_deref() {
            url = add_param(&url, "description", details);
        }

        debug!(widget_id = %self.id, url = %url, "Redirecting after completion");
        self.page.navigate(&url);
    }

    /// Removes the listener and clears the container, if mounted.
    fn teardown(&self) {
        let mounted = self.mounted.lock().take();
        if let Some(mounted) = mounted {
            self.page.remove_message_listener(mounted.listener_id);
            self.page.unmount_frame(&mounted.container_id);
        }
    }

    /// Spawns the detached allow-list validation for a mount.
    ///
    /// The task owns its own copy of the style map and never touches widget
    /// state, so destroying the widget mid-fetch is harmless.
    fn spawn_style_validation(&self, styles: StyleMap) {
        let Some(source) = self.style_source.clone() else {
            return;
        };

        let Ok(handle) = Handle::try_current() else {
            debug!(widget_id = %self.id, "No async runtime; skipping style validation");
            return;
        };

        let widget_id = self.id;
        handle.spawn(async move {
            match source.fetch_allowed_styles().await {
                Ok(allowed) => {
                    for warning in validate_styles(&styles, &allowed) {
                        warn!(widget_id = %widget_id, "{warning}");
                    }
                }
                Err(err) => {
                    debug!(
                        widget_id = %widget_id,
                        error = %err,
                        "Style allow-list fetch failed; validation skipped"
                    );
                }
            }
        });
    }
}

impl Drop for WidgetInner {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Rejects empty identifiers with the original error wording.
fn ensure_non_empty(value: &str, parameter: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_parameter(parameter));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
