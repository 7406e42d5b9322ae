//! Callback attachments shared by app surfaces and the shell.

use appdock_common::Rect;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{EventQueue, PageLoadState, SurfaceLabel, WebViewEvent};
use crate::navigation::{is_app_navigation_allowed, is_shell_navigation_allowed};

pub fn rect_to_wry(rect: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}

pub(super) fn attach_ipc_handler(builder: WebViewBuilder<'_>, events: EventQueue) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        debug!(body_len = body.len(), "IPC message from shell");
        events.push(WebViewEvent::IpcMessage { body });
    })
}

pub(super) fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    events: EventQueue,
    label: SurfaceLabel,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?label, ?state, url = %url, "page load");
        events.push(WebViewEvent::PageLoad {
            label: label.clone(),
            state,
            url,
        });
    })
}

pub(super) fn attach_title_handler(
    builder: WebViewBuilder<'_>,
    events: EventQueue,
    label: SurfaceLabel,
) -> WebViewBuilder<'_> {
    builder.with_document_title_changed_handler(move |title| {
        events.push(WebViewEvent::TitleChanged {
            label: label.clone(),
            title,
        });
    })
}

pub(super) fn attach_app_navigation_handler(
    builder: WebViewBuilder<'_>,
    events: EventQueue,
    label: SurfaceLabel,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if is_app_navigation_allowed(&url) {
            return true;
        }
        warn!(?label, url = %url, "navigation blocked");
        events.push(WebViewEvent::NavigationBlocked {
            label: label.clone(),
            url,
        });
        false
    })
}

pub(super) fn attach_shell_navigation_handler(
    builder: WebViewBuilder<'_>,
    events: EventQueue,
    dev_url: Option<String>,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if is_shell_navigation_allowed(&url, dev_url.as_deref()) {
            return true;
        }
        warn!(url = %url, "shell navigation blocked: URL not in allowlist");
        events.push(WebViewEvent::NavigationBlocked {
            label: SurfaceLabel::Shell,
            url,
        });
        false
    })
}
