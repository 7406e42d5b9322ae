//! The UI shell webview. It fills the window underneath app surfaces and
//! talks to the core over IPC.

use appdock_common::Rect;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wry::http::Response;
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

use super::handlers::{self, rect_to_wry};
use crate::content::{request_path, ContentProvider};
use crate::events::{EventQueue, SurfaceLabel};
use crate::ipc::{js_deliver, IPC_INIT_SCRIPT};
use crate::navigation::SHELL_SCHEME;

/// Where the shell content comes from.
pub struct ShellOptions {
    /// Development server URL. When unset the bundled shell is served
    /// through `appdock://`.
    pub dev_url: Option<String>,
    pub content: Option<Arc<ContentProvider>>,
    pub bounds: Rect,
    pub devtools: bool,
}

impl ShellOptions {
    pub fn start_url(&self) -> String {
        match &self.dev_url {
            Some(url) => url.clone(),
            None => format!("{SHELL_SCHEME}://localhost/index.html"),
        }
    }
}

pub struct ShellView {
    webview: WebView,
}

impl ShellView {
    pub fn build<W: HasWindowHandle>(
        window: &W,
        options: ShellOptions,
        events: EventQueue,
    ) -> Result<Self, wry::Error> {
        let url = options.start_url();

        let mut builder = WebViewBuilder::new()
            .with_url(&url)
            .with_bounds(rect_to_wry(options.bounds))
            .with_devtools(options.devtools)
            .with_initialization_script(IPC_INIT_SCRIPT);

        builder = handlers::attach_ipc_handler(builder, events.clone());
        builder = handlers::attach_page_load_handler(builder, events.clone(), SurfaceLabel::Shell);
        builder = handlers::attach_shell_navigation_handler(builder, events, options.dev_url.clone());

        if let Some(provider) = options.content {
            builder = attach_custom_protocol(builder, provider);
        }

        let webview = builder.build_as_child(window)?;
        info!(url = %url, "shell webview created");
        Ok(Self { webview })
    }

    /// Hand a JSON message (reply or push event) to the shell.
    pub fn deliver(&self, message: &serde_json::Value) {
        if let Err(e) = self.webview.evaluate_script(&js_deliver(message)) {
            warn!(error = %e, "failed to deliver message to shell");
        }
    }

    pub fn set_bounds(&self, bounds: Rect) {
        if let Err(e) = self.webview.set_bounds(rect_to_wry(bounds)) {
            warn!(error = %e, "failed to resize shell");
        }
    }
}

fn attach_custom_protocol(
    builder: WebViewBuilder<'_>,
    provider: Arc<ContentProvider>,
) -> WebViewBuilder<'_> {
    builder.with_custom_protocol(SHELL_SCHEME.to_string(), move |_id, request| {
        let uri = request.uri().to_string();
        let path = request_path(&uri);

        let (status, mime, body) = match provider.resolve(path) {
            Some(asset) => (200, asset.mime, asset.body),
            None => {
                warn!(path = %path, "custom protocol: asset not found");
                (404, "text/plain", b"Not Found".to_vec())
            }
        };
        debug!(path = %path, status, "custom protocol request");

        Response::builder()
            .status(status)
            .header("Content-Type", mime)
            .header("Access-Control-Allow-Origin", "appdock://localhost")
            .body(Cow::from(body.clone()))
            .unwrap_or_else(|_| Response::new(Cow::from(body)))
    })
}
