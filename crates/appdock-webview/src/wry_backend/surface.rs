use appdock_common::{AppId, Rect};
use wry::WebView;

use super::handlers::rect_to_wry;
use crate::surface::{Surface, SurfaceError};

/// An app's child webview.
pub struct WrySurface {
    webview: WebView,
    app_id: AppId,
}

impl WrySurface {
    pub(super) fn new(webview: WebView, app_id: AppId) -> Self {
        Self { webview, app_id }
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub(super) fn clear_browsing_data(&self) -> Result<(), SurfaceError> {
        self.webview
            .clear_all_browsing_data()
            .map_err(|e| SurfaceError::Clear(e.to_string()))
    }
}

fn op(result: Result<(), wry::Error>) -> Result<(), SurfaceError> {
    result.map_err(|e| SurfaceError::Operation(e.to_string()))
}

impl Surface for WrySurface {
    fn set_bounds(&self, bounds: Rect) -> Result<(), SurfaceError> {
        op(self.webview.set_bounds(rect_to_wry(bounds)))
    }

    fn set_visible(&self, visible: bool) -> Result<(), SurfaceError> {
        op(self.webview.set_visible(visible))
    }

    fn set_zoom(&self, level: f64) -> Result<(), SurfaceError> {
        op(self.webview.zoom(level))
    }

    fn load_url(&self, url: &str) -> Result<(), SurfaceError> {
        op(self.webview.load_url(url))
    }

    fn reload(&self) -> Result<(), SurfaceError> {
        op(self.webview.reload())
    }
}
