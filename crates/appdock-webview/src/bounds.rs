//! Bounds and visibility decisions for the app surface.
//!
//! Both functions are pure. The lifecycle manager re-evaluates them when
//! the window size, the dock layout, the selection, or the modal state
//! changes, and applies the result to its surfaces.

use appdock_common::{AppId, DockPosition, Rect, Size};
use appdock_config::schema::ChromeConfig;

/// Fixed chrome reserved around the app surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChromeInsets {
    pub toolbar_height: f64,
    pub status_bar_height: f64,
}

impl ChromeInsets {
    pub fn from_config(config: &ChromeConfig) -> Self {
        Self {
            toolbar_height: f64::from(config.toolbar_height),
            status_bar_height: f64::from(config.status_bar_height),
        }
    }
}

/// Rectangle available to the visible surface.
///
/// The dock takes `dock_size` on its edge. The toolbar sits on the top
/// edge unless the dock is there, and the status bar on the bottom edge
/// unless the dock is there. Width and height never go negative.
pub fn compute_bounds(
    window: Size,
    dock_position: DockPosition,
    dock_size: u32,
    chrome: ChromeInsets,
) -> Rect {
    let dock = f64::from(dock_size);
    let (mut x, mut y) = (0.0, 0.0);
    let (mut width, mut height) = (window.width, window.height);

    match dock_position {
        DockPosition::Left => {
            x = dock;
            width -= dock;
        }
        DockPosition::Right => width -= dock,
        DockPosition::Top => {
            y = dock;
            height -= dock;
        }
        DockPosition::Bottom => height -= dock,
    }

    if dock_position != DockPosition::Top {
        y += chrome.toolbar_height;
        height -= chrome.toolbar_height;
    }
    if dock_position != DockPosition::Bottom {
        height -= chrome.status_bar_height;
    }

    Rect::new(x, y, width.max(0.0), height.max(0.0))
}

/// Which surface, if any, should be on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityPlan {
    HideAll,
    Show(AppId),
}

impl VisibilityPlan {
    pub fn shows(&self, id: &AppId) -> bool {
        matches!(self, Self::Show(shown) if shown == id)
    }
}

/// An open modal hides everything. Otherwise exactly the active surface
/// is shown, or nothing when there is no selection.
pub fn apply_visibility(active: Option<&AppId>, modal_open: bool) -> VisibilityPlan {
    match active {
        Some(id) if !modal_open => VisibilityPlan::Show(id.clone()),
        _ => VisibilityPlan::HideAll,
    }
}
