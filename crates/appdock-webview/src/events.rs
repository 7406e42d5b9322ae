//! Events raised by native web views, queued for the main event loop.

use appdock_common::AppId;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Which web view raised an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceLabel {
    Shell,
    App(AppId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    PageLoad {
        label: SurfaceLabel,
        state: PageLoadState,
        url: String,
    },
    TitleChanged {
        label: SurfaceLabel,
        title: String,
    },
    /// Raw bridge request posted by the shell.
    IpcMessage { body: String },
    NavigationBlocked {
        label: SurfaceLabel,
        url: String,
    },
}

/// Shared queue filled by wry callbacks and drained by the event loop.
#[derive(Clone, Default)]
pub struct EventQueue {
    inner: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: WebViewEvent) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    pub fn drain(&self) -> Vec<WebViewEvent> {
        let mut events = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *events)
    }
}
