//! Per-tick polling: webview events, bridge requests, push events, the
//! idle sweep, and config reloads.

use std::time::Instant;

use chrono::Utc;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use appdock_webview::{PageLoadState, SurfaceLabel, WebViewEvent};

use super::core::AppDockApp;
use super::types::POLL_INTERVAL;

impl AppDockApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.poll_push_events();
            self.poll_sweep(now);
            self.poll_config();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Drain events raised by wry callbacks since the last tick.
    fn poll_webview_events(&mut self) {
        for event in self.webview_events.drain() {
            match event {
                WebViewEvent::IpcMessage { body } => self.handle_ipc_message(&body),
                WebViewEvent::TitleChanged {
                    label: SurfaceLabel::App(id),
                    title,
                } => {
                    if let Some(lifecycle) = &self.lifecycle {
                        if let Err(e) = lifecycle.record_title(&id, &title) {
                            tracing::debug!(app_id = %id, error = %e, "title ignored");
                        }
                    }
                }
                WebViewEvent::TitleChanged { .. } => {}
                WebViewEvent::PageLoad { label, state, url } => {
                    if state == PageLoadState::Finished {
                        tracing::debug!(?label, url = %url, "page loaded");
                    }
                }
                WebViewEvent::NavigationBlocked { label, url } => {
                    tracing::info!(?label, url = %url, "navigation blocked");
                }
            }
        }
    }

    /// Run one bridge request and deliver the reply to the shell.
    fn handle_ipc_message(&mut self, body: &str) {
        let Some(bridge) = &self.bridge else {
            tracing::warn!("IPC message before bridge was ready");
            return;
        };
        let Some(response) = pollster::block_on(bridge.handle_raw(body)) else {
            return;
        };
        if let Some(shell) = &self.shell {
            shell.deliver(&response.to_value());
        }
    }

    /// Forward bus events on subscribed channels to the shell.
    fn poll_push_events(&mut self) {
        let (Some(bridge), Some(shell)) = (&self.bridge, &self.shell) else {
            return;
        };
        for message in bridge.drain_events() {
            shell.deliver(&message.to_value());
        }
    }

    fn poll_sweep(&mut self, now: Instant) {
        if !self.sweep.is_due(now) {
            return;
        }
        self.sweep.mark_run(now);
        if let Some(lifecycle) = &self.lifecycle {
            let hibernated = pollster::block_on(lifecycle.sweep_idle(Utc::now()));
            if !hibernated.is_empty() {
                tracing::debug!(count = hibernated.len(), "idle apps hibernated");
            }
        }
    }

    fn poll_config(&mut self) {
        let Some(rx) = self.config_rx.as_mut() else {
            return;
        };
        match rx.has_changed() {
            Ok(true) => {
                let config = rx.borrow_and_update().clone();
                self.apply_config(config);
            }
            Ok(false) => {}
            Err(_) => {
                tracing::debug!("config reload channel closed");
                self.config_rx = None;
            }
        }
    }
}
