//! Command/event bridge between the UI shell and the core.
//!
//! Each request is parsed into a closed [`Command`], validated, and run
//! against the registry and lifecycle manager. The reply always carries
//! the request id. Push events flow separately through
//! [`Subscriptions`].

mod dispatch;
pub mod protocol;
mod subscriptions;


pub use protocol::{Command, PushMessage, Request, Response};
pub use subscriptions::Subscriptions;

use appdock_webview::{SurfaceBackend, ViewLifecycleManager};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

pub struct CommandBridge<B: SurfaceBackend> {
    lifecycle: Rc<ViewLifecycleManager<B>>,
    subscriptions: RefCell<Subscriptions>,
}

impl<B: SurfaceBackend> CommandBridge<B> {
    pub fn new(lifecycle: Rc<ViewLifecycleManager<B>>) -> Self {
        let subscriptions = Subscriptions::new(lifecycle.bus().clone());
        Self {
            lifecycle,
            subscriptions: RefCell::new(subscriptions),
        }
    }

    pub fn lifecycle(&self) -> &Rc<ViewLifecycleManager<B>> {
        &self.lifecycle
    }

    /// Handle one raw IPC body. Returns `None` when the body has no
    /// readable id and cannot be answered.
    pub async fn handle_raw(&self, body: &str) -> Option<Response> {
        match Request::parse(body) {
            Ok(request) => Some(self.handle(request).await),
            Err(failure) => {
                warn!(error = %failure.message, "bridge request rejected");
                failure
                    .id
                    .map(|id| Response::error(id, "validation_error", failure.message))
            }
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        let op = request.command.op();
        match self.dispatch(request.command).await {
            Ok(data) => {
                debug!(id = request.id, op, "bridge request handled");
                Response::success(request.id, data)
            }
            Err(e) => {
                warn!(id = request.id, op, error = %e, "bridge request failed");
                Response::failure(request.id, &e)
            }
        }
    }

    /// Pending push events for the channels the shell subscribed to.
    pub fn drain_events(&self) -> Vec<PushMessage> {
        self.subscriptions.borrow_mut().drain()
    }
}
