//! Per-instance FIFO request queues.
//!
//! Every lifecycle operation on one app holds that app's async mutex for
//! its whole duration. tokio's mutex is fair, so waiters run in arrival
//! order; operations on different apps never wait on each other.

use appdock_common::AppId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Mutex;

#[derive(Default)]
pub(crate) struct RequestQueues {
    queues: RefCell<HashMap<AppId, Rc<Mutex<()>>>>,
}

impl RequestQueues {
    pub(crate) fn get(&self, id: &AppId) -> Rc<Mutex<()>> {
        Rc::clone(
            self.queues
                .borrow_mut()
                .entry(id.clone())
                .or_insert_with(|| Rc::new(Mutex::new(()))),
        )
    }

    /// Forget an app's queue. Requests already holding it finish normally.
    pub(crate) fn remove(&self, id: &AppId) {
        self.queues.borrow_mut().remove(id);
    }

    pub(crate) fn len(&self) -> usize {
        self.queues.borrow().len()
    }
}
