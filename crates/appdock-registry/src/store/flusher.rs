//! Fire-and-forget persistence.
//!
//! The registry submits a full [`PersistedState`] after every mutation.
//! A background task writes only the newest state it has seen, retrying
//! failed writes with exponential backoff until one succeeds. Failures are
//! logged and never reported back to the caller.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{KvStore, PersistedState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial: Duration,
    pub max: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &appdock_config::schema::PersistenceConfig) -> Self {
        Self {
            initial: Duration::from_millis(config.retry_initial_ms),
            max: Duration::from_millis(config.retry_max_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(250),
            max: Duration::from_secs(30),
        }
    }
}

enum FlushMsg {
    Persist(Box<PersistedState>),
    Shutdown(oneshot::Sender<()>),
}

/// Sending side of the flusher. Cheap to clone.
#[derive(Clone)]
pub struct FlushHandle {
    tx: mpsc::UnboundedSender<FlushMsg>,
}

impl FlushHandle {
    /// Queue a state for persistence. Never blocks.
    pub fn submit(&self, state: PersistedState) {
        if self.tx.send(FlushMsg::Persist(Box::new(state))).is_err() {
            warn!("store flusher is gone, dropping state update");
        }
    }

    /// Ask the flusher to write whatever is pending and stop.
    ///
    /// Resolves once the final write attempt has been made.
    pub async fn shutdown(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(FlushMsg::Shutdown(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// A handle whose submissions go nowhere.
    pub fn detached() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self { tx }
    }
}

/// Start the flusher task. Must be called within a tokio runtime.
pub fn spawn_flusher(store: Arc<dyn KvStore>, policy: RetryPolicy) -> (FlushHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let flusher = Flusher {
        store,
        policy,
        rx,
        pending: None,
        ack: None,
    };
    let task = tokio::spawn(flusher.run());
    (FlushHandle { tx }, task)
}

struct Flusher {
    store: Arc<dyn KvStore>,
    policy: RetryPolicy,
    rx: mpsc::UnboundedReceiver<FlushMsg>,
    pending: Option<Box<PersistedState>>,
    ack: Option<oneshot::Sender<()>>,
}

impl Flusher {
    async fn run(mut self) {
        loop {
            match self.rx.recv().await {
                Some(msg) => self.absorb(msg),
                None => {
                    debug!("all flush handles dropped, stopping flusher");
                    return;
                }
            }
            self.drain();

            if let Some(state) = self.pending.take() {
                self.write_until_done(state).await;
            }

            if let Some(ack) = self.ack.take() {
                info!("store flusher stopped");
                let _ = ack.send(());
                return;
            }
        }
    }

    fn absorb(&mut self, msg: FlushMsg) {
        match msg {
            FlushMsg::Persist(state) => self.pending = Some(state),
            FlushMsg::Shutdown(ack) => self.ack = Some(ack),
        }
    }

    /// Coalesce queued messages so only the newest state is written.
    fn drain(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.absorb(msg);
        }
    }

    async fn write_until_done(&mut self, mut state: Box<PersistedState>) {
        let mut backoff = self.policy.initial;
        let mut attempt: u32 = 1;

        loop {
            let result = state
                .entries()
                .and_then(|entries| self.store.set_many(entries));

            match result {
                Ok(()) => {
                    debug!(attempt, "store flushed");
                    return;
                }
                Err(e) if self.ack.is_some() => {
                    warn!(error = %e, "final store flush failed, giving up");
                    return;
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        attempt,
                        retry_in_ms = backoff.as_millis() as u64,
                        "store flush failed"
                    );
                }
            }

            self.wait_backoff(backoff).await;
            backoff = (backoff * 2).min(self.policy.max);
            attempt += 1;

            self.drain();
            if let Some(newer) = self.pending.take() {
                state = newer;
            }
        }
    }

    /// Sleep out a retry backoff while absorbing new messages. A shutdown
    /// request ends the wait early.
    async fn wait_backoff(&mut self, backoff: Duration) {
        let sleep = tokio::time::sleep(backoff);
        tokio::pin!(sleep);

        while self.ack.is_none() {
            tokio::select! {
                _ = &mut sleep => return,
                msg = self.rx.recv() => match msg {
                    Some(msg) => self.absorb(msg),
                    None => {
                        (&mut sleep).await;
                        return;
                    }
                },
            }
        }
    }
}
