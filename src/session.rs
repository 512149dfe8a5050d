//! Per-session bookkeeping shared by both engines
//!
//! A session owns exactly the listeners it attached and a single-shot result
//! channel. Teardown detaches that listener set and nothing else, and the
//! result slot delivers at most one outcome no matter how many completion
//! paths race.

use tokio::sync::oneshot;

use crate::host::{HostPage, ListenerKind};

/// The set of document-level listeners one session has attached
///
/// Never relies on ambient host state: detaching removes exactly what was
/// attached, and a session must end with the set empty.
#[derive(Debug, Default)]
pub struct ListenerSet {
    attached: Vec<ListenerKind>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener on the host and record it
    pub fn attach<H: HostPage>(&mut self, host: &mut H, kind: ListenerKind) {
        if self.attached.contains(&kind) {
            return;
        }
        host.attach_listener(kind);
        self.attached.push(kind);
    }

    /// Detach everything this set attached
    pub fn detach_all<H: HostPage>(&mut self, host: &mut H) {
        for kind in self.attached.drain(..) {
            host.detach_listener(kind);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

/// Single-shot result channel, sender half
///
/// Exactly one success or one failure is ever delivered; the slot is
/// consumed on delivery, so racing completion paths cannot double-resolve.
#[derive(Debug)]
pub struct ResultSlot<T, E> {
    tx: Option<oneshot::Sender<Result<T, E>>>,
}

impl<T, E> ResultSlot<T, E> {
    /// Create a slot and the receiver its outcome will arrive on
    pub fn channel() -> (Self, oneshot::Receiver<Result<T, E>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Deliver the outcome; returns false if one was already delivered
    pub fn resolve(&mut self, outcome: Result<T, E>) -> bool {
        match self.tx.take() {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.tx.is_some()
    }
}

/// Pending outcome of an engine operation
///
/// Await [`wait`](Self::wait), or call [`wait_blocking`](Self::wait_blocking)
/// outside an async context. If the engine is dropped with the operation
/// still unresolved, the fallback error is returned.
#[derive(Debug)]
pub struct Pending<T, E: Clone> {
    rx: oneshot::Receiver<Result<T, E>>,
    abandoned: E,
}

impl<T, E: Clone> Pending<T, E> {
    pub(crate) fn new(rx: oneshot::Receiver<Result<T, E>>, abandoned: E) -> Self {
        Self { rx, abandoned }
    }

    /// Immediately-failed operation
    pub(crate) fn failed(error: E) -> Self {
        let (mut slot, rx) = ResultSlot::channel();
        let abandoned = error.clone();
        slot.resolve(Err(error));
        Self { rx, abandoned }
    }

    /// Wait for the one success or failure this operation produces
    pub async fn wait(self) -> Result<T, E> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(self.abandoned),
        }
    }

    /// Blocking variant of [`wait`](Self::wait)
    pub fn wait_blocking(self) -> Result<T, E> {
        futures::executor::block_on(self.wait())
    }

    /// Non-blocking poll, for hosts that pump their own event loop
    pub fn try_take(&mut self) -> Option<Result<T, E>> {
        self.rx.try_recv().ok()
    }
}
