//! Reconciler: runs remote operations and feeds their outcomes to the store.
//!
//! The store is owned by one consumer task. Every change, whether a local
//! command or a settled remote outcome, reaches it as an [`Action`] on a
//! single `mpsc` channel, and is applied in arrival order, one at a time.
//! Remote calls themselves run on their own tasks and may settle in any
//! order; nothing is suppressed for being stale, so the last outcome applied
//! wins.
//!
//! ```text
//!  handle.publish(draft) ──► CreatePending ─────────────┐
//!        │                                              ▼
//!        └─► spawn: source.create(draft) ──► outcome ─► queue ─► store ─► watch<Snapshot>
//! ```

use crate::traits::ExcerptSource;
use folio_core::{Action, Excerpt, ExcerptDraft, ExcerptId, ExcerptStore, Snapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

enum Envelope {
    Apply(Action),
    /// Reply once everything queued ahead of it has been applied.
    Flush(oneshot::Sender<Snapshot>),
    Shutdown,
}

/// Owns the consumer task. Dropping it leaves the task running until every
/// [`ReconcilerHandle`] is gone; call [`shutdown`](Self::shutdown) to stop
/// it explicitly and get the store back.
pub struct Reconciler {
    handle: ReconcilerHandle,
    task: JoinHandle<ExcerptStore>,
}

impl Reconciler {
    /// Start the consumer task for `store`, talking to `source`.
    pub fn spawn(store: ExcerptStore, source: Arc<dyn ExcerptSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshots, snapshot_rx) = watch::channel(store.snapshot());
        tracing::info!(source = source.name(), "reconciler started");

        let task = tokio::spawn(consume(store, rx, snapshots));
        Self {
            handle: ReconcilerHandle { tx, snapshots: snapshot_rx, source },
            task,
        }
    }

    pub fn handle(&self) -> ReconcilerHandle {
        self.handle.clone()
    }

    /// Apply everything already queued, stop the consumer, and return the
    /// store. Outcomes that settle afterwards are dropped.
    pub async fn shutdown(self) -> anyhow::Result<ExcerptStore> {
        let _ = self.handle.tx.send(Envelope::Shutdown);
        let store = self.task.await?;
        tracing::info!(revision = store.revision(), "reconciler stopped");
        Ok(store)
    }
}

async fn consume(
    mut store: ExcerptStore,
    mut rx: mpsc::UnboundedReceiver<Envelope>,
    snapshots: watch::Sender<Snapshot>,
) -> ExcerptStore {
    while let Some(envelope) = rx.recv().await {
        match envelope {
            Envelope::Apply(action) => {
                store.dispatch(action);
                snapshots.send_replace(store.snapshot());
            }
            Envelope::Flush(reply) => {
                let _ = reply.send(store.snapshot());
            }
            Envelope::Shutdown => break,
        }
    }
    store
}

/// Cheap, cloneable entry point for the view layer.
#[derive(Clone)]
pub struct ReconcilerHandle {
    tx: mpsc::UnboundedSender<Envelope>,
    snapshots: watch::Receiver<Snapshot>,
    source: Arc<dyn ExcerptSource>,
}

impl ReconcilerHandle {
    /// Queue a synchronous command (or a hand-made outcome) for the store.
    pub fn dispatch(&self, action: Action) {
        deliver(&self.tx, action);
    }

    /// Latest published snapshot. May trail actions still in the queue; use
    /// [`flush`](Self::flush) to wait for them.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that wakes on every applied action.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Wait until every action queued so far has been applied.
    pub async fn flush(&self) -> anyhow::Result<Snapshot> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope::Flush(reply))
            .map_err(|_| anyhow::anyhow!("reconciler has stopped"))?;
        Ok(rx.await?)
    }

    /// Refresh the whole collection from the source.
    pub fn fetch_all(&self) -> JoinHandle<()> {
        self.dispatch(Action::ListPending);
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match source.list().await {
                Ok(records) => Action::ListFulfilled(records),
                Err(error) => Action::ListRejected(error),
            };
            deliver(&tx, action);
        })
    }

    /// Create an excerpt. On success the publish form is cleared.
    pub fn publish(&self, draft: ExcerptDraft) -> JoinHandle<()> {
        self.dispatch(Action::CreatePending);
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match source.create(draft).await {
                Ok(record) => {
                    deliver(&tx, Action::CreateFulfilled(record));
                    deliver(&tx, Action::ResetPublishForm);
                }
                Err(error) => deliver(&tx, Action::CreateRejected(error)),
            }
        })
    }

    /// Publish whatever the form holds once the queue has caught up.
    pub async fn publish_form(&self) -> anyhow::Result<JoinHandle<()>> {
        let draft = self.flush().await?.form.to_draft();
        Ok(self.publish(draft))
    }

    /// Replace an excerpt's author, work and body.
    pub fn update(&self, excerpt: Excerpt) -> JoinHandle<()> {
        self.dispatch(Action::UpdatePending);
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match source.update(excerpt).await {
                Ok(record) => Action::UpdateFulfilled(record),
                Err(error) => Action::UpdateRejected(error),
            };
            deliver(&tx, action);
        })
    }

    pub fn delete(&self, id: ExcerptId) -> JoinHandle<()> {
        self.dispatch(Action::DeletePending);
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match source.delete(id).await {
                Ok(deleted) => Action::DeleteFulfilled(deleted),
                Err(error) => Action::DeleteRejected(error),
            };
            deliver(&tx, action);
        })
    }
}

fn deliver(tx: &mpsc::UnboundedSender<Envelope>, action: Action) {
    let name = action.name();
    if tx.send(Envelope::Apply(action)).is_err() {
        tracing::debug!(action = name, "reconciler stopped; dropping action");
    }
}
