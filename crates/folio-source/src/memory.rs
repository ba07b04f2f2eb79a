//! source::memory
//!
//! In-memory excerpt source, used by the console demo and by tests.
//!
//! # Design
//!
//! Records live behind an `Arc<Mutex<...>>`, so clones share one backing
//! set. The source behaves like the HTTP API it stands in for:
//!
//! - ids are assigned from a counter that starts above every seeded id and
//!   only ever grows, so a deleted id is never handed out again
//! - create and update validate the author, work and body
//! - update and delete of an unknown id fail with [`RemoteError::NotFound`]
//!
//! Latency can be simulated per operation, and failures injected either
//! permanently or for the next call only.
//!
//! # Example
//!
//! ```
//! use folio_source::{ExcerptSource, InMemorySource};
//! use folio_core::{ExcerptDraft, ExcerptId};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let source = InMemorySource::new();
//! let created = source
//!     .create(ExcerptDraft::new("Woolf", "The Waves", "I have made up thousands of stories"))
//!     .await
//!     .unwrap();
//! assert_eq!(created.id, ExcerptId(1));
//! # });
//! ```

use async_trait::async_trait;
use folio_core::{Excerpt, ExcerptDraft, ExcerptId, RemoteError};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::traits::{ExcerptSource, Operation};

/// Longest author or work accepted, in bytes.
pub const MAX_LABEL_BYTES: usize = 500;

/// In-memory excerpt source.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    inner: Arc<Mutex<Inner>>,
    /// Delay applied to operations without their own latency.
    latency: Duration,
}

#[derive(Debug)]
struct Inner {
    records: BTreeMap<ExcerptId, Excerpt>,
    /// Next id to assign. Never decreases; `None` once the id space is
    /// used up.
    next_id: Option<i64>,
    op_latency: HashMap<Operation, Duration>,
    failures: HashMap<Operation, Failure>,
    requests: Vec<Request>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: Some(1),
            op_latency: HashMap::new(),
            failures: HashMap::new(),
            requests: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Failure {
    error: RemoteError,
    once: bool,
}

/// A request as received, recorded for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create(ExcerptDraft),
    Update(Excerpt),
    Delete(ExcerptId),
}

impl InMemorySource {
    /// Create an empty source. The first excerpt created gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding `records`. New ids start after the largest
    /// seeded id. Seeding `i64::MAX` leaves no id for `create` to assign.
    pub fn with_records(records: impl IntoIterator<Item = Excerpt>) -> Self {
        let records: BTreeMap<ExcerptId, Excerpt> =
            records.into_iter().map(|r| (r.id, r)).collect();
        let next_id = match records.keys().next_back() {
            Some(max) => max.get().checked_add(1).map(|id| id.max(1)),
            None => Some(1),
        };
        Self {
            inner: Arc::new(Mutex::new(Inner { records, next_id, ..Inner::default() })),
            latency: Duration::ZERO,
        }
    }

    /// Delay every operation by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay one kind of operation, overriding the global latency.
    pub async fn set_latency(&self, op: Operation, latency: Duration) {
        self.inner.lock().await.op_latency.insert(op, latency);
    }

    /// Fail every `op` with `error` until [`clear_failures`](Self::clear_failures).
    pub async fn fail_on(&self, op: Operation, error: RemoteError) {
        self.inner.lock().await.failures.insert(op, Failure { error, once: false });
    }

    /// Fail only the next `op` with `error`.
    pub async fn fail_next(&self, op: Operation, error: RemoteError) {
        self.inner.lock().await.failures.insert(op, Failure { error, once: true });
    }

    pub async fn clear_failures(&self) {
        self.inner.lock().await.failures.clear();
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<Request> {
        self.inner.lock().await.requests.clone()
    }

    /// Current records, ordered by id.
    pub async fn records(&self) -> Vec<Excerpt> {
        self.inner.lock().await.records.values().cloned().collect()
    }

    /// Record the request, wait out the simulated latency, then report any
    /// injected failure.
    async fn enter(&self, op: Operation, request: Request) -> Result<(), RemoteError> {
        let latency = {
            let mut inner = self.inner.lock().await;
            inner.requests.push(request);
            inner.op_latency.get(&op).copied().unwrap_or(self.latency)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut inner = self.inner.lock().await;
        let failure = match inner.failures.get(&op).map(|f| f.once) {
            Some(true) => inner.failures.remove(&op),
            Some(false) => inner.failures.get(&op).cloned(),
            None => None,
        };
        match failure {
            Some(Failure { error, .. }) => {
                tracing::debug!(%op, %error, "injected failure");
                Err(error)
            }
            None => Ok(()),
        }
    }
}

/// Check the fields the API requires, collecting every problem at once.
pub fn validate(author: &str, work: &str, body: &str) -> Result<(), RemoteError> {
    let mut errors = BTreeMap::new();
    for (field, value) in [("author", author), ("work", work)] {
        if value.trim().is_empty() {
            errors.insert(field.to_string(), "must be provided".to_string());
        } else if value.len() > MAX_LABEL_BYTES {
            errors.insert(
                field.to_string(),
                format!("must not be more than {MAX_LABEL_BYTES} bytes long"),
            );
        }
    }
    if body.trim().is_empty() {
        errors.insert("body".to_string(), "must be provided".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RemoteError::Validation(errors))
    }
}

#[async_trait]
impl ExcerptSource for InMemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Excerpt>, RemoteError> {
        self.enter(Operation::List, Request::List).await?;
        Ok(self.records().await)
    }

    async fn create(&self, draft: ExcerptDraft) -> Result<Excerpt, RemoteError> {
        self.enter(Operation::Create, Request::Create(draft.clone())).await?;
        validate(&draft.author, &draft.work, &draft.body)?;

        let mut inner = self.inner.lock().await;
        let Some(next) = inner.next_id else {
            tracing::warn!("no excerpt ids left to assign");
            return Err(RemoteError::Internal("id space exhausted".to_string()));
        };
        let id = ExcerptId(next);
        inner.next_id = next.checked_add(1);

        let excerpt = Excerpt::from_draft(id, draft);
        inner.records.insert(id, excerpt.clone());
        tracing::debug!(%id, "source created excerpt");
        Ok(excerpt)
    }

    async fn update(&self, excerpt: Excerpt) -> Result<Excerpt, RemoteError> {
        self.enter(Operation::Update, Request::Update(excerpt.clone())).await?;

        let mut inner = self.inner.lock().await;
        let stored = inner
            .records
            .get_mut(&excerpt.id)
            .ok_or(RemoteError::NotFound(excerpt.id))?;
        validate(&excerpt.author, &excerpt.work, &excerpt.body)?;

        *stored = excerpt.clone();
        tracing::debug!(id = %excerpt.id, "source updated excerpt");
        Ok(excerpt)
    }

    async fn delete(&self, id: ExcerptId) -> Result<ExcerptId, RemoteError> {
        self.enter(Operation::Delete, Request::Delete(id)).await?;

        let mut inner = self.inner.lock().await;
        inner.records.remove(&id).ok_or(RemoteError::NotFound(id))?;
        tracing::debug!(%id, "source deleted excerpt");
        Ok(id)
    }
}
