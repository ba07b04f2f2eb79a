//! Store: the normalized excerpt collection and the outcome reconciliation
//! rules that keep it in step with the remote source.
//!
//! The store is the single source of truth; the view layer reads from it,
//! never from the source directly. It is driven by [`Action`]s through
//! [`ExcerptStore::dispatch`]:
//!
//! | Action | Status | Collection |
//! |--------|--------|------------|
//! | `*Pending` | `loading` | unchanged |
//! | `*Rejected(e)` | `failed`, error kept | unchanged |
//! | `ListFulfilled(rs)` | `succeeded` | replaced by `rs`, ascending by id |
//! | `CreateFulfilled(r)` | `succeeded` + message | `r` at the front (in place if present) |
//! | `UpdateFulfilled(r)` | `succeeded` + message | content overwritten, order kept |
//! | `DeleteFulfilled(id)` | `succeeded` + message | `id` removed (absent is fine) |
//!
//! Nothing changes before an outcome arrives. Handlers run to completion one
//! at a time, so the invariants in [`Collection`] hold after any order of
//! deliveries.

use crate::collection::Collection;
use crate::config::StoreConfig;
use crate::error::RemoteError;
use crate::form::PublishForm;
use crate::status::{RequestStatus, StatusState};
use crate::types::{Excerpt, ExcerptId};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Everything that can change the store: local commands and settled remote
/// outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetAuthorField(String),
    SetWorkField(String),
    SetBodyField(String),
    ResetPublishForm,
    ResetStatus,

    ListPending,
    ListFulfilled(Vec<Excerpt>),
    ListRejected(RemoteError),

    CreatePending,
    CreateFulfilled(Excerpt),
    CreateRejected(RemoteError),

    UpdatePending,
    UpdateFulfilled(Excerpt),
    UpdateRejected(RemoteError),

    DeletePending,
    DeleteFulfilled(ExcerptId),
    DeleteRejected(RemoteError),
}

impl Action {
    /// Short stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetAuthorField(_) => "set_author_field",
            Action::SetWorkField(_) => "set_work_field",
            Action::SetBodyField(_) => "set_body_field",
            Action::ResetPublishForm => "reset_publish_form",
            Action::ResetStatus => "reset_status",
            Action::ListPending => "list/pending",
            Action::ListFulfilled(_) => "list/fulfilled",
            Action::ListRejected(_) => "list/rejected",
            Action::CreatePending => "create/pending",
            Action::CreateFulfilled(_) => "create/fulfilled",
            Action::CreateRejected(_) => "create/rejected",
            Action::UpdatePending => "update/pending",
            Action::UpdateFulfilled(_) => "update/fulfilled",
            Action::UpdateRejected(_) => "update/rejected",
            Action::DeletePending => "delete/pending",
            Action::DeleteFulfilled(_) => "delete/fulfilled",
            Action::DeleteRejected(_) => "delete/rejected",
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ExcerptStore {
    collection: Collection,
    status: StatusState,
    form: PublishForm,
    messages: StoreConfig,
    /// Bumped on every dispatch.
    revision: u64,
    /// Display-order materialization, dropped whenever `collection` changes.
    ordered: OnceLock<Arc<[Excerpt]>>,
}

impl ExcerptStore {
    /// An empty, idle store using the given confirmation messages.
    pub fn new(messages: StoreConfig) -> Self {
        Self { messages, ..Self::default() }
    }

    /// Apply one action to completion.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), revision = self.revision, "dispatch");
        self.revision += 1;

        match action {
            Action::SetAuthorField(text) => self.form.author = text,
            Action::SetWorkField(text) => self.form.work = text,
            Action::SetBodyField(text) => self.form.body = text,
            Action::ResetPublishForm => self.form.clear(),
            Action::ResetStatus => self.status.reset(),

            Action::ListPending
            | Action::CreatePending
            | Action::UpdatePending
            | Action::DeletePending => self.status.begin(),

            Action::ListRejected(error)
            | Action::CreateRejected(error)
            | Action::UpdateRejected(error)
            | Action::DeleteRejected(error) => {
                tracing::warn!(%error, "remote operation rejected");
                self.status.fail(error);
            }

            Action::ListFulfilled(records) => self.list_fulfilled(records),
            Action::CreateFulfilled(record) => self.create_fulfilled(record),
            Action::UpdateFulfilled(record) => self.update_fulfilled(record),
            Action::DeleteFulfilled(id) => self.delete_fulfilled(id),
        }

        debug_assert!(self.collection.is_consistent());
    }

    fn list_fulfilled(&mut self, records: Vec<Excerpt>) {
        tracing::debug!(count = records.len(), "replacing collection");
        self.collection.replace_all(records);
        self.invalidate();
        self.status.succeed(None);
    }

    fn create_fulfilled(&mut self, record: Excerpt) {
        let id = record.id;
        if !self.collection.insert_front(record) {
            tracing::debug!(%id, "duplicate create outcome applied in place");
        }
        self.invalidate();
        self.status.succeed(Some(self.messages.created_message.clone()));
    }

    fn update_fulfilled(&mut self, record: Excerpt) {
        let id = record.id;
        if !self.collection.upsert(record) {
            tracing::debug!(%id, "update outcome for unknown id appended");
        }
        self.invalidate();
        self.status.succeed(Some(self.messages.updated_message.clone()));
    }

    fn delete_fulfilled(&mut self, id: ExcerptId) {
        if self.collection.remove(id).is_some() {
            self.invalidate();
        } else {
            tracing::debug!(%id, "delete outcome for absent id");
        }
        self.status.succeed(Some(self.messages.deleted_message.clone()));
    }

    fn invalidate(&mut self) {
        self.ordered = OnceLock::new();
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    pub fn set_author_field(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetAuthorField(text.into()));
    }

    pub fn set_work_field(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetWorkField(text.into()));
    }

    pub fn set_body_field(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetBodyField(text.into()));
    }

    pub fn reset_publish_form(&mut self) {
        self.dispatch(Action::ResetPublishForm);
    }

    pub fn reset_status(&mut self) {
        self.dispatch(Action::ResetStatus);
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Excerpts in display order. Computed once per collection change.
    pub fn ordered(&self) -> Arc<[Excerpt]> {
        self.ordered
            .get_or_init(|| self.collection.iter().cloned().collect())
            .clone()
    }

    pub fn get(&self, id: ExcerptId) -> Option<&Excerpt> {
        self.collection.get(id)
    }

    pub fn ids(&self) -> &[ExcerptId] {
        self.collection.ids()
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn status(&self) -> RequestStatus {
        self.status.status()
    }

    pub fn message(&self) -> Option<&str> {
        self.status.message()
    }

    pub fn error(&self) -> Option<&RemoteError> {
        self.status.error()
    }

    pub fn form(&self) -> &PublishForm {
        &self.form
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Distinct authors, sorted, for the publish form's suggestions.
    pub fn authors(&self) -> Vec<String> {
        authors_of(&self.ordered())
    }

    /// Distinct works by `author`, sorted.
    pub fn works_by(&self, author: &str) -> Vec<String> {
        works_of(&self.ordered(), author)
    }

    /// Owned copy of every view, for readers on another task.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            excerpts: self.ordered(),
            status: self.status.status(),
            message: self.status.message().map(str::to_owned),
            error: self.status.error().cloned(),
            form: self.form.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable view of the store at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub revision: u64,
    pub excerpts: Arc<[Excerpt]>,
    pub status: RequestStatus,
    pub message: Option<String>,
    pub error: Option<RemoteError>,
    pub form: PublishForm,
}

impl Snapshot {
    pub fn ids(&self) -> Vec<ExcerptId> {
        self.excerpts.iter().map(|e| e.id).collect()
    }

    pub fn get(&self, id: ExcerptId) -> Option<&Excerpt> {
        self.excerpts.iter().find(|e| e.id == id)
    }

    pub fn authors(&self) -> Vec<String> {
        authors_of(&self.excerpts)
    }

    pub fn works_by(&self, author: &str) -> Vec<String> {
        works_of(&self.excerpts, author)
    }
}

fn authors_of(excerpts: &[Excerpt]) -> Vec<String> {
    excerpts
        .iter()
        .map(|e| e.author.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn works_of(excerpts: &[Excerpt], author: &str) -> Vec<String> {
    excerpts
        .iter()
        .filter(|e| e.author == author)
        .map(|e| e.work.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
