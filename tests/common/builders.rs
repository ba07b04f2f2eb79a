//! Test builders: ergonomic constructors for `Excerpt`, stores, and action
//! sequences.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use folio_core::{Action, Excerpt, ExcerptId, ExcerptStore, RemoteError};

// ---------------------------------------------------------------------------
// ExcerptBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Excerpt`] test fixtures.
///
/// # Example
///
/// ```rust
/// let excerpt = ExcerptBuilder::new(3)
///     .author("Woolf")
///     .work("The Waves")
///     .body("I have made up thousands of stories")
///     .build();
/// ```
pub struct ExcerptBuilder {
    id: i64,
    author: String,
    work: String,
    body: String,
}

impl ExcerptBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            author: "Test Author".to_string(),
            work: format!("Work {id}"),
            body: format!("Body of excerpt {id}"),
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn work(mut self, work: impl Into<String>) -> Self {
        self.work = work.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Excerpt {
        Excerpt::new(self.id, self.author, self.work, self.body)
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A default excerpt with the given id.
pub fn excerpt(id: i64) -> Excerpt {
    ExcerptBuilder::new(id).build()
}

/// Default excerpts for every id, in the given order.
pub fn excerpts(ids: &[i64]) -> Vec<Excerpt> {
    ids.iter().map(|&id| excerpt(id)).collect()
}

/// A store that has applied a successful list of `ids`.
pub fn listed_store(ids: &[i64]) -> ExcerptStore {
    let mut store = ExcerptStore::default();
    store.dispatch(Action::ListFulfilled(excerpts(ids)));
    store
}

/// Apply every action in order.
pub fn apply_all(store: &mut ExcerptStore, actions: impl IntoIterator<Item = Action>) {
    for action in actions {
        store.dispatch(action);
    }
}

/// The store's display order as plain integers.
pub fn id_list(store: &ExcerptStore) -> Vec<i64> {
    store.ids().iter().map(|id| id.get()).collect()
}

pub fn rejection(reason: &str) -> RemoteError {
    RemoteError::Unavailable(reason.to_string())
}

pub fn id(value: i64) -> ExcerptId {
    ExcerptId(value)
}
