//! source::traits
//!
//! The contract every remote excerpt source implements.
//!
//! # Design
//!
//! The trait is async because real sources sit behind network I/O. Each
//! method settles exactly once, with either its success payload or a
//! [`RemoteError`]. Sources may time out, retry or cancel internally; the
//! store only ever sees the final outcome.
//!
//! | Operation | Request | Success |
//! |-----------|---------|---------|
//! | `list` | none | every excerpt |
//! | `create` | [`ExcerptDraft`] | the created excerpt with its new id |
//! | `update` | [`Excerpt`] | the stored excerpt |
//! | `delete` | [`ExcerptId`] | the deleted id |
//!
//! # Example
//!
//! ```ignore
//! use folio_source::{ExcerptSource, InMemorySource};
//! use folio_core::ExcerptDraft;
//!
//! async fn publish(source: &dyn ExcerptSource) -> Result<(), folio_core::RemoteError> {
//!     let created = source
//!         .create(ExcerptDraft::new("Woolf", "The Waves", "I have made up thousands of stories"))
//!         .await?;
//!     println!("published #{}", created.id);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use folio_core::{Excerpt, ExcerptDraft, ExcerptId, RemoteError};

/// Which remote operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// A remote store of excerpts.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the reconciler calls them from
/// spawned tasks, several at once.
#[async_trait]
pub trait ExcerptSource: Send + Sync {
    /// Get the source name for logs.
    fn name(&self) -> &'static str;

    /// Fetch every excerpt.
    async fn list(&self) -> Result<Vec<Excerpt>, RemoteError>;

    /// Create an excerpt; the source assigns its id.
    async fn create(&self, draft: ExcerptDraft) -> Result<Excerpt, RemoteError>;

    /// Replace the author, work and body of an existing excerpt.
    async fn update(&self, excerpt: Excerpt) -> Result<Excerpt, RemoteError>;

    /// Delete an excerpt, returning its id.
    async fn delete(&self, id: ExcerptId) -> Result<ExcerptId, RemoteError>;
}
