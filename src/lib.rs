//! folio: excerpt publishing dashboard core.
//!
//! This crate re-exports the workspace layers so that integration tests and
//! benches can import them from one place.
//!
//! # Architecture
//!
//! ```text
//! Console ──► Reconciler ──► ExcerptSource
//!                 │                │
//!                 ▼                │ outcome
//!               Store ◄────────────┘
//! ```
//!
//! Remote calls run on background tasks; their outcomes reach the store
//! through one `tokio` channel and are applied in arrival order.

pub use folio_console;
pub use folio_core;
pub use folio_source;

pub use folio_core::{
    Action, Collection, Excerpt, ExcerptDraft, ExcerptField, ExcerptId, ExcerptStore,
    PublishForm, RemoteError, RequestStatus, Snapshot,
};
