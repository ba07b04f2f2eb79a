//! folio-core: excerpt dashboard core library.
//!
//! This crate holds the normalized excerpt store and the types shared by the
//! source adapters and the console.
//!
//! # Architecture
//!
//! ```text
//! Console ──► Reconciler ──► ExcerptSource
//!    ▲            │                │
//!    │            ▼                │ outcome
//!    └──────── Store ◄─────────────┘
//! ```
//!
//! The store only ever changes when an [`Action`](store::Action) is
//! dispatched into it. Remote calls happen elsewhere; their settled outcomes
//! arrive as actions.

pub mod collection;
pub mod config;
pub mod error;
pub mod form;
pub mod status;
pub mod store;
pub mod types;

pub use collection::Collection;
pub use error::RemoteError;
pub use form::PublishForm;
pub use status::RequestStatus;
pub use store::{Action, ExcerptStore, Snapshot};
pub use types::{Excerpt, ExcerptDraft, ExcerptField, ExcerptId};
