//! folio-source: remote excerpt sources and the reconciler for folio.
//!
//! A source implements [`ExcerptSource`]: list, create, update and delete,
//! each settling asynchronously with a record or a
//! [`RemoteError`](folio_core::RemoteError). The [`Reconciler`] runs those
//! calls on background tasks and serializes their outcomes into the
//! [`ExcerptStore`](folio_core::ExcerptStore).

pub mod memory;
pub mod reconciler;
pub mod seed;
pub mod traits;

pub use memory::InMemorySource;
pub use reconciler::{Reconciler, ReconcilerHandle};
pub use seed::{load_seed, SeedError};
pub use traits::{ExcerptSource, Operation};
