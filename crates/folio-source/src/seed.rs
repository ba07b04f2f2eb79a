//! Seed files: a JSON array of excerpts used to pre-populate a source.
//!
//! ```json
//! [
//!   { "id": 1, "author": "Woolf", "work": "The Waves", "body": "..." }
//! ]
//! ```

use folio_core::{Excerpt, ExcerptId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seed file {path} repeats excerpt id {id}")]
    DuplicateId { path: PathBuf, id: ExcerptId },

    #[error("seed file {path} holds excerpt id {id}; ids must be positive and below i64::MAX")]
    IdOutOfRange { path: PathBuf, id: ExcerptId },
}

/// Read and validate a seed file. Ids must be unique, positive and below
/// `i64::MAX`, so the source always has a next id to assign.
pub fn load_seed(path: &Path) -> Result<Vec<Excerpt>, SeedError> {
    let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<Excerpt> = serde_json::from_str(&text).map_err(|source| SeedError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(bad) = records.iter().find(|r| r.id.get() < 1 || r.id.get() == i64::MAX) {
        return Err(SeedError::IdOutOfRange { path: path.to_path_buf(), id: bad.id });
    }

    let mut seen = HashSet::with_capacity(records.len());
    if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
        return Err(SeedError::DuplicateId { path: path.to_path_buf(), id: dup.id });
    }

    tracing::info!(path = %path.display(), count = records.len(), "seed loaded");
    Ok(records)
}
