//! Error values produced by a remote excerpt source.
//!
//! The store keeps a [`RemoteError`] as data for the view layer to display. It
//! never branches on the variant; only the source and the console care.

use crate::types::ExcerptId;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a list, create, update or delete operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// No excerpt with this id exists on the source.
    #[error("excerpt {0} not found")]
    NotFound(ExcerptId),

    /// The request failed validation. Keys are field names.
    #[error("validation failed: {}", format_fields(.0))]
    Validation(BTreeMap<String, String>),

    /// The source could not be reached.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The source did not answer in time.
    #[error("request timed out")]
    Timeout,

    /// The source hit an unexpected failure.
    #[error("the server encountered a problem and could not process the request: {0}")]
    Internal(String),
}

impl RemoteError {
    /// Build a single-field validation error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        RemoteError::Validation(fields)
    }
}

fn format_fields(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field} {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
