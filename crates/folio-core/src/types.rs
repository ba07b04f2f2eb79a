//! Core types for folio-core.
//!
//! This module defines the records shared across every layer: the persisted
//! [`Excerpt`], its [`ExcerptId`], and the [`ExcerptDraft`] sent when
//! publishing a new one.

use serde::{Deserialize, Serialize};

/// Identifier assigned to an excerpt by the remote source.
///
/// Ids increase monotonically on the source side and are never reused, but
/// the store makes no assumption about that beyond using them as keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExcerptId(pub i64);

impl ExcerptId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ExcerptId {
    fn from(value: i64) -> Self {
        ExcerptId(value)
    }
}

impl std::fmt::Display for ExcerptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ExcerptId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse::<i64>().map(ExcerptId)
    }
}

/// A published text excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Excerpt {
    /// Server-assigned identifier.
    pub id: ExcerptId,
    /// Who wrote the quoted text.
    pub author: String,
    /// The book, essay or other work the text is taken from.
    pub work: String,
    /// The quoted text itself.
    pub body: String,
}

impl Excerpt {
    pub fn new(
        id: impl Into<ExcerptId>,
        author: impl Into<String>,
        work: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            work: work.into(),
            body: body.into(),
        }
    }

    /// Attach a server-assigned id to a draft.
    pub fn from_draft(id: ExcerptId, draft: ExcerptDraft) -> Self {
        Self {
            id,
            author: draft.author,
            work: draft.work,
            body: draft.body,
        }
    }
}

/// Payload of a create request: everything but the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptDraft {
    pub author: String,
    pub work: String,
    pub body: String,
}

impl ExcerptDraft {
    pub fn new(
        author: impl Into<String>,
        work: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            work: work.into(),
            body: body.into(),
        }
    }
}

/// Which of an excerpt's text fields an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExcerptField {
    Author,
    Work,
    Body,
}

impl ExcerptField {
    /// Overwrite the matching field on `excerpt`.
    pub fn apply(self, excerpt: &mut Excerpt, value: impl Into<String>) {
        let value = value.into();
        match self {
            ExcerptField::Author => excerpt.author = value,
            ExcerptField::Work => excerpt.work = value,
            ExcerptField::Body => excerpt.body = value,
        }
    }
}

impl std::fmt::Display for ExcerptField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExcerptField::Author => write!(f, "author"),
            ExcerptField::Work => write!(f, "work"),
            ExcerptField::Body => write!(f, "body"),
        }
    }
}

impl std::str::FromStr for ExcerptField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(ExcerptField::Author),
            "work" => Ok(ExcerptField::Work),
            "body" => Ok(ExcerptField::Body),
            other => Err(format!("unknown field: {other}")),
        }
    }
}
