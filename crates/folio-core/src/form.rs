//! Publish form: scratch text for the excerpt being written.

use crate::types::ExcerptDraft;

/// Draft author/work/body as typed so far. Not persisted anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishForm {
    pub author: String,
    pub work: String,
    pub body: String,
}

impl PublishForm {
    pub fn clear(&mut self) {
        self.author.clear();
        self.work.clear();
        self.body.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_empty() && self.work.is_empty() && self.body.is_empty()
    }

    pub fn to_draft(&self) -> ExcerptDraft {
        ExcerptDraft::new(&self.author, &self.work, &self.body)
    }
}
