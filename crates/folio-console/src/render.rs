//! Plain-text rendering of store snapshots.

use folio_core::{Excerpt, PublishForm, RequestStatus, Snapshot};

/// Bodies longer than this are cut in the list view.
const BODY_PREVIEW_CHARS: usize = 48;

/// One line per excerpt, in display order.
pub fn table(excerpts: &[Excerpt]) -> String {
    if excerpts.is_empty() {
        return "(no excerpts)".to_string();
    }
    excerpts.iter().map(row).collect::<Vec<_>>().join("\n")
}

fn row(excerpt: &Excerpt) -> String {
    format!(
        "{:>4}  {} / {}  {}",
        format!("#{}", excerpt.id),
        excerpt.author,
        excerpt.work,
        preview(&excerpt.body)
    )
}

fn preview(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= BODY_PREVIEW_CHARS {
        return body.to_string();
    }
    let cut: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}

/// Full view of a single excerpt.
pub fn excerpt(excerpt: &Excerpt) -> String {
    format!(
        "#{}\nauthor: {}\nwork:   {}\n\n{}",
        excerpt.id, excerpt.author, excerpt.work, excerpt.body
    )
}

pub fn form(form: &PublishForm) -> String {
    format!("author: {}\nwork:   {}\nbody:   {}", form.author, form.work, form.body)
}

/// The notification line for the snapshot's status, if there is one to show.
pub fn status(snapshot: &Snapshot) -> Option<String> {
    match snapshot.status {
        RequestStatus::Idle => None,
        RequestStatus::Loading => Some("loading...".to_string()),
        RequestStatus::Succeeded => Some(match &snapshot.message {
            Some(message) => format!("ok: {message}"),
            None => "ok".to_string(),
        }),
        RequestStatus::Failed => Some(match &snapshot.error {
            Some(error) => format!("error: {error}"),
            None => "error".to_string(),
        }),
    }
}

/// A bulleted list, or `none` when empty.
pub fn list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items.iter().map(|i| format!("- {i}")).collect::<Vec<_>>().join("\n")
}
