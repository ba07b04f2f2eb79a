// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use folio_core::{ExcerptField, ExcerptId};

/// A parsed, validated console command ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Refetch every excerpt from the source
    Refresh,
    // Print one excerpt in full
    Show(ExcerptId),
    // Draft field edits
    Author(String),
    Work(String),
    Body(String),
    // Print the draft
    Form,
    // Publish the draft
    Publish,
    // Change one field of a published excerpt
    Edit { id: ExcerptId, field: ExcerptField, value: String },
    Delete(ExcerptId),
    // Dismiss the current notification
    Dismiss,
    // Author suggestions for the draft
    Authors,
    // Work suggestions for an author
    Works(String),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// line returns `Err("")` as a sentinel meaning "do nothing".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "ls" | "list" | "refresh" => Ok(Command::Refresh),
            "show" => parse_id(rest, "usage: show <id>").map(Command::Show),
            "author" => Ok(Command::Author(rest.to_string())),
            "work" => Ok(Command::Work(rest.to_string())),
            "body" => Ok(Command::Body(rest.to_string())),
            "form" => Ok(Command::Form),
            "publish" => Ok(Command::Publish),
            "edit" => parse_edit(rest),
            "rm" | "delete" => parse_id(rest, "usage: delete <id>").map(Command::Delete),
            "dismiss" => Ok(Command::Dismiss),
            "authors" => Ok(Command::Authors),
            "works" => {
                if rest.is_empty() {
                    Err("usage: works <author>".to_string())
                } else {
                    Ok(Command::Works(rest.to_string()))
                }
            }
            "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_id(rest: &str, usage: &str) -> Result<ExcerptId, String> {
    if rest.is_empty() {
        return Err(usage.to_string());
    }
    rest.parse::<ExcerptId>()
        .map_err(|_| format!("not an excerpt id: {rest}"))
}

/// `edit <id> <field>=<text>`
fn parse_edit(rest: &str) -> Result<Command, String> {
    const USAGE: &str = "usage: edit <id> <author|work|body>=<text>";

    let (id, assignment) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| USAGE.to_string())?;
    let id = parse_id(id, USAGE)?;
    let (field, value) = assignment
        .trim()
        .split_once('=')
        .ok_or_else(|| USAGE.to_string())?;
    let field = field.parse::<ExcerptField>()?;

    Ok(Command::Edit { id, field, value: value.trim().to_string() })
}

pub const HELP: &str = "\
commands:
  list                      refetch and print every excerpt
  show <id>                 print one excerpt
  author|work|body <text>   set a draft field
  form                      print the draft
  publish                   publish the draft
  edit <id> <field>=<text>  change author, work or body of an excerpt
  delete <id>               delete an excerpt
  authors                   list known authors
  works <author>            list known works by an author
  dismiss                   clear the current notification
  quit                      leave";
