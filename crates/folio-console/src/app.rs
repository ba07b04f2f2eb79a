//! Console state and the read-eval-print loop.
//!
//! [`Console::run`] reads one command per line, executes it against the
//! reconciler, and writes the resulting view. Remote-backed commands wait for
//! their outcome to be applied before printing, then dismiss the
//! notification the way a toast would.

use crate::command::{Command, HELP};
use crate::render;
use folio_source::ReconcilerHandle;
use folio_core::{Action, Snapshot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;

const PROMPT: &str = "folio> ";

pub struct Console {
    handle: ReconcilerHandle,
    /// Print a prompt before each line (off when stdin is not a terminal).
    pub prompt: bool,
    pub quit: bool,
}

impl Console {
    pub fn new(handle: ReconcilerHandle) -> Self {
        Self { handle, prompt: false, quit: false }
    }

    /// Refresh once, then execute lines from `input` until EOF or `quit`.
    pub async fn run<R, W>(mut self, input: R, mut out: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let initial = self.execute(Command::Refresh).await?;
        write_block(&mut out, &initial).await?;

        let mut lines = input.lines();
        loop {
            if self.prompt {
                out.write_all(PROMPT.as_bytes()).await?;
                out.flush().await?;
            }
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let output = match Command::parse(&line) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.execute(cmd).await?
                }
                // Blank line
                Err(msg) if msg.is_empty() => continue,
                Err(msg) => format!("error: {msg}"),
            };
            write_block(&mut out, &output).await?;

            if self.quit {
                break;
            }
        }
        Ok(())
    }

    /// Execute a parsed [`Command`] and return what to print.
    pub async fn execute(&mut self, cmd: Command) -> anyhow::Result<String> {
        let h = &self.handle;
        let output = match cmd {
            Command::Refresh => {
                let snap = self.settle(h.fetch_all()).await?;
                if snap.status.is_settled() {
                    h.dispatch(Action::ResetStatus);
                }
                // A failed refresh still shows the last known excerpts.
                match render::status(&snap) {
                    Some(line) if snap.error.is_some() => {
                        format!("{line}\n{}", render::table(&snap.excerpts))
                    }
                    _ => render::table(&snap.excerpts),
                }
            }
            Command::Show(id) => {
                let snap = h.flush().await?;
                match snap.get(id) {
                    Some(excerpt) => render::excerpt(excerpt),
                    None => format!("excerpt #{id} not found"),
                }
            }
            Command::Author(text) => self.set_field(Action::SetAuthorField(text)).await?,
            Command::Work(text) => self.set_field(Action::SetWorkField(text)).await?,
            Command::Body(text) => self.set_field(Action::SetBodyField(text)).await?,
            Command::Form => render::form(&h.flush().await?.form),
            Command::Publish => {
                let task = h.publish_form().await?;
                self.notification(task).await?
            }
            Command::Edit { id, field, value } => {
                let snap = h.flush().await?;
                match snap.get(id) {
                    Some(current) => {
                        let mut edited = current.clone();
                        field.apply(&mut edited, value);
                        let task = h.update(edited);
                        self.notification(task).await?
                    }
                    None => format!("excerpt #{id} not found"),
                }
            }
            Command::Delete(id) => {
                let task = h.delete(id);
                self.notification(task).await?
            }
            Command::Dismiss => {
                h.dispatch(Action::ResetStatus);
                h.flush().await?;
                "dismissed".to_string()
            }
            Command::Authors => render::list(&h.flush().await?.authors()),
            Command::Works(author) => render::list(&h.flush().await?.works_by(&author)),
            Command::Help => HELP.to_string(),
            Command::Quit => {
                self.quit = true;
                String::new()
            }
        };
        Ok(output)
    }

    async fn set_field(&self, action: Action) -> anyhow::Result<String> {
        self.handle.dispatch(action);
        Ok(render::form(&self.handle.flush().await?.form))
    }

    /// Wait for a remote operation's outcome to be applied.
    async fn settle(&self, task: JoinHandle<()>) -> anyhow::Result<Snapshot> {
        task.await?;
        self.handle.flush().await
    }

    /// Settle, print the notification, then dismiss it.
    async fn notification(&self, task: JoinHandle<()>) -> anyhow::Result<String> {
        let snap = self.settle(task).await?;
        let line = render::status(&snap).unwrap_or_default();
        if snap.status.is_settled() {
            self.handle.dispatch(Action::ResetStatus);
        }
        Ok(line)
    }
}

async fn write_block<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}
