//! folio console: a line-oriented front end for the excerpt store.

pub mod app;
pub mod command;
pub mod render;

pub use app::Console;
pub use command::Command;

use folio_core::{config::Config, ExcerptStore};
use folio_source::{load_seed, InMemorySource, Reconciler};
use std::path::PathBuf;
use std::sync::Arc;

/// Start the console on stdin/stdout against an in-memory source.
///
/// `seed` overrides the seed file named in the config.
pub fn run(config: Config, seed: Option<PathBuf>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let records = match seed.or_else(|| config.source.seed_path()) {
            Some(path) => load_seed(&path)?,
            None => Vec::new(),
        };
        let source = InMemorySource::with_records(records).with_latency(config.source.latency());

        let reconciler = Reconciler::spawn(ExcerptStore::new(config.store), Arc::new(source));
        let mut console = Console::new(reconciler.handle());
        console.prompt = std::io::IsTerminal::is_terminal(&std::io::stdin());

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        console.run(stdin, tokio::io::stdout()).await?;

        reconciler.shutdown().await?;
        Ok::<_, anyhow::Error>(())
    })
}
