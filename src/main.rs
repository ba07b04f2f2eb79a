use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio", about = "folio: publish and edit excerpts")]
struct Cli {
    /// Write debug logs to the configured debug file (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Read configuration from this file instead of ~/.config/folio/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON array of excerpts to start the in-memory source with.
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Simulated latency of every source operation, in milliseconds.
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => folio_core::config::Config::load_from(path)?,
        None => folio_core::config::Config::load()
            .unwrap_or_else(|_| folio_core::config::Config::defaults()),
    };
    if let Some(latency_ms) = cli.latency_ms {
        config.source.latency_ms = latency_ms;
    }

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log.debug_file)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
            )
            .init();
        tracing::info!(path = %config.log.debug_file, "folio debug log started");
    }

    folio_console::run(config, cli.seed)
}
