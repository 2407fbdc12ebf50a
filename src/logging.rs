//! `tracing` subscriber setup.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Where log lines end up for a given run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File,
    /// The terminal UI owns the screen and no log file is configured.
    Disabled,
}

/// Chooses the sink: a configured file always wins, otherwise stderr unless
/// the terminal UI is running.
pub fn sink_for(cfg: &LoggingConfig, interactive: bool) -> LogSink {
    match (&cfg.file, interactive) {
        (Some(_), _) => LogSink::File,
        (None, false) => LogSink::Stderr,
        (None, true) => LogSink::Disabled,
    }
}

/// Builds the filter from `RUST_LOG`, falling back to the configured directive
/// when the variable is unset or blank.
///
/// # Errors
///
/// Returns a message if whichever directive is chosen does not parse.
pub fn filter_for(cfg: &LoggingConfig) -> Result<EnvFilter, String> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(env.as_deref(), cfg)
}

fn filter_from(env: Option<&str>, cfg: &LoggingConfig) -> Result<EnvFilter, String> {
    match env.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| format!("invalid {} \"{directive}\": {e}", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(&cfg.filter)
            .map_err(|e| format!("invalid logging.filter \"{}\": {e}", cfg.filter)),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns a message if the filter is invalid, the log file cannot be
/// created, or a subscriber is already installed.
pub fn init(cfg: &LoggingConfig, interactive: bool) -> Result<LogSink, String> {
    let sink = sink_for(cfg, interactive);
    let filter = filter_for(cfg)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match (sink, &cfg.file) {
        (LogSink::File, Some(path)) => {
            let file = File::create(path)
                .map_err(|e| format!("cannot create log file \"{}\": {e}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (LogSink::Disabled, _) => return Ok(sink),
        _ => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| format!("cannot install logger: {e}"))?;
    Ok(sink)
}
