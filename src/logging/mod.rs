//! Tracing setup for hosts embedding the overlay.
//!
//! The overlay itself only emits `tracing` events. Hosts that do not install
//! their own subscriber can call [`init`] once per process to route those
//! events to a log file and, for interactive requests, the console.

pub mod config;
pub mod context;
pub mod layers;

pub use context::{detect_context, ExecutionContext};
pub use layers::console::ConsoleOutput;

use crate::logging::config::LoggingConfig;
use crate::logging::layers::{console, file};
use crate::Result;
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Keeps the non-blocking file writer alive; drop it to flush pending lines.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    context: ExecutionContext,
    console_output: ConsoleOutput,
    log_file_path: PathBuf,
}

impl LoggingGuard {
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    pub fn console_output(&self) -> ConsoleOutput {
        self.console_output
    }

    pub fn log_file_path(&self) -> &Path {
        &self.log_file_path
    }
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard")
            .field("context", &self.context)
            .field("console_output", &self.console_output)
            .field("log_file_path", &self.log_file_path)
            .finish()
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Errors when called more than
/// once per process or when another global subscriber is already installed.
pub fn init(requested: ExecutionContext, root: Option<&Path>) -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let context = detect_context(requested);
    let config = LoggingConfig::load(root)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;
    let log_file_path = file::log_file_path(&config, root)?;

    type FileSubscriber = file::FileLayerStack<Registry>;

    let (file_layer, file_guard) = file::file_layer::<Registry>(&log_file_path, config.enable_file)?;
    let console_output = console::select_console_output(context, config.console_output);
    let console_layer = console::console_layer::<FileSubscriber>(console_output);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(env_filter)
        .try_init()
        .context("failed to install global tracing subscriber")?;

    tracing::debug!(
        context = ?context,
        console = %console_output,
        log_file = %log_file_path.display(),
        "workflow overlay logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
        context,
        console_output,
        log_file_path,
    })
}
