use crate::logging::config::LoggingConfig;
use crate::Result;
use anyhow::{anyhow, Context};
use std::fs::{create_dir_all, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{self as tracing_fmt, format, writer::BoxMakeWriter};
use tracing_subscriber::registry::LookupSpan;

pub const LOG_FILE_NAME: &str = "workflow-overlay.log";

pub type FileFmtLayer<S> =
    tracing_fmt::Layer<S, format::DefaultFields, format::Format<format::Full>, BoxMakeWriter>;

pub type FileLayerStack<S> = tracing_subscriber::layer::Layered<FileFmtLayer<S>, S>;

/// Location of the overlay log file.
///
/// A relative `log_dir` is anchored at the host root (or the home directory
/// without one) and may not escape it.
pub fn log_file_path(config: &LoggingConfig, root: Option<&Path>) -> Result<PathBuf> {
    let anchor = || -> Result<PathBuf> {
        match root {
            Some(root) => Ok(root.to_path_buf()),
            None => home_base(),
        }
    };
    let directory = match &config.log_dir {
        Some(custom) if custom.is_absolute() => custom.clone(),
        Some(custom) => {
            let anchor = normalize(&anchor()?);
            let candidate = normalize(&anchor.join(custom));
            if !candidate.starts_with(&anchor) {
                return Err(anyhow!(
                    "logging.log_dir resolves outside {}",
                    anchor.display()
                ));
            }
            candidate
        }
        None => anchor()?.join(".workflow-overlay").join("logs"),
    };
    Ok(directory.join(LOG_FILE_NAME))
}

/// File sink writing through a non-blocking appender; a sink layer when disabled.
pub fn file_layer<S>(log_file: &Path, enabled: bool) -> Result<(FileFmtLayer<S>, Option<WorkerGuard>)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !enabled {
        return Ok((make_layer(BoxMakeWriter::new(io::sink)), None));
    }

    let directory = log_file
        .parent()
        .ok_or_else(|| anyhow!("log file path {} has no parent directory", log_file.display()))?;
    create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let layer = make_layer(BoxMakeWriter::new(move || non_blocking.clone()));
    Ok((layer, Some(guard)))
}

fn make_layer<S>(writer: BoxMakeWriter) -> FileFmtLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
}

fn home_base() -> Result<PathBuf> {
    dirs_next::home_dir().ok_or_else(|| anyhow!("$HOME directory unavailable"))
}

// Lexical normalization; the target directory may not exist yet.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
