//! Log sink: console plus a size-rotated file.
//!
//! Both layers hang off one `tracing-subscriber` registry. The file layer
//! writes through [`tracing_appender::non_blocking`], so a single worker
//! thread serializes every line and request handlers never wait on disk.
//! The worker drops lines when its buffer is full and swallows IO errors.

mod rotating_file;

pub use rotating_file::RotatingFile;

use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// The returned guard flushes pending file lines when dropped and must be
/// held for the lifetime of the process.
///
/// # Errors
///
/// Returns an error if a filter directive does not parse, the log file
/// cannot be opened, or a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let console_filter = EnvFilter::try_new(&config.filter)?;
    let file_filter = EnvFilter::try_new(&config.file_filter)?;

    let file = RotatingFile::open(&config.file, config.max_bytes, config.backups).map_err(
        |source| LoggingError::Open {
            path: config.file.display().to_string(),
            source,
        },
    )?;
    let (writer, guard) = NonBlockingBuilder::default()
        .lossy(true)
        .thread_name("wedge-restd-log")
        .finish(file);

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(console_filter))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .without_time()
                .with_filter(file_filter),
        )
        .try_init()?;

    Ok(guard)
}

/// Logging initialisation errors.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Invalid filter directive.
    #[error("invalid log filter")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// The log file could not be opened.
    #[error("failed to open log file {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A global subscriber is already set.
    #[error("failed to install log subscriber")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}
