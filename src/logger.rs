//! # Logging Infrastructure
//!
//! Process-wide logging for Ivolution, built on the `tracing` ecosystem.
//!
//! Two outputs are installed:
//!
//! - **Session log file**: `~/.ivolution/ivolution.log`, appended to forever (no
//!   rotation, no size bound). Each line reads
//!   `<timestamp> - <logger-name> - <level> - <message>`, where the logger name is
//!   the event target (the emitting module path).
//! - **Console**: human-readable output filtered by `RUST_LOG`.
//!
//! A `######` separator line is written every time the logger is initialized so
//! that consecutive application sessions are easy to tell apart in the file.
//!
//! ## Environment Configuration
//!
//! - `RUST_LOG=ivolution=debug` - Show all console logs from this application
//! - `RUST_LOG=warn` - Show only warnings and errors on the console

use crate::constants::{LOG_FILE_NAME, PERSONAL_DIR_NAME, SESSION_SEPARATOR};
use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Event, Subscriber};
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter for both outputs when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "ivolution=debug,warn";

/// Path of the active log file, set once by the first successful initialization
static LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

/// Line formatter for the session log file.
///
/// Produces `<timestamp> - <logger-name> - <level> - <message>` with a
/// millisecond-resolution local timestamp.
pub struct SessionFormat;

impl<S, N> FormatEvent<S, N> for SessionFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            metadata.target(),
            metadata.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Location of the log file for a given home directory
pub fn log_file_path(home: &Path) -> PathBuf {
    home.join(PERSONAL_DIR_NAME).join(LOG_FILE_NAME)
}

/// Initialize the global logger under the user's home directory.
///
/// Safe to call more than once: only the first call installs the subscriber,
/// later calls return the path chosen by the first one.
pub fn init_logger() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    init_logger_in(&home.join(PERSONAL_DIR_NAME))
}

/// Initialize the global logger, writing `ivolution.log` inside `log_dir`.
///
/// The directory is created when missing. The first successful call wins and
/// emits the session separator; subsequent calls are no-ops returning the
/// already active log file path.
pub fn init_logger_in(log_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    LOG_FILE
        .get_or_try_init(|| {
            fs::create_dir_all(log_dir)?;

            let file_layer = fmt::layer()
                .event_format(SessionFormat)
                .with_ansi(false)
                .with_writer(rolling::never(log_dir, LOG_FILE_NAME))
                .with_filter(EnvFilter::new(DEFAULT_FILTER));

            let console_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
            let console_layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(true)
                .with_level(true)
                .with_line_number(true)
                .with_filter(console_filter);

            tracing_subscriber::registry()
                .with(file_layer)
                .with(console_layer)
                .try_init()?;

            tracing::info!("{}", SESSION_SEPARATOR);
            Ok::<_, Box<dyn std::error::Error>>(log_dir.join(LOG_FILE_NAME))
        })
        .cloned()
}

/// Path of the active log file, if the logger has been initialized
pub fn active_log_file() -> Option<&'static Path> {
    LOG_FILE.get().map(PathBuf::as_path)
}

/// Convenience re-export of log macros
///
/// ```rust
/// use ivolution::logger::log;
///
/// log::info!("Input folder chosen: {}", "/home/user/Pictures");
/// log::error!("Cannot start, process already running !");
/// ```
pub mod log {
    pub use tracing::{debug, error, info, warn};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_under_personal_dir() {
        let path = log_file_path(Path::new("/home/someone"));
        assert_eq!(path, PathBuf::from("/home/someone/.ivolution/ivolution.log"));
    }

    #[test]
    fn test_session_format_line_shape() {
        let dir = tempfile::TempDir::new().unwrap();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(SessionFormat)
                .with_ansi(false)
                .with_writer(rolling::never(dir.path(), "format.log")),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "IvolutionFile", "Reached end of facemovie process");
        });

        let content = fs::read_to_string(dir.path().join("format.log")).unwrap();
        let line = content.lines().next().unwrap();
        let parts: Vec<&str> = line.splitn(4, " - ").collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], "IvolutionFile");
        assert_eq!(parts[2], "WARN");
        assert_eq!(parts[3], "Reached end of facemovie process");
        // e.g. 2012-06-01 10:22:31,042
        assert_eq!(parts[0].len(), 23);
        assert_eq!(&parts[0][19..20], ",");
    }
}
