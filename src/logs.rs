use std::fs::{self, OpenOptions, metadata};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

/// `[2024-01-31 12:00:00]`-style local timestamps, matching the log file format.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Console on stderr plus an append-only log file.
///
/// The file layer is skipped when the log directory cannot be created; the
/// installer still works, it just leaves no trace.
pub fn init_logger(verbose: bool) {
    let console_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(console_filter);

    let file = open_log_file().map(|log| {
        fmt::layer()
            .with_writer(Mutex::new(log))
            .with_ansi(false)
            .with_target(false)
            .with_timer(LocalTime)
            .with_filter(LevelFilter::DEBUG)
    });

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init();
}

fn open_log_file() -> Option<fs::File> {
    let log_file = get_log_file()?;

    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent).ok()?;
    }

    // Start over rather than grow without bound
    if metadata(&log_file).is_ok_and(|m| m.len() > MAX_LOG_BYTES) {
        let _ = fs::write(&log_file, "");
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .ok()
}

/// `<data dir>/moleditpy-installer/moleditpy-installer.log`
pub fn get_log_file() -> Option<PathBuf> {
    dirs::data_dir().map(|base| {
        base.join("moleditpy-installer")
            .join("moleditpy-installer.log")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_installer_data_dir() {
        if let Some(path) = get_log_file() {
            assert!(path.ends_with("moleditpy-installer/moleditpy-installer.log"));
        }
    }

    #[test]
    fn timestamp_is_bracketed() {
        let mut out = String::new();
        LocalTime.format_time(&mut Writer::new(&mut out)).unwrap();
        assert!(out.starts_with('[') && out.ends_with(']'));
        assert_eq!(out.len(), "[2024-01-31 12:00:00]".len());
    }
}
