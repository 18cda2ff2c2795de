use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "golden_grid.log";

// Keeps the background writer alive for the lifetime of the process.
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// `<local data dir>/golden_grid/golden_grid.log`, if the platform has one.
pub fn default_log_path() -> Option<PathBuf> {
    dirs_next::data_local_dir().map(|dir| dir.join("golden_grid").join(LOG_FILE_NAME))
}

/// Initialise logging. Without `debug` the level is forced to `info`
/// regardless of `RUST_LOG`; with it the default is `debug` and `RUST_LOG`
/// may override. When `log_file` is given output goes to that file,
/// otherwise (or if its folder cannot be created) to stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = log_file {
        match file_writer(&path) {
            Ok((writer, guard)) => {
                if builder.with_writer(writer).with_ansi(false).try_init().is_ok() {
                    let _ = FILE_GUARD.set(guard);
                }
                return;
            }
            Err(err) => {
                eprintln!("golden_grid: cannot log to {}: {err}", path.display());
            }
        }
    }

    let _ = builder.with_writer(std::io::stderr).try_init();
}

fn file_writer(
    path: &Path,
) -> std::io::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
