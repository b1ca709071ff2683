//! Diagnostic logging for the inspector binary.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log file path.
pub const LOG_ENV_VAR: &str = "SIMSHELL_LOG";

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "simshell=info";

/// Start file logging when `SIMSHELL_LOG` is set and return the file in use.
///
/// Stdout carries the terminal stream, so nothing is installed without the
/// variable. Timestamps are relative to process start, which lines up with
/// the order lines were typed into the pair.
pub fn init_tracing() -> Option<PathBuf> {
    let base = PathBuf::from(std::env::var_os(LOG_ENV_VAR)?);
    let path = session_log_path(&base, unix_seconds(), std::process::id());

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot create log file {}: {}", path.display(), err);
            return None;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_timer(fmt::time::uptime())
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;
    Some(path)
}

/// `{base}.{timestamp}.{pid}`: sessions started together keep separate files.
fn session_log_path(base: &Path, timestamp: u64, pid: u32) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{}.{}", timestamp, pid));
    PathBuf::from(name)
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
