use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::APP_DIR;

/// Send tracing output to a log file so it never draws over the TUI.
///
/// Returns the log file path, or `None` when the platform has no cache
/// directory (logging is then disabled).
pub fn init(level: &str) -> Result<Option<PathBuf>> {
    let Some(dir) = dirs::cache_dir().map(|d| d.join(APP_DIR)) else {
        return Ok(None);
    };
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("creating log directory {}", dir.display()))?;

    let path = dir.join("calendar-link.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter(level))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(Some(path))
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_falls_back_to_info() {
        assert_eq!(filter("calendar_link=loud").to_string(), "info");
        assert_eq!(filter("debug").to_string(), "debug");
    }
}
