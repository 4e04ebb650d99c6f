//! Diagnostic logging.
//!
//! Events go through `tracing`. The filter comes from `RUST_LOG` and defaults
//! to `warn`. The terminal form owns the screen, so it logs to a file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const DEFAULT_FILTER: &str = "warn";

/// Where log events are written.
#[derive(Debug, Clone)]
pub enum LogSink {
    Stderr,
    /// Appended to; parent directories are created. When the file can't be
    /// opened, events are dropped.
    File(PathBuf),
}

/// Install the global subscriber. Call once, before any event is emitted.
pub fn init(sink: LogSink) -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File(path) => builder
            .with_ansi(false)
            .with_writer(file_writer(&path))
            .try_init(),
    };

    installed.map_err(|e| format!("failed to install logger: {e}"))
}

/// A writer appending to `path`, or one that discards everything when the
/// file can't be opened (read-only home, missing permissions).
fn file_writer(path: &Path) -> BoxMakeWriter {
    match open_log_file(path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::sink),
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn log_file_and_parents_are_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("podium.log");

        let make_writer = file_writer(&path);
        let mut writer = make_writer.make_writer();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        drop(writer);

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn unopenable_log_file_drops_events() {
        let dir = TempDir::new().unwrap();
        // A regular file where the log directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("podium.log");

        assert!(open_log_file(&path).is_err());

        let make_writer = file_writer(&path);
        let mut writer = make_writer.make_writer();
        writer.write_all(b"dropped\n").unwrap();
        assert!(!path.exists());
    }
}
