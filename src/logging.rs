//! File logger.
//!
//! The terminal belongs to the game, so log records go to a file instead of
//! stderr. Nothing is installed unless `--log-file` is passed; until then the
//! `log` macros are no-ops.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    fn level_prefix(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        let _ = writeln!(file, "{}", format_record(record));
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn format_record(record: &Record) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!(
        "{millis} {} [{}] {}",
        FileLogger::level_prefix(record.level()),
        record.module_path().unwrap_or("?"),
        record.args()
    )
}

/// Append log records at `level` and above to `path`.
pub fn init(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let logger = FileLogger {
        level,
        file: Mutex::new(file),
    };
    log::set_boxed_logger(Box::new(logger))
        .map_err(|err| io::Error::new(io::ErrorKind::AlreadyExists, err))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_format() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("spawned pair"))
                .level(Level::Debug)
                .module_path(Some("flappy_board::game"))
                .build(),
        );
        assert!(line.ends_with("DEBUG [flappy_board::game] spawned pair"), "{line}");
    }

    #[test]
    fn writes_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.log");
        init(&path, LevelFilter::Info).unwrap();

        log::info!("hello from the test");
        log::debug!("filtered out");
        log::logger().flush();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("hello from the test"));
        assert!(!text.contains("filtered out"));
    }
}
