/// File logging backend
///
/// Appends every log line to a per-day log file under logs/. The file handle
/// is kept open behind a mutex; writes that fail are dropped silently so that
/// logging can never take the portal down.
use crate::paths::get_logs_dir;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file for this run
///
/// Called once from logger::init() after the logs directory exists.
pub fn init_file_logging() {
    let filename = format!("etax_sahayak_{}.log", Local::now().format("%Y%m%d"));
    let path = get_logs_dir().join(filename);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(file);
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file '{}': {}", path.display(), e);
        }
    }
}

/// Append a line to the log file (no-op when file logging is unavailable)
pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(file) = guard.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

/// Flush pending writes to disk
pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(file) = guard.as_mut() {
            let _ = file.flush();
        }
    }
}
