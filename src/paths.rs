//! Centralized path resolution for the e-Tax Sahayak portal
//!
//! All file and directory paths are resolved through this module so that the
//! logger, config system, and webserver agree on where data lives.
//!
//! ## Directory Structure
//!
//! ```text
//! ./
//! ├── data/
//! │   └── config.toml
//! └── logs/
//!     └── etax_sahayak_*.log
//! ```

use std::path::PathBuf;

/// Returns the directory holding runtime data (config file)
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Returns the directory holding log files
pub fn get_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Returns the default config file path
pub fn get_config_file_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Ensure all required directories exist
///
/// Must run before logger initialization so the log file can be created.
pub fn ensure_all_directories() -> Result<(), String> {
    for dir in [get_data_dir(), get_logs_dir()] {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create directory '{}': {}", dir.display(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_under_data_dir() {
        assert_eq!(get_config_file_path(), get_data_dir().join("config.toml"));
    }
}
