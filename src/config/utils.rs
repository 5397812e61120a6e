/// Configuration utilities - loading, persisting, and access helpers
///
/// This module provides utility functions for working with the configuration
/// system:
/// - Loading configuration from disk (writing defaults on first run)
/// - Thread-safe access and mutation helpers
/// - Persisting the in-memory configuration
use super::schemas::Config;
use once_cell::sync::OnceCell;
use std::sync::RwLock;

/// Global configuration instance
///
/// This is the single source of truth for all configuration values.
/// Access it using the helper functions below.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from disk and initialize the global CONFIG
///
/// This should be called once at startup. If the config file doesn't exist,
/// it will use default values from the schema definitions.
pub fn load_config() -> Result<(), String> {
    load_config_from_path(CONFIG_FILE_PATH)
}

/// Load configuration from a specific file path
///
/// A missing file is not an error: defaults apply and are written back so
/// operators have a file to edit.
pub fn load_config_from_path(path: &str) -> Result<(), String> {
    let file_exists = std::path::Path::new(path).exists();

    let config = if file_exists {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

        toml::from_str::<Config>(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?
    } else {
        eprintln!("Config file '{}' not found, using default values", path);
        Config::default()
    };

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    if !file_exists {
        if let Err(e) = save_config(Some(path)) {
            eprintln!("Could not write default config file: {}", e);
        }
    }

    Ok(())
}

/// Execute a function with read access to the configuration
///
/// This is the recommended way to read configuration values.
/// The closure receives an immutable reference to the Config.
///
/// # Example
/// ```
/// use etax_sahayak::config::with_config;
///
/// let port = with_config(|cfg| cfg.server.port);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let config_lock = CONFIG.get_or_init(|| RwLock::new(Config::default()));

    let config = config_lock
        .read()
        .expect("Failed to acquire config read lock");

    f(&config)
}

/// Mutate the configuration in place
///
/// The write lock is held only for the duration of the closure; call
/// save_config() afterwards to persist the change.
pub fn update_config_section<F>(mutator: F) -> Result<(), String>
where
    F: FnOnce(&mut Config),
{
    let config_lock = CONFIG.get_or_init(|| RwLock::new(Config::default()));

    let mut config = config_lock
        .write()
        .map_err(|e| format!("Failed to acquire config write lock: {}", e))?;
    mutator(&mut config);
    Ok(())
}

/// Save the current configuration to disk
///
/// This writes the current in-memory configuration to the specified file.
pub fn save_config(path: Option<&str>) -> Result<(), String> {
    let path = path.unwrap_or(CONFIG_FILE_PATH);

    let config_str = with_config(|cfg| {
        toml::to_string_pretty(cfg).map_err(|e| format!("Failed to serialize config: {}", e))
    })?;

    std::fs::write(path, config_str)
        .map_err(|e| format!("Failed to write config file '{}': {}", path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because CONFIG is process-global state
    #[test]
    fn test_update_and_save_config() {
        let before = with_config(|cfg| cfg.server.port);

        update_config_section(|cfg| cfg.server.port = 9191).expect("update");
        assert_eq!(with_config(|cfg| cfg.server.port), 9191);

        let path = std::env::temp_dir().join("etax_sahayak_config_test.toml");
        let path_str = path.to_str().expect("utf-8 temp path");
        save_config(Some(path_str)).expect("save");

        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("[server]"));
        assert!(written.contains("port = 9191"));
        let _ = std::fs::remove_file(&path);

        update_config_section(|cfg| cfg.server.port = before).expect("restore");
    }
}
