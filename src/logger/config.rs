/// Logger configuration derived from command-line arguments
///
/// Holds the minimum level threshold and the set of tags with debug output
/// enabled. Initialized once at startup from --debug-<module>, --verbose,
/// and --quiet flags; can be replaced at runtime (used by tests).
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

/// Logger configuration state
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level that is displayed (Error is always displayed)
    pub min_level: LogLevel,
    /// Tags with --debug-<tag> enabled
    pub debug_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Initialize the logger configuration from command-line arguments
pub fn init_from_args() {
    let mut config = LoggerConfig::default();

    if crate::arguments::is_quiet_enabled() {
        config.min_level = LogLevel::Error;
    } else if crate::arguments::is_verbose_enabled() {
        config.min_level = LogLevel::Verbose;
    }

    if crate::arguments::has_arg("--debug-all") {
        for tag in LogTag::all() {
            config.debug_tags.insert(tag.to_debug_key());
        }
    } else {
        for tag in LogTag::all() {
            if crate::arguments::has_arg(&format!("--debug-{}", tag.to_debug_key())) {
                config.debug_tags.insert(tag.to_debug_key());
            }
        }
    }

    // Any --debug flag implies at least Debug level for the gated tags
    if !config.debug_tags.is_empty() && config.min_level < LogLevel::Debug {
        config.min_level = LogLevel::Debug;
    }

    set_logger_config(config);
}

/// Get a snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

/// Check if debug output is enabled for a specific tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG
        .read()
        .map(|c| c.debug_tags.contains(&tag.to_debug_key()))
        .unwrap_or(false)
}
