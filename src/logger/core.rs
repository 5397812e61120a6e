/// Core logging implementation with automatic filtering
///
/// Central logic that decides whether a log should be displayed based on
/// level and tag, then delegates to the format module for output.
use super::config::{get_logger_config, is_debug_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires --debug-<module> flag for that tag
/// 4. Verbose level requires the --verbose flag
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    // Rule 1: Errors always log (critical)
    if level == LogLevel::Error {
        return true;
    }

    // Rule 2: Check minimum level threshold
    if level > config.min_level {
        return false;
    }

    // Rule 3: Debug level requires debug mode for that specific tag,
    // unless --verbose raised the threshold past Debug already
    if level == LogLevel::Debug && config.min_level < LogLevel::Verbose {
        return is_debug_enabled_for_tag(tag);
    }

    true
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level.as_str(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::{set_logger_config, LoggerConfig};
    use std::collections::HashSet;

    #[test]
    fn test_filtering_rules() {
        let mut debug_tags = HashSet::new();
        debug_tags.insert("audit".to_string());
        set_logger_config(LoggerConfig {
            min_level: LogLevel::Debug,
            debug_tags,
        });

        // Errors always pass
        assert!(should_log(&LogTag::Llm, LogLevel::Error));
        // Info passes under the threshold
        assert!(should_log(&LogTag::System, LogLevel::Info));
        // Debug only passes for the enabled tag
        assert!(should_log(&LogTag::Audit, LogLevel::Debug));
        assert!(!should_log(&LogTag::Llm, LogLevel::Debug));
        // Verbose requires --verbose
        assert!(!should_log(&LogTag::Audit, LogLevel::Verbose));

        set_logger_config(LoggerConfig::default());
    }
}
