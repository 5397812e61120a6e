/// Centralized argument handling for the e-Tax Sahayak portal
///
/// All command-line argument parsing and debug flag checking lives here so
/// that the logger, webserver, and binaries share a single source of truth.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Unified argument parsing utilities
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// These functions check for specific debug flags in the command-line arguments
// =============================================================================

/// Audit analysis debug mode
pub fn is_debug_audit_enabled() -> bool {
    has_arg("--debug-audit")
}

/// LLM provider calls debug mode
pub fn is_debug_llm_enabled() -> bool {
    has_arg("--debug-llm")
}

/// API layer debug mode
pub fn is_debug_api_enabled() -> bool {
    has_arg("--debug-api")
}

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Config system debug mode
pub fn is_debug_config_enabled() -> bool {
    has_arg("--debug-config")
}

/// Verbose output mode (shows everything)
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

/// Quiet mode (errors only)
pub fn is_quiet_enabled() -> bool {
    has_arg("--quiet")
}

// =============================================================================
// STARTUP FLAGS
// =============================================================================

/// Override for the webserver port (--port <n>)
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|v| v.parse::<u16>().ok())
}

/// Override for the config file path (--config <path>)
pub fn get_config_path_override() -> Option<String> {
    get_arg_value("--config")
}

/// Common argument patterns used at startup
pub mod patterns {
    use super::has_arg;

    /// Check if help was requested
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }
}

/// Print active debug modes at startup
pub fn print_debug_info() {
    let mut active = Vec::new();

    if is_debug_audit_enabled() {
        active.push("audit");
    }
    if is_debug_llm_enabled() {
        active.push("llm");
    }
    if is_debug_api_enabled() {
        active.push("api");
    }
    if is_debug_webserver_enabled() {
        active.push("webserver");
    }
    if is_debug_config_enabled() {
        active.push("config");
    }

    if !active.is_empty() {
        println!("Debug modes enabled: {}", active.join(", "));
    }
    if is_verbose_enabled() {
        println!("Verbose output enabled");
    }
}

/// Print usage information for the portal binary
pub fn print_help() {
    println!("e-Tax Sahayak - demonstration tax portal with AI audit selection");
    println!();
    println!("USAGE:");
    println!("    etax-sahayak [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <n>            Webserver port (default: from config, 8080)");
    println!("    --config <path>       Config file path (default: data/config.toml)");
    println!("    --quiet               Only show errors");
    println!("    --verbose             Show verbose trace output");
    println!("    --debug-audit         Debug logs for the audit engine");
    println!("    --debug-llm           Debug logs for LLM provider calls");
    println!("    --debug-api           Debug logs for the API layer");
    println!("    --debug-webserver     Debug logs for the webserver");
    println!("    --debug-config        Debug logs for the config system");
    println!("    -h, --help            Print this help message");
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because CMD_ARGS is process-global state
    #[test]
    fn test_arg_parsing() {
        set_cmd_args(vec![
            "etax-sahayak".to_string(),
            "--quiet".to_string(),
            "--port".to_string(),
            "9090".to_string(),
        ]);
        assert!(has_arg("--quiet"));
        assert!(!has_arg("--verbose"));
        assert_eq!(get_arg_value("--port"), Some("9090".to_string()));
        assert_eq!(get_port_override(), Some(9090));
        assert_eq!(get_arg_value("--config"), None);
    }
}
