/// Log tags identifying the subsystem a message came from
///
/// Each tag maps to a --debug-<tag> command-line flag for per-module
/// debug output control.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Llm,
    Audit,
    Webserver,
}

impl LogTag {
    /// The key used for --debug-<key> flag matching
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Api => "api",
            LogTag::Llm => "llm",
            LogTag::Audit => "audit",
            LogTag::Webserver => "webserver",
        }
        .to_string()
    }

    /// Uncolored uppercase name for file output
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Api => "API",
            LogTag::Llm => "LLM",
            LogTag::Audit => "AUDIT",
            LogTag::Webserver => "WEBSERVER",
        }
    }

    /// All known tags (used when --debug-all is given)
    pub fn all() -> &'static [LogTag] {
        &[
            LogTag::System,
            LogTag::Config,
            LogTag::Api,
            LogTag::Llm,
            LogTag::Audit,
            LogTag::Webserver,
        ]
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys_are_lowercase() {
        for tag in LogTag::all() {
            let key = tag.to_debug_key();
            assert_eq!(key, key.to_lowercase());
        }
    }
}
