use log::Level;
use std::collections::HashMap;

pub struct StructuredLogger {
    enabled: bool,
}

impl StructuredLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_query(&self, level: Level, query: &str, metadata: &HashMap<String, String>) {
        if !self.enabled {
            return;
        }

        log::log!(level, "Query: {}{}", query, format_metadata(metadata));
    }

    pub fn log_error(&self, error: &str, metadata: &HashMap<String, String>) {
        if !self.enabled {
            return;
        }

        log::error!("Error: {}{}", error, format_metadata(metadata));
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

/// `, key=value` pairs sorted by key so log lines are stable.
fn format_metadata(metadata: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = metadata.iter().collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(key, value)| format!(", {}={}", key, value))
        .collect()
}
