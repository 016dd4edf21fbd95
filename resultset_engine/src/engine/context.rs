use crate::error::Result;
use crate::protocol::types::ORIGIN_NAME_MIN_SERVER_VERSION;
use serde::Deserialize;

/// What the cursor needs to know about the connection it reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionContext {
    /// Server version as `major * 10000 + minor * 100 + patch`.
    pub server_version: u32,
    /// Unicode-aware connections signal binary data by charset id.
    pub unicode: bool,
}

impl Default for ConnectionContext {
    fn default() -> Self {
        Self {
            server_version: 50700,
            unicode: true,
        }
    }
}

impl ConnectionContext {
    pub fn new(server_version: u32, unicode: bool) -> Self {
        Self {
            server_version,
            unicode,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn reports_origin_names(&self) -> bool {
        self.server_version >= ORIGIN_NAME_MIN_SERVER_VERSION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CursorOptions {
    /// Ask the driver to hold results client side (required for seeking).
    pub use_result_buffering: bool,
    pub log_queries: bool,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            use_result_buffering: true,
            log_queries: true,
        }
    }
}

impl CursorOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResultSetError;

    #[test]
    fn test_connection_context_default() {
        let ctx = ConnectionContext::default();
        assert_eq!(ctx.server_version, 50700);
        assert!(ctx.unicode);
        assert!(ctx.reports_origin_names());
    }

    #[test]
    fn test_old_server_has_no_origin_names() {
        let ctx = ConnectionContext::new(40099, false);
        assert!(!ctx.reports_origin_names());
        assert!(ConnectionContext::new(40100, false).reports_origin_names());
    }

    #[test]
    fn test_connection_context_from_json_partial() {
        let ctx = ConnectionContext::from_json(r#"{"unicode": false}"#).unwrap();
        assert!(!ctx.unicode);
        assert_eq!(ctx.server_version, 50700);
    }

    #[test]
    fn test_cursor_options_from_json() {
        let opts =
            CursorOptions::from_json(r#"{"use_result_buffering": false, "log_queries": false}"#)
                .unwrap();
        assert!(!opts.use_result_buffering);
        assert!(!opts.log_queries);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = CursorOptions::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, ResultSetError::Config(_)));
    }
}
