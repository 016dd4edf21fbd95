use odbc_api::handles::Record as OdbcRecord;
use thiserror::Error;

/// Error category for decision-making (retry, abort, reconnect, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient error - retry may resolve
    Transient,
    /// Fatal error - should abort operation
    Fatal,
    /// Validation error - invalid index or input
    Validation,
    /// Connection lost - should reconnect
    ConnectionLost,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResultSetError {
    #[error("Column #{index} not available. Query returned {column_count} columns.")]
    ColumnOutOfRange { index: usize, column_count: usize },

    #[error(
        "Column #{index} not available. Query returned {column_count} columns and {row_count} rows."
    )]
    CellOutOfRange {
        index: usize,
        column_count: usize,
        row_count: u64,
    },

    #[error("Row #{index} not available. Query returned {row_count} rows.")]
    RowOutOfRange { index: u64, row_count: u64 },

    #[error("Internal consistency violation: {0}")]
    InternalConsistency(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Structured error: {message}")]
    Structured {
        sqlstate: [u8; 5],
        native_code: i32,
        message: String,
    },

    #[error("Connection string is empty")]
    EmptyConnectionString,

    #[error("Environment not initialized")]
    EnvironmentNotInitialized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<odbc_api::Error> for ResultSetError {
    fn from(err: odbc_api::Error) -> Self {
        if let Some(structured) = try_extract_structured(&err) {
            return structured;
        }
        ResultSetError::Driver(err.to_string())
    }
}

impl From<serde_json::Error> for ResultSetError {
    fn from(err: serde_json::Error) -> Self {
        ResultSetError::Config(err.to_string())
    }
}

fn try_extract_structured(err: &odbc_api::Error) -> Option<ResultSetError> {
    use odbc_api::Error as OdbcErr;
    let record = match err {
        OdbcErr::Diagnostics { record, .. } => record,
        OdbcErr::UnsupportedOdbcApiVersion(record) => record,
        OdbcErr::UnableToRepresentNull(record) => record,
        _ => return None,
    };
    Some(structured_from_odbc_record(record))
}

fn structured_from_odbc_record(record: &OdbcRecord) -> ResultSetError {
    ResultSetError::Structured {
        sqlstate: record.state.0,
        native_code: record.native_error,
        message: record.to_string(),
    }
}

impl ResultSetError {
    pub fn sqlstate(&self) -> [u8; 5] {
        match self {
            ResultSetError::Structured { sqlstate, .. } => *sqlstate,
            _ => [0u8; 5],
        }
    }

    pub fn native_code(&self) -> i32 {
        match self {
            ResultSetError::Structured { native_code, .. } => *native_code,
            _ => 0,
        }
    }

    /// True for row and column index errors.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ResultSetError::ColumnOutOfRange { .. }
                | ResultSetError::CellOutOfRange { .. }
                | ResultSetError::RowOutOfRange { .. }
        )
    }

    /// Returns true if this is a connection-related error
    pub fn is_connection_error(&self) -> bool {
        match self {
            ResultSetError::EmptyConnectionString
            | ResultSetError::EnvironmentNotInitialized => true,
            ResultSetError::Structured { sqlstate, .. } => {
                sqlstate[0] == b'0' && sqlstate[1] == b'8'
            }
            _ => false,
        }
    }

    /// Returns the error category for decision-making
    pub fn error_category(&self) -> ErrorCategory {
        if self.is_out_of_range()
            || matches!(
                self,
                ResultSetError::ValidationError(_) | ResultSetError::Config(_)
            )
        {
            return ErrorCategory::Validation;
        }
        if matches!(self, ResultSetError::InternalConsistency(_)) {
            return ErrorCategory::Fatal;
        }
        if self.is_connection_error() {
            return ErrorCategory::ConnectionLost;
        }
        if let ResultSetError::Driver(msg) = self {
            if msg.contains("timeout") || msg.contains("Timeout") {
                return ErrorCategory::Transient;
            }
        }
        ErrorCategory::Fatal
    }
}

pub type Result<T> = std::result::Result<T, ResultSetError>;
