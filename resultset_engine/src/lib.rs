pub mod engine;
mod error;
pub mod observability;
pub mod protocol;

pub use engine::{
    ColumnDescriptor, ConnectionContext, CursorOptions, DataTypeCategory, DataTypeIndex, Driver,
    EditableRowStore, OdbcDriver, QueryData, ResultBatch, ResultSetCursor,
};
pub use error::{ErrorCategory, Result, ResultSetError};
pub use protocol::{BufferedBatch, ColumnFlags, FieldMetadata, FieldType};

#[cfg(feature = "test-helpers")]
pub mod test_helpers {
    /// Loads `.env` from the working directory, ignoring a missing file.
    pub fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
