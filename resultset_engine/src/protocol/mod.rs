pub mod row_buffer;
pub mod types;

pub use row_buffer::BufferedBatch;
pub use types::{
    ColumnFlags, FieldMetadata, FieldType, BINARY_CHARSET_NUMBER, ORIGIN_NAME_MIN_SERVER_VERSION,
    UTF8_CHARSET_NUMBER,
};
