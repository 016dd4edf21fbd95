pub mod batch;
pub mod cell_reader;
pub mod column_catalog;
pub mod context;
pub mod cursor;
pub mod data_type;
pub mod editable;
pub mod grid;
pub mod odbc;
pub mod row_accessor;

pub use batch::{Driver, RawRow, ResultBatch};
pub use column_catalog::{data_type_of_field, ColumnCatalog, ColumnDescriptor};
pub use context::{ConnectionContext, CursorOptions};
pub use cursor::{AccessMode, CursorState, ResultSetCursor};
pub use data_type::{DataTypeCategory, DataTypeIndex};
pub use editable::{EditableRowStore, GridDataRow};
pub use grid::{format_as_hex, QueryData, NULL_MARKER};
pub use odbc::{field_from_data_type, OdbcDriver};
pub use row_accessor::decode_cell;
