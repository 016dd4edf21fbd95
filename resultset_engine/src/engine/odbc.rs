use crate::engine::batch::Driver;
use crate::engine::cell_reader::read_cell_bytes;
use crate::error::{ResultSetError, Result};
use crate::protocol::row_buffer::BufferedBatch;
use crate::protocol::types::{ColumnFlags, FieldMetadata, FieldType};
use odbc_api::{Connection, ConnectionOptions, Cursor, DataType, Environment, ResultSetMetadata};

lazy_static::lazy_static! {
    static ref ODBC_ENV: Option<Environment> = match Environment::new() {
        Ok(env) => Some(env),
        Err(e) => {
            log::error!("Failed to create ODBC environment: {}", e);
            None
        }
    };
}

/// Maps an ODBC column type onto wire-level field metadata.
///
/// Binary ODBC types carry the binary charset and flag so they classify as
/// binary on unicode and non-unicode connections alike.
pub fn field_from_data_type(name: String, data_type: &DataType) -> FieldMetadata {
    let (field_type, binary) = match data_type {
        DataType::TinyInt | DataType::Bit => (FieldType::Tiny, false),
        DataType::SmallInt => (FieldType::Short, false),
        DataType::Integer => (FieldType::Long, false),
        DataType::BigInt => (FieldType::LongLong, false),
        DataType::Real | DataType::Float { .. } => (FieldType::Float, false),
        DataType::Double => (FieldType::Double, false),
        DataType::Numeric { .. } | DataType::Decimal { .. } => (FieldType::NewDecimal, false),
        DataType::Date => (FieldType::Date, false),
        DataType::Time { .. } => (FieldType::Time, false),
        DataType::Timestamp { .. } => (FieldType::DateTime, false),
        DataType::Char { .. } => (FieldType::String, false),
        DataType::LongVarchar { .. } => (FieldType::Blob, false),
        DataType::Binary { .. } => (FieldType::String, true),
        DataType::Varbinary { .. } => (FieldType::VarString, true),
        DataType::LongVarbinary { .. } => (FieldType::Blob, true),
        _ => (FieldType::VarString, false),
    };

    let field = FieldMetadata::new(name, field_type);
    if binary {
        field.binary().with_flags(ColumnFlags::BLOB)
    } else {
        field
    }
}

/// `Driver` backed by an ODBC connection. Results are always drained into a
/// [`BufferedBatch`] so they can be seeked.
pub struct OdbcDriver {
    conn: Connection<'static>,
}

impl OdbcDriver {
    pub fn connect(conn_str: &str) -> Result<Self> {
        if conn_str.is_empty() {
            return Err(ResultSetError::EmptyConnectionString);
        }

        let env = ODBC_ENV
            .as_ref()
            .ok_or(ResultSetError::EnvironmentNotInitialized)?;
        let conn = env.connect_with_connection_string(conn_str, ConnectionOptions::default())?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection<'static> {
        &self.conn
    }
}

impl Driver for OdbcDriver {
    type Batch = BufferedBatch;

    fn query(&mut self, sql: &str, use_result_buffering: bool) -> Result<Vec<BufferedBatch>> {
        if !use_result_buffering {
            log::debug!("ODBC results are always buffered client side");
        }

        let mut stmt = self.conn.prepare(sql).map_err(ResultSetError::from)?;
        let cursor = stmt.execute(()).map_err(ResultSetError::from)?;

        let Some(mut cursor) = cursor else {
            return Ok(Vec::new());
        };

        let cols_i16 = cursor.num_result_cols().map_err(ResultSetError::from)?;
        let cols_u16: u16 = cols_i16.try_into().map_err(|_| {
            ResultSetError::InternalConsistency("Invalid column count".to_string())
        })?;

        let mut batch = BufferedBatch::default();
        let mut binary_columns: Vec<bool> = Vec::with_capacity(cols_u16.into());
        for col_idx in 1..=cols_u16 {
            let col_name = cursor.col_name(col_idx).map_err(ResultSetError::from)?;
            let col_type = cursor.col_data_type(col_idx).map_err(ResultSetError::from)?;
            let field = field_from_data_type(col_name, &col_type);
            binary_columns.push(field.flags.contains(ColumnFlags::BINARY));
            batch.add_field(field);
        }

        while let Some(mut row) = cursor.next_row().map_err(ResultSetError::from)? {
            let mut row_data = Vec::with_capacity(binary_columns.len());
            for (col_idx, &binary) in binary_columns.iter().enumerate() {
                let col_number: u16 = (col_idx + 1).try_into().map_err(|_| {
                    ResultSetError::InternalConsistency("Invalid column number".to_string())
                })?;
                row_data.push(read_cell_bytes(&mut row, col_number, binary)?);
            }
            batch.add_row(row_data);
        }

        Ok(vec![batch])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::column_catalog::data_type_of_field;
    use crate::engine::data_type::{DataTypeCategory, DataTypeIndex};
    use std::num::NonZero;

    #[test]
    fn test_connect_empty_string() {
        assert!(matches!(
            OdbcDriver::connect(""),
            Err(ResultSetError::EmptyConnectionString)
        ));
    }

    #[test]
    fn test_integer_types() {
        let field = field_from_data_type("id".to_string(), &DataType::Integer);
        assert_eq!(field.field_type, FieldType::Long);
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::Int);

        let field = field_from_data_type("n".to_string(), &DataType::BigInt);
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::BigInt);
    }

    #[test]
    fn test_binary_types_classify_as_binary_in_both_modes() {
        let field = field_from_data_type(
            "photo".to_string(),
            &DataType::Varbinary {
                length: NonZero::new(100),
            },
        );
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::VarBinary);
        assert_eq!(data_type_of_field(&field, false), DataTypeIndex::VarBinary);
        assert_eq!(
            data_type_of_field(&field, true).category(),
            DataTypeCategory::Binary
        );
    }

    #[test]
    fn test_text_types() {
        let field = field_from_data_type(
            "name".to_string(),
            &DataType::Varchar {
                length: NonZero::new(50),
            },
        );
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::Varchar);

        let field = field_from_data_type(
            "code".to_string(),
            &DataType::Char {
                length: NonZero::new(2),
            },
        );
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::Char);
    }

    #[test]
    fn test_temporal_types() {
        let field = field_from_data_type(
            "at".to_string(),
            &DataType::Timestamp { precision: 3 },
        );
        assert_eq!(
            data_type_of_field(&field, true).category(),
            DataTypeCategory::Temporal
        );
    }
}
