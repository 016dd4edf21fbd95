use crate::error::{ResultSetError, Result};
use odbc_api::CursorRow;

/// Reads one cell as raw bytes; `None` for SQL NULL.
pub fn read_cell_bytes(
    row: &mut CursorRow<'_>,
    column_number: u16,
    binary: bool,
) -> Result<Option<Vec<u8>>> {
    if binary {
        read_binary(row, column_number)
    } else {
        read_text(row, column_number)
    }
}

fn read_text(row: &mut CursorRow<'_>, column_number: u16) -> Result<Option<Vec<u8>>> {
    let mut buf: Vec<u8> = Vec::new();
    let has_value = row
        .get_text(column_number, &mut buf)
        .map_err(ResultSetError::from)?;

    if has_value {
        Ok(Some(buf))
    } else {
        Ok(None)
    }
}

fn read_binary(row: &mut CursorRow<'_>, column_number: u16) -> Result<Option<Vec<u8>>> {
    let mut buf: Vec<u8> = Vec::new();
    let has_value = row
        .get_binary(column_number, &mut buf)
        .map_err(ResultSetError::from)?;

    if has_value {
        Ok(Some(buf))
    } else {
        Ok(None)
    }
}
