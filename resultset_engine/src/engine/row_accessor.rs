use crate::engine::batch::Driver;
use crate::engine::cursor::{AccessMode, ResultSetCursor};
use crate::engine::data_type::DataTypeCategory;
use crate::error::{ResultSetError, Result};

/// Decodes the first `len` bytes of a cell.
///
/// Binary and spatial data map one byte to one char (Latin-1) so every byte
/// survives for hex rendering; everything else is read as UTF-8.
pub fn decode_cell(category: DataTypeCategory, bytes: &[u8], len: u64) -> String {
    let len = usize::try_from(len).unwrap_or(usize::MAX).min(bytes.len());
    let bytes = &bytes[..len];
    if category.is_byte_preserving() {
        bytes.iter().map(|&b| char::from(b)).collect()
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl<D: Driver> ResultSetCursor<D> {
    fn current_row_index(&self) -> Result<u64> {
        match self.state.position {
            Some(row) if !self.state.eof => Ok(row),
            other => Err(ResultSetError::RowOutOfRange {
                index: other.unwrap_or(0),
                row_count: self.row_count(),
            }),
        }
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.column_count() {
            return Err(ResultSetError::ColumnOutOfRange {
                index: column,
                column_count: self.column_count(),
            });
        }
        Ok(())
    }

    /// Text of `column` in the current row. A NULL cell reads as "".
    ///
    /// A column past the end is an error unless `ignore_missing_column` is
    /// set, in which case the result is empty.
    pub fn current_cell_text(&self, column: usize, ignore_missing_column: bool) -> Result<String> {
        if column >= self.column_count() {
            if ignore_missing_column {
                return Ok(String::new());
            }
            return Err(ResultSetError::CellOutOfRange {
                index: column,
                column_count: self.column_count(),
                row_count: self.row_count(),
            });
        }

        let row = self.current_row_index()?;
        match &self.mode {
            AccessMode::Editing(store) => Ok(store
                .data_at(row as usize, column)?
                .map(str::to_string)
                .unwrap_or_default()),
            AccessMode::Browsing => {
                let raw = self.state.row.as_ref().ok_or(ResultSetError::RowOutOfRange {
                    index: row,
                    row_count: self.row_count(),
                })?;
                let Some(bytes) = raw.get(column).and_then(|cell| cell.as_deref()) else {
                    return Ok(String::new());
                };
                let len = self.state.lengths.get(column).copied().unwrap_or(0);
                let category = self.catalog.get(column).map_or(DataTypeCategory::Other, |c| c.category);
                Ok(decode_cell(category, bytes, len))
            }
        }
    }

    /// Whether `column` of the current row is SQL NULL.
    pub fn current_is_null(&self, column: usize) -> Result<bool> {
        self.check_column(column)?;

        let row = self.current_row_index()?;
        match &self.mode {
            AccessMode::Editing(store) => store.is_null_at(row as usize, column),
            AccessMode::Browsing => {
                let raw = self.state.row.as_ref().ok_or(ResultSetError::RowOutOfRange {
                    index: row,
                    row_count: self.row_count(),
                })?;
                Ok(raw.get(column).map_or(true, |cell| cell.is_none()))
            }
        }
    }

    /// Seeks to `row` and returns the text of `column`.
    pub fn cell_text(&mut self, row: u64, column: usize, ignore_missing_column: bool) -> Result<String> {
        self.seek(row)?;
        self.current_cell_text(column, ignore_missing_column)
    }

    /// Seeks to `row` and reports whether `column` is SQL NULL.
    pub fn is_null(&mut self, row: u64, column: usize) -> Result<bool> {
        self.seek(row)?;
        self.current_is_null(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_as_utf8() {
        let s = decode_cell(DataTypeCategory::Text, "żółw".as_bytes(), 7);
        assert_eq!(s, "żółw");
    }

    #[test]
    fn test_decode_respects_length_not_terminator() {
        let s = decode_cell(DataTypeCategory::Binary, b"a\0b\0", 3);
        assert_eq!(s.chars().count(), 3);
        assert_eq!(s, "a\u{0}b");
    }

    #[test]
    fn test_decode_spatial_is_byte_preserving() {
        let s = decode_cell(DataTypeCategory::Spatial, &[0x01, 0xff, 0x80], 3);
        let bytes: Vec<u32> = s.chars().map(|c| c as u32).collect();
        assert_eq!(bytes, vec![0x01, 0xff, 0x80]);
    }

    #[test]
    fn test_decode_length_longer_than_buffer_is_clamped() {
        assert_eq!(decode_cell(DataTypeCategory::Text, b"ab", 10), "ab");
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let s = decode_cell(DataTypeCategory::Text, &[0x61, 0xff], 2);
        assert!(s.starts_with('a'));
        assert_eq!(s.chars().count(), 2);
    }
}
