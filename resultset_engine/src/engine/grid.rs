use crate::engine::batch::Driver;
use crate::engine::cursor::ResultSetCursor;
use crate::engine::data_type::DataTypeCategory;
use crate::error::Result;

/// Text shown for SQL NULL cells.
pub const NULL_MARKER: &str = "(NULL)";

/// Renders byte-per-char data as `0x` followed by upper-case hex digits.
pub fn format_as_hex(data: &str) -> String {
    let mut out = String::with_capacity(2 + data.len() * 2);
    out.push_str("0x");
    for ch in data.chars() {
        out.push_str(&format!("{:02X}", ch as u32));
    }
    out
}

/// Grid-facing view of a query: row/column extents and display text.
///
/// Without a cursor every accessor answers an empty grid.
pub struct QueryData<D: Driver> {
    query: Option<ResultSetCursor<D>>,
}

impl<D: Driver> Default for QueryData<D> {
    fn default() -> Self {
        Self { query: None }
    }
}

impl<D: Driver> QueryData<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(cursor: ResultSetCursor<D>) -> Self {
        Self {
            query: Some(cursor),
        }
    }

    pub fn set_cursor(&mut self, cursor: Option<ResultSetCursor<D>>) {
        self.query = cursor;
    }

    pub fn cursor(&self) -> Option<&ResultSetCursor<D>> {
        self.query.as_ref()
    }

    pub fn cursor_mut(&mut self) -> Option<&mut ResultSetCursor<D>> {
        self.query.as_mut()
    }

    pub fn row_count(&self) -> u64 {
        self.query.as_ref().map_or(0, |q| q.row_count())
    }

    pub fn column_count(&self) -> usize {
        self.query.as_ref().map_or(0, |q| q.column_count())
    }

    pub fn column_name(&self, index: usize) -> Result<String> {
        match &self.query {
            Some(q) => Ok(q.column_name(index)?.to_string()),
            None => Ok(String::new()),
        }
    }

    pub fn column_category(&self, index: usize) -> Result<DataTypeCategory> {
        match &self.query {
            Some(q) => Ok(q.column(index)?.category),
            None => Ok(DataTypeCategory::Other),
        }
    }

    /// Display text of a cell: the NULL marker, hex for binary and spatial
    /// data, the decoded text otherwise.
    pub fn raw_data_at(&mut self, row: u64, column: usize) -> Result<String> {
        let Some(q) = self.query.as_mut() else {
            return Ok(String::new());
        };

        q.seek(row)?;
        if q.current_is_null(column)? {
            return Ok(NULL_MARKER.to_string());
        }

        let data = q.current_cell_text(column, true)?;
        if q.column(column)?.category.is_byte_preserving() {
            return Ok(format_as_hex(&data));
        }
        Ok(data)
    }

    pub fn is_null_at(&mut self, row: u64, column: usize) -> Result<bool> {
        match self.query.as_mut() {
            Some(q) => q.is_null(row, column),
            None => Ok(false),
        }
    }

    /// Writing cells is handled by the editing layer, not here.
    pub fn set_data(&mut self, _row: u64, _column: usize, _value: &str) -> bool {
        false
    }

    pub fn prepare_editing(&mut self) -> Result<()> {
        match self.query.as_mut() {
            Some(q) => q.prepare_editing(),
            None => Ok(()),
        }
    }
}
