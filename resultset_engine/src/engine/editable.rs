use crate::engine::batch::ResultBatch;
use crate::engine::column_catalog::ColumnDescriptor;
use crate::engine::data_type::DataTypeCategory;
use crate::engine::row_accessor::decode_cell;
use crate::error::{ResultSetError, Result};

/// Decoded cells of one row; `None` keeps SQL NULL distinct from "".
pub type GridDataRow = Vec<Option<String>>;

/// Mutable, fully materialized copy of a result set.
///
/// Rows can be inserted and removed anywhere, which a forward-only driver
/// cursor cannot express.
#[derive(Debug, Clone, Default)]
pub struct EditableRowStore {
    rows: Vec<GridDataRow>,
}

impl EditableRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn reserve_for_append(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    pub fn append_row(&mut self, row: GridDataRow) {
        self.rows.push(row);
    }

    /// Copies every row of `batch` in one sequential pass.
    ///
    /// The batch is rewound once so rows the cursor already fetched are not
    /// lost; no other repositioning happens. Returns the number of rows
    /// appended.
    pub fn materialize<B: ResultBatch + ?Sized>(
        &mut self,
        batch: &mut B,
        columns: &[ColumnDescriptor],
    ) -> Result<usize> {
        let num_rows = usize::try_from(batch.row_count()).unwrap_or(usize::MAX);
        let num_cols = batch.field_count();
        self.reserve_for_append(num_rows);

        batch.data_seek(0);
        let mut appended = 0;
        while let Some(raw) = batch.fetch_row() {
            let lengths = batch.fetch_lengths().ok_or_else(|| {
                ResultSetError::InternalConsistency(
                    "driver returned a row without column lengths".to_string(),
                )
            })?;

            let mut row: GridDataRow = Vec::with_capacity(num_cols);
            for col in 0..num_cols {
                let category = columns
                    .get(col)
                    .map_or(DataTypeCategory::Other, |c| c.category);
                let len = lengths.get(col).copied().unwrap_or(0);
                let cell = raw
                    .get(col)
                    .and_then(|cell| cell.as_deref())
                    .map(|bytes| decode_cell(category, bytes, len));
                row.push(cell);
            }

            self.append_row(row);
            appended += 1;
        }

        Ok(appended)
    }

    fn cell(&self, row: usize, column: usize) -> Result<&Option<String>> {
        let data = self.rows.get(row).ok_or(ResultSetError::RowOutOfRange {
            index: row as u64,
            row_count: self.rows.len() as u64,
        })?;
        data.get(column).ok_or(ResultSetError::CellOutOfRange {
            index: column,
            column_count: data.len(),
            row_count: self.rows.len() as u64,
        })
    }

    pub fn data_at(&self, row: usize, column: usize) -> Result<Option<&str>> {
        Ok(self.cell(row, column)?.as_deref())
    }

    pub fn is_null_at(&self, row: usize, column: usize) -> Result<bool> {
        Ok(self.cell(row, column)?.is_none())
    }

    pub fn set_data(&mut self, row: usize, column: usize, value: Option<String>) -> Result<()> {
        let row_count = self.rows.len() as u64;
        let data = self.rows.get_mut(row).ok_or(ResultSetError::RowOutOfRange {
            index: row as u64,
            row_count,
        })?;
        let column_count = data.len();
        let cell = data.get_mut(column).ok_or(ResultSetError::CellOutOfRange {
            index: column,
            column_count,
            row_count,
        })?;
        *cell = value;
        Ok(())
    }

    /// Inserts `row` before position `at`; `at == row_count` appends.
    pub fn insert_row(&mut self, at: usize, row: GridDataRow) -> Result<()> {
        if at > self.rows.len() {
            return Err(ResultSetError::RowOutOfRange {
                index: at as u64,
                row_count: self.rows.len() as u64,
            });
        }
        self.rows.insert(at, row);
        Ok(())
    }

    pub fn remove_row(&mut self, at: usize) -> Result<GridDataRow> {
        if at >= self.rows.len() {
            return Err(ResultSetError::RowOutOfRange {
                index: at as u64,
                row_count: self.rows.len() as u64,
            });
        }
        Ok(self.rows.remove(at))
    }
}
