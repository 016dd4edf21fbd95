use crate::error::Result;
use crate::protocol::types::FieldMetadata;

/// One fetched row: a cell per column, `None` for SQL NULL.
///
/// Cell buffers may be longer than the value they hold; the authoritative
/// length of each cell comes from [`ResultBatch::fetch_lengths`].
pub type RawRow = Vec<Option<Vec<u8>>>;

/// Capabilities the cursor needs from one chunk of driver results.
pub trait ResultBatch {
    fn row_count(&self) -> u64;

    fn field_count(&self) -> usize;

    fn field(&self, index: usize) -> Option<&FieldMetadata>;

    /// Positions the batch so that the next `fetch_row` returns the row at
    /// `offset`.
    fn data_seek(&mut self, offset: u64);

    /// Returns the next row, or `None` once the batch is exhausted.
    fn fetch_row(&mut self) -> Option<RawRow>;

    /// Byte lengths of the cells of the row returned by the last `fetch_row`.
    fn fetch_lengths(&self) -> Option<&[u64]>;
}

/// Connection-side collaborator that turns SQL into result batches.
pub trait Driver {
    type Batch: ResultBatch;

    /// Executes `sql`. With `use_result_buffering` the driver must return
    /// batches whose rows are fully held client side so `data_seek` works.
    fn query(&mut self, sql: &str, use_result_buffering: bool) -> Result<Vec<Self::Batch>>;
}

impl<D: Driver + ?Sized> Driver for &mut D {
    type Batch = D::Batch;

    fn query(&mut self, sql: &str, use_result_buffering: bool) -> Result<Vec<Self::Batch>> {
        (**self).query(sql, use_result_buffering)
    }
}
