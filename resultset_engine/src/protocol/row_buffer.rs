use crate::engine::batch::{RawRow, ResultBatch};
use crate::protocol::types::FieldMetadata;

/// Fully buffered result chunk: every row is held in memory and the read
/// position can be moved freely with `data_seek`.
#[derive(Debug, Clone, Default)]
pub struct BufferedBatch {
    fields: Vec<FieldMetadata>,
    rows: Vec<RawRow>,
    next_row: usize,
    last_lengths: Option<Vec<u64>>,
}

impl BufferedBatch {
    pub fn new(fields: Vec<FieldMetadata>) -> Self {
        Self {
            fields,
            rows: Vec::new(),
            next_row: 0,
            last_lengths: None,
        }
    }

    pub fn add_field(&mut self, field: FieldMetadata) {
        self.fields.push(field);
    }

    pub fn add_row(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn with_rows(mut self, rows: Vec<RawRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }
}

impl ResultBatch for BufferedBatch {
    fn row_count(&self) -> u64 {
        self.rows.len() as u64
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, index: usize) -> Option<&FieldMetadata> {
        self.fields.get(index)
    }

    fn data_seek(&mut self, offset: u64) {
        self.next_row = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.rows.len());
        self.last_lengths = None;
    }

    fn fetch_row(&mut self) -> Option<RawRow> {
        let Some(row) = self.rows.get(self.next_row) else {
            self.last_lengths = None;
            return None;
        };
        self.next_row += 1;
        self.last_lengths = Some(
            row.iter()
                .map(|cell| cell.as_ref().map_or(0, |bytes| bytes.len() as u64))
                .collect(),
        );
        Some(row.clone())
    }

    fn fetch_lengths(&self) -> Option<&[u64]> {
        self.last_lengths.as_deref()
    }
}
