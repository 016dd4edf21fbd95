//! In-memory driver and result fixtures.

use resultset_engine::{BufferedBatch, Driver, FieldMetadata, FieldType, Result, ResultSetError};
use std::collections::VecDeque;

/// Driver that replays scripted responses and records every query it saw.
#[derive(Default)]
pub struct MockDriver {
    responses: VecDeque<Result<Vec<BufferedBatch>>>,
    pub queries: Vec<(String, bool)>,
}

#[allow(dead_code)]
impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, batches: Vec<BufferedBatch>) -> Self {
        self.responses.push_back(Ok(batches));
        self
    }

    pub fn fail(mut self, message: &str) -> Self {
        self.responses
            .push_back(Err(ResultSetError::Driver(message.to_string())));
        self
    }
}

impl Driver for MockDriver {
    type Batch = BufferedBatch;

    fn query(&mut self, sql: &str, use_result_buffering: bool) -> Result<Vec<BufferedBatch>> {
        self.queries.push((sql.to_string(), use_result_buffering));
        self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// `id` INT, `name` VARCHAR, `photo` BLOB with `rows` rows starting at
/// `first_id`. Photos of ids divisible by 3 are NULL.
#[allow(dead_code)]
pub fn people_batch(first_id: u32, rows: u32) -> BufferedBatch {
    let fields = vec![
        FieldMetadata::new("id", FieldType::Long),
        FieldMetadata::new("name", FieldType::VarString),
        FieldMetadata::new("photo", FieldType::Blob).binary(),
    ];
    let data = (first_id..first_id + rows)
        .map(|id| {
            let photo = if id % 3 == 0 {
                None
            } else {
                Some(vec![0x89, 0x00, id as u8])
            };
            vec![
                Some(id.to_string().into_bytes()),
                Some(format!("person {}", id).into_bytes()),
                photo,
            ]
        })
        .collect();
    BufferedBatch::new(fields).with_rows(data)
}

/// Text-only batch with the given column names and cell values.
#[allow(dead_code)]
pub fn text_batch(columns: &[&str], rows: &[&[Option<&str>]]) -> BufferedBatch {
    let fields = columns
        .iter()
        .map(|name| FieldMetadata::new(*name, FieldType::VarString))
        .collect();
    let data = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(|s| s.as_bytes().to_vec()))
                .collect()
        })
        .collect();
    BufferedBatch::new(fields).with_rows(data)
}
