use crate::engine::batch::{Driver, RawRow, ResultBatch};
use crate::engine::column_catalog::{ColumnCatalog, ColumnDescriptor};
use crate::engine::context::{ConnectionContext, CursorOptions};
use crate::engine::editable::EditableRowStore;
use crate::error::{ResultSetError, Result};
use crate::observability::{CursorMetrics, StructuredLogger};
use log::Level;
use std::collections::HashMap;
use std::time::Instant;

/// Position and buffered row of the cursor.
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    /// Global row index; `None` until the first seek of an execution.
    pub position: Option<u64>,
    pub eof: bool,
    pub active_batch: Option<usize>,
    pub row: Option<RawRow>,
    /// Byte length of every cell of `row`.
    pub lengths: Vec<u64>,
}

/// Browsing reads through the driver batches; Editing reads a private copy.
#[derive(Debug)]
pub enum AccessMode {
    Browsing,
    Editing(EditableRowStore),
}

/// Buffered, seekable view over the batches one query produced.
pub struct ResultSetCursor<D: Driver> {
    driver: D,
    ctx: ConnectionContext,
    options: CursorOptions,
    sql: String,
    batches: Vec<D::Batch>,
    record_count: u64,
    pub(crate) catalog: ColumnCatalog,
    pub(crate) state: CursorState,
    pub(crate) mode: AccessMode,
    metrics: CursorMetrics,
    logger: StructuredLogger,
}

impl<D: Driver> ResultSetCursor<D> {
    pub fn new(driver: D, ctx: ConnectionContext) -> Self {
        Self::with_options(driver, ctx, CursorOptions::default())
    }

    pub fn with_options(driver: D, ctx: ConnectionContext, options: CursorOptions) -> Self {
        Self {
            driver,
            ctx,
            options,
            sql: String::new(),
            batches: Vec::new(),
            record_count: 0,
            catalog: ColumnCatalog::new(),
            state: CursorState::default(),
            mode: AccessMode::Browsing,
            metrics: CursorMetrics::new(),
            logger: StructuredLogger::new(cfg!(feature = "observability") && options.log_queries),
        }
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Runs the current SQL.
    ///
    /// With `append` the first returned batch is added behind the existing
    /// ones and columns are kept; otherwise all previous state is replaced.
    /// Appending without prior results behaves like a fresh execution.
    pub fn execute(&mut self, append: bool) -> Result<()> {
        if self.sql.trim().is_empty() {
            return Err(ResultSetError::ValidationError(
                "SQL query cannot be empty".to_string(),
            ));
        }

        let start_time = Instant::now();
        let mut metadata = HashMap::new();
        metadata.insert("append".to_string(), append.to_string());
        self.logger.log_query(Level::Debug, &self.sql, &metadata);

        let results = match self
            .driver
            .query(&self.sql, self.options.use_result_buffering)
        {
            Ok(results) => results,
            Err(e) => {
                self.metrics.record_error();
                self.logger.log_error(&e.to_string(), &metadata);
                return Err(e);
            }
        };

        let append = if append && self.batches.is_empty() {
            log::warn!("No previous results to append to, executing as fresh query");
            false
        } else {
            append
        };

        if !append {
            self.batches.clear();
            self.record_count = 0;
            self.state = CursorState::default();
            if let AccessMode::Editing(store) = &mut self.mode {
                store.clear();
            }
        }

        let returned = results.len();
        if let Some(batch) = results.into_iter().next() {
            if returned > 1 {
                log::debug!("Keeping first of {} result batches", returned);
            }
            self.record_count += batch.row_count();
            self.batches.push(batch);

            if append {
                if let (AccessMode::Editing(store), Some(batch)) =
                    (&mut self.mode, self.batches.last_mut())
                {
                    let rows = store.materialize(batch, self.catalog.columns())?;
                    self.metrics.record_reposition();
                    self.metrics.record_materialized(rows);
                }
            }
        }

        if !append {
            self.catalog.clear();
            if let Some(first) = self.batches.first_mut() {
                self.catalog = ColumnCatalog::from_batch(&*first, &self.ctx)?;
                if let AccessMode::Editing(store) = &mut self.mode {
                    let rows = store.materialize(first, self.catalog.columns())?;
                    self.metrics.record_reposition();
                    self.metrics.record_materialized(rows);
                }
                self.seek_first()?;
            }
        }

        self.metrics.record_execution(start_time.elapsed());
        log::debug!(
            "Query returned {} rows in {} batch(es), {} columns",
            self.record_count,
            self.batches.len(),
            self.catalog.len()
        );
        Ok(())
    }

    pub fn seek_first(&mut self) -> Result<()> {
        self.state.position = None;
        self.seek(0)
    }

    /// Moves to global row `row`.
    ///
    /// Rows at or past the end clamp to `row_count()` and set end-of-data;
    /// the buffered row is dropped so a later seek after the result grows
    /// repositions.
    /// While browsing, the owning batch is repositioned only when the row is
    /// the first of its batch, is not directly after the current position, or
    /// nothing is buffered yet.
    pub fn seek(&mut self, row: u64) -> Result<()> {
        if self.state.position == Some(row) && !self.state.eof {
            return Ok(());
        }

        let count = self.row_count();
        if row >= count {
            self.state.position = Some(count);
            self.state.eof = true;
            self.state.row = None;
            self.state.active_batch = None;
            return Ok(());
        }

        if let AccessMode::Browsing = self.mode {
            let sequential = self.state.position.map(|p| p + 1) == Some(row);
            let mut num_rows = 0u64;
            for (index, batch) in self.batches.iter_mut().enumerate() {
                num_rows += batch.row_count();
                if num_rows <= row {
                    continue;
                }

                let local = batch.row_count() - (num_rows - row);
                if local == 0 || !sequential || self.state.row.is_none() {
                    log::trace!("Repositioning batch #{} to local row {}", index, local);
                    batch.data_seek(local);
                    self.metrics.record_reposition();
                }

                let fetched = batch.fetch_row().ok_or_else(|| {
                    ResultSetError::InternalConsistency(format!(
                        "batch #{} has no row at local offset {}",
                        index, local
                    ))
                })?;
                self.metrics.record_fetch();

                let lengths = batch.fetch_lengths().ok_or_else(|| {
                    ResultSetError::InternalConsistency(
                        "driver returned a row without column lengths".to_string(),
                    )
                })?;
                self.state.lengths.clear();
                self.state.lengths.extend_from_slice(lengths);
                self.state.row = Some(fetched);
                self.state.active_batch = Some(index);
                break;
            }
        }

        self.state.position = Some(row);
        self.state.eof = false;
        Ok(())
    }

    /// Switches to Editing, copying every batch into an editable store.
    /// Does nothing when already editing.
    pub fn prepare_editing(&mut self) -> Result<()> {
        if self.is_editing() {
            return Ok(());
        }

        let mut store = EditableRowStore::new();
        let mut rows = 0;
        for batch in self.batches.iter_mut() {
            rows += store.materialize(batch, self.catalog.columns())?;
            self.metrics.record_reposition();
        }
        self.metrics.record_materialized(rows);
        log::debug!("Materialized {} rows for editing", rows);

        self.state.row = None;
        self.state.active_batch = None;
        self.mode = AccessMode::Editing(store);
        Ok(())
    }

    /// Leaves Editing and drops the materialized copy with every change made
    /// to it. Browsing resumes from the driver batches; the next seek
    /// repositions.
    pub fn discard_editing(&mut self) {
        if let AccessMode::Editing(store) = &self.mode {
            log::debug!("Discarding {} edited rows", store.row_count());
            self.mode = AccessMode::Browsing;
            self.state = CursorState {
                lengths: vec![0; self.catalog.len()],
                ..CursorState::default()
            };
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, AccessMode::Editing(_))
    }

    pub fn editable_data(&self) -> Option<&EditableRowStore> {
        match &self.mode {
            AccessMode::Editing(store) => Some(store),
            AccessMode::Browsing => None,
        }
    }

    pub fn editable_data_mut(&mut self) -> Option<&mut EditableRowStore> {
        match &mut self.mode {
            AccessMode::Editing(store) => Some(store),
            AccessMode::Browsing => None,
        }
    }

    pub fn has_result(&self) -> bool {
        !self.batches.is_empty()
    }

    /// Rows visible to consumers: the driver total while browsing, the
    /// editable copy's size while editing.
    pub fn row_count(&self) -> u64 {
        match &self.mode {
            AccessMode::Editing(store) => store.row_count() as u64,
            AccessMode::Browsing => self.record_count,
        }
    }

    pub fn column_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.catalog.columns()
    }

    pub fn column(&self, index: usize) -> Result<&ColumnDescriptor> {
        self.catalog
            .get(index)
            .ok_or(ResultSetError::ColumnOutOfRange {
                index,
                column_count: self.catalog.len(),
            })
    }

    pub fn column_name(&self, index: usize) -> Result<&str> {
        Ok(self.column(index)?.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.catalog.index_of(name)
    }

    pub fn position(&self) -> Option<u64> {
        self.state.position
    }

    pub fn is_eof(&self) -> bool {
        self.state.eof
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn batches(&self) -> &[D::Batch] {
        &self.batches
    }

    pub fn metrics(&self) -> &CursorMetrics {
        &self.metrics
    }

    pub fn context(&self) -> &ConnectionContext {
        &self.ctx
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
