use std::time::Duration;

/// Counters kept by one cursor.
///
/// `repositions` and `fetches` count calls into the batches, which is what
/// tells random access apart from cheap sequential access. Each batch copied
/// into the editable store adds one reposition for its rewind; the rows it
/// drains are not counted as fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMetrics {
    pub executions: u64,
    pub errors: u64,
    pub repositions: u64,
    pub fetches: u64,
    pub materialized_rows: u64,
    pub total_latency: Duration,
    pub min_latency: Duration,
    pub max_latency: Duration,
}

impl Default for CursorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorMetrics {
    pub fn new() -> Self {
        Self {
            executions: 0,
            errors: 0,
            repositions: 0,
            fetches: 0,
            materialized_rows: 0,
            total_latency: Duration::ZERO,
            min_latency: Duration::MAX,
            max_latency: Duration::ZERO,
        }
    }

    pub fn record_execution(&mut self, latency: Duration) {
        self.executions += 1;
        self.total_latency += latency;

        if latency < self.min_latency {
            self.min_latency = latency;
        }
        if latency > self.max_latency {
            self.max_latency = latency;
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn record_reposition(&mut self) {
        self.repositions += 1;
    }

    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    pub fn record_materialized(&mut self, rows: usize) {
        self.materialized_rows += rows as u64;
    }

    pub fn average_latency(&self) -> Duration {
        if self.executions == 0 {
            return Duration::ZERO;
        }
        self.total_latency / self.executions as u32
    }
}
