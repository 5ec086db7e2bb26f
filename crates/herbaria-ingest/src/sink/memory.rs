//! In-memory sink with transaction emulation

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use super::RecordSink;
use crate::error::SinkError;
use crate::records::FieldValue;

/// Rows accepted by one successful bulk insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedBatch {
    pub table: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<FieldValue>>,
}

/// Records every batch it is handed. Inserts are pending until committed and
/// vanish on rollback. Attempts listed in `failing` (0-based, counted over
/// every bulk insert call) are rejected.
#[derive(Debug, Default)]
pub struct MemorySink {
    pending: Vec<InsertedBatch>,
    committed: Vec<InsertedBatch>,
    attempts: Vec<usize>,
    failing: HashSet<usize>,
    commits: usize,
    rollbacks: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects the given bulk insert attempts
    pub fn failing_on(attempts: impl IntoIterator<Item = usize>) -> Self {
        Self {
            failing: attempts.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Row count of every bulk insert call, failed ones included
    pub fn attempts(&self) -> &[usize] {
        &self.attempts
    }

    pub fn committed(&self) -> &[InsertedBatch] {
        &self.committed
    }

    pub fn pending(&self) -> &[InsertedBatch] {
        &self.pending
    }

    /// Committed rows for one table, in insertion order
    pub fn committed_rows(&self, table: &str) -> Vec<&[FieldValue]> {
        self.committed
            .iter()
            .filter(|batch| batch.table == table)
            .flat_map(|batch| batch.rows.iter().map(Vec::as_slice))
            .collect()
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn bulk_insert(
        &mut self,
        table: &str,
        columns: &[&'static str],
        rows: &[Vec<FieldValue>],
    ) -> Result<(), SinkError> {
        let attempt = self.attempts.len();
        self.attempts.push(rows.len());

        if self.failing.contains(&attempt) {
            return Err(SinkError::Rejected(format!("injected failure on batch {attempt}")));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(SinkError::Rejected(format!(
                "row has {} values for {} columns",
                row.len(),
                columns.len()
            )));
        }

        debug!(table, rows = rows.len(), "Buffered batch");
        self.pending.push(InsertedBatch {
            table: table.to_string(),
            columns: columns.to_vec(),
            rows: rows.to_vec(),
        });
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), SinkError> {
        self.commits += 1;
        self.committed.append(&mut self.pending);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SinkError> {
        self.rollbacks += 1;
        self.pending.clear();
        Ok(())
    }
}
