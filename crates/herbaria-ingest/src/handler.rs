//! Ingestion handler: stream one corpus file into the sink
//!
//! Rows are decoded in file order, filtered against the valid occurrence
//! keys, and flushed to the sink in batches. A batch the sink rejects is
//! rolled back and recorded, and the pass moves on to the next batch. A row
//! that cannot be decoded ends the pass.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::DEFAULT_BATCH_SIZE;
use crate::error::Result;
use crate::reader::TsvReader;
use crate::records::{FieldValue, Kind, RecordKind};
use crate::sink::RecordSink;
use crate::validator::ValidKeys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub batch_size: usize,
    /// Forward every row regardless of the valid-key set
    pub skip_fkey_validation: bool,
    /// Commit after every row read and once more after the final flush
    pub auto_commit: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            skip_fkey_validation: false,
            auto_commit: true,
        }
    }
}

/// A batch the sink rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// 0-based position among the batches of this pass
    pub index: usize,
    pub rows: usize,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub kind: Kind,
    pub table: String,
    pub rows_read: u64,
    pub rows_forwarded: u64,
    pub batches_written: usize,
    pub failures: Vec<BatchFailure>,
    pub elapsed: Duration,
}

impl IngestSummary {
    fn new(kind: Kind, table: &str) -> Self {
        Self {
            kind,
            table: table.to_string(),
            rows_read: 0,
            rows_forwarded: 0,
            batches_written: 0,
            failures: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn failed_batches(&self) -> usize {
        self.failures.len()
    }

    fn batches_attempted(&self) -> usize {
        self.batches_written + self.failures.len()
    }
}

pub struct IngestionHandler<'a, S: ?Sized> {
    sink: &'a mut S,
    valid_keys: &'a ValidKeys,
    options: IngestOptions,
}

impl<'a, S: RecordSink + ?Sized> IngestionHandler<'a, S> {
    pub fn new(sink: &'a mut S, valid_keys: &'a ValidKeys, options: IngestOptions) -> Self {
        Self {
            sink,
            valid_keys,
            options,
        }
    }

    fn forward<R: RecordKind>(&self, record: &R) -> bool {
        self.options.skip_fkey_validation
            || record
                .occurrence_key()
                .is_some_and(|key| self.valid_keys.contains(&key))
    }

    /// Load every row of `path` into `table`
    pub async fn handle<R: RecordKind>(&mut self, path: &Path, table: &str) -> Result<IngestSummary> {
        let start = Instant::now();
        let batch_size = self.options.batch_size.max(1);
        let mut summary = IngestSummary::new(R::KIND, table);
        let mut batch: Vec<Vec<FieldValue>> = Vec::with_capacity(batch_size);

        debug!(path = %path.display(), "Reading file");
        if self.options.skip_fkey_validation {
            warn!(table, "Skipping foreign key validation");
        }

        let mut reader = TsvReader::open(path)?;
        for row in reader.rows() {
            let record: R = row?.decode_at(path)?;
            summary.rows_read += 1;

            if self.forward(&record) {
                batch.push(record.values());
                summary.rows_forwarded += 1;
            }

            if batch.len() >= batch_size {
                self.flush::<R>(table, &mut batch, &mut summary).await?;
            }

            if self.options.auto_commit {
                self.sink.commit().await?;
            }
        }

        if !batch.is_empty() {
            self.flush::<R>(table, &mut batch, &mut summary).await?;
        }
        if self.options.auto_commit {
            self.sink.commit().await?;
        }

        summary.elapsed = start.elapsed();
        info!(
            table,
            rows_read = summary.rows_read,
            rows_forwarded = summary.rows_forwarded,
            batches = summary.batches_written,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "Successfully inserted records"
        );
        if !summary.failures.is_empty() {
            warn!(table, failed_batches = summary.failed_batches(), "Some batches were rolled back");
        }

        Ok(summary)
    }

    async fn flush<R: RecordKind>(
        &mut self,
        table: &str,
        batch: &mut Vec<Vec<FieldValue>>,
        summary: &mut IngestSummary,
    ) -> Result<()> {
        let index = summary.batches_attempted();
        let rows = std::mem::take(batch);

        match self.sink.bulk_insert(table, R::columns(), &rows).await {
            Ok(()) => {
                debug!(table, batch = index, rows = rows.len(), "Inserted batch");
                summary.batches_written += 1;
            },
            Err(err) => {
                error!(table, batch = index, error = %err, "Error inserting");
                warn!(table, batch = index, rows = rows.len(), "Rolling back due to error");
                self.sink.rollback().await?;
                summary.failures.push(BatchFailure {
                    index,
                    rows: rows.len(),
                    error: err.to_string(),
                });
            },
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::records::Media;
    use crate::sink::MemorySink;
    use std::io::Write;

    fn media_file(keys: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", Media::COLUMNS.join("\t")).unwrap();
        for key in keys {
            let mut row = vec![String::new(); 13];
            row[0] = key.to_string();
            writeln!(file, "{}", row.join("\t")).unwrap();
        }
        file
    }

    #[tokio::test]
    async fn test_blank_keys_are_never_forwarded() {
        let file = media_file(&["OCC1", ""]);
        let keys: ValidKeys = ["OCC1"].into_iter().collect();
        let mut sink = MemorySink::new();

        let summary = IngestionHandler::new(&mut sink, &keys, IngestOptions::default())
            .handle::<Media>(file.path(), "corpus_media")
            .await
            .unwrap();

        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_forwarded, 1);
    }

    #[tokio::test]
    async fn test_successful_pass_commits_without_rollback() {
        let file = media_file(&["OCC1"]);
        let keys = ValidKeys::new();
        let mut sink = MemorySink::new();
        let options = IngestOptions {
            skip_fkey_validation: true,
            ..IngestOptions::default()
        };

        let summary = IngestionHandler::new(&mut sink, &keys, options)
            .handle::<Media>(file.path(), "corpus_media")
            .await
            .unwrap();

        assert_eq!(summary.batches_written, 1);
        assert_eq!(sink.rollbacks(), 0);
        assert_eq!(sink.committed_rows("corpus_media").len(), 1);
    }
}
