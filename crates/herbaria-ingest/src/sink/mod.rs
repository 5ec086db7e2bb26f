//! Relational sinks
//!
//! A sink accepts whole batches for one table and exposes explicit
//! transaction control. The first insert after a commit or rollback opens a
//! new unit of work; [`RecordSink::rollback`] discards everything inserted
//! since the last commit.

use async_trait::async_trait;

use crate::error::SinkError;
use crate::records::FieldValue;

pub mod memory;
pub mod postgres;

pub use memory::MemorySink;
pub use postgres::PgSink;

#[async_trait]
pub trait RecordSink: Send {
    /// Insert `rows` into `table` in a single round trip. Every row holds one
    /// value per entry in `columns`, in the same order.
    async fn bulk_insert(
        &mut self,
        table: &str,
        columns: &[&'static str],
        rows: &[Vec<FieldValue>],
    ) -> Result<(), SinkError>;

    /// Make everything inserted since the last commit durable
    async fn commit(&mut self) -> Result<(), SinkError>;

    /// Discard everything inserted since the last commit
    async fn rollback(&mut self) -> Result<(), SinkError>;
}
