//! PostgreSQL sink
//!
//! A batch is serialized to one JSON array and expanded server side with
//! `jsonb_populate_recordset`, so each value is coerced to its column's type
//! and a statement carries a single bind parameter however large the batch.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::debug;

use super::RecordSink;
use crate::config::DatabaseConfig;
use crate::error::SinkError;
use crate::records::FieldValue;

pub struct PgSink {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSink {
    /// Open a single-connection pool; every pass shares that connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, SinkError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool, tx: None }
    }

    async fn transaction(&mut self) -> Result<&mut Transaction<'static, Postgres>, SinkError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => {
                debug!("Opening transaction");
                self.pool.begin().await?
            },
        };
        Ok(self.tx.insert(tx))
    }
}

/// Build `INSERT INTO t (a, b) SELECT a, b FROM jsonb_populate_recordset(NULL::t, $1)`.
/// `table` and `columns` are interpolated and must be trusted identifiers.
pub(crate) fn insert_statement<'q>(
    table: &str,
    columns: &[&'static str],
    payload: Value,
) -> QueryBuilder<'q, Postgres> {
    let column_list = columns.join(", ");

    let mut query_builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("INSERT INTO {table} ({column_list}) SELECT {column_list} "));
    query_builder.push(format!("FROM jsonb_populate_recordset(NULL::{table}, "));
    query_builder.push_bind(payload);
    query_builder.push(")");

    query_builder
}

/// Rows as a JSON array of `{column: value}` objects
pub(crate) fn rows_to_json(columns: &[&'static str], rows: &[Vec<FieldValue>]) -> Result<Value, SinkError> {
    let mut objects = Vec::with_capacity(rows.len());
    for row in rows {
        if row.len() != columns.len() {
            return Err(SinkError::Rejected(format!(
                "row has {} values for {} columns",
                row.len(),
                columns.len()
            )));
        }

        let mut object = Map::with_capacity(columns.len());
        for (column, value) in columns.iter().zip(row) {
            object.insert((*column).to_string(), serde_json::to_value(value)?);
        }
        objects.push(Value::Object(object));
    }
    Ok(Value::Array(objects))
}

#[async_trait]
impl RecordSink for PgSink {
    async fn bulk_insert(
        &mut self,
        table: &str,
        columns: &[&'static str],
        rows: &[Vec<FieldValue>],
    ) -> Result<(), SinkError> {
        if rows.is_empty() {
            return Ok(());
        }

        let payload = rows_to_json(columns, rows)?;
        let mut query_builder = insert_statement(table, columns, payload);

        let tx = self.transaction().await?;
        let result = query_builder.build().execute(&mut **tx).await?;

        debug!(table, rows = result.rows_affected(), "Bulk insert");
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), SinkError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SinkError> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use sqlx::Execute;

    #[test]
    fn test_insert_statement_shape() {
        let mut builder = insert_statement("corpus_media", &["occurrence_id", "license"], Value::Array(vec![]));
        let query = builder.build();
        assert_eq!(
            query.sql(),
            "INSERT INTO corpus_media (occurrence_id, license) SELECT occurrence_id, license \
             FROM jsonb_populate_recordset(NULL::corpus_media, $1)"
        );
    }

    #[test]
    fn test_rows_to_json() {
        let rows = vec![
            vec![FieldValue::Text("OCC1".into()), FieldValue::Bool(true)],
            vec![FieldValue::Int(42), FieldValue::Null],
        ];
        let json = rows_to_json(&["occurrence_id", "imaged"], &rows).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"occurrence_id": "OCC1", "imaged": true},
                {"occurrence_id": 42, "imaged": null}
            ])
        );
    }

    #[test]
    fn test_rows_to_json_rejects_ragged_rows() {
        let rows = vec![vec![FieldValue::Null]];
        let err = rows_to_json(&["a", "b"], &rows).unwrap_err();
        assert!(matches!(err, SinkError::Rejected(_)));
    }
}
