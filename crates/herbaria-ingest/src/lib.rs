//! Herbaria Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Validation and loading of the herbarium corpus exports into PostgreSQL.
//!
//! # Record Kinds
//!
//! - **Occurrences**: one row per specimen, the root every other kind references
//! - **Annotations**: re-determinations of an occurrence
//! - **Types**: nomenclatural type specimens
//! - **Media**: images attached to an occurrence
//!
//! # Example
//!
//! ```no_run
//! use herbaria_ingest::config::IngestConfig;
//! use herbaria_ingest::pipeline::{Pipeline, PipelineOptions};
//! use herbaria_ingest::sink::PgSink;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::load()?;
//!     let mut sink = PgSink::connect(&config.database).await?;
//!     Pipeline::new(PipelineOptions::from_config(&config)).run(&mut sink).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod pipeline;
pub mod reader;
pub mod records;
pub mod sink;
pub mod transform;
pub mod validator;

pub use error::{IngestError, Result, SinkError};
pub use records::{Annotation, DecodeError, Kind, Media, Occurrence, RecordKind, TypeSpecimen};
