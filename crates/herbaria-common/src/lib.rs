//! Herbaria Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging setup for the herbaria workspace.
//!
//! - **Error Handling**: [`HerbariaError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber configuration for every binary
//!
//! # Example
//!
//! ```no_run
//! use herbaria_common::logging::{init_logging, LogConfig, LogLevel};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::builder().level(LogLevel::Debug).build();
//!     let _guard = init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{HerbariaError, Result};
