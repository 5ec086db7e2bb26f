//! Configuration management

use std::path::{Path, PathBuf};
use std::str::FromStr;

use herbaria_common::{HerbariaError, Result};
use serde::{Deserialize, Serialize};

use crate::records::Kind;

// ============================================================================
// Ingest Configuration Constants
// ============================================================================

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://postgres@localhost/postgres";

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default directory holding the four corpus exports.
pub const DEFAULT_CORPUS_DIR: &str = "corpus";

/// Default number of rows per bulk insert.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Default number of rows per bulk insert for type specimens.
pub const DEFAULT_TYPES_BATCH_SIZE: usize = 1;

/// Default validation report location.
pub const DEFAULT_REPORT_PATH: &str = "validation_errors.json";

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub database: DatabaseConfig,
    pub corpus: CorpusFiles,
    pub batch: BatchConfig,
    pub tables: TableNames,
    pub report_path: PathBuf,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub connect_timeout_secs: u64,
}

/// Location of the corpus files: `<dir>/occurrences.txt`, `<dir>/annotations.txt`, ...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusFiles {
    pub dir: PathBuf,
}

impl CorpusFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, kind: Kind) -> PathBuf {
        self.dir.join(format!("{}.txt", kind.label()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch_size: usize,
    pub types_batch_size: usize,
}

impl BatchConfig {
    pub fn for_kind(&self, kind: Kind) -> usize {
        match kind {
            Kind::Type => self.types_batch_size,
            _ => self.batch_size,
        }
    }
}

/// Destination table per record kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableNames {
    pub occurrences: String,
    pub annotations: String,
    pub types: String,
    pub media: String,
}

impl TableNames {
    pub fn get(&self, kind: Kind) -> &str {
        match kind {
            Kind::Occurrence => &self.occurrences,
            Kind::Annotation => &self.annotations,
            Kind::Type => &self.types,
            Kind::Media => &self.media,
        }
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            occurrences: Kind::Occurrence.table_name().to_string(),
            annotations: Kind::Annotation.table_name().to_string(),
            types: Kind::Type.table_name().to_string(),
            media: Kind::Media.table_name().to_string(),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.parse().ok())
}

/// Values that take precedence over the environment (command-line flags)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub corpus_dir: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub database_url: Option<String>,
}

impl IngestConfig {
    /// Load configuration from environment (and `.env`) and defaults
    pub fn load() -> Result<Self> {
        Self::load_with(ConfigOverrides::default())
    }

    /// Load, apply `overrides`, then validate the merged result
    pub fn load_with(overrides: ConfigOverrides) -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::resolve(|key| std::env::var(key).ok(), overrides)
    }

    fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let config = Self::from_vars(lookup).apply(overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.corpus_dir {
            self.corpus = CorpusFiles::new(dir);
        }
        if let Some(path) = overrides.report_path {
            self.report_path = path;
        }
        if let Some(url) = overrides.database_url {
            self.database.url = url;
        }
        self
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = TableNames::default();

        IngestConfig {
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
                connect_timeout_secs: parsed(&lookup, "DATABASE_CONNECT_TIMEOUT")
                    .unwrap_or(DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS),
            },
            corpus: CorpusFiles::new(
                lookup("HERBARIA_CORPUS_DIR").unwrap_or_else(|| DEFAULT_CORPUS_DIR.to_string()),
            ),
            batch: BatchConfig {
                batch_size: parsed(&lookup, "HERBARIA_BATCH_SIZE").unwrap_or(DEFAULT_BATCH_SIZE),
                types_batch_size: parsed(&lookup, "HERBARIA_TYPES_BATCH_SIZE")
                    .unwrap_or(DEFAULT_TYPES_BATCH_SIZE),
            },
            tables: TableNames {
                occurrences: lookup("HERBARIA_OCCURRENCES_TABLE").unwrap_or(defaults.occurrences),
                annotations: lookup("HERBARIA_ANNOTATIONS_TABLE").unwrap_or(defaults.annotations),
                types: lookup("HERBARIA_TYPES_TABLE").unwrap_or(defaults.types),
                media: lookup("HERBARIA_MEDIA_TABLE").unwrap_or(defaults.media),
            },
            report_path: lookup("HERBARIA_REPORT_PATH")
                .unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string())
                .into(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(HerbariaError::config("Database URL cannot be empty"));
        }

        if self.batch.batch_size == 0 || self.batch.types_batch_size == 0 {
            return Err(HerbariaError::config("Batch sizes must be greater than 0"));
        }

        for kind in Kind::ALL {
            let table = self.tables.get(kind);
            if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(HerbariaError::config(format!(
                    "Invalid table name for {kind}: {table:?}"
                )));
            }
        }

        if !self.corpus.dir.is_dir() {
            tracing::warn!(dir = %self.corpus.dir.display(), "Corpus directory does not exist");
        }

        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
