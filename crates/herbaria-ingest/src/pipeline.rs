//! End-to-end run: validate the corpus, then load the selected kinds.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{BatchConfig, CorpusFiles, IngestConfig, TableNames};
use crate::error::Result;
use crate::handler::{IngestOptions, IngestSummary, IngestionHandler};
use crate::records::{Annotation, Kind, Media, Occurrence, TypeSpecimen};
use crate::sink::RecordSink;
use crate::validator::{FileValidation, ValidKeys, Validator};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub corpus: CorpusFiles,
    pub report_path: PathBuf,
    pub batch: BatchConfig,
    pub tables: TableNames,
    /// Kinds to load; empty means all of them
    pub kinds: Vec<Kind>,
    /// Insert but never commit; roll back at the end
    pub dry_run: bool,
    /// Skip validation and foreign-key filtering
    pub skip_validation: bool,
}

impl PipelineOptions {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            corpus: config.corpus.clone(),
            report_path: config.report_path.clone(),
            batch: config.batch.clone(),
            tables: config.tables.clone(),
            kinds: Vec::new(),
            dry_run: false,
            skip_validation: false,
        }
    }

    /// Selected kinds in load order
    pub fn selected_kinds(&self) -> Vec<Kind> {
        Kind::ALL
            .into_iter()
            .filter(|kind| self.kinds.is_empty() || self.kinds.contains(kind))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub validation: Vec<FileValidation>,
    pub valid_keys: usize,
    pub loads: Vec<IngestSummary>,
}

impl PipelineReport {
    pub fn rows_forwarded(&self) -> u64 {
        self.loads.iter().map(|s| s.rows_forwarded).sum()
    }

    pub fn failed_batches(&self) -> usize {
        self.loads.iter().map(IngestSummary::failed_batches).sum()
    }
}

pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    fn validate(&self, report: &mut PipelineReport) -> Result<ValidKeys> {
        if self.options.skip_validation {
            warn!("Skipping validation");
            return Ok(ValidKeys::new());
        }

        let mut validator = Validator::new();
        report.validation = validator.validate_corpus(&self.options.corpus)?;
        validator.write_report(&self.options.report_path, &self.options.tables)?;
        report.valid_keys = validator.valid_keys().len();
        info!(valid_keys = report.valid_keys, "Validated occurrence ids");

        Ok(validator.into_valid_keys())
    }

    pub async fn run<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let valid_keys = self.validate(&mut report)?;

        if self.options.dry_run {
            warn!("Dry run set to true");
        }

        for kind in self.options.selected_kinds() {
            let path = self.options.corpus.path(kind);
            let table = self.options.tables.get(kind);
            info!(table, "Inserting {kind}");

            let options = IngestOptions {
                batch_size: self.options.batch.for_kind(kind),
                skip_fkey_validation: self.options.skip_validation,
                auto_commit: !self.options.dry_run,
            };
            let mut handler = IngestionHandler::new(&mut *sink, &valid_keys, options);
            let summary = match kind {
                Kind::Occurrence => handler.handle::<Occurrence>(&path, table).await?,
                Kind::Annotation => handler.handle::<Annotation>(&path, table).await?,
                Kind::Type => handler.handle::<TypeSpecimen>(&path, table).await?,
                Kind::Media => handler.handle::<Media>(&path, table).await?,
            };
            report.loads.push(summary);
        }

        if self.options.dry_run {
            sink.rollback().await?;
            info!("Dry run complete, changes rolled back");
        }

        let elapsed: Duration = report.loads.iter().map(|s| s.elapsed).sum();
        info!(
            rows_forwarded = report.rows_forwarded(),
            failed_batches = report.failed_batches(),
            elapsed_secs = elapsed.as_secs_f64(),
            "Ingestion finished"
        );

        Ok(report)
    }
}
