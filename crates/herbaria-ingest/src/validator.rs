//! Field-level validation of the corpus
//!
//! Validation reads every file once, before anything is loaded, and builds
//! two things: a report of findings per table and entity, and the set of
//! occurrence keys that dependent rows may reference. It never writes to the
//! sink and never stops early; malformed rows become findings too.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use bigdecimal::BigDecimal;
use herbaria_common::HerbariaError;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{CorpusFiles, TableNames};
use crate::error::Result;
use crate::reader::TsvReader;
use crate::records::{Annotation, FieldMap, Kind, Media, Occurrence, RecordKind, TypeSpecimen};

/// Default maximum character count for a text column
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Entity key used when a record has no `occurrence_id`
pub const MISSING_KEY: &str = "null";

/// Validation order: occurrences first so the valid-key set is complete
/// before any dependent kind is checked.
pub const VALIDATION_ORDER: [Kind; 4] = [Kind::Occurrence, Kind::Media, Kind::Type, Kind::Annotation];

// ============================================================================
// Per-kind rules
// ============================================================================

pub const OCCURRENCE_TEXT_FIELDS: &[&str] = &[
    "guid",
    "basis_of_record",
    "herbarium",
    "collection",
    "dataset",
    "accession",
    "catalog",
    "barcode",
    "other_numbers",
    "family",
    "taxon_name",
    "scientific_name",
    "notho_genus",
    "genus",
    "notho_species",
    "specific_epithet",
    "specific_authors",
    "infraspecific_rank",
    "notho_infraspecies",
    "infraspecific_epithet",
    "infraspecific_authors",
    "hybrid_symbol",
    "notho_genus_2",
    "genus_2",
    "notho_species_2",
    "specific_epithet_2",
    "specific_authors_2",
    "infraspecific_rank_2",
    "notho_infraspecies_2",
    "infraspecific_epithet_2",
    "infraspecific_authors_2",
    "cultivar",
    "name_qualifier",
    "qualifier_position",
    "type_designation",
    "site_number",
    "collector",
    "collector_number",
    "other_collectors",
    "day_collected",
    "month_collected",
    "year_collected",
    "verbatim_collection_date",
    "day_of_year",
    "country",
    "state_province",
    "county",
    "verbatim_elevation",
    "verbatim_depth",
    "verbatim_coordinates",
    "geodetic_datum",
    "georeferenced_by",
    "georeference_sources",
    "phenology",
    "origin",
];

pub const OCCURRENCE_NUMERIC_FIELDS: &[&str] = &[
    "minimum_elevation_in_meters",
    "maximum_elevation_in_meters",
    "minimum_depth_in_meters",
    "maximum_depth_in_meters",
    "decimal_latitude",
    "decimal_longitude",
    "coordinate_uncertainty_in_meters",
];

pub const MEDIA_TEXT_FIELDS: &[&str] = &[
    "media_guid",
    "thumbnail_url",
    "file_url",
    "viewer_url",
    "date_created",
    "created_by",
    "publisher",
    "file_name",
    "file_format",
    "viewer_format",
];

pub const TYPE_TEXT_FIELDS: &[&str] = &[
    "family",
    "scientific_name",
    "notho_genus",
    "genus",
    "notho_species",
    "specific_epithet",
    "specific_authors",
    "infraspecific_rank",
    "notho_infraspecies",
    "infraspecific_epithet",
    "infraspecific_authors",
    "cultivar",
    "type_designation",
    "holotype_location",
];

pub const TYPE_INTEGER_FIELDS: &[&str] = &["year_published"];

pub const ANNOTATION_TEXT_FIELDS: &[&str] = &[
    "family",
    "scientific_name",
    "notho_genus",
    "genus",
    "notho_species",
    "specific_epithet",
    "specific_authors",
    "infraspecific_rank",
    "notho_infraspecies",
    "infraspecific_epithet",
    "infraspecific_authors",
    "hybrid_symbol",
    "notho_genus_2",
    "genus_2",
    "notho_species_2",
    "specific_epithet_2",
    "specific_authors_2",
    "infraspecific_rank_2",
    "notho_infraspecies_2",
    "infraspecific_epithet_2",
    "infraspecific_authors_2",
    "cultivar",
    "name_qualifier",
    "qualifier_position",
    "nomenclatural_code",
    "annotated_by",
    "annotation_references",
];

pub const ANNOTATION_INTEGER_FIELDS: &[&str] =
    &["sequence_number", "day_annotated", "month_annotated", "year_annotated"];

// ============================================================================
// State
// ============================================================================

/// One recorded problem: what is wrong and the offending value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub message: String,
    pub value: Option<String>,
}

/// Occurrence keys that passed validation and may be referenced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidKeys(HashSet<String>);

impl ValidKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ValidKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Findings per table and entity key; each entity keeps discovery order
pub type Report = BTreeMap<Kind, BTreeMap<String, Vec<Finding>>>;

/// Outcome of validating one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidation {
    pub kind: Kind,
    pub rows: u64,
    pub malformed: u64,
    pub entities_with_findings: usize,
    pub elapsed: Duration,
}

/// Validation accumulators, passed by `&mut` through every check
#[derive(Debug)]
pub struct Validator {
    errors: Report,
    seen: HashMap<(Kind, &'static str), HashSet<String>>,
    valid_keys: ValidKeys,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            errors: Kind::ALL.into_iter().map(|kind| (kind, BTreeMap::new())).collect(),
            seen: HashMap::new(),
            valid_keys: ValidKeys::new(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.errors
    }

    pub fn findings(&self, kind: Kind, key: &str) -> &[Finding] {
        self.errors
            .get(&kind)
            .and_then(|entities| entities.get(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn valid_keys(&self) -> &ValidKeys {
        &self.valid_keys
    }

    pub fn into_valid_keys(self) -> ValidKeys {
        self.valid_keys
    }

    /// Values already seen for a uniqueness identity
    pub fn seen(&self, kind: Kind, field: &'static str) -> Option<&HashSet<String>> {
        self.seen.get(&(kind, field))
    }

    fn record(&mut self, kind: Kind, key: &str, finding: Finding) {
        self.errors
            .entry(kind)
            .or_default()
            .entry(key.to_string())
            .or_default()
            .push(finding);
    }

    /// Begin checking one record
    pub fn check<R: RecordKind>(&mut self, record: &R) -> RecordCheck<'_> {
        let key = record
            .occurrence_key()
            .map(|k| k.into_owned())
            .unwrap_or_else(|| MISSING_KEY.to_string());

        RecordCheck {
            validator: self,
            kind: R::KIND,
            key,
            fields: record.field_map(),
        }
    }

    pub fn validate_occurrence(&mut self, occurrence: &Occurrence) {
        let mut check = self.check(occurrence);

        if check.unique("guid") {
            if let Some(id) = &occurrence.occurrence_id {
                check.validator.valid_keys.insert(id.as_str());
            }
        }
        for field in OCCURRENCE_TEXT_FIELDS {
            check.length(field, DEFAULT_MAX_LENGTH);
        }
        for field in OCCURRENCE_NUMERIC_FIELDS {
            check.numeric(field);
        }
    }

    pub fn validate_media(&mut self, media: &Media) {
        let mut check = self.check(media);

        check.foreign_key();
        check.length("license", 512);
        for field in MEDIA_TEXT_FIELDS {
            check.length(field, DEFAULT_MAX_LENGTH);
        }
    }

    pub fn validate_type(&mut self, specimen: &TypeSpecimen) {
        let mut check = self.check(specimen);

        check.foreign_key();
        check.length("publication", 512);
        for field in TYPE_TEXT_FIELDS {
            check.length(field, DEFAULT_MAX_LENGTH);
        }
        for field in TYPE_INTEGER_FIELDS {
            check.integer(field);
        }
    }

    pub fn validate_annotation(&mut self, annotation: &Annotation) {
        let mut check = self.check(annotation);

        check.foreign_key();
        for field in ANNOTATION_TEXT_FIELDS {
            check.length(field, DEFAULT_MAX_LENGTH);
        }
        for field in ANNOTATION_INTEGER_FIELDS {
            check.integer(field);
        }
    }

    /// Validate every row of one file. Rows that fail to decode are recorded
    /// under their leading raw value and skipped.
    pub fn validate_file<R: Validate>(&mut self, path: &Path) -> Result<FileValidation> {
        let start = Instant::now();
        let kind = R::KIND;
        let mut reader = TsvReader::open(path)?;
        let mut rows = 0u64;
        let mut malformed = 0u64;

        for row in reader.rows() {
            let row = row?;
            rows += 1;

            match row.decode::<R>() {
                Ok(record) => record.validate(self),
                Err(err) => {
                    malformed += 1;
                    let leading = Some(row.leading_value()).filter(|v| !v.is_empty());
                    warn!(%kind, line = row.line, error = %err, "Malformed row");
                    self.record(
                        kind,
                        leading.unwrap_or(MISSING_KEY),
                        Finding {
                            message: format!("Malformed row at line {}: {err}", row.line),
                            value: leading.map(str::to_string),
                        },
                    );
                }
            }
        }

        let outcome = FileValidation {
            kind,
            rows,
            malformed,
            entities_with_findings: self.errors.get(&kind).map(BTreeMap::len).unwrap_or_default(),
            elapsed: start.elapsed(),
        };

        info!(
            table = %kind.table_name(),
            rows = outcome.rows,
            elapsed_secs = outcome.elapsed.as_secs_f64(),
            "Completed validation"
        );
        if outcome.entities_with_findings > 0 {
            warn!(
                table = %kind.table_name(),
                entities = outcome.entities_with_findings,
                "Found entities with validation errors"
            );
        }

        Ok(outcome)
    }

    /// Validate all four files in dependency order
    pub fn validate_corpus(&mut self, files: &CorpusFiles) -> Result<Vec<FileValidation>> {
        let mut outcomes = Vec::with_capacity(VALIDATION_ORDER.len());
        for kind in VALIDATION_ORDER {
            let path = files.path(kind);
            let outcome = match kind {
                Kind::Occurrence => self.validate_file::<Occurrence>(&path)?,
                Kind::Media => self.validate_file::<Media>(&path)?,
                Kind::Type => self.validate_file::<TypeSpecimen>(&path)?,
                Kind::Annotation => self.validate_file::<Annotation>(&path)?,
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Write the findings as pretty JSON, one object per destination table
    pub fn write_report(&self, path: &Path, tables: &TableNames) -> Result<()> {
        let by_table: BTreeMap<&str, &BTreeMap<String, Vec<Finding>>> = self
            .errors
            .iter()
            .map(|(kind, entities)| (tables.get(*kind), entities))
            .collect();

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &by_table).map_err(HerbariaError::from)?;
        writer.flush()?;
        info!(path = %path.display(), "Wrote validation report");
        Ok(())
    }
}

/// Checks against a single record; every failing check adds one finding
/// under the record's occurrence key.
pub struct RecordCheck<'v> {
    validator: &'v mut Validator,
    kind: Kind,
    key: String,
    fields: FieldMap,
}

impl RecordCheck<'_> {
    fn text(&self, field: &str) -> Option<String> {
        self.fields.text(field).map(|t| t.into_owned())
    }

    fn report(&mut self, message: String, value: Option<String>) {
        self.validator
            .record(self.kind, &self.key, Finding { message, value });
    }

    /// Character count of a non-null value must not exceed `max`.
    pub fn length(&mut self, field: &str, max: usize) -> bool {
        match self.text(field) {
            Some(value) if value.chars().count() > max => {
                self.report(
                    format!("Value exceeds maximum length ({max} chars) for key {field}"),
                    Some(value),
                );
                false
            }
            _ => true,
        }
    }

    /// A non-null value must parse as a decimal.
    pub fn numeric(&mut self, field: &str) -> bool {
        match self.text(field) {
            Some(value) if BigDecimal::from_str(value.trim()).is_err() => {
                self.report(format!("Expected decimal value for key {field}"), Some(value));
                false
            }
            _ => true,
        }
    }

    /// A non-null value must parse as an integer of any size.
    pub fn integer(&mut self, field: &str) -> bool {
        match self.text(field) {
            Some(value) if !is_integer(&value) => {
                self.report(format!("Expected integer value for key {field}"), Some(value));
                false
            }
            _ => true,
        }
    }

    /// A non-null value must not have been seen before for this table and
    /// field. Non-null values are always recorded as seen.
    pub fn unique(&mut self, field: &'static str) -> bool {
        let Some(value) = self.text(field) else {
            return true;
        };

        let seen = self.validator.seen.entry((self.kind, field)).or_default();
        if seen.insert(value.clone()) {
            true
        } else {
            self.report(format!("Duplicate {field} found"), Some(value));
            false
        }
    }

    /// The record's occurrence key must already be a valid key.
    pub fn foreign_key(&mut self) -> bool {
        let key = self.text("occurrence_id");
        if key.as_deref().is_some_and(|k| self.validator.valid_keys.contains(k)) {
            return true;
        }
        self.report("Invalid foreign key".to_string(), key);
        false
    }
}

fn is_integer(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Kind-specific validation entry point, for static dispatch from
/// [`Validator::validate_file`]
pub trait Validate: RecordKind {
    fn validate(&self, validator: &mut Validator);
}

impl Validate for Occurrence {
    fn validate(&self, validator: &mut Validator) {
        validator.validate_occurrence(self);
    }
}

impl Validate for Media {
    fn validate(&self, validator: &mut Validator) {
        validator.validate_media(self);
    }
}

impl Validate for TypeSpecimen {
    fn validate(&self, validator: &mut Validator) {
        validator.validate_type(self);
    }
}

impl Validate for Annotation {
    fn validate(&self, validator: &mut Validator) {
        validator.validate_annotation(self);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::records::fixtures::{as_strs, numbered_row};

    fn occurrence(id: &str, guid: &str) -> Occurrence {
        let mut row = numbered_row(75);
        row[0] = id.into();
        row[1] = guid.into();
        for field in OCCURRENCE_NUMERIC_FIELDS {
            let i = Occurrence::COLUMNS.iter().position(|c| c == field).unwrap();
            row[i] = "12.5".into();
        }
        Occurrence::decode(&as_strs(&row)).unwrap()
    }

    fn media(id: &str) -> Media {
        let mut row = numbered_row(13);
        row[0] = id.into();
        Media::decode(&as_strs(&row)).unwrap()
    }

    #[test]
    fn test_uniqueness_over_repeated_values() {
        let mut validator = Validator::new();
        let results: Vec<bool> = ["A", "B", "A"]
            .into_iter()
            .enumerate()
            .map(|(i, guid)| {
                let occurrence = occurrence(&format!("OCC{i}"), guid);
                validator.check(&occurrence).unique("guid")
            })
            .collect();

        assert_eq!(results, vec![true, true, false]);
        let seen = validator.seen(Kind::Occurrence, "guid").unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("A") && seen.contains("B"));
        assert_eq!(
            validator.findings(Kind::Occurrence, "OCC2"),
            &[Finding {
                message: "Duplicate guid found".into(),
                value: Some("A".into())
            }]
        );
    }

    #[test]
    fn test_null_values_are_never_duplicates() {
        let mut validator = Validator::new();
        for id in ["OCC1", "OCC2"] {
            assert!(validator.check(&occurrence(id, "")).unique("guid"));
        }
        assert!(validator.seen(Kind::Occurrence, "guid").is_none());
    }

    #[test]
    fn test_occurrence_key_valid_only_when_guid_unique() {
        let mut validator = Validator::new();
        validator.validate_occurrence(&occurrence("OCC1", "G1"));
        validator.validate_occurrence(&occurrence("OCC2", "G1"));
        validator.validate_occurrence(&occurrence("OCC3", ""));

        let keys = validator.valid_keys();
        assert!(keys.contains("OCC1"));
        assert!(!keys.contains("OCC2"));
        assert!(keys.contains("OCC3"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_length_counts_characters() {
        let mut validator = Validator::new();
        let mut record = media("OCC1");
        record.license = Some("é".repeat(512));
        record.file_name = Some("x".repeat(256));

        let mut check = validator.check(&record);
        assert!(check.length("license", 512));
        assert!(!check.length("file_name", 255));
        assert!(check.length("file_url", 255));

        let findings = validator.findings(Kind::Media, "OCC1");
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Value exceeds maximum length (255 chars) for key file_name"
        );
    }

    #[test]
    fn test_numeric_and_integer() {
        let mut validator = Validator::new();
        let mut record = occurrence("OCC1", "G1");
        record.decimal_latitude = Some(" -45.25 ".into());
        record.decimal_longitude = Some("east".into());
        record.minimum_depth_in_meters = None;

        let mut check = validator.check(&record);
        assert!(check.numeric("decimal_latitude"));
        assert!(!check.numeric("decimal_longitude"));
        assert!(check.numeric("minimum_depth_in_meters"));

        assert!(is_integer("1998"));
        assert!(is_integer(" -3 "));
        assert!(is_integer("+12"));
        assert!(is_integer("123456789012345678901234567890"));
        assert!(!is_integer("12.0"));
        assert!(!is_integer("-"));
        assert!(!is_integer(""));
        assert!(!is_integer("1998?"));
    }

    #[test]
    fn test_integer_check_on_annotation_dates() {
        let mut validator = Validator::new();
        let mut row = numbered_row(34);
        row[0] = "OCC1".into();
        row[2] = "1".into();
        row[29] = "14".into();
        row[30] = "6".into();
        row[31] = "circa 1900".into();
        let annotation = Annotation::decode(&as_strs(&row)).unwrap();

        validator.validate_annotation(&annotation);
        let messages: Vec<&str> = validator
            .findings(Kind::Annotation, "OCC1")
            .iter()
            .map(|f| f.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["Invalid foreign key", "Expected integer value for key year_annotated"]
        );
    }

    #[test]
    fn test_foreign_key() {
        let mut validator = Validator::new();
        validator.validate_occurrence(&occurrence("OCC1", "G1"));
        validator.validate_media(&media("OCC1"));
        validator.validate_media(&media("OCC3"));
        validator.validate_media(&media(""));

        assert!(validator.findings(Kind::Media, "OCC1").is_empty());
        assert_eq!(
            validator.findings(Kind::Media, "OCC3"),
            &[Finding {
                message: "Invalid foreign key".into(),
                value: Some("OCC3".into())
            }]
        );
        assert_eq!(validator.findings(Kind::Media, MISSING_KEY)[0].value, None);
    }

    #[test]
    fn test_type_keys_compared_as_decimal_text() {
        let mut validator = Validator::new();
        validator.validate_occurrence(&occurrence("42", "G1"));
        let mut row = numbered_row(19);
        row[0] = "42".into();
        row[16] = "1901".into();
        let specimen = TypeSpecimen::decode(&as_strs(&row)).unwrap();

        validator.validate_type(&specimen);
        assert!(validator.findings(Kind::Type, "42").is_empty());
    }

    #[test]
    fn test_rule_fields_exist() {
        let rules: [(&[&str], &[&str]); 7] = [
            (OCCURRENCE_TEXT_FIELDS, Occurrence::COLUMNS),
            (OCCURRENCE_NUMERIC_FIELDS, Occurrence::COLUMNS),
            (MEDIA_TEXT_FIELDS, Media::COLUMNS),
            (TYPE_TEXT_FIELDS, TypeSpecimen::COLUMNS),
            (TYPE_INTEGER_FIELDS, TypeSpecimen::COLUMNS),
            (ANNOTATION_TEXT_FIELDS, Annotation::COLUMNS),
            (ANNOTATION_INTEGER_FIELDS, Annotation::COLUMNS),
        ];
        for (fields, columns) in rules {
            for field in fields {
                assert!(columns.contains(field), "{field} is not a column");
            }
        }
    }

    #[test]
    fn test_validate_file_records_malformed_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut good = numbered_row(13);
        good[0] = "OCC1".into();
        writeln!(file, "{}", numbered_row(13).join("\t")).unwrap();
        writeln!(file, "{}", good.join("\t")).unwrap();
        writeln!(file, "BROKEN\tshort").unwrap();

        let mut validator = Validator::new();
        let outcome = validator.validate_file::<Media>(file.path()).unwrap();

        assert_eq!(outcome.rows, 2);
        assert_eq!(outcome.malformed, 1);
        assert_eq!(outcome.entities_with_findings, 2);
        let broken = validator.findings(Kind::Media, "BROKEN");
        assert!(broken[0].message.starts_with("Malformed row at line 3"));
    }

    #[test]
    fn test_blank_line_is_malformed_and_later_lines_keep_numbering() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut good = numbered_row(13);
        good[0] = "OCC1".into();
        writeln!(file, "{}", numbered_row(13).join("\t")).unwrap();
        writeln!(file, "{}", good.join("\t")).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "BROKEN\tshort").unwrap();

        let mut validator = Validator::new();
        let outcome = validator.validate_file::<Media>(file.path()).unwrap();

        assert_eq!(outcome.rows, 3);
        assert_eq!(outcome.malformed, 2);
        let blank = validator.findings(Kind::Media, MISSING_KEY);
        assert!(blank[0].message.starts_with("Malformed row at line 3"));
        assert_eq!(blank[0].value, None);
        let broken = validator.findings(Kind::Media, "BROKEN");
        assert!(broken[0].message.starts_with("Malformed row at line 4"));
    }

    #[test]
    fn test_write_report_has_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut validator = Validator::new();
        validator.validate_media(&media("OCC9"));
        validator.write_report(&path, &TableNames::default()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        for table in ["corpus_occurrences", "corpus_annotations", "corpus_types", "corpus_media"] {
            assert!(json.get(table).is_some(), "{table} missing");
        }
        assert_eq!(
            json["corpus_media"]["OCC9"][0],
            serde_json::json!({"message": "Invalid foreign key", "value": "OCC9"})
        );
        assert_eq!(json["corpus_types"], serde_json::json!({}));
    }

    #[test]
    fn test_write_report_uses_destination_table_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let tables = TableNames {
            media: "staging_media".to_string(),
            ..TableNames::default()
        };
        let mut validator = Validator::new();
        validator.validate_media(&media("OCC9"));
        validator.write_report(&path, &tables).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json.get("corpus_media").is_none());
        assert_eq!(json["staging_media"]["OCC9"][0]["message"], "Invalid foreign key");
        assert!(json.get("corpus_occurrences").is_some());
    }
}
