//! Test helpers for herbaria-ingest integration tests
//!
//! Builds small corpus directories on disk. Every row builder returns a row of
//! the exact width for its kind with blank columns except the ones a test
//! cares about.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use herbaria_ingest::{Annotation, Kind, Media, Occurrence, TypeSpecimen};
use tempfile::TempDir;

fn blank_row(width: usize) -> Vec<String> {
    vec![String::new(); width]
}

fn set(row: &mut [String], columns: &[&str], name: &str, value: &str) {
    let index = columns
        .iter()
        .position(|c| *c == name)
        .unwrap_or_else(|| panic!("unknown column {name}"));
    row[index] = value.to_string();
}

pub fn occurrence_row(id: &str, guid: &str) -> Vec<String> {
    let mut row = blank_row(Kind::Occurrence.width());
    set(&mut row, Occurrence::COLUMNS, "occurrence_id", id);
    set(&mut row, Occurrence::COLUMNS, "guid", guid);
    set(&mut row, Occurrence::COLUMNS, "imaged", "Y");
    set(&mut row, Occurrence::COLUMNS, "decimal_latitude", "46.73");
    row
}

pub fn annotation_row(id: &str) -> Vec<String> {
    let mut row = blank_row(Kind::Annotation.width());
    set(&mut row, Annotation::COLUMNS, "occurrence_id", id);
    set(&mut row, Annotation::COLUMNS, "current_annotation", "y");
    set(&mut row, Annotation::COLUMNS, "sequence_number", "1");
    set(&mut row, Annotation::COLUMNS, "family", "Cyperaceae");
    row
}

pub fn type_row(id: &str) -> Vec<String> {
    let mut row = blank_row(Kind::Type.width());
    set(&mut row, TypeSpecimen::COLUMNS, "occurrence_id", id);
    set(&mut row, TypeSpecimen::COLUMNS, "type_designation", "Holotype");
    row
}

pub fn media_row(id: &str) -> Vec<String> {
    let mut row = blank_row(Kind::Media.width());
    set(&mut row, Media::COLUMNS, "occurrence_id", id);
    set(&mut row, Media::COLUMNS, "license", "CC BY-NC 4.0");
    row
}

/// Write a TSV file with a header row followed by `rows`
pub fn write_tsv(path: &Path, columns: &[&str], rows: &[Vec<String>]) {
    let mut contents = columns.join("\t");
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.join("\t"));
        contents.push('\n');
    }
    fs::write(path, contents).expect("Failed to write fixture");
}

/// A corpus directory; every kind starts out as a header-only file
pub struct TestCorpus {
    dir: TempDir,
}

impl TestCorpus {
    pub fn new() -> Self {
        let corpus = Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        for kind in Kind::ALL {
            corpus.write(kind, &[]);
        }
        corpus
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, kind: Kind) -> PathBuf {
        self.dir.path().join(format!("{}.txt", kind.label()))
    }

    pub fn write(&self, kind: Kind, rows: &[Vec<String>]) {
        let columns = match kind {
            Kind::Occurrence => Occurrence::COLUMNS,
            Kind::Annotation => Annotation::COLUMNS,
            Kind::Type => TypeSpecimen::COLUMNS,
            Kind::Media => Media::COLUMNS,
        };
        write_tsv(&self.path(kind), columns, rows);
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.path().join("validation_errors.json")
    }
}
