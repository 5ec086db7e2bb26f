//! Annotation records: historical re-determinations of an occurrence.
//!
//! The annotation export is the messiest file in the corpus. Two zones of a
//! row can be shifted or polluted, and each is resolved by a small explicit
//! decision procedure before the usual transforms run:
//!
//! * the sequence slot ([`SequenceSlot`]): some rows omit `sequence_number`,
//!   so the slot already holds the family and everything after it sits one
//!   column to the left (the last raw column is then left unread);
//! * the determination date ([`DeterminationDate`]): the nomenclatural code
//!   `ICBN` leaks into the day or month columns, and annotator names leak into
//!   the month column.
//!
//! Transform order: `current_annotation` is a loose boolean; every other
//! field goes through blank→null after disambiguation, and
//! `sequence_number` additionally through sentinel→null (so only a literal
//! `"?"` is affected, never an empty string).

use std::borrow::Cow;

use super::{Columns, DecodeError, FieldValue, Kind, RecordKind};
use crate::transform::{blank_to_null, sentinel_to_null, starts_alphabetic};

/// Token that leaks from the nomenclatural code column into the date columns
pub const ICBN: &str = "ICBN";

define_record! {
    /// A determination event for an occurrence (34 columns)
    pub struct Annotation {
        occurrence_id: Option<String>,
        current_annotation: bool,
        sequence_number: Option<String>,
        family: Option<String>,
        scientific_name: Option<String>,
        notho_genus: Option<String>,
        genus: Option<String>,
        notho_species: Option<String>,
        specific_epithet: Option<String>,
        specific_authors: Option<String>,
        infraspecific_rank: Option<String>,
        notho_infraspecies: Option<String>,
        infraspecific_epithet: Option<String>,
        infraspecific_authors: Option<String>,
        hybrid_symbol: Option<String>,
        notho_genus_2: Option<String>,
        genus_2: Option<String>,
        notho_species_2: Option<String>,
        specific_epithet_2: Option<String>,
        specific_authors_2: Option<String>,
        infraspecific_rank_2: Option<String>,
        notho_infraspecies_2: Option<String>,
        infraspecific_epithet_2: Option<String>,
        infraspecific_authors_2: Option<String>,
        cultivar: Option<String>,
        name_qualifier: Option<String>,
        qualifier_position: Option<String>,
        nomenclatural_code: Option<String>,
        annotated_by: Option<String>,
        day_annotated: Option<String>,
        month_annotated: Option<String>,
        year_annotated: Option<String>,
        annotation_references: Option<String>,
        annotation_remarks: Option<String>,
    }
}

/// The raw value following `current_annotation`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSlot<'a> {
    /// A sequence number (possibly blank or `"?"`); `family` is the next column
    Numbered(&'a str),
    /// No sequence number in this row; the slot already holds the family
    Skipped { family: &'a str },
}

impl<'a> SequenceSlot<'a> {
    pub fn classify(raw: &'a str) -> Self {
        if starts_alphabetic(raw) {
            SequenceSlot::Skipped { family: raw }
        } else {
            SequenceSlot::Numbered(raw)
        }
    }
}

/// Classification of the raw day column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DaySlot<'a> {
    Icbn,
    Value(&'a str),
}

impl<'a> DaySlot<'a> {
    fn classify(raw: &'a str) -> Self {
        if raw == ICBN {
            DaySlot::Icbn
        } else {
            DaySlot::Value(raw)
        }
    }
}

/// Classification of the raw month column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonthSlot<'a> {
    Icbn,
    Annotator(&'a str),
    Value(&'a str),
}

impl<'a> MonthSlot<'a> {
    fn classify(raw: &'a str) -> Self {
        if raw == ICBN {
            MonthSlot::Icbn
        } else if starts_alphabetic(raw) {
            MonthSlot::Annotator(raw)
        } else {
            MonthSlot::Value(raw)
        }
    }
}

/// Resolved `annotated_by` / day / month / year group, before blank→null
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterminationDate<'a> {
    pub annotated_by: &'a str,
    pub day: Option<&'a str>,
    pub month: Option<&'a str>,
    pub year: Option<&'a str>,
}

impl<'a> DeterminationDate<'a> {
    /// Resolve the four raw columns `annotated_by`, day, month and the year
    /// slot.
    ///
    /// | day    | month      | annotated_by | day  | month | year |
    /// |--------|------------|--------------|------|-------|------|
    /// | value  | value      | column       | day  | month | year |
    /// | value  | `ICBN`     | column       | day  | null  | year |
    /// | value  | alphabetic | month        | day  | null  | year |
    /// | `ICBN` | value      | year slot    | null | month | null |
    /// | `ICBN` | `ICBN`     | year slot    | null | null  | null |
    /// | `ICBN` | alphabetic | year slot    | null | null  | null |
    pub fn resolve(annotated_by: &'a str, day: &'a str, month: &'a str, year_slot: &'a str) -> Self {
        let day = DaySlot::classify(day);

        let (annotated_by, month) = match MonthSlot::classify(month) {
            MonthSlot::Icbn => (annotated_by, None),
            MonthSlot::Annotator(name) => (name, None),
            MonthSlot::Value(month) => (annotated_by, Some(month)),
        };

        match day {
            DaySlot::Icbn => DeterminationDate {
                annotated_by: year_slot,
                day: None,
                month,
                year: None,
            },
            DaySlot::Value(day) => DeterminationDate {
                annotated_by,
                day: Some(day),
                month,
                year: Some(year_slot),
            },
        }
    }
}

fn text(value: Option<&str>) -> Option<String> {
    blank_to_null(value.map(str::to_string))
}

impl RecordKind for Annotation {
    const KIND: Kind = Kind::Annotation;

    fn columns() -> &'static [&'static str] {
        Self::COLUMNS
    }

    fn decode(raw: &[&str]) -> Result<Self, DecodeError> {
        let mut c = Columns::new(Self::KIND, raw)?;

        let occurrence_id = c.text();
        let current_annotation = c.flag();
        let (sequence_number, family) = match SequenceSlot::classify(c.raw()) {
            SequenceSlot::Numbered(sequence) => (Some(sequence), c.raw()),
            SequenceSlot::Skipped { family } => (None, family),
        };

        let mut annotation = Annotation {
            occurrence_id,
            current_annotation,
            sequence_number: sentinel_to_null(text(sequence_number)),
            family: text(Some(family)),
            scientific_name: c.text(),
            notho_genus: c.text(),
            genus: c.text(),
            notho_species: c.text(),
            specific_epithet: c.text(),
            specific_authors: c.text(),
            infraspecific_rank: c.text(),
            notho_infraspecies: c.text(),
            infraspecific_epithet: c.text(),
            infraspecific_authors: c.text(),
            hybrid_symbol: c.text(),
            notho_genus_2: c.text(),
            genus_2: c.text(),
            notho_species_2: c.text(),
            specific_epithet_2: c.text(),
            specific_authors_2: c.text(),
            infraspecific_rank_2: c.text(),
            notho_infraspecies_2: c.text(),
            infraspecific_epithet_2: c.text(),
            infraspecific_authors_2: c.text(),
            cultivar: c.text(),
            name_qualifier: c.text(),
            qualifier_position: c.text(),
            nomenclatural_code: c.text(),
            annotated_by: None,
            day_annotated: None,
            month_annotated: None,
            year_annotated: None,
            annotation_references: None,
            annotation_remarks: None,
        };

        let annotated_by = c.raw();
        let day = c.raw();
        let month = c.raw();
        let year_slot = c.raw();
        let date = DeterminationDate::resolve(annotated_by, day, month, year_slot);

        annotation.annotated_by = text(Some(date.annotated_by));
        annotation.day_annotated = text(date.day);
        annotation.month_annotated = text(date.month);
        annotation.year_annotated = text(date.year);
        annotation.annotation_references = c.text();
        annotation.annotation_remarks = c.text();

        Ok(annotation)
    }

    fn occurrence_key(&self) -> Option<Cow<'_, str>> {
        self.occurrence_id.as_deref().map(Cow::Borrowed)
    }

    fn values(&self) -> Vec<FieldValue> {
        self.field_values()
    }
}
