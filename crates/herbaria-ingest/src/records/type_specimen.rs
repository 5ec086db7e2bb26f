//! Type specimen records.
//!
//! Unlike the other three kinds, the type export carries `occurrence_id` as
//! an integer and a non-numeric key fails the row. The key is still compared
//! against the valid-occurrence set by its decimal text, so an occurrence
//! `"0042"` never matches a type keyed `42`.

use std::borrow::Cow;

use super::{Columns, DecodeError, FieldValue, Kind, RecordKind};

define_record! {
    /// A nomenclatural type attached to an occurrence (19 columns)
    pub struct TypeSpecimen {
        occurrence_id: i64,
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
        cultivar: Option<String>,
        type_designation: Option<String>,
        holotype_location: Option<String>,
        year_published: Option<String>,
        publication: Option<String>,
        notes: Option<String>,
    }
}

fn parse_key(raw: &str) -> Result<i64, DecodeError> {
    raw.trim().parse().map_err(|_| DecodeError::NonNumericKey {
        kind: Kind::Type,
        value: raw.to_string(),
    })
}

impl RecordKind for TypeSpecimen {
    const KIND: Kind = Kind::Type;

    fn columns() -> &'static [&'static str] {
        Self::COLUMNS
    }

    fn decode(raw: &[&str]) -> Result<Self, DecodeError> {
        let mut c = Columns::new(Self::KIND, raw)?;

        Ok(TypeSpecimen {
            occurrence_id: parse_key(c.raw())?,
            sequence_number: c.text(),
            family: c.text(),
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
            cultivar: c.text(),
            type_designation: c.text(),
            holotype_location: c.text(),
            year_published: c.text(),
            publication: c.text(),
            notes: c.text(),
        })
    }

    fn occurrence_key(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.occurrence_id.to_string()))
    }

    fn values(&self) -> Vec<FieldValue> {
        self.field_values()
    }
}
