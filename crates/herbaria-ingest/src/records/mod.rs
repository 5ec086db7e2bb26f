//! Record kinds and their positional decoders
//!
//! Every corpus file is a fixed-width tab-separated table. Each kind gets a
//! strongly typed record plus a [`RecordKind`] impl that knows its width, its
//! destination columns and how to decode a raw row. The kind-agnostic
//! [`FieldMap`] view exists only for the validator's per-field checks.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

use crate::transform::{blank_to_null, loose_boolean, DEFAULT_TRUTHY};

/// Declares a record struct together with its column list and an ordered
/// value accessor, so the three can never drift apart.
macro_rules! define_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
        $vis struct $name {
            $( $(#[$field_meta])* pub $field: $ty, )+
        }

        impl $name {
            /// Destination column names, in source-file order
            pub const COLUMNS: &'static [&'static str] = &[ $( stringify!($field) ),+ ];

            /// Field values in [`Self::COLUMNS`] order
            pub fn field_values(&self) -> Vec<$crate::records::FieldValue> {
                use $crate::records::ToFieldValue;
                vec![ $( self.$field.to_field_value() ),+ ]
            }
        }
    };
}

pub mod annotation;
pub mod media;
pub mod occurrence;
pub mod type_specimen;

pub use annotation::Annotation;
pub use media::Media;
pub use occurrence::Occurrence;
pub use type_specimen::TypeSpecimen;

/// The four record kinds of the corpus
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum,
)]
pub enum Kind {
    #[serde(rename = "corpus_occurrences")]
    #[value(name = "occurrences")]
    Occurrence,
    #[serde(rename = "corpus_annotations")]
    #[value(name = "annotations")]
    Annotation,
    #[serde(rename = "corpus_types")]
    #[value(name = "types")]
    Type,
    #[serde(rename = "corpus_media")]
    #[value(name = "media")]
    Media,
}

impl Kind {
    /// Load order: occurrences first so dependents can be filtered against them
    pub const ALL: [Kind; 4] = [Kind::Occurrence, Kind::Annotation, Kind::Type, Kind::Media];

    /// Exact number of tab-separated columns in a source row
    pub fn width(self) -> usize {
        match self {
            Kind::Occurrence => 75,
            Kind::Annotation => 34,
            Kind::Type => 19,
            Kind::Media => 13,
        }
    }

    /// Default destination table
    pub fn table_name(self) -> &'static str {
        match self {
            Kind::Occurrence => "corpus_occurrences",
            Kind::Annotation => "corpus_annotations",
            Kind::Type => "corpus_types",
            Kind::Media => "corpus_media",
        }
    }

    /// Plural label used on the command line and for default file names
    pub fn label(self) -> &'static str {
        match self {
            Kind::Occurrence => "occurrences",
            Kind::Annotation => "annotations",
            Kind::Type => "types",
            Kind::Media => "media",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural failure decoding a single row
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("expected {expected} columns for {kind} row but received {found}")]
    ColumnCount {
        kind: Kind,
        expected: usize,
        found: usize,
    },

    #[error("{kind} occurrence_id must be an integer, got {value:?}")]
    NonNumericKey { kind: Kind, value: String },
}

/// A decoded column value as handed to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Bool(bool),
    Int(i64),
}

impl FieldValue {
    /// Textual form for validation; `None` for null
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(s) => Some(Cow::Borrowed(s)),
            FieldValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            FieldValue::Int(i) => Some(Cow::Owned(i.to_string())),
        }
    }
}

pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for Option<String> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(s) => FieldValue::Text(s.clone()),
            None => FieldValue::Null,
        }
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Int(*self)
    }
}

/// Field-name keyed view of a record, used at the validation boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FieldMap {
    pub fn new(columns: &'static [&'static str], values: Vec<FieldValue>) -> Self {
        Self {
            entries: columns.iter().copied().zip(values).collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Text of a non-null field; `None` for null or unknown fields
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }
}

/// Capabilities shared by every record kind
pub trait RecordKind: Sized + Send + Sync + 'static {
    const KIND: Kind;

    /// Destination column names, matching [`RecordKind::values`] order
    fn columns() -> &'static [&'static str];

    /// Decode one raw row. Any column count other than `KIND.width()` fails.
    fn decode(raw: &[&str]) -> Result<Self, DecodeError>;

    /// Occurrence identifier this record hangs off; `None` when blank
    fn occurrence_key(&self) -> Option<Cow<'_, str>>;

    fn values(&self) -> Vec<FieldValue>;

    fn field_map(&self) -> FieldMap {
        FieldMap::new(Self::columns(), self.values())
    }
}

/// Cursor over a raw row, consumed left to right by the decoders
pub(crate) struct Columns<'a> {
    raw: std::slice::Iter<'a, &'a str>,
}

impl<'a> Columns<'a> {
    pub(crate) fn new(kind: Kind, raw: &'a [&'a str]) -> Result<Self, DecodeError> {
        if raw.len() != kind.width() {
            return Err(DecodeError::ColumnCount {
                kind,
                expected: kind.width(),
                found: raw.len(),
            });
        }
        Ok(Self { raw: raw.iter() })
    }

    /// Next raw value, untouched
    pub(crate) fn raw(&mut self) -> &'a str {
        self.raw.next().copied().unwrap_or_default()
    }

    /// Next value with blank→null applied
    pub(crate) fn text(&mut self) -> Option<String> {
        blank_to_null(Some(self.raw().to_string()))
    }

    /// Next value coerced with the default truthy tokens
    pub(crate) fn flag(&mut self) -> bool {
        loose_boolean(self.raw(), DEFAULT_TRUTHY)
    }
}
