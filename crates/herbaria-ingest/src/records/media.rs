use std::borrow::Cow;

use super::{Columns, DecodeError, FieldValue, Kind, RecordKind};

define_record! {
    /// An image or other media item of an occurrence (13 columns, all blank→null)
    pub struct Media {
        occurrence_id: Option<String>,
        modified_on: Option<String>,
        media_guid: Option<String>,
        file_name: Option<String>,
        file_format: Option<String>,
        viewer_format: Option<String>,
        thumbnail_url: Option<String>,
        file_url: Option<String>,
        viewer_url: Option<String>,
        date_created: Option<String>,
        created_by: Option<String>,
        publisher: Option<String>,
        license: Option<String>,
    }
}

impl RecordKind for Media {
    const KIND: Kind = Kind::Media;

    fn columns() -> &'static [&'static str] {
        Self::COLUMNS
    }

    fn decode(raw: &[&str]) -> Result<Self, DecodeError> {
        let mut c = Columns::new(Self::KIND, raw)?;

        Ok(Media {
            occurrence_id: c.text(),
            modified_on: c.text(),
            media_guid: c.text(),
            file_name: c.text(),
            file_format: c.text(),
            viewer_format: c.text(),
            thumbnail_url: c.text(),
            file_url: c.text(),
            viewer_url: c.text(),
            date_created: c.text(),
            created_by: c.text(),
            publisher: c.text(),
            license: c.text(),
        })
    }

    fn occurrence_key(&self) -> Option<Cow<'_, str>> {
        self.occurrence_id.as_deref().map(Cow::Borrowed)
    }

    fn values(&self) -> Vec<FieldValue> {
        self.field_values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::records::fixtures::{as_strs, numbered_row};

    #[test]
    fn test_decode_in_order() {
        let mut row = numbered_row(13);
        row[0] = "OCC9".into();
        row[12] = "CC-BY 4.0".into();
        let media = Media::decode(&as_strs(&row)).unwrap();
        assert_eq!(media.occurrence_key().as_deref(), Some("OCC9"));
        assert_eq!(media.media_guid.as_deref(), Some("c2"));
        assert_eq!(media.license.as_deref(), Some("CC-BY 4.0"));
    }

    #[test]
    fn test_blank_fields_become_null() {
        let mut row = numbered_row(13);
        row[0] = String::new();
        row[7] = String::new();
        let media = Media::decode(&as_strs(&row)).unwrap();
        assert_eq!(media.occurrence_id, None);
        assert_eq!(media.file_url, None);
        assert_eq!(media.occurrence_key(), None);
    }
}
