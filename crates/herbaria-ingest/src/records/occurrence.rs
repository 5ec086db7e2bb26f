//! Occurrence records: one row per specimen, the root of every other kind.
//!
//! Transform order per field: `imaged`, `accepted`, `is_type`,
//! `valid_lat_lng` and `cultivated` are loose booleans and never null; every
//! other field has blank→null applied.

use std::borrow::Cow;

use super::{Columns, DecodeError, FieldValue, Kind, RecordKind};

define_record! {
    /// A specimen occurrence (75 columns)
    pub struct Occurrence {
        occurrence_id: Option<String>,
        guid: Option<String>,
        record_guid: Option<String>,
        modified_on: Option<String>,
        imaged: bool,
        information_withheld: Option<String>,
        basis_of_record: Option<String>,
        herbarium: Option<String>,
        collection: Option<String>,
        dataset: Option<String>,
        accession: Option<String>,
        catalog: Option<String>,
        barcode: Option<String>,
        other_numbers: Option<String>,
        family: Option<String>,
        taxon_name: Option<String>,
        accepted: bool,
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
        is_type: bool,
        type_designation: Option<String>,
        site_number: Option<String>,
        collector: Option<String>,
        collector_number: Option<String>,
        other_collectors: Option<String>,
        day_collected: Option<String>,
        month_collected: Option<String>,
        year_collected: Option<String>,
        verbatim_collection_date: Option<String>,
        day_of_year: Option<String>,
        country: Option<String>,
        state_province: Option<String>,
        county: Option<String>,
        locality: Option<String>,
        site_description: Option<String>,
        verbatim_elevation: Option<String>,
        minimum_elevation_in_meters: Option<String>,
        maximum_elevation_in_meters: Option<String>,
        verbatim_depth: Option<String>,
        minimum_depth_in_meters: Option<String>,
        maximum_depth_in_meters: Option<String>,
        verbatim_coordinates: Option<String>,
        decimal_latitude: Option<String>,
        decimal_longitude: Option<String>,
        valid_lat_lng: bool,
        geodetic_datum: Option<String>,
        coordinate_uncertainty_in_meters: Option<String>,
        georeferenced_by: Option<String>,
        georeference_sources: Option<String>,
        georeference_remarks: Option<String>,
        specimen_notes: Option<String>,
        phenology: Option<String>,
        cultivated: bool,
        origin: Option<String>,
    }
}

impl RecordKind for Occurrence {
    const KIND: Kind = Kind::Occurrence;

    fn columns() -> &'static [&'static str] {
        Self::COLUMNS
    }

    // Struct expression fields are evaluated in source order, which is the
    // column order here.
    fn decode(raw: &[&str]) -> Result<Self, DecodeError> {
        let mut c = Columns::new(Self::KIND, raw)?;

        Ok(Occurrence {
            occurrence_id: c.text(),
            guid: c.text(),
            record_guid: c.text(),
            modified_on: c.text(),
            imaged: c.flag(),
            information_withheld: c.text(),
            basis_of_record: c.text(),
            herbarium: c.text(),
            collection: c.text(),
            dataset: c.text(),
            accession: c.text(),
            catalog: c.text(),
            barcode: c.text(),
            other_numbers: c.text(),
            family: c.text(),
            taxon_name: c.text(),
            accepted: c.flag(),
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
            is_type: c.flag(),
            type_designation: c.text(),
            site_number: c.text(),
            collector: c.text(),
            collector_number: c.text(),
            other_collectors: c.text(),
            day_collected: c.text(),
            month_collected: c.text(),
            year_collected: c.text(),
            verbatim_collection_date: c.text(),
            day_of_year: c.text(),
            country: c.text(),
            state_province: c.text(),
            county: c.text(),
            locality: c.text(),
            site_description: c.text(),
            verbatim_elevation: c.text(),
            minimum_elevation_in_meters: c.text(),
            maximum_elevation_in_meters: c.text(),
            verbatim_depth: c.text(),
            minimum_depth_in_meters: c.text(),
            maximum_depth_in_meters: c.text(),
            verbatim_coordinates: c.text(),
            decimal_latitude: c.text(),
            decimal_longitude: c.text(),
            valid_lat_lng: c.flag(),
            geodetic_datum: c.text(),
            coordinate_uncertainty_in_meters: c.text(),
            georeferenced_by: c.text(),
            georeference_sources: c.text(),
            georeference_remarks: c.text(),
            specimen_notes: c.text(),
            phenology: c.text(),
            cultivated: c.flag(),
            origin: c.text(),
        })
    }

    fn occurrence_key(&self) -> Option<Cow<'_, str>> {
        self.occurrence_id.as_deref().map(Cow::Borrowed)
    }

    fn values(&self) -> Vec<FieldValue> {
        self.field_values()
    }
}
