//! Wire models for the Met catalog API.
//!
//! These types mirror the subset of the catalog's JSON responses the gallery
//! consumes. They are deliberately separate from the domain model: every field
//! is optional and defaulted, because the catalog omits fields freely and a
//! lookup for an unknown ID returns an effectively empty object rather than an
//! HTTP error. The conversion into [`ItemRecord`] is where a response is
//! judged usable or not.

use crate::domain::{Department, ItemRecord};
use serde::Deserialize;

/// Response body of the catalog search endpoint.
///
/// `objectIDs` is `null` (not an empty array) when the term matches nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<u64>>,
}

impl SearchResponse {
    /// The matched IDs in relevance order, empty when the catalog found none.
    #[must_use]
    pub fn into_ids(self) -> Vec<u64> {
        self.object_ids.unwrap_or_default()
    }
}

/// A single tag entry on an object response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagResponse {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(rename = "AAT_URL", default)]
    pub aat_url: Option<String>,
}

/// Why an object response cannot be rendered in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectDefect {
    /// The response carried no object ID (unknown or withdrawn object).
    MissingId,
    /// The object has no primary image to display.
    MissingImage,
}

impl std::fmt::Display for ObjectDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectDefect::MissingId => f.write_str("missing object ID"),
            ObjectDefect::MissingImage => f.write_str("missing primary image"),
        }
    }
}

/// Response body of the catalog object-lookup endpoint.
///
/// Only the fields the gallery renders are declared; serde drops the rest on
/// the floor. An unknown ID yields a body where `object_id` is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectResponse {
    #[serde(rename = "objectID", default)]
    pub object_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "artistDisplayName", default)]
    pub artist_display_name: Option<String>,
    #[serde(rename = "artistNationality", default)]
    pub artist_nationality: Option<String>,
    #[serde(rename = "artistDisplayBio", default)]
    pub artist_display_bio: Option<String>,
    #[serde(rename = "artistBeginDate", default)]
    pub artist_begin_date: Option<String>,
    #[serde(rename = "artistEndDate", default)]
    pub artist_end_date: Option<String>,
    #[serde(rename = "artistRole", default)]
    pub artist_role: Option<String>,
    #[serde(rename = "artistGender", default)]
    pub artist_gender: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(rename = "objectName", default)]
    pub object_name: Option<String>,
    #[serde(rename = "objectDate", default)]
    pub object_date: Option<String>,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<TagResponse>>,
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub dynasty: Option<String>,
    #[serde(rename = "creditLine", default)]
    pub credit_line: Option<String>,
    #[serde(rename = "primaryImage", default)]
    pub primary_image: Option<String>,
    #[serde(rename = "additionalImages", default)]
    pub additional_images: Option<Vec<String>>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(rename = "accessionYear", default)]
    pub accession_year: Option<String>,
    #[serde(rename = "accessionNumber", default)]
    pub accession_number: Option<String>,
}

impl ObjectResponse {
    /// Validates the response and trims it into an [`ItemRecord`].
    ///
    /// A response without an object ID or without a non-empty primary image is
    /// unusable in the gallery and comes back as an [`ObjectDefect`]; the
    /// caller rejects the item and prunes it from the result set that was
    /// rendering it.
    pub fn into_record(self) -> std::result::Result<ItemRecord, ObjectDefect> {
        let id = self.object_id.ok_or(ObjectDefect::MissingId)?;
        let primary_image = self
            .primary_image
            .filter(|url| !url.is_empty())
            .ok_or(ObjectDefect::MissingImage)?;

        let department = self.department.as_deref().and_then(Department::from_name);
        let tags = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| tag.term)
            .collect();

        Ok(ItemRecord {
            id,
            title: self.title,
            artist_display_name: self.artist_display_name,
            artist_nationality: self.artist_nationality,
            artist_display_bio: self.artist_display_bio,
            artist_begin_date: self.artist_begin_date,
            artist_end_date: self.artist_end_date,
            artist_role: self.artist_role,
            artist_gender: self.artist_gender,
            department,
            object_name: self.object_name,
            object_date: self.object_date,
            classification: self.classification,
            dimensions: self.dimensions,
            tags,
            culture: self.culture,
            period: self.period,
            dynasty: self.dynasty,
            credit_line: self.credit_line,
            primary_image,
            additional_images: self.additional_images.unwrap_or_default(),
            repository: self.repository,
            accession_year: self.accession_year,
            accession_number: self.accession_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_treats_null_ids_as_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"objectIDs": null}"#).unwrap();
        assert!(parsed.into_ids().is_empty());

        let parsed: SearchResponse =
            serde_json::from_str(r#"{"objectIDs": [45734, 36491]}"#).unwrap();
        assert_eq!(parsed.into_ids(), vec![45734, 36491]);
    }

    #[test]
    fn object_without_id_is_defective() {
        let parsed: ObjectResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.into_record().unwrap_err(), ObjectDefect::MissingId);
    }

    #[test]
    fn object_with_empty_image_is_defective() {
        let parsed: ObjectResponse =
            serde_json::from_str(r#"{"objectID": 7, "primaryImage": ""}"#).unwrap();
        assert_eq!(
            parsed.into_record().unwrap_err(),
            ObjectDefect::MissingImage
        );
    }

    #[test]
    fn usable_object_trims_to_the_consumed_fields() {
        let body = r#"{
            "objectID": 45734,
            "title": "Quail and Millet",
            "artistDisplayName": "Kiyohara Yukinobu",
            "department": "Asian Art",
            "primaryImage": "https://images.metmuseum.org/45734.jpg",
            "tags": [
                {"term": "Birds", "AAT_URL": "http://vocab.getty.edu/page/aat/300266506"},
                {"term": null}
            ],
            "GalleryNumber": "223",
            "isHighlight": false
        }"#;
        let parsed: ObjectResponse = serde_json::from_str(body).unwrap();
        let record = parsed.into_record().unwrap();
        assert_eq!(record.id, 45734);
        assert_eq!(record.department, Some(Department::AsianArt));
        assert_eq!(record.tags, vec!["Birds".to_string()]);
        assert_eq!(record.primary_image, "https://images.metmuseum.org/45734.jpg");
    }

    #[test]
    fn unknown_department_is_kept_as_none() {
        let body = r#"{"objectID": 3, "primaryImage": "https://x/3.jpg", "department": "Cafeteria"}"#;
        let parsed: ObjectResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_record().unwrap().department, None);
    }
}
