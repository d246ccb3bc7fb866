//! Catalog item domain model.
//!
//! This module defines [`ItemRecord`], the trimmed representation of a single
//! museum object, and [`Department`], the closed set of Met curatorial
//! departments. An `ItemRecord` only ever exists in hydrated form: it is built
//! from a catalog response that has already been validated to carry an object
//! ID and a primary image, and is treated as immutable for the rest of the
//! session.

use serde::{Deserialize, Serialize};

/// A hydrated catalog item.
///
/// Holds exactly the fields the gallery consumes; everything else in the
/// catalog response is discarded at the wire boundary. All text fields are
/// optional because the catalog omits them freely, but `primary_image` is
/// always present by construction (records without one are rejected before
/// an `ItemRecord` is built).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Positive catalog object ID, unique across the system.
    pub id: u64,
    pub title: Option<String>,
    pub artist_display_name: Option<String>,
    pub artist_nationality: Option<String>,
    pub artist_display_bio: Option<String>,
    pub artist_begin_date: Option<String>,
    pub artist_end_date: Option<String>,
    pub artist_role: Option<String>,
    pub artist_gender: Option<String>,
    /// Curatorial department, `None` when the catalog names one outside the
    /// known set.
    pub department: Option<Department>,
    pub object_name: Option<String>,
    pub object_date: Option<String>,
    pub classification: Option<String>,
    pub dimensions: Option<String>,
    /// Tag terms only; the catalog's per-tag URLs are dropped.
    pub tags: Vec<String>,
    pub culture: Option<String>,
    pub period: Option<String>,
    pub dynasty: Option<String>,
    pub credit_line: Option<String>,
    /// URL of the primary image. Non-empty by construction.
    pub primary_image: String,
    pub additional_images: Vec<String>,
    pub repository: Option<String>,
    pub accession_year: Option<String>,
    pub accession_number: Option<String>,
}

impl ItemRecord {
    /// Returns the title to render for this item.
    ///
    /// Falls back from title to object name to `"Untitled"`.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.object_name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("Untitled")
    }

    /// Returns the subtitle line to render under the title.
    ///
    /// Prefers "Artist (bio)", then the artist alone, then the culture, then
    /// an empty string.
    #[must_use]
    pub fn display_subtitle(&self) -> String {
        let artist = self.artist_display_name.as_deref().filter(|a| !a.is_empty());
        let bio = self.artist_display_bio.as_deref().filter(|b| !b.is_empty());
        match (artist, bio) {
            (Some(artist), Some(bio)) => format!("{artist} ({bio})"),
            (Some(artist), None) => artist.to_string(),
            (None, _) => self
                .culture
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Met curatorial departments.
///
/// A closed set: catalog records naming a department outside this list are
/// stored with no department. Each department carries a stable catalog ID and
/// a display color used to tint gallery cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "American Decorative Arts")]
    AmericanDecorativeArts,
    #[serde(rename = "The American Wing")]
    AmericanWing,
    #[serde(rename = "Ancient Near Eastern Art")]
    AncientNearEasternArt,
    #[serde(rename = "Arms and Armor")]
    ArmsAndArmor,
    #[serde(rename = "Arts of Africa, Oceania, and the Americas")]
    ArtsOfAfricaOceaniaAndTheAmericas,
    #[serde(rename = "Asian Art")]
    AsianArt,
    #[serde(rename = "The Cloisters")]
    Cloisters,
    #[serde(rename = "The Costume Institute")]
    CostumeInstitute,
    #[serde(rename = "Drawings and Prints")]
    DrawingsAndPrints,
    #[serde(rename = "Egyptian Art")]
    EgyptianArt,
    #[serde(rename = "European Paintings")]
    EuropeanPaintings,
    #[serde(rename = "European Sculpture and Decorative Arts")]
    EuropeanSculptureAndDecorativeArts,
    #[serde(rename = "Greek and Roman Art")]
    GreekAndRomanArt,
    #[serde(rename = "Islamic Art")]
    IslamicArt,
    #[serde(rename = "The Robert Lehman Collection")]
    RobertLehmanCollection,
    #[serde(rename = "The Libraries")]
    Libraries,
    #[serde(rename = "Medieval Art")]
    MedievalArt,
    #[serde(rename = "Musical Instruments")]
    MusicalInstruments,
    #[serde(rename = "Photographs")]
    Photographs,
    #[serde(rename = "The Michael C. Rockefeller Wing")]
    MichaelCRockefellerWing,
    #[serde(rename = "Modern Art")]
    ModernArt,
}

impl Department {
    /// All departments in catalog-ID order.
    pub const ALL: [Department; 21] = [
        Department::AmericanDecorativeArts,
        Department::AmericanWing,
        Department::AncientNearEasternArt,
        Department::ArmsAndArmor,
        Department::ArtsOfAfricaOceaniaAndTheAmericas,
        Department::AsianArt,
        Department::Cloisters,
        Department::CostumeInstitute,
        Department::DrawingsAndPrints,
        Department::EgyptianArt,
        Department::EuropeanPaintings,
        Department::EuropeanSculptureAndDecorativeArts,
        Department::GreekAndRomanArt,
        Department::IslamicArt,
        Department::RobertLehmanCollection,
        Department::Libraries,
        Department::MedievalArt,
        Department::MusicalInstruments,
        Department::Photographs,
        Department::MichaelCRockefellerWing,
        Department::ModernArt,
    ];

    /// Parses a catalog department name.
    ///
    /// Returns `None` for names outside the known set; callers treat such
    /// records as having no department rather than failing hydration.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Department::ALL.iter().copied().find(|d| d.name() == name)
    }

    /// The catalog's display name for this department.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Department::AmericanDecorativeArts => "American Decorative Arts",
            Department::AmericanWing => "The American Wing",
            Department::AncientNearEasternArt => "Ancient Near Eastern Art",
            Department::ArmsAndArmor => "Arms and Armor",
            Department::ArtsOfAfricaOceaniaAndTheAmericas => {
                "Arts of Africa, Oceania, and the Americas"
            }
            Department::AsianArt => "Asian Art",
            Department::Cloisters => "The Cloisters",
            Department::CostumeInstitute => "The Costume Institute",
            Department::DrawingsAndPrints => "Drawings and Prints",
            Department::EgyptianArt => "Egyptian Art",
            Department::EuropeanPaintings => "European Paintings",
            Department::EuropeanSculptureAndDecorativeArts => {
                "European Sculpture and Decorative Arts"
            }
            Department::GreekAndRomanArt => "Greek and Roman Art",
            Department::IslamicArt => "Islamic Art",
            Department::RobertLehmanCollection => "The Robert Lehman Collection",
            Department::Libraries => "The Libraries",
            Department::MedievalArt => "Medieval Art",
            Department::MusicalInstruments => "Musical Instruments",
            Department::Photographs => "Photographs",
            Department::MichaelCRockefellerWing => "The Michael C. Rockefeller Wing",
            Department::ModernArt => "Modern Art",
        }
    }

    /// The catalog's numeric department ID.
    #[must_use]
    pub const fn department_id(self) -> u8 {
        match self {
            Department::AmericanDecorativeArts => 1,
            Department::AmericanWing => 2,
            Department::AncientNearEasternArt => 3,
            Department::ArmsAndArmor => 4,
            Department::ArtsOfAfricaOceaniaAndTheAmericas => 5,
            Department::AsianArt => 6,
            Department::Cloisters => 7,
            Department::CostumeInstitute => 8,
            Department::DrawingsAndPrints => 9,
            Department::EgyptianArt => 10,
            Department::EuropeanPaintings => 11,
            Department::EuropeanSculptureAndDecorativeArts => 12,
            Department::GreekAndRomanArt => 13,
            Department::IslamicArt => 14,
            Department::RobertLehmanCollection => 15,
            Department::Libraries => 16,
            Department::MedievalArt => 17,
            Department::MusicalInstruments => 18,
            Department::Photographs => 19,
            Department::MichaelCRockefellerWing => 20,
            Department::ModernArt => 21,
        }
    }

    /// Display color (hex) used to tint gallery cards for this department.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Department::AmericanDecorativeArts => "#D9ED92",
            Department::AmericanWing => "#414073",
            Department::AncientNearEasternArt => "#76C893",
            Department::ArmsAndArmor => "#168AAD",
            Department::ArtsOfAfricaOceaniaAndTheAmericas => "#184E77",
            Department::AsianArt => "#DE3C4B",
            Department::Cloisters => "#240115",
            Department::CostumeInstitute => "#F08080",
            Department::DrawingsAndPrints => "#FBC4AB",
            Department::EgyptianArt => "#CB997E",
            Department::EuropeanPaintings => "#FFE8D6",
            Department::EuropeanSculptureAndDecorativeArts => "#B7B7A4",
            Department::GreekAndRomanArt => "#669BBC",
            Department::IslamicArt => "#C1121F",
            Department::RobertLehmanCollection => "#7161EF",
            Department::Libraries => "#DEC0F1",
            Department::MedievalArt => "#780000",
            Department::MusicalInstruments => "#293241",
            Department::Photographs => "#E0FBFC",
            Department::MichaelCRockefellerWing => "#E0BE36",
            Department::ModernArt => "#FDF0D5",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_record(id: u64) -> ItemRecord {
        ItemRecord {
            id,
            title: None,
            artist_display_name: None,
            artist_nationality: None,
            artist_display_bio: None,
            artist_begin_date: None,
            artist_end_date: None,
            artist_role: None,
            artist_gender: None,
            department: None,
            object_name: None,
            object_date: None,
            classification: None,
            dimensions: None,
            tags: vec![],
            culture: None,
            period: None,
            dynasty: None,
            credit_line: None,
            primary_image: "https://images.example/1.jpg".to_string(),
            additional_images: vec![],
            repository: None,
            accession_year: None,
            accession_number: None,
        }
    }

    #[test]
    fn display_title_falls_back_to_object_name_then_untitled() {
        let mut record = bare_record(1);
        assert_eq!(record.display_title(), "Untitled");

        record.object_name = Some("Vase".to_string());
        assert_eq!(record.display_title(), "Vase");

        record.title = Some("The Great Wave".to_string());
        assert_eq!(record.display_title(), "The Great Wave");
    }

    #[test]
    fn display_subtitle_prefers_artist_with_bio() {
        let mut record = bare_record(1);
        record.culture = Some("Japan".to_string());
        assert_eq!(record.display_subtitle(), "Japan");

        record.artist_display_name = Some("Hokusai".to_string());
        assert_eq!(record.display_subtitle(), "Hokusai");

        record.artist_display_bio = Some("Japanese, 1760-1849".to_string());
        assert_eq!(record.display_subtitle(), "Hokusai (Japanese, 1760-1849)");
    }

    #[test]
    fn department_names_round_trip() {
        for department in Department::ALL {
            assert_eq!(Department::from_name(department.name()), Some(department));
        }
        assert_eq!(Department::from_name("Cafeteria"), None);
    }

    #[test]
    fn department_ids_are_sequential() {
        let ids: Vec<u8> = Department::ALL.iter().map(|d| d.department_id()).collect();
        assert_eq!(ids, (1..=21).collect::<Vec<u8>>());
    }
}
