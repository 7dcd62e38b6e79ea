//! Publications and their built-in filterable attributes

use super::ids::PublicationId;
use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of venue a publication appeared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueType {
    JournalArticle,
    WholeBook,
    BookChapter,
    ConferenceProceedings,
    MasterThesis,
    DoctorateThesis,
    Report,
    Magazine,
    Miscellaneous,
    Archives,
}

impl VenueType {
    /// One-letter code used in stored records and filters
    pub fn code(&self) -> &'static str {
        match self {
            VenueType::JournalArticle => "J",
            VenueType::WholeBook => "B",
            VenueType::BookChapter => "C",
            VenueType::ConferenceProceedings => "P",
            VenueType::MasterThesis => "M",
            VenueType::DoctorateThesis => "D",
            VenueType::Report => "R",
            VenueType::Magazine => "G",
            VenueType::Miscellaneous => "X",
            VenueType::Archives => "A",
        }
    }

    /// Parse a one-letter code
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "J" => Ok(VenueType::JournalArticle),
            "B" => Ok(VenueType::WholeBook),
            "C" => Ok(VenueType::BookChapter),
            "P" => Ok(VenueType::ConferenceProceedings),
            "M" => Ok(VenueType::MasterThesis),
            "D" => Ok(VenueType::DoctorateThesis),
            "R" => Ok(VenueType::Report),
            "G" => Ok(VenueType::Magazine),
            "X" => Ok(VenueType::Miscellaneous),
            "A" => Ok(VenueType::Archives),
            other => Err(CoreError::UnknownVenueType(other.to_string())),
        }
    }

    /// Map an entry type as reported by BibTeX or a search API
    /// (`inproceedings`, `journal-article`, `Conferences`, ...).
    ///
    /// Unrecognized entry types fall back to `Miscellaneous`.
    pub fn from_entry_type(entry_type: &str) -> Self {
        match entry_type.trim().to_lowercase().as_str() {
            "article" | "early access articles" | "journal-article" | "journal" | "journals" => {
                VenueType::JournalArticle
            }
            "book" | "book series" => VenueType::WholeBook,
            "conference"
            | "conferences"
            | "conference-proceeding"
            | "conference proceeding"
            | "proceedings-article"
            | "inproceedings" => VenueType::ConferenceProceedings,
            "masterthesis" | "mastersthesis" => VenueType::MasterThesis,
            "phdthesis" => VenueType::DoctorateThesis,
            "techreport" => VenueType::Report,
            "magazines" => VenueType::Magazine,
            "unpublished" => VenueType::Archives,
            _ => VenueType::Miscellaneous,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            VenueType::JournalArticle => "Journal Article",
            VenueType::WholeBook => "Whole Book",
            VenueType::BookChapter => "Book Chapter",
            VenueType::ConferenceProceedings => "Conference Proceedings",
            VenueType::MasterThesis => "Master Thesis",
            VenueType::DoctorateThesis => "Doctorate Thesis",
            VenueType::Report => "Report",
            VenueType::Magazine => "Magazine",
            VenueType::Miscellaneous => "Miscellaneous",
            VenueType::Archives => "Archives",
        }
    }
}

impl Default for VenueType {
    fn default() -> Self {
        VenueType::Miscellaneous
    }
}

/// Normalized title used for duplicate detection: lower case, alphanumerics only
pub fn clean_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Publication data before it is stored (no id yet)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPublication {
    pub doi: String,
    pub title: String,
    pub year: u16,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub venue_type: VenueType,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl NewPublication {
    /// Start a publication record with its identifying data
    pub fn new(doi: impl Into<String>, title: impl Into<String>, year: u16) -> Self {
        Self {
            doi: doi.into(),
            title: title.into(),
            year,
            ..Default::default()
        }
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = text.into();
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>, venue_type: VenueType) -> Self {
        self.venue = venue.into();
        self.venue_type = venue_type;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// A stored publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: PublicationId,
    pub doi: String,
    pub title: String,
    pub clean_title: String,
    pub year: u16,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub venue: String,
    pub venue_type: VenueType,
    pub source: Option<String>,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
}

impl Publication {
    /// Materialize a draft under the given id
    pub fn from_new(id: PublicationId, draft: NewPublication) -> Self {
        Self {
            id,
            clean_title: clean_title(&draft.title),
            doi: draft.doi,
            title: draft.title,
            year: draft.year,
            abstract_text: draft.abstract_text,
            venue: draft.venue,
            venue_type: draft.venue_type,
            source: draft.source,
            authors: draft.authors,
            keywords: draft.keywords,
        }
    }

    /// Value of a built-in attribute
    pub fn attribute(&self, attribute: Attribute) -> Value {
        match attribute {
            Attribute::Id => Value::from(self.id.0),
            Attribute::Doi => Value::from(self.doi.as_str()),
            Attribute::Title => Value::from(self.title.as_str()),
            Attribute::CleanTitle => Value::from(self.clean_title.as_str()),
            Attribute::Year => Value::from(self.year),
            Attribute::Abstract => Value::from(self.abstract_text.as_str()),
            Attribute::Venue => Value::from(self.venue.as_str()),
            Attribute::VenueType => Value::from(self.venue_type.code()),
            Attribute::Source => self
                .source
                .as_deref()
                .map(Value::from)
                .unwrap_or(Value::Null),
            Attribute::Authors => {
                Value::Array(self.authors.iter().map(|a| Value::from(a.as_str())).collect())
            }
            Attribute::Keywords => {
                Value::Array(self.keywords.iter().map(|k| Value::from(k.as_str())).collect())
            }
        }
    }

    /// Returns true if `other` describes the same work (same DOI, ignoring
    /// case, or same cleaned title)
    pub fn is_duplicate_of(&self, other: &NewPublication) -> bool {
        let same_doi = !self.doi.is_empty() && self.doi.eq_ignore_ascii_case(&other.doi);
        let other_clean = clean_title(&other.title);
        let same_title = !other_clean.is_empty() && self.clean_title == other_clean;
        same_doi || same_title
    }
}

/// Storage kind of a built-in attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Text,
    Number,
}

/// Built-in publication attributes that filters can reference by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Id,
    Doi,
    Title,
    CleanTitle,
    Year,
    Abstract,
    Venue,
    VenueType,
    Source,
    Authors,
    Keywords,
}

impl Attribute {
    /// All built-in attributes
    pub const ALL: [Attribute; 11] = [
        Attribute::Id,
        Attribute::Doi,
        Attribute::Title,
        Attribute::CleanTitle,
        Attribute::Year,
        Attribute::Abstract,
        Attribute::Venue,
        Attribute::VenueType,
        Attribute::Source,
        Attribute::Authors,
        Attribute::Keywords,
    ];

    /// Look up an attribute by its filter name
    pub fn from_name(name: &str) -> Option<Attribute> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    /// Name used in filters
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Id => "id",
            Attribute::Doi => "doi",
            Attribute::Title => "title",
            Attribute::CleanTitle => "clean_title",
            Attribute::Year => "year",
            Attribute::Abstract => "abstract",
            Attribute::Venue => "venue",
            Attribute::VenueType => "venue_type",
            Attribute::Source => "source",
            Attribute::Authors => "authors",
            Attribute::Keywords => "keywords",
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Id | Attribute::Year => AttributeKind::Number,
            _ => AttributeKind::Text,
        }
    }

    /// Whether plain equality on this attribute is case-sensitive.
    ///
    /// DOIs are case-insensitive by definition; every other text attribute
    /// compares exactly unless an `i*` lookup is used.
    pub fn case_sensitive(&self) -> bool {
        !matches!(self, Attribute::Doi)
    }

    /// Whether the attribute holds several values per publication
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Attribute::Authors | Attribute::Keywords)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Publication {
        Publication::from_new(
            PublicationId(1),
            NewPublication::new("10.1000/ABC", "Mapping Studies: A Guide!", 2020)
                .with_venue("EASE", VenueType::ConferenceProceedings)
                .with_authors(["Petersen, Kai", "Vakkalanka, Sairam"])
                .with_keywords(["mapping", "guidelines"]),
        )
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Mapping Studies: A Guide!"), "mappingstudiesaguide");
        assert_eq!(clean_title("  "), "");
    }

    #[test]
    fn test_attribute_values() {
        let publication = sample();
        assert_eq!(publication.attribute(Attribute::Year), Value::Number(2020.0));
        assert_eq!(publication.attribute(Attribute::VenueType), Value::from("P"));
        assert_eq!(publication.attribute(Attribute::Source), Value::Null);
        assert_eq!(
            publication.attribute(Attribute::Keywords),
            Value::Array(vec![Value::from("mapping"), Value::from("guidelines")])
        );
        assert_eq!(
            publication.attribute(Attribute::CleanTitle),
            Value::from("mappingstudiesaguide")
        );
    }

    #[test]
    fn test_attribute_names_roundtrip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_name(attribute.name()), Some(attribute));
        }
        assert_eq!(Attribute::from_name("relevance"), None);
        assert!(!Attribute::Doi.case_sensitive());
        assert!(Attribute::Authors.is_multi_valued());
        assert_eq!(Attribute::Year.kind(), AttributeKind::Number);
    }

    #[test]
    fn test_duplicate_detection() {
        let publication = sample();
        assert!(publication.is_duplicate_of(&NewPublication::new("10.1000/abc", "Other", 2021)));
        assert!(publication.is_duplicate_of(&NewPublication::new(
            "10.1/x",
            "mapping studies - a guide",
            2020
        )));
        assert!(!publication.is_duplicate_of(&NewPublication::new("10.1/x", "Unrelated", 2020)));
    }

    #[test]
    fn test_venue_type_codes() {
        assert_eq!(VenueType::from_code("J").unwrap(), VenueType::JournalArticle);
        assert!(VenueType::from_code("Q").is_err());
        assert_eq!(
            VenueType::from_entry_type("inproceedings"),
            VenueType::ConferenceProceedings
        );
        assert_eq!(VenueType::from_entry_type("Journal-article"), VenueType::JournalArticle);
        assert_eq!(VenueType::from_entry_type("weird"), VenueType::Miscellaneous);
        assert_eq!(VenueType::Report.label(), "Report");
    }
}
