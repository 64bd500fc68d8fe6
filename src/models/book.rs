//! Canonical book record model.
//!
//! Every source format converges to this shape. Required fields carry
//! sentinel values substituted by the schema transformer; optional fields
//! stay absent when the source had nothing usable.

use serde::{Deserialize, Serialize};

/// Title block. `main` is never empty in transformer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub main: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// A contributor, in source order. No dedup is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    pub role: String,
}

/// Series membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<SeriesPosition>,
}

/// Position within a series. Extraction only produces the numeric form
/// (an unparsable sequence is dropped, not carried as text); the text form
/// is accepted when deserializing records edited upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesPosition {
    Number(i32),
    Text(String),
}

/// Genre classification split from the source's subject data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Never contains empty strings.
    #[serde(default)]
    pub subgenres: Vec<String>,
}

/// ISBN pair. `isbn13` is required by the persistence schema and falls
/// back to a 13-zero sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isbn {
    pub isbn13: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
}

/// Record classification. Two vocabularies are in use and both are legal
/// outputs: ONIX products classify as `Fiction`/`Nonfiction`, tabular
/// exports as `Book`/`Other`. The record's [`SourceExtra`] bag tags which
/// producer emitted it; no unified enumeration is imposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookType {
    Fiction,
    Nonfiction,
    Book,
    Other,
}

/// Source-tagged extension fields with no slot in the canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SourceExtra {
    Onix {
        /// BISAC category labels resolved from scheme-10 subject codes.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        bisac_categories: Vec<String>,
    },
    Sheet {
        #[serde(skip_serializing_if = "Option::is_none")]
        lexile: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        issn: Option<String>,
    },
}

/// Canonical book record, the convergence shape for every source format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: Title,
    pub creators: Vec<Creator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_date: Option<i32>,
    pub summary: String,
    pub series: Series,
    pub genre: Genre,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    pub isbn: Isbn,
    #[serde(rename = "type")]
    pub kind: BookType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    pub extra: SourceExtra,
}
