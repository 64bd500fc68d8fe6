//! Intermediate extractor records and source-format detection.
//!
//! Each extractor produces a loosely-populated intermediate shape; the
//! schema transformer closes the gap to the canonical [`Book`] record.
//! Numeric fields stay raw strings here so the parse-or-absent coercion
//! happens in exactly one place.
//!
//! [`Book`]: super::book::Book

use std::path::Path;

use super::book::BookType;

/// Source format discriminant, detected from the file name extension or the
/// declared content type. Either signal alone suffices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Onix,
    Xlsx,
    Csv,
}

impl SourceFormat {
    /// Detect the format from a file name and an optional MIME type.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Option<Self> {
        if let Some(mime) = content_type {
            let mime = mime.trim().to_ascii_lowercase();
            if mime.contains("spreadsheetml") || mime == "application/vnd.ms-excel" {
                return Some(SourceFormat::Xlsx);
            }
            if mime.contains("xml") {
                return Some(SourceFormat::Onix);
            }
            if mime.contains("csv") {
                return Some(SourceFormat::Csv);
            }
        }

        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "xml" => Some(SourceFormat::Onix),
            "xlsx" | "xls" | "xlsm" => Some(SourceFormat::Xlsx),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

/// A contributor as it appears in the ONIX feed, before name/role fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct OnixCreator {
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Intermediate record produced by the ONIX field extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct OnixRecord {
    pub title_main: Option<String>,
    pub title_subtitle: Option<String>,
    /// Source order, no dedup.
    pub creators: Vec<OnixCreator>,
    /// Raw copyright year as digitized; not always numeric.
    pub copyright_date: Option<String>,
    pub summary: Option<String>,
    pub series_name: Option<String>,
    /// Raw collection sequence value.
    pub series_position: Option<String>,
    pub genre_main: Option<String>,
    pub subgenres: Vec<String>,
    pub form: Option<String>,
    pub pages: Option<String>,
    pub isbn13: Option<String>,
    pub isbn10: Option<String>,
    pub kind: BookType,
    pub publisher: Option<String>,
    pub target_audience: Option<String>,
    /// BISAC category labels from scheme-10 subjects.
    pub bisac_categories: Vec<String>,
}

impl Default for OnixRecord {
    fn default() -> Self {
        Self {
            title_main: None,
            title_subtitle: None,
            creators: Vec::new(),
            copyright_date: None,
            summary: None,
            series_name: None,
            series_position: None,
            genre_main: None,
            subgenres: Vec::new(),
            form: None,
            pages: None,
            isbn13: None,
            isbn10: None,
            kind: BookType::Fiction,
            publisher: None,
            target_audience: None,
            bisac_categories: Vec::new(),
        }
    }
}

/// Intermediate record produced by the spreadsheet field extractor. Fields
/// the tabular exports do not carry (pages, series position, per-creator
/// roles, target audience) stay absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetRecord {
    pub title_main: Option<String>,
    pub title_subtitle: Option<String>,
    pub series_title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<String>,
    pub publisher: Option<String>,
    pub material_type: Option<String>,
    pub lexile: Option<String>,
    pub subject_main: Option<String>,
    pub subject_other: Vec<String>,
    pub isbn: Option<String>,
    pub issn: Option<String>,
}

/// Tagged union the schema transformer dispatches over.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRecord {
    Onix(OnixRecord),
    Sheet(SheetRecord),
}
