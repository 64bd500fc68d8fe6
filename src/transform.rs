//! Schema transformer
//!
//! The single convergence point: both extractors' intermediate records
//! become the canonical book record here. Defaults fill only truly-absent
//! fields, so re-transforming a record that already carries its sentinels
//! changes nothing.

use crate::models::book::{
    Book, BookType, Creator, Genre, Isbn, Series, SeriesPosition, SourceExtra, Title,
};
use crate::models::source_record::{OnixRecord, SheetRecord, SourceRecord};

/// Summary sentinel required by the persistence schema.
pub const NO_SUMMARY: &str = "No summary available";
/// ISBN-13 sentinel required by the persistence schema.
pub const NO_ISBN13: &str = "0000000000000";

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNTITLED: &str = "Untitled";

/// Intermediate-to-canonical record transformer
pub struct SchemaTransformer;

impl SchemaTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Produce the canonical record, applying format-specific defaults.
    pub fn transform(&self, record: SourceRecord) -> Book {
        match record {
            SourceRecord::Onix(record) => self.transform_onix(record),
            SourceRecord::Sheet(record) => self.transform_sheet(record),
        }
    }

    fn transform_onix(&self, record: OnixRecord) -> Book {
        Book {
            title: Title {
                main: present(record.title_main).unwrap_or_else(|| UNKNOWN_TITLE.to_owned()),
                subtitle: present(record.title_subtitle),
            },
            creators: record
                .creators
                .into_iter()
                .map(|c| Creator {
                    name: present(c.name).unwrap_or_else(|| "Unknown".to_owned()),
                    role: present(c.role).unwrap_or_else(|| "Unknown Role".to_owned()),
                })
                .collect(),
            copyright_date: parse_int(record.copyright_date),
            summary: present(record.summary).unwrap_or_else(|| NO_SUMMARY.to_owned()),
            series: Series {
                name: present(record.series_name),
                position: parse_int(record.series_position).map(SeriesPosition::Number),
            },
            genre: Genre {
                // carried verbatim; only subgenres are filtered for empties
                main: record.genre_main,
                subgenres: record.subgenres,
            },
            form: present(record.form),
            pages: parse_int(record.pages),
            isbn: Isbn {
                isbn13: present(record.isbn13).unwrap_or_else(|| NO_ISBN13.to_owned()),
                isbn10: present(record.isbn10),
            },
            kind: record.kind,
            publisher: present(record.publisher),
            target_audience: present(record.target_audience),
            extra: SourceExtra::Onix {
                bisac_categories: record.bisac_categories,
            },
        }
    }

    fn transform_sheet(&self, record: SheetRecord) -> Book {
        let kind = if record
            .material_type
            .as_deref()
            .map_or(false, |m| m.to_lowercase().contains("book"))
        {
            BookType::Book
        } else {
            BookType::Other
        };

        Book {
            title: Title {
                main: present(record.title_main).unwrap_or_else(|| UNTITLED.to_owned()),
                subtitle: present(record.title_subtitle),
            },
            creators: record
                .author
                .map(|name| {
                    vec![Creator {
                        name,
                        role: "Author".to_owned(),
                    }]
                })
                .unwrap_or_default(),
            copyright_date: parse_int(record.publication_year),
            summary: NO_SUMMARY.to_owned(),
            series: Series {
                name: present(record.series_title),
                position: None,
            },
            genre: Genre {
                main: present(record.subject_main),
                subgenres: record.subject_other,
            },
            form: present(record.material_type),
            pages: None,
            isbn: Isbn {
                isbn13: present(record.isbn).unwrap_or_else(|| NO_ISBN13.to_owned()),
                isbn10: None,
            },
            kind,
            publisher: present(record.publisher),
            target_audience: None,
            extra: SourceExtra::Sheet {
                lexile: record.lexile,
                issn: record.issn,
            },
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Base-10 parse of the leading digit run, ignoring trailing non-digit
/// content. A value with no leading digits is absent, never a string.
fn parse_int(value: Option<String>) -> Option<i32> {
    value.and_then(|v| {
        v.trim()
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .and_then(|digits| digits.parse().ok())
    })
}
