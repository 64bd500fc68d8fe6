//! Spreadsheet field extractor.
//!
//! XLSX workbooks and CSV exports share one row-map extraction: a row of
//! column-keyed cells becomes a [`SheetRecord`]. Header text is preserved
//! verbatim, so column names like `Title/Subtitle` key directly.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::IngestResult;
use crate::models::source_record::SheetRecord;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Trim, then collapse internal whitespace runs to single spaces. Empty
/// after cleaning is absent.
fn clean(raw: &str) -> Option<String> {
    let cleaned = WHITESPACE.replace_all(raw.trim(), " ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.into_owned())
    }
}

/// Map one row of column-keyed cells to an intermediate record.
pub fn extract_row(row: &IndexMap<String, String>) -> SheetRecord {
    let cell = |name: &str| row.get(name).and_then(|v| clean(v));

    let (title_main, title_subtitle) = split_title(cell("Title/Subtitle"));
    let (subject_main, subject_other) = split_subjects(cell("Subject"));

    SheetRecord {
        title_main,
        title_subtitle,
        series_title: cell("Series Title"),
        author: cell("Author"),
        publication_year: cell("Publication Year"),
        publisher: cell("Publisher").map(|p| p.trim_end_matches(',').trim_end().to_owned()),
        material_type: cell("Material Type"),
        lexile: cell("Lexile"),
        subject_main,
        subject_other,
        isbn: cell("ISBN"),
        issn: cell("ISSN"),
    }
}

/// Split a combined title on `:`; text before the first colon is the main
/// title, the remaining trimmed parts rejoin as the subtitle.
fn split_title(text: Option<String>) -> (Option<String>, Option<String>) {
    let Some(text) = text else {
        return (None, None);
    };
    let mut parts = text.split(':').map(str::trim);
    let main = parts.next().filter(|p| !p.is_empty()).map(str::to_owned);
    let rest: Vec<&str> = parts.collect();
    let subtitle = if rest.is_empty() {
        None
    } else {
        Some(rest.join(": ")).filter(|s| !s.is_empty())
    };
    (main, subtitle)
}

/// Split a combined subject list on `;`; the first segment is the main
/// subject, remaining trimmed non-empty segments follow in order.
fn split_subjects(text: Option<String>) -> (Option<String>, Vec<String>) {
    let Some(text) = text else {
        return (None, Vec::new());
    };
    let mut parts = text.split(';').map(str::trim);
    let main = parts.next().filter(|p| !p.is_empty()).map(str::to_owned);
    let other = parts.filter(|p| !p.is_empty()).map(str::to_owned).collect();
    (main, other)
}

/// Read the first sheet of an XLSX workbook as column-keyed rows. The first
/// row supplies the header names; empty cells are skipped.
pub fn read_xlsx_rows(bytes: &[u8]) -> IngestResult<Vec<IndexMap<String, String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Vec::new()),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(ToString::to_string).collect(),
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    for row in rows {
        let mut map = IndexMap::new();
        for (i, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            if let Some(header) = headers.get(i) {
                map.insert(header.clone(), cell.to_string());
            }
        }
        if !map.is_empty() {
            out.push(map);
        }
    }
    Ok(out)
}

/// Read CSV text as column-keyed rows, feeding the same extraction as XLSX.
pub fn read_csv_rows(text: &str) -> IngestResult<Vec<IndexMap<String, String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut map = IndexMap::new();
        for (i, field) in record.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            if let Some(header) = headers.get(i) {
                map.insert(header.clone(), field.to_owned());
            }
        }
        if !map.is_empty() {
            out.push(map);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("  My   Book  "), Some("My Book".to_owned()));
        assert_eq!(clean("one\t\ntwo"), Some("one two".to_owned()));
        assert_eq!(clean("   "), None);
        assert_eq!(clean(""), None);
    }

    #[test]
    fn test_split_title_on_first_colon() {
        let (main, subtitle) = split_title(Some("Foo: Bar: Baz".to_owned()));
        assert_eq!(main.as_deref(), Some("Foo"));
        assert_eq!(subtitle.as_deref(), Some("Bar: Baz"));
    }

    #[test]
    fn test_split_title_without_colon() {
        let (main, subtitle) = split_title(Some("My Book".to_owned()));
        assert_eq!(main.as_deref(), Some("My Book"));
        assert_eq!(subtitle, None);
    }

    #[test]
    fn test_split_title_trailing_colon() {
        let (main, subtitle) = split_title(Some("My Book:".to_owned()));
        assert_eq!(main.as_deref(), Some("My Book"));
        assert_eq!(subtitle, None);
    }

    #[test]
    fn test_split_subjects_drops_empty_segments() {
        let (main, other) = split_subjects(Some("A; B ; C".to_owned()));
        assert_eq!(main.as_deref(), Some("A"));
        assert_eq!(other, vec!["B", "C"]);

        let (main, other) = split_subjects(Some("A;;C;".to_owned()));
        assert_eq!(main.as_deref(), Some("A"));
        assert_eq!(other, vec!["C"]);
    }

    #[test]
    fn test_extract_row_full() {
        let record = extract_row(&row(&[
            ("Title/Subtitle", "Oceans: A Field Guide"),
            ("Series Title", "Nature  Guides"),
            ("Author", "Jane Doe"),
            ("Publication Year", "2019"),
            ("Publisher", "Penguin Random House, "),
            ("Material Type", "Paperback Book"),
            ("Lexile", "880L"),
            ("Subject", "Science; Marine Biology"),
            ("ISBN", "9780000000001"),
            ("ISSN", "1234-5678"),
        ]));

        assert_eq!(record.title_main.as_deref(), Some("Oceans"));
        assert_eq!(record.title_subtitle.as_deref(), Some("A Field Guide"));
        assert_eq!(record.series_title.as_deref(), Some("Nature Guides"));
        assert_eq!(record.author.as_deref(), Some("Jane Doe"));
        assert_eq!(record.publication_year.as_deref(), Some("2019"));
        assert_eq!(record.publisher.as_deref(), Some("Penguin Random House"));
        assert_eq!(record.material_type.as_deref(), Some("Paperback Book"));
        assert_eq!(record.lexile.as_deref(), Some("880L"));
        assert_eq!(record.subject_main.as_deref(), Some("Science"));
        assert_eq!(record.subject_other, vec!["Marine Biology"]);
        assert_eq!(record.isbn.as_deref(), Some("9780000000001"));
        assert_eq!(record.issn.as_deref(), Some("1234-5678"));
    }

    #[test]
    fn test_extract_row_empty_cells_absent() {
        let record = extract_row(&row(&[("Title/Subtitle", "My Book"), ("ISBN", "  ")]));
        assert_eq!(record.title_main.as_deref(), Some("My Book"));
        assert_eq!(record.isbn, None);
        assert_eq!(record.author, None);
        assert!(record.subject_other.is_empty());
    }

    #[test]
    fn test_read_csv_rows_preserves_headers_verbatim() {
        let csv = "Title/Subtitle,Material Type\nMy Book,Paperback\n";
        let rows = read_csv_rows(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Title/Subtitle").map(String::as_str), Some("My Book"));
        assert_eq!(rows[0].get("Material Type").map(String::as_str), Some("Paperback"));
    }

    #[test]
    fn test_read_csv_rows_skips_blank_rows() {
        let csv = "Title/Subtitle,Author\nMy Book,Jane\n,\nOther Book,\n";
        let rows = read_csv_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(!rows[1].contains_key("Author"));
    }
}
