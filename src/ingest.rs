//! File-level ingest entry points.
//!
//! One pure function per source format: raw input in, the file's canonical
//! records out, or a single fatal error for the whole file. No state crosses
//! invocations.

use indexmap::IndexMap;
use tracing::info;

use crate::config::OnixOptions;
use crate::error::{IngestError, IngestResult};
use crate::html::{HtmlStrip, MarkupStripper};
use crate::models::book::Book;
use crate::models::source_record::{SourceFormat, SourceRecord};
use crate::onix::extractor::OnixExtractor;
use crate::onix::value;
use crate::sheet;
use crate::transform::SchemaTransformer;

/// Parse an ONIX message with the default HTML stripper.
pub fn parse_onix(xml: &str, options: &OnixOptions) -> IngestResult<Vec<Book>> {
    parse_onix_with(xml, options, &MarkupStripper)
}

/// Parse an ONIX message, stripping summary markup through `html`.
pub fn parse_onix_with(
    xml: &str,
    options: &OnixOptions,
    html: &dyn HtmlStrip,
) -> IngestResult<Vec<Book>> {
    let root = value::parse_document(xml)?;
    let message = root
        .child("ONIXmessage")
        .ok_or_else(|| IngestError::Structure("missing ONIXmessage element".to_owned()))?;
    let products = message.seq("product");
    if products.is_empty() {
        return Err(IngestError::Structure(
            "ONIXmessage contains no product records".to_owned(),
        ));
    }

    let extractor = OnixExtractor::new(html, options);
    let transformer = SchemaTransformer::new();
    let books: Vec<Book> = products
        .iter()
        .map(|product| transformer.transform(SourceRecord::Onix(extractor.extract(product))))
        .collect();

    info!(records = books.len(), "parsed ONIX message");
    Ok(books)
}

/// Parse the first sheet of an XLSX workbook.
pub fn parse_xlsx(bytes: &[u8]) -> IngestResult<Vec<Book>> {
    let rows = sheet::read_xlsx_rows(bytes)?;
    Ok(transform_rows(rows, "XLSX"))
}

/// Parse a CSV export.
pub fn parse_csv(text: &str) -> IngestResult<Vec<Book>> {
    let rows = sheet::read_csv_rows(text)?;
    Ok(transform_rows(rows, "CSV"))
}

fn transform_rows(rows: Vec<IndexMap<String, String>>, format: &str) -> Vec<Book> {
    let transformer = SchemaTransformer::new();
    let books: Vec<Book> = rows
        .iter()
        .map(|row| transformer.transform(SourceRecord::Sheet(sheet::extract_row(row))))
        .collect();

    info!(records = books.len(), format, "parsed tabular export");
    books
}

/// Parse raw bytes according to an already-detected format.
pub fn parse(bytes: &[u8], format: SourceFormat, options: &OnixOptions) -> IngestResult<Vec<Book>> {
    match format {
        SourceFormat::Onix => parse_onix(&String::from_utf8_lossy(bytes), options),
        SourceFormat::Xlsx => parse_xlsx(bytes),
        SourceFormat::Csv => parse_csv(&String::from_utf8_lossy(bytes)),
    }
}
