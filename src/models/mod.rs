//! Data models for Shelfmark

pub mod book;
pub mod source_record;

// Re-export commonly used types
pub use book::{Book, BookType, Creator, Genre, Isbn, Series, SeriesPosition, SourceExtra, Title};
pub use source_record::{OnixCreator, OnixRecord, SheetRecord, SourceFormat, SourceRecord};
