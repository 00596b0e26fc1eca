//! Page text sources
//!
//! Everything upstream of the outline core: a document that yields its text
//! page by page. The core never looks at document bytes; it only consumes
//! this trait.
//!
//! ## Available Sources
//!
//! - `MemorySource` - pages already held as strings
//! - `PlainTextSource` - text with form-feed page breaks (`pdftotext` output)
//! - `XhtmlSource` - Tika-style XHTML with one `<div class="page">` per page

pub mod memory;
pub mod plain_text;
pub mod xhtml;

pub use memory::MemorySource;
pub use plain_text::PlainTextSource;
pub use xhtml::XhtmlSource;

use crate::error::OutlineResult;
use std::path::Path;

/// An ordered collection of pages, each yielding its extracted text.
///
/// Page indices are 0-based.
pub trait PageTextSource {
    fn page_count(&self) -> usize;

    /// Extracted text of one page. Failing here fails the whole request.
    fn get_text(&self, page_index: usize) -> OutlineResult<String>;

    /// Human-readable name, usually the file name
    fn name(&self) -> &str;

    /// All pages in order. Stops at the first page that fails.
    fn pages(&self) -> OutlineResult<Vec<String>> {
        (0..self.page_count()).map(|i| self.get_text(i)).collect()
    }
}

/// Open a file with the source matching its extension.
///
/// `.xhtml`, `.html` and `.htm` are read as XHTML; anything else as plain
/// text with form-feed page breaks.
pub fn open_source(path: &Path) -> OutlineResult<Box<dyn PageTextSource>> {
    if XhtmlSource::supports_file_type(path) {
        Ok(Box::new(XhtmlSource::from_file(path)?))
    } else {
        Ok(Box::new(PlainTextSource::from_file(path)?))
    }
}

/// Base file name without extension, used as the default document title.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "document".to_string())
}
