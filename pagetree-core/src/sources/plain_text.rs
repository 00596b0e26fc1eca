use super::PageTextSource;
use crate::error::{OutlineError, OutlineResult};
use std::path::Path;

/// Page separator written by `pdftotext` and most text extractors.
pub const FORM_FEED: char = '\x0c';

/// Plain text split into pages on form feeds.
///
/// Text without any form feed is a single page. An empty file has no pages,
/// and the empty segment after a trailing form feed is not a page.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    name: String,
    pages: Vec<String>,
}

impl PlainTextSource {
    pub fn from_string(name: impl Into<String>, text: &str) -> Self {
        let mut pages: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split(FORM_FEED).map(str::to_string).collect()
        };
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }

        Self {
            name: name.into(),
            pages,
        }
    }

    pub fn from_file(path: &Path) -> OutlineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        tracing::debug!(path = %path.display(), bytes = text.len(), "read plain text document");
        Ok(Self::from_string(name, &text))
    }
}

impl PageTextSource for PlainTextSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn get_text(&self, page_index: usize) -> OutlineResult<String> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or(OutlineError::PageOutOfRange {
                index: page_index,
                count: self.pages.len(),
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
