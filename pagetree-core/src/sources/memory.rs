use super::PageTextSource;
use crate::error::{OutlineError, OutlineResult};

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    pages: Vec<String>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    pub fn from_strs(name: impl Into<String>, pages: &[&str]) -> Self {
        Self::new(name, pages.iter().map(|p| p.to_string()).collect())
    }
}

impl PageTextSource for MemorySource {
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
