//! Flat mode: fixed-size sentence groups.
//!
//! Each page is split into sentences, cleaned, and packed into paragraphs of
//! `sentences_per_paragraph` sentences. Leftovers are flushed at the end of
//! every page, so a paragraph never spans a page break. Only the paragraph
//! number carries over between pages.

use crate::config::GroupingConfig;
use crate::text::{split_sentences, TextNormalizer};
use crate::types::ParagraphNode;

/// State threaded from one page to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingState {
    /// Number given to the next emitted paragraph
    pub next_number: usize,
}

impl Default for GroupingState {
    fn default() -> Self {
        Self { next_number: 1 }
    }
}

pub struct ParagraphGrouper {
    config: GroupingConfig,
    normalizer: TextNormalizer,
}

impl ParagraphGrouper {
    pub fn new(config: GroupingConfig, normalizer: TextNormalizer) -> Self {
        Self { config, normalizer }
    }

    pub fn group_paragraphs<S: AsRef<str>>(&self, pages: &[S]) -> Vec<ParagraphNode> {
        let mut state = GroupingState::default();
        let mut paragraphs = Vec::new();
        for page in pages {
            let (next, page_paragraphs) = self.group_page(state, page.as_ref());
            state = next;
            paragraphs.extend(page_paragraphs);
        }
        paragraphs
    }

    /// Group one page. Returns the state for the next page and this page's
    /// paragraphs.
    pub fn group_page(
        &self,
        state: GroupingState,
        page_text: &str,
    ) -> (GroupingState, Vec<ParagraphNode>) {
        let group_size = self.config.sentences_per_paragraph.max(1);
        let mut number = state.next_number;
        let mut paragraphs = Vec::new();
        let mut buffer: Vec<String> = Vec::with_capacity(group_size);

        for sentence in split_sentences(page_text) {
            let clean = self.normalizer.clean(&sentence);
            if clean.trim().is_empty() {
                continue;
            }
            buffer.push(clean);

            if buffer.len() == group_size {
                paragraphs.push(self.flush(number, &buffer));
                number += 1;
                buffer.clear();
            }
        }

        if !buffer.is_empty() {
            paragraphs.push(self.flush(number, &buffer));
            number += 1;
        }

        tracing::debug!(
            paragraphs = paragraphs.len(),
            next_number = number,
            "grouped page"
        );
        (GroupingState { next_number: number }, paragraphs)
    }

    fn flush(&self, number: usize, buffer: &[String]) -> ParagraphNode {
        ParagraphNode::leaf(Some(self.heading(number, buffer)), buffer.join(" "))
    }

    fn heading(&self, number: usize, buffer: &[String]) -> String {
        let prefix = &self.config.title_prefix;
        match buffer.first() {
            Some(first) if !first.trim().is_empty() => format!("{prefix} {number}: {first}"),
            _ => format!("{prefix} {number}"),
        }
    }
}

impl Default for ParagraphGrouper {
    fn default() -> Self {
        Self::new(GroupingConfig::default(), TextNormalizer::default())
    }
}
