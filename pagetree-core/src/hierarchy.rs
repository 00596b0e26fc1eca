//! Hierarchical mode: title/subtitle/content tree.
//!
//! Lines are classified one by one and routed by two cursors, the open main
//! section and the open sub-section. Cursors survive page breaks, so a
//! section that starts on page 3 keeps collecting content on page 4.

use crate::classifier::LineClassifier;
use crate::config::{HierarchyConfig, OrphanSubtitlePolicy};
use crate::text::TextNormalizer;
use crate::types::{LineKind, ParagraphNode};

/// Position of the open sub-section inside the result tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubCursor {
    /// Child `child` of top-level node `main`
    Nested { main: usize, child: usize },
    /// A promoted orphan sub-title living at the top level
    TopLevel(usize),
}

/// Tree under construction plus the cursors routing the next line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyState {
    nodes: Vec<ParagraphNode>,
    current_main: Option<usize>,
    current_sub: Option<SubCursor>,
}

impl HierarchyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[ParagraphNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<ParagraphNode> {
        self.nodes
    }

    pub fn has_open_main(&self) -> bool {
        self.current_main.is_some()
    }

    pub fn has_open_sub(&self) -> bool {
        self.current_sub.is_some()
    }

    /// Title of the section that would receive the next content line.
    pub fn open_section_title(&self) -> Option<&str> {
        let node = match (self.current_sub, self.current_main) {
            (Some(SubCursor::Nested { main, child }), _) => {
                self.nodes.get(main).and_then(|m| m.children().get(child))
            }
            (Some(SubCursor::TopLevel(index)), _) => self.nodes.get(index),
            (None, Some(main)) => self.nodes.get(main),
            (None, None) => None,
        };
        node.and_then(|n| n.title.as_deref())
    }

    fn open_main(&mut self, title: String) {
        self.nodes.push(ParagraphNode::container(title));
        self.current_main = Some(self.nodes.len() - 1);
        self.current_sub = None;
    }

    fn open_sub(&mut self, title: String, orphans: OrphanSubtitlePolicy) {
        let section = ParagraphNode::container(title);

        if let Some(main) = self.current_main {
            if let Some(children) = self.nodes.get_mut(main).and_then(|m| m.children_mut()) {
                children.push(section);
                self.current_sub = Some(SubCursor::Nested {
                    main,
                    child: children.len() - 1,
                });
                return;
            }
        }

        match orphans {
            OrphanSubtitlePolicy::Promote => {
                tracing::debug!(title = ?section.title, "promoting sub-title without a main section");
                self.nodes.push(section);
                self.current_sub = Some(SubCursor::TopLevel(self.nodes.len() - 1));
            }
            OrphanSubtitlePolicy::Drop => {
                tracing::debug!(title = ?section.title, "dropping sub-title without a main section");
                self.current_sub = None;
            }
        }
    }

    fn push_content(&mut self, line: String, uncategorized_title: &str) {
        let target = match (self.current_sub, self.current_main) {
            (Some(SubCursor::Nested { main, child }), _) => self
                .nodes
                .get_mut(main)
                .and_then(|m| m.children_mut())
                .and_then(|children| children.get_mut(child))
                .and_then(|sub| sub.children_mut()),
            (Some(SubCursor::TopLevel(index)), _) => {
                self.nodes.get_mut(index).and_then(|n| n.children_mut())
            }
            (None, Some(main)) => self.nodes.get_mut(main).and_then(|m| m.children_mut()),
            (None, None) => None,
        };

        match target {
            Some(children) => children.push(ParagraphNode::leaf(None, line)),
            None => self
                .nodes
                .push(ParagraphNode::leaf(Some(uncategorized_title.to_string()), line)),
        }
    }
}

pub struct HierarchyBuilder {
    classifier: LineClassifier,
    normalizer: TextNormalizer,
    config: HierarchyConfig,
}

impl HierarchyBuilder {
    pub fn new(
        classifier: LineClassifier,
        normalizer: TextNormalizer,
        config: HierarchyConfig,
    ) -> Self {
        Self {
            classifier,
            normalizer,
            config,
        }
    }

    pub fn build_hierarchy<S: AsRef<str>>(&self, pages: &[S]) -> Vec<ParagraphNode> {
        pages
            .iter()
            .fold(HierarchyState::new(), |state, page| {
                self.process_page(state, page.as_ref())
            })
            .into_nodes()
    }

    /// Route every non-blank line of one page. Cursors in `state` carry over
    /// to the next page unchanged.
    pub fn process_page(&self, mut state: HierarchyState, page_text: &str) -> HierarchyState {
        let mut counts = [0usize; 3];
        for raw in page_text.lines() {
            if raw.trim().is_empty() {
                continue;
            }
            let line = self.normalizer.clean(raw).trim().to_string();
            // A line holding nothing but a watermark
            if line.is_empty() {
                continue;
            }

            let kind = self.classifier.classify(&line);
            counts[kind as usize] += 1;
            match kind {
                LineKind::MainTitle => state.open_main(line),
                LineKind::SubTitle => state.open_sub(line, self.config.orphan_subtitles),
                LineKind::Content => state.push_content(line, &self.config.uncategorized_title),
            }
        }

        tracing::debug!(
            main_titles = counts[LineKind::MainTitle as usize],
            sub_titles = counts[LineKind::SubTitle as usize],
            content = counts[LineKind::Content as usize],
            "processed page lines"
        );
        state
    }
}
