use crate::config::{ContainerPolicy, MindmapConfig};
use crate::error::{OutlineError, OutlineResult};
use crate::text::extract_first_sentence;
use crate::types::{MindmapNode, NodeContent, ParagraphNode};

/// Folds a paragraph list into a document → section → summary tree.
#[derive(Debug, Clone, Default)]
pub struct MindmapReducer {
    config: MindmapConfig,
}

impl MindmapReducer {
    pub fn new(config: MindmapConfig) -> Self {
        Self { config }
    }

    /// One section per paragraph, each with a single first-sentence leaf.
    ///
    /// Container paragraphs are rejected unless the reducer is configured with
    /// `ContainerPolicy::FirstLeaf`.
    pub fn build_mindmap(
        &self,
        document_title: &str,
        paragraphs: &[ParagraphNode],
    ) -> OutlineResult<MindmapNode> {
        let children = paragraphs
            .iter()
            .map(|paragraph| self.section_node(paragraph))
            .collect::<OutlineResult<Vec<_>>>()?;

        tracing::debug!(sections = children.len(), "built mindmap");
        Ok(MindmapNode {
            title: document_title.to_string(),
            children,
        })
    }

    fn section_node(&self, paragraph: &ParagraphNode) -> OutlineResult<MindmapNode> {
        let title = paragraph.title.clone().unwrap_or_default();
        let text = match (&paragraph.content, self.config.container_policy) {
            (NodeContent::Leaf(text), _) => text.as_str(),
            (NodeContent::Container(_), ContainerPolicy::FirstLeaf) => paragraph
                .first_leaf_text()
                .ok_or_else(|| OutlineError::ContainerParagraph { title: title.clone() })?,
            (NodeContent::Container(_), ContainerPolicy::Reject) => {
                return Err(OutlineError::ContainerParagraph { title });
            }
        };

        Ok(MindmapNode {
            title,
            children: vec![MindmapNode::new(extract_first_sentence(text))],
        })
    }
}

/// Shorthand for the strict reducer.
pub fn build_mindmap(
    document_title: &str,
    paragraphs: &[ParagraphNode],
) -> OutlineResult<MindmapNode> {
    MindmapReducer::default().build_mindmap(document_title, paragraphs)
}
