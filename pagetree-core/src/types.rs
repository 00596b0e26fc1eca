use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The schema version stamped on every report.
/// Bump this when the output shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

// ===== OUTLINE NODES =====

/// One node of a paragraph outline.
///
/// Flat mode only produces titled leaves. Hierarchical mode produces
/// containers for main/sub titles and untitled leaves for content lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphNode {
    pub title: Option<String>,
    pub content: NodeContent,
}

/// Either plain text or an ordered list of child nodes.
///
/// Serialized untagged so the wire shape is `"content": "text"` or
/// `"content": [ ... ]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeContent {
    Leaf(String),
    Container(Vec<ParagraphNode>),
}

impl ParagraphNode {
    pub fn leaf(title: Option<String>, text: impl Into<String>) -> Self {
        Self {
            title,
            content: NodeContent::Leaf(text.into()),
        }
    }

    pub fn container(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: NodeContent::Container(Vec::new()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Leaf(_))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Leaf(text) => Some(text),
            NodeContent::Container(_) => None,
        }
    }

    pub fn children(&self) -> &[ParagraphNode] {
        match &self.content {
            NodeContent::Leaf(_) => &[],
            NodeContent::Container(children) => children,
        }
    }

    /// Mutable access to the child list. `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<ParagraphNode>> {
        match &mut self.content {
            NodeContent::Leaf(_) => None,
            NodeContent::Container(children) => Some(children),
        }
    }

    /// First leaf text found depth-first, including this node.
    pub fn first_leaf_text(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Leaf(text) => Some(text),
            NodeContent::Container(children) => {
                children.iter().find_map(|child| child.first_leaf_text())
            }
        }
    }

    /// Total number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}

/// Node of the 3-level summary tree: document, section, summary sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapNode {
    pub title: String,
    #[serde(default)]
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Depth of the tree rooted here (a lone node has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

// ===== CLASSIFICATION =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineKind {
    MainTitle,
    SubTitle,
    Content,
}

/// Which view of the document to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineMode {
    #[default]
    Flat,
    Hierarchical,
}

impl std::str::FromStr for OutlineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(OutlineMode::Flat),
            "hierarchical" | "tree" => Ok(OutlineMode::Hierarchical),
            other => Err(format!("unknown outline mode '{other}' (expected flat or hierarchical)")),
        }
    }
}

// ===== REPORT ENVELOPE =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub name: String,
    pub page_count: usize,
    /// SHA-256 over the page texts in order
    pub content_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Outline {
    Paragraphs(Vec<ParagraphNode>),
    Mindmap(MindmapNode),
}

/// The serialization-ready output of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub source: SourceInfo,
    pub mode: OutlineMode,
    pub outline: Outline,
}

impl OutlineReport {
    pub fn new(source: SourceInfo, mode: OutlineMode, outline: Outline) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            source,
            mode,
            outline,
        }
    }
}
