// Pagetree Core Library
//
// Turns page-by-page extracted text into paragraph outlines, section trees
// and mindmaps. Document decoding stays behind the `PageTextSource` trait.

pub mod types;
pub mod error;
pub mod config;
pub mod text;
pub mod classifier;
pub mod grouping;
pub mod hierarchy;
pub mod mindmap;
pub mod sources;
pub mod processor;
pub mod serialization;
pub mod timing;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{OutlineError, OutlineResult};
pub use config::OutlineConfig;
pub use classifier::LineClassifier;
pub use grouping::ParagraphGrouper;
pub use hierarchy::{HierarchyBuilder, HierarchyState};
pub use mindmap::{build_mindmap, MindmapReducer};
pub use processor::{calculate_content_hash, DocumentProcessor};
pub use serialization::OutputFormat;
pub use sources::{open_source, title_from_path, MemorySource, PageTextSource, PlainTextSource, XhtmlSource};
pub use text::{extract_first_sentence, split_sentences, TextNormalizer};
pub use timing::{PipelineTimer, StepTiming};
