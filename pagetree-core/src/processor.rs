use crate::classifier::LineClassifier;
use crate::config::OutlineConfig;
use crate::grouping::ParagraphGrouper;
use crate::hierarchy::HierarchyBuilder;
use crate::mindmap::MindmapReducer;
use crate::sources::{title_from_path, PageTextSource};
use crate::text::TextNormalizer;
use crate::timing::PipelineTimer;
use crate::types::*;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Instant;

/// Request-level entry point: pages in, outline out.
///
/// Holds no per-document state, so one processor can serve any number of
/// independent requests.
pub struct DocumentProcessor {
    config: OutlineConfig,
    grouper: ParagraphGrouper,
    hierarchy: HierarchyBuilder,
    reducer: MindmapReducer,
}

impl DocumentProcessor {
    pub fn new() -> Result<Self> {
        Self::with_config(OutlineConfig::default())
    }

    /// Build every pipeline stage from `config`. Fails on invalid settings or
    /// heading patterns that don't compile.
    pub fn with_config(config: OutlineConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = TextNormalizer::new(&config.normalizer);
        let classifier = LineClassifier::new(&config.classification)
            .context("Failed to compile heading rules")?;

        Ok(Self {
            grouper: ParagraphGrouper::new(config.grouping.clone(), normalizer.clone()),
            hierarchy: HierarchyBuilder::new(classifier, normalizer, config.hierarchy.clone()),
            reducer: MindmapReducer::new(config.mindmap.clone()),
            config,
        })
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Flat grouped paragraphs or the hierarchical tree, depending on `mode`.
    pub fn upload_document(
        &self,
        source: &dyn PageTextSource,
        mode: OutlineMode,
    ) -> Result<Vec<ParagraphNode>> {
        let pages = read_pages(source)?;
        Ok(self.outline_pages(&pages, mode))
    }

    /// Summary tree of the flat paragraphs. The root is titled `title`, else
    /// the source name without its extension.
    pub fn generate_mindmap(
        &self,
        source: &dyn PageTextSource,
        title: Option<&str>,
    ) -> Result<MindmapNode> {
        self.generate_mindmap_from(source, OutlineMode::Flat, title)
    }

    /// Summary tree of either outline. Hierarchical outlines hold containers,
    /// which only reduce under `ContainerPolicy::FirstLeaf`.
    pub fn generate_mindmap_from(
        &self,
        source: &dyn PageTextSource,
        mode: OutlineMode,
        title: Option<&str>,
    ) -> Result<MindmapNode> {
        let pages = read_pages(source)?;
        let paragraphs = self.outline_pages(&pages, mode);
        let title = document_title(source, title);
        Ok(self.reducer.build_mindmap(&title, &paragraphs)?)
    }

    /// `upload_document` wrapped in a report envelope.
    pub fn upload_report(
        &self,
        source: &dyn PageTextSource,
        mode: OutlineMode,
        timer: &mut PipelineTimer,
    ) -> Result<OutlineReport> {
        let started = Instant::now();

        let pages = timer.measure("Text Extraction", || read_pages(source))?;
        let paragraphs = timer.measure(outline_step(mode), || self.outline_pages(&pages, mode));
        let info = timer.measure("Content Hashing", || source_info(source, &pages));

        tracing::info!(
            source = %info.name,
            pages = info.page_count,
            ?mode,
            top_level = paragraphs.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built paragraph outline"
        );
        Ok(OutlineReport::new(info, mode, Outline::Paragraphs(paragraphs)))
    }

    /// `generate_mindmap_from` wrapped in a report envelope stamped with the
    /// outline mode it was reduced from.
    pub fn mindmap_report(
        &self,
        source: &dyn PageTextSource,
        mode: OutlineMode,
        title: Option<&str>,
        timer: &mut PipelineTimer,
    ) -> Result<OutlineReport> {
        let started = Instant::now();

        let pages = timer.measure("Text Extraction", || read_pages(source))?;
        let paragraphs = timer.measure(outline_step(mode), || self.outline_pages(&pages, mode));
        let title = document_title(source, title);
        let root = timer.measure("Mindmap Reduction", || {
            self.reducer.build_mindmap(&title, &paragraphs)
        })?;
        let info = timer.measure("Content Hashing", || source_info(source, &pages));

        tracing::info!(
            source = %info.name,
            pages = info.page_count,
            ?mode,
            sections = root.children.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built mindmap"
        );
        Ok(OutlineReport::new(info, mode, Outline::Mindmap(root)))
    }

    fn outline_pages(&self, pages: &[String], mode: OutlineMode) -> Vec<ParagraphNode> {
        match mode {
            OutlineMode::Flat => self.grouper.group_paragraphs(pages),
            OutlineMode::Hierarchical => self.hierarchy.build_hierarchy(pages),
        }
    }
}

fn outline_step(mode: OutlineMode) -> &'static str {
    match mode {
        OutlineMode::Flat => "Paragraph Grouping",
        OutlineMode::Hierarchical => "Hierarchy Building",
    }
}

/// Read every page in order; the first failing page fails the request.
fn read_pages(source: &dyn PageTextSource) -> Result<Vec<String>> {
    let count = source.page_count();
    let mut pages = Vec::with_capacity(count);
    for index in 0..count {
        let text = source
            .get_text(index)
            .with_context(|| format!("Failed to read page {} of {}", index, source.name()))?;
        tracing::debug!(page = index, chars = text.chars().count(), "extracted page text");
        pages.push(text);
    }
    Ok(pages)
}

fn document_title(source: &dyn PageTextSource, title: Option<&str>) -> String {
    match title {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => title_from_path(Path::new(source.name())),
    }
}

fn source_info(source: &dyn PageTextSource, pages: &[String]) -> SourceInfo {
    SourceInfo {
        name: source.name().to_string(),
        page_count: pages.len(),
        content_hash: calculate_content_hash(pages),
    }
}

/// SHA-256 over the page texts, each prefixed by its byte length so page
/// boundaries affect the hash.
pub fn calculate_content_hash<S: AsRef<str>>(pages: &[S]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pages.len().to_le_bytes());
    for page in pages {
        let page = page.as_ref();
        hasher.update(page.len().to_le_bytes());
        hasher.update(page.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContainerPolicy, MindmapConfig};
    use crate::error::OutlineError;
    use crate::sources::MemorySource;

    #[test]
    fn upload_flat_groups_sentences() {
        let processor = DocumentProcessor::new().unwrap();
        let source = MemorySource::from_strs("doc.txt", &["One. Two? Three!"]);
        let paragraphs = processor.upload_document(&source, OutlineMode::Flat).unwrap();

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].title.as_deref(), Some("Paragraph 1: One."));
        assert_eq!(paragraphs[0].text(), Some("One. Two? Three!"));
    }

    #[test]
    fn upload_hierarchical_builds_sections() {
        let processor = DocumentProcessor::new().unwrap();
        let source = MemorySource::from_strs("doc.txt", &["Introduction\nhello world"]);
        let tree = processor
            .upload_document(&source, OutlineMode::Hierarchical)
            .unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title.as_deref(), Some("Introduction"));
        assert_eq!(tree[0].children()[0].text(), Some("hello world"));
    }

    #[test]
    fn empty_document_is_not_an_error() {
        let processor = DocumentProcessor::new().unwrap();
        let source = MemorySource::default();
        assert!(processor.upload_document(&source, OutlineMode::Flat).unwrap().is_empty());
        assert!(processor
            .upload_document(&source, OutlineMode::Hierarchical)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn mindmap_title_defaults_to_file_stem() {
        let processor = DocumentProcessor::new().unwrap();
        let source = MemorySource::from_strs("Soil Science.pdf", &["Soil is alive. It breathes."]);

        let root = processor.generate_mindmap(&source, None).unwrap();
        assert_eq!(root.title, "Soil Science");
        assert_eq!(root.children[0].children[0].title, "Soil is alive.");

        let named = processor.generate_mindmap(&source, Some("Notes")).unwrap();
        assert_eq!(named.title, "Notes");

        let blank = processor.generate_mindmap(&source, Some("  ")).unwrap();
        assert_eq!(blank.title, "Soil Science");
    }

    #[test]
    fn failing_page_fails_the_request() {
        struct Broken;
        impl PageTextSource for Broken {
            fn page_count(&self) -> usize {
                2
            }
            fn get_text(&self, page_index: usize) -> crate::error::OutlineResult<String> {
                if page_index == 1 {
                    Err(OutlineError::Extraction {
                        page: 1,
                        reason: "corrupt stream".to_string(),
                    })
                } else {
                    Ok("Fine.".to_string())
                }
            }
            fn name(&self) -> &str {
                "broken.pdf"
            }
        }

        let processor = DocumentProcessor::new().unwrap();
        let err = processor
            .upload_document(&Broken, OutlineMode::Flat)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OutlineError>(),
            Some(OutlineError::Extraction { page: 1, .. })
        ));
        assert!(processor.generate_mindmap(&Broken, None).is_err());
    }

    #[test]
    fn invalid_heading_pattern_fails_construction() {
        let mut config = OutlineConfig::default();
        config.classification.rules[0].pattern = "(unclosed".to_string();
        assert!(DocumentProcessor::with_config(config).is_err());
    }

    #[test]
    fn reports_carry_source_info() {
        let processor = DocumentProcessor::new().unwrap();
        let source = MemorySource::from_strs("doc.txt", &["A. B.", "C."]);

        let report = processor
            .upload_report(&source, OutlineMode::Flat, &mut PipelineTimer::disabled())
            .unwrap();
        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.source.name, "doc.txt");
        assert_eq!(report.source.page_count, 2);
        assert_eq!(report.source.content_hash, calculate_content_hash(&["A. B.", "C."]));
        assert!(matches!(report.outline, Outline::Paragraphs(ref p) if p.len() == 2));

        let report = processor
            .mindmap_report(&source, OutlineMode::Flat, None, &mut PipelineTimer::disabled())
            .unwrap();
        assert_eq!(report.mode, OutlineMode::Flat);
        assert!(matches!(report.outline, Outline::Mindmap(ref m) if m.title == "doc"));
    }

    #[test]
    fn content_hash_depends_on_page_boundaries() {
        assert_ne!(
            calculate_content_hash(&["ab", "c"]),
            calculate_content_hash(&["a", "bc"])
        );
        assert_eq!(calculate_content_hash(&["x"]).len(), 64);
    }

    fn first_leaf_processor() -> DocumentProcessor {
        DocumentProcessor::with_config(OutlineConfig {
            mindmap: MindmapConfig {
                container_policy: ContainerPolicy::FirstLeaf,
            },
            ..OutlineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn hierarchical_mindmap_needs_first_leaf_policy() {
        let source = MemorySource::from_strs(
            "soil.txt",
            &["Introduction\nSoil is alive. It breathes.\nTypes of soil\nClay is dense."],
        );

        let strict = DocumentProcessor::new().unwrap();
        let err = strict
            .generate_mindmap_from(&source, OutlineMode::Hierarchical, None)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OutlineError>(),
            Some(OutlineError::ContainerParagraph { title }) if title == "Introduction"
        ));

        let root = first_leaf_processor()
            .generate_mindmap_from(&source, OutlineMode::Hierarchical, None)
            .unwrap();
        assert_eq!(root.title, "soil");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].title, "Introduction");
        assert_eq!(root.children[0].children[0].title, "Soil is alive.");
    }

    #[test]
    fn mindmap_report_is_stamped_with_its_mode() {
        let source = MemorySource::from_strs("soil.txt", &["Chapter 1\nRoots hold soil. Worms help."]);
        let mut timer = PipelineTimer::new(true);
        let report = first_leaf_processor()
            .mindmap_report(&source, OutlineMode::Hierarchical, Some("Soil"), &mut timer)
            .unwrap();

        assert_eq!(report.mode, OutlineMode::Hierarchical);
        assert!(matches!(
            report.outline,
            Outline::Mindmap(ref root) if root.children[0].children[0].title == "Roots hold soil."
        ));

        let steps: Vec<&str> = timer.steps().iter().map(|t| t.step).collect();
        assert_eq!(
            steps,
            vec!["Text Extraction", "Hierarchy Building", "Mindmap Reduction", "Content Hashing"]
        );
    }
}
