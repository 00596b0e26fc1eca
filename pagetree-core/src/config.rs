use crate::types::LineKind;
use anyhow::Result;
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_sentences_per_paragraph() -> usize {
    7
}

fn default_title_prefix() -> String {
    "Paragraph".to_string()
}

fn default_uncategorized_title() -> String {
    "Uncategorized".to_string()
}

fn default_watermarks() -> Vec<String> {
    vec!["www.alkottob.com".to_string()]
}

fn default_heading_rules() -> Vec<HeadingRuleConfig> {
    vec![
        HeadingRuleConfig {
            name: "main-title".to_string(),
            kind: LineKind::MainTitle,
            pattern: r"(?i)^(introduction|chapter|overview|section\s+\d+)".to_string(),
        },
        HeadingRuleConfig {
            name: "sub-title".to_string(),
            kind: LineKind::SubTitle,
            pattern: r"(?i)(definition|types|applications|advantages|disadvantages)".to_string(),
        },
    ]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineConfig {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    #[serde(default)]
    pub mindmap: MindmapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Literal boilerplate strings removed from every sentence and line
    #[serde(default = "default_watermarks")]
    pub watermarks: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            watermarks: default_watermarks(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Number of sentences that closes a paragraph
    #[serde(default = "default_sentences_per_paragraph")]
    pub sentences_per_paragraph: usize,
    /// Word used in generated titles ("Paragraph 3: ...")
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            sentences_per_paragraph: default_sentences_per_paragraph(),
            title_prefix: default_title_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Ordered heading rules; the first matching rule decides the line kind.
    /// Lines matching no rule are content.
    #[serde(default = "default_heading_rules")]
    pub rules: Vec<HeadingRuleConfig>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            rules: default_heading_rules(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingRuleConfig {
    /// Label used in logs
    pub name: String,
    pub kind: LineKind,
    /// Regex tested against the cleaned line
    pub pattern: String,
}

/// What to do with a sub-title that appears before any main title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanSubtitlePolicy {
    /// Append it to the top level as its own section
    #[default]
    Promote,
    /// Discard the heading line; following content is routed as if it never appeared
    Drop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Title of the top-level node wrapping content seen before any heading
    #[serde(default = "default_uncategorized_title")]
    pub uncategorized_title: String,
    #[serde(default)]
    pub orphan_subtitles: OrphanSubtitlePolicy,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            uncategorized_title: default_uncategorized_title(),
            orphan_subtitles: OrphanSubtitlePolicy::default(),
        }
    }
}

/// How the mindmap reducer treats container paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerPolicy {
    /// Fail with a typed error
    #[default]
    Reject,
    /// Summarize the first leaf text found depth-first
    FirstLeaf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindmapConfig {
    #[serde(default)]
    pub container_policy: ContainerPolicy,
}

impl OutlineConfig {
    /// Load config from file path
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: OutlineConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!(path = p, error = %e, "failed to load config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.grouping.sentences_per_paragraph == 0 {
            anyhow::bail!("grouping.sentences_per_paragraph must be at least 1");
        }
        if self.normalizer.watermarks.iter().any(|w| w.is_empty()) {
            anyhow::bail!("normalizer.watermarks must not contain empty strings");
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = OutlineConfig::default();
        assert_eq!(config.grouping.sentences_per_paragraph, 7);
        assert_eq!(config.grouping.title_prefix, "Paragraph");
        assert_eq!(config.normalizer.watermarks, vec!["www.alkottob.com"]);
        assert_eq!(config.hierarchy.uncategorized_title, "Uncategorized");
        assert_eq!(config.hierarchy.orphan_subtitles, OrphanSubtitlePolicy::Promote);
        assert_eq!(config.mindmap.container_policy, ContainerPolicy::Reject);

        let kinds: Vec<LineKind> = config.classification.rules.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![LineKind::MainTitle, LineKind::SubTitle]);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let yaml = "grouping:\n  sentences_per_paragraph: 3\nhierarchy:\n  orphan_subtitles: drop\n";
        let config: OutlineConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.grouping.sentences_per_paragraph, 3);
        assert_eq!(config.grouping.title_prefix, "Paragraph");
        assert_eq!(config.hierarchy.orphan_subtitles, OrphanSubtitlePolicy::Drop);
        assert_eq!(config.hierarchy.uncategorized_title, "Uncategorized");
        assert_eq!(config.classification.rules.len(), 2);
    }

    #[test]
    fn yaml_roundtrip_preserves_rules() {
        let config = OutlineConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("MAIN_TITLE"));

        let back: OutlineConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.classification.rules.len(), config.classification.rules.len());
        assert_eq!(back.classification.rules[0].pattern, config.classification.rules[0].pattern);
    }

    #[test]
    fn validate_rejects_zero_group_size() {
        let mut config = OutlineConfig::default();
        config.grouping.sentences_per_paragraph = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file_reads_yaml() {
        let path = std::env::temp_dir().join("pagetree_config_test.yaml");
        std::fs::write(&path, "mindmap:\n  container_policy: first_leaf\n").unwrap();

        let config = OutlineConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.mindmap.container_policy, ContainerPolicy::FirstLeaf);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn load_with_fallback_uses_defaults_for_missing_file() {
        let config = OutlineConfig::load_with_fallback(Some("/nonexistent/pagetree.yaml"));
        assert_eq!(config.grouping.sentences_per_paragraph, 7);
    }
}
