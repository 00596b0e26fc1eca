use crate::config::ClassificationConfig;
use crate::error::{OutlineError, OutlineResult};
use crate::types::LineKind;
use regex::Regex;

/// A compiled heading rule.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    pub name: String,
    pub kind: LineKind,
    pattern: Regex,
}

impl HeadingRule {
    pub fn new(name: &str, kind: LineKind, pattern: &str) -> OutlineResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| OutlineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            kind,
            pattern: regex,
        })
    }

    pub fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// Classifies cleaned lines as main titles, sub-titles or content.
///
/// Rules are evaluated in order and the first match wins, so a line that
/// matches both a main-title and a sub-title pattern ("Chapter Definitions")
/// is a main title. Lines matching no rule are content.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: Vec<HeadingRule>,
}

impl LineClassifier {
    pub fn new(config: &ClassificationConfig) -> OutlineResult<Self> {
        let rules = config
            .rules
            .iter()
            .map(|rule| HeadingRule::new(&rule.name, rule.kind, &rule.pattern))
            .collect::<OutlineResult<Vec<_>>>()?;

        tracing::debug!(rules = rules.len(), "compiled heading rules");
        Ok(Self { rules })
    }

    pub fn with_defaults() -> OutlineResult<Self> {
        Self::new(&ClassificationConfig::default())
    }

    pub fn rules(&self) -> &[HeadingRule] {
        &self.rules
    }

    /// Append a rule after the existing ones.
    pub fn push_rule(&mut self, rule: HeadingRule) {
        self.rules.push(rule);
    }

    pub fn classify(&self, line: &str) -> LineKind {
        self.rules
            .iter()
            .find(|rule| rule.matches(line))
            .map(|rule| rule.kind)
            .unwrap_or(LineKind::Content)
    }
}
