use crate::types::*;
use anyhow::{bail, Result};
use std::path::Path;

/// On-disk encodings for an `OutlineReport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Guess from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                OutputFormat::Yaml
            }
            _ => OutputFormat::Json,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => bail!("unknown output format '{}' (expected json or yaml)", other),
        }
    }
}

impl OutlineReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.to_json(),
            OutputFormat::Yaml => self.to_yaml(),
        }
    }

    pub fn save_with_format(&self, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
        std::fs::write(path, self.render(format)?)?;
        Ok(())
    }

    /// The outline alone, without the envelope.
    pub fn outline_json(&self) -> Result<serde_json::Value> {
        Ok(match &self.outline {
            Outline::Paragraphs(paragraphs) => serde_json::to_value(paragraphs)?,
            Outline::Mindmap(root) => serde_json::to_value(root)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> OutlineReport {
        OutlineReport::new(
            SourceInfo {
                name: "doc.txt".to_string(),
                page_count: 1,
                content_hash: "abc".to_string(),
            },
            OutlineMode::Flat,
            Outline::Paragraphs(vec![ParagraphNode::leaf(
                Some("Paragraph 1: Hi.".to_string()),
                "Hi.",
            )]),
        )
    }

    #[test]
    fn json_envelope_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_report().to_json().unwrap()).unwrap();
        assert_eq!(json["schema_version"], SCHEMA_VERSION);
        assert_eq!(json["mode"], "flat");
        assert_eq!(json["source"]["page_count"], 1);
        assert_eq!(json["outline"]["kind"], "paragraphs");
        assert_eq!(json["outline"]["data"][0]["content"], "Hi.");
    }

    #[test]
    fn yaml_parses_back() {
        let yaml = sample_report().to_yaml().unwrap();
        let parsed: OutlineReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.source.name, "doc.txt");
        assert!(matches!(parsed.outline, Outline::Paragraphs(ref p) if p.len() == 1));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::from_path(Path::new("out.YAML")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Json);
    }

    #[test]
    fn outline_json_drops_envelope() {
        let value = sample_report().outline_json().unwrap();
        assert_eq!(value[0]["title"], "Paragraph 1: Hi.");
    }
}
