use crate::config::NormalizerConfig;

/// Removes known watermark strings from extracted text.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    watermarks: Vec<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

impl TextNormalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            watermarks: config
                .watermarks
                .iter()
                .filter(|w| !w.is_empty())
                .cloned()
                .collect(),
        }
    }

    pub fn watermarks(&self) -> &[String] {
        &self.watermarks
    }

    /// Remove every occurrence of every watermark, leaving all other
    /// characters (whitespace included) untouched.
    ///
    /// Runs to a fixed point: a removal can join the text around it into a
    /// fresh occurrence, which a single pass would leave behind.
    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = text.to_string();
        loop {
            let mut changed = false;
            for watermark in &self.watermarks {
                if cleaned.contains(watermark.as_str()) {
                    cleaned = cleaned.replace(watermark.as_str(), "");
                    changed = true;
                }
            }
            if !changed {
                return cleaned;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARK: &str = "www.alkottob.com";

    #[test]
    fn removes_all_occurrences() {
        let normalizer = TextNormalizer::default();
        let text = format!("{MARK}Start {MARK} middle.{MARK} end {MARK}");
        let cleaned = normalizer.clean(&text);
        assert_eq!(cleaned, "Start  middle. end ");
        assert!(!cleaned.contains(MARK));
    }

    #[test]
    fn leaves_other_text_untouched() {
        let normalizer = TextNormalizer::default();
        let text = "  Visit www.example.com\tfor more.  ";
        assert_eq!(normalizer.clean(text), text);
    }

    #[test]
    fn spliced_occurrences_are_removed() {
        let normalizer = TextNormalizer::default();
        let text = "www.alkwww.alkottob.comottob.com tail";
        assert_eq!(normalizer.clean(text), " tail");
    }

    #[test]
    fn clean_is_idempotent() {
        let normalizer = TextNormalizer::default();
        let inputs = [
            "",
            "plain text.",
            "www.alkottob.comwww.alkottob.com",
            "wwwww.alkottob.com.alkottob.com",
            "www.alkwww.alkottob.comottob.com",
        ];
        for input in inputs {
            let once = normalizer.clean(input);
            assert_eq!(normalizer.clean(&once), once, "not idempotent for {input:?}");
            assert!(!once.contains(MARK), "watermark left in {once:?}");
        }
    }

    #[test]
    fn multiple_watermarks_and_empty_entries() {
        let config = NormalizerConfig {
            watermarks: vec!["[scan]".to_string(), String::new(), "©site".to_string()],
        };
        let normalizer = TextNormalizer::new(&config);
        assert_eq!(normalizer.watermarks().len(), 2);
        assert_eq!(normalizer.clean("a[scan]b©site c"), "ab c");
    }
}
