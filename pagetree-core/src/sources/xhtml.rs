//! XHTML page source
//!
//! Reads the XHTML that Apache Tika (and similar extractors) emit for PDFs:
//! one `<div class="page">` per page and text in `<p>` blocks. Each `<p>`
//! becomes one line of page text.

use super::PageTextSource;
use crate::error::{OutlineError, OutlineResult};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// Pre-compiled regexes for XHTML parsing
static PAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div class="page"[^>]*>(.*?)</div>"#).unwrap());

static BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<body[^>]*>(.*?)</body>").unwrap());

static PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap());

static PARAGRAPH_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p(\s[^>]*)?>").unwrap());

static BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static NUMERIC_ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap());

/// Pages parsed out of one XHTML document.
#[derive(Debug, Clone)]
pub struct XhtmlSource {
    name: String,
    /// Raw inner markup of each page, converted to text on demand
    page_markup: Vec<String>,
}

impl XhtmlSource {
    pub fn from_markup(name: impl Into<String>, xhtml: &str) -> Self {
        let mut page_markup: Vec<String> = PAGE_REGEX
            .captures_iter(xhtml)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect();

        // No page blocks: treat a non-empty body as a single page
        if page_markup.is_empty() {
            if let Some(body) = BODY_REGEX.captures(xhtml).and_then(|c| c.get(1)) {
                if !TAG_REGEX.replace_all(body.as_str(), "").trim().is_empty() {
                    page_markup.push(body.as_str().to_string());
                }
            }
        }

        tracing::debug!(pages = page_markup.len(), "parsed XHTML document");

        Self {
            name: name.into(),
            page_markup,
        }
    }

    pub fn from_file(path: &Path) -> OutlineResult<Self> {
        let xhtml = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        Ok(Self::from_markup(name, &xhtml))
    }

    pub fn supports_file_type(path: &Path) -> bool {
        if let Some(extension) = path.extension() {
            matches!(
                extension.to_str().unwrap_or("").to_lowercase().as_str(),
                "xhtml" | "html" | "htm"
            )
        } else {
            false
        }
    }
}

impl PageTextSource for XhtmlSource {
    fn page_count(&self) -> usize {
        self.page_markup.len()
    }

    fn get_text(&self, page_index: usize) -> OutlineResult<String> {
        let markup = self
            .page_markup
            .get(page_index)
            .ok_or(OutlineError::PageOutOfRange {
                index: page_index,
                count: self.page_markup.len(),
            })?;
        page_text(markup).map_err(|reason| OutlineError::Extraction {
            page: page_index,
            reason,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Convert one page's markup into text, one line per `<p>`.
fn page_text(markup: &str) -> Result<String, String> {
    let opened = PARAGRAPH_OPEN_REGEX.find_iter(markup).count();
    let closed = markup.matches("</p>").count();
    if opened != closed {
        return Err(format!(
            "unbalanced paragraph markup ({opened} opened, {closed} closed)"
        ));
    }

    let blocks: Vec<String> = if opened == 0 {
        vec![markup_to_text(markup)]
    } else {
        PARAGRAPH_REGEX
            .captures_iter(markup)
            .filter_map(|cap| cap.get(1))
            .map(|m| markup_to_text(m.as_str()))
            .collect()
    };

    Ok(blocks
        .iter()
        .flat_map(|block| block.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn markup_to_text(markup: &str) -> String {
    let with_breaks = BREAK_REGEX.replace_all(markup, "\n");
    let stripped = TAG_REGEX.replace_all(&with_breaks, "");
    decode_entities(&stripped)
}

fn decode_entities(text: &str) -> String {
    let numeric = NUMERIC_ENTITY_REGEX.replace_all(text, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(|c| c.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    });

    // &amp; last so "&amp;lt;" decodes to "&lt;", not "<"
    numeric
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
