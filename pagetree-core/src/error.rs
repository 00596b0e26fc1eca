use thiserror::Error;

/// Errors raised by the outline core.
///
/// Pattern-matching misses are never errors: sentence splitting and line
/// classification always fall back to a default. Only collaborator failures
/// and misuse of the reducers end up here.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("failed to extract text from page {page}: {reason}")]
    Extraction { page: usize, reason: String },

    #[error("page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("mindmap reduction requires leaf paragraphs, found container '{title}'")]
    ContainerParagraph { title: String },

    #[error("invalid heading pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OutlineResult<T> = std::result::Result<T, OutlineError>;
