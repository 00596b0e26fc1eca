//! Text primitives shared by both outline modes.
//!
//! - `sentences`: terminal-punctuation sentence splitting
//! - `normalizer`: watermark/boilerplate removal

pub mod normalizer;
pub mod sentences;

pub use normalizer::TextNormalizer;
pub use sentences::{extract_first_sentence, split_sentences};
