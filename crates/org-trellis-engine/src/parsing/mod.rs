use thiserror::Error;

use crate::models::ParsedDoc;

/// Failure reported by a parser front-end for malformed source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed source at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Contract for parser front-ends that feed the outline model.
///
/// Implementations turn raw source text into a [`ParsedDoc`]: headline
/// entries in document order plus the document-level keywords and named
/// blocks. The model performs no recovery of its own; a [`ParseError`]
/// aborts the load and reaches the caller unchanged.
pub trait OutlineParser {
    fn parse(&self, source: &str) -> Result<ParsedDoc, ParseError>;
}
