pub mod entry;
pub mod meta;

pub use entry::{Headline, OutlineEntry, Section, SectionElement, Table, TableRow};
pub use meta::{Keyword, NamedBlock};

use serde::{Deserialize, Serialize};

/// A fully parsed document as delivered by a parser front-end: headline
/// entries in document order plus the document-level keywords and named
/// blocks. This is the input contract of the outline model; the model
/// never produces one itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDoc {
    pub outlines: Vec<OutlineEntry>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub blocks: Vec<NamedBlock>,
}
