use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One heading line: its text, nesting level and attached tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    /// Nesting depth, 1 for top-level headings. Parsers may emit gaps
    /// (a level 1 directly followed by a level 3); the outline layer
    /// treats those as legal.
    pub level: usize,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Headline {
    pub fn new(title: impl Into<String>, level: usize) -> Self {
        Self {
            title: title.into(),
            level,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// The body a headline owns, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub children: Vec<SectionElement>,
}

impl Section {
    pub fn new(children: Vec<SectionElement>) -> Self {
        Self { children }
    }
}

/// A single element of a section body.
///
/// The outline layer only ever inspects `Table`; the other variants ride
/// along unexamined and come back out through the export view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionElement {
    Paragraph { text: String },
    Table(Table),
    List { items: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// One headline plus the section it owns: the unit the outline model wraps.
///
/// Entries arrive in document order; nesting is implicit in the headline
/// level, never in the sequence shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub headline: Headline,
    #[serde(default)]
    pub section: Section,
}

impl OutlineEntry {
    pub fn new(headline: Headline) -> Self {
        Self {
            headline,
            section: Section::default(),
        }
    }

    pub fn with_section(headline: Headline, section: Section) -> Self {
        Self { headline, section }
    }
}
