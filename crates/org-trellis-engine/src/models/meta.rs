use serde::{Deserialize, Serialize};

/// Document-wide key/value option declared in the source preamble.
///
/// Names are case-insensitive when folded into the document overview;
/// the raw casing is preserved here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub name: String,
    pub value: String,
}

impl Keyword {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named, opaque block of content addressed independently of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedBlock {
    pub name: String,
    pub body: String,
}

impl NamedBlock {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}
