use std::collections::HashMap;
use std::sync::Arc;

use relative_path::RelativePath;
use thiserror::Error;
use tracing::debug;

use crate::io::{SourceError, SourceProvider};
use crate::models::{NamedBlock, ParsedDoc};
use crate::parsing::{OutlineParser, ParseError};

use super::OutlineQuery;
use super::collection::OutlineCollection;
use super::node::{NodeState, OutlineNode, OutlineSeq};

/// Failure to turn a source locator into a [`Document`].
///
/// Construction is all-or-nothing: on any error no partially built
/// document value exists. Loader and parser failures are surfaced
/// unchanged, never retried or swallowed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The root outline model: built once from a parsed document, read-only
/// afterwards.
///
/// The document owns the backing node sequence and behaves as an outline
/// collection itself through [`OutlineQuery`], delegating to the
/// collection it built. Reloading the source is the only way to get an
/// updated model.
#[derive(Debug)]
pub struct Document {
    outline: OutlineCollection,
    overview: HashMap<String, String>,
    blocks: Vec<NamedBlock>,
}

impl Document {
    /// Build the outline model from an already-parsed document.
    ///
    /// Every headline entry becomes exactly one node, positioned by
    /// document order; the backing sequence is fixed from here on. A
    /// document with no headlines is legal and yields an empty outline.
    pub fn from_parsed(parsed: ParsedDoc) -> Self {
        let ParsedDoc {
            outlines,
            keywords,
            blocks,
        } = parsed;

        let states: Vec<NodeState> = outlines
            .into_iter()
            .map(|entry| NodeState {
                title: entry.headline.title.clone(),
                level: entry.headline.level,
                tags: entry.headline.tags.clone(),
                entry,
            })
            .collect();
        let seq = Arc::new(OutlineSeq { nodes: states });

        let handles: Vec<OutlineNode> = (0..seq.nodes.len())
            .map(|position| OutlineNode {
                seq: Arc::clone(&seq),
                position,
            })
            .collect();

        // Fold in declaration order so a later duplicate (case-folded)
        // overwrites an earlier one.
        let mut overview = HashMap::new();
        for keyword in &keywords {
            overview.insert(keyword.name.to_lowercase(), keyword.value.clone());
        }

        debug!(
            nodes = handles.len(),
            keywords = keywords.len(),
            blocks = blocks.len(),
            "built outline document"
        );

        Self {
            outline: OutlineCollection::from_nodes(handles),
            overview,
            blocks,
        }
    }

    /// Fetch, parse and build in one step.
    ///
    /// A missing or unreadable source aborts with the loader's error and a
    /// malformed source with the parser's; an empty document is never
    /// fabricated from a failed load.
    pub fn load<S, P>(source: &S, parser: &P, locator: &RelativePath) -> Result<Self, LoadError>
    where
        S: SourceProvider,
        P: OutlineParser,
    {
        let text = source.fetch(locator)?;
        let parsed = parser.parse(&text)?;
        debug!(%locator, "loaded outline document");
        Ok(Self::from_parsed(parsed))
    }

    /// Document-wide options with case-folded names; for duplicate names
    /// the last declaration wins.
    pub fn overview(&self) -> &HashMap<String, String> {
        &self.overview
    }

    /// All named blocks called `name`, in document order. Empty when none
    /// match.
    pub fn find_block_by_name(&self, name: &str) -> Vec<&NamedBlock> {
        self.blocks
            .iter()
            .filter(|block| block.name == name)
            .collect()
    }

    /// The full outline collection.
    pub fn outline(&self) -> &OutlineCollection {
        &self.outline
    }
}

impl OutlineQuery for Document {
    fn nodes(&self) -> &[OutlineNode] {
        self.outline.nodes()
    }
}
