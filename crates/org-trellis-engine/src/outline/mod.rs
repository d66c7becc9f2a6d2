pub mod collection;
pub mod document;
pub mod node;

pub use collection::{IndexOutOfRange, OutlineCollection};
pub use document::{Document, LoadError};
pub use node::OutlineNode;

use crate::models::Table;

/// The query capability shared by [`OutlineCollection`] and [`Document`].
///
/// Every operation derives from the ordered node slice, so implementors
/// only supply [`nodes`](OutlineQuery::nodes); the document delegates to
/// its internal collection rather than inheriting from it. All methods
/// are pure reads and deterministic for a given backing sequence.
pub trait OutlineQuery {
    /// Member nodes in document order.
    fn nodes(&self) -> &[OutlineNode];

    fn len(&self) -> usize {
        self.nodes().len()
    }

    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// The node at a 0-based index. Out-of-bounds access is an error,
    /// never clamped.
    fn item(&self, index: usize) -> Result<OutlineNode, IndexOutOfRange> {
        self.nodes().get(index).cloned().ok_or(IndexOutOfRange {
            index,
            len: self.nodes().len(),
        })
    }

    /// First node in document order, or `None` when the outline is empty.
    fn first(&self) -> Option<OutlineNode> {
        self.nodes().first().cloned()
    }

    /// Last node in document order, or `None` when the outline is empty.
    fn last(&self) -> Option<OutlineNode> {
        self.nodes().last().cloned()
    }

    /// All members at exactly `level`, document order preserved. No match
    /// is an empty collection, not an error.
    fn find_by_level(&self, level: usize) -> OutlineCollection {
        self.nodes()
            .iter()
            .filter(|node| node.level() == level)
            .cloned()
            .collect()
    }

    /// All members carrying `tag` (case-sensitive exact match), document
    /// order preserved.
    fn find_by_tag(&self, tag: &str) -> OutlineCollection {
        self.nodes()
            .iter()
            .filter(|node| node.has_tag(tag))
            .cloned()
            .collect()
    }

    /// All members whose title equals `title` exactly, never as a
    /// substring.
    fn find_by_title(&self, title: &str) -> OutlineCollection {
        self.nodes()
            .iter()
            .filter(|node| node.title() == title)
            .cloned()
            .collect()
    }

    /// Every table of every member, concatenated in member order. Members
    /// without tables contribute nothing.
    fn tables(&self) -> Vec<&Table> {
        self.nodes().iter().flat_map(|node| node.tables()).collect()
    }
}
