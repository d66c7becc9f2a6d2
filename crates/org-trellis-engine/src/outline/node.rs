use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::models::{OutlineEntry, SectionElement, Table};

use super::collection::OutlineCollection;

/// Immutable backing sequence shared by every node of one document.
///
/// Built once at document construction and never touched again. Node
/// handles address it by position, so per-entry state is allocated exactly
/// once and navigation always resolves to the same canonical data no
/// matter which handle asked.
pub(crate) struct OutlineSeq {
    pub(crate) nodes: Vec<NodeState>,
}

/// Identity fields copied from the headline at build time, plus the
/// wrapped entry itself.
pub(crate) struct NodeState {
    pub(crate) title: String,
    pub(crate) level: usize,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) entry: OutlineEntry,
}

/// One outline entry with hierarchy-aware navigation.
///
/// A node is a cheap handle into its document's shared backing sequence:
/// cloning copies an `Arc` and an index, and two handles compare equal
/// exactly when they address the same position of the same document.
#[derive(Clone)]
pub struct OutlineNode {
    pub(crate) seq: Arc<OutlineSeq>,
    pub(crate) position: usize,
}

impl OutlineNode {
    fn state(&self) -> &NodeState {
        &self.seq.nodes[self.position]
    }

    /// Heading text.
    pub fn title(&self) -> &str {
        &self.state().title
    }

    /// Nesting level, 1 for top-level headings.
    pub fn level(&self) -> usize {
        self.state().level
    }

    /// Tags attached to the heading.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.state().tags
    }

    /// True when the heading carries `tag` (case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.state().tags.contains(tag)
    }

    /// Index of this node in document order. Stable for the node's
    /// lifetime and equal to its entry's position in the parsed input.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The wrapped entry, unmodified, for export and serialization.
    /// This is a read view; the model never hands out anything mutable.
    pub fn entry(&self) -> &OutlineEntry {
        &self.state().entry
    }

    /// The tables of this node's own section, in source order. Empty when
    /// the section has none.
    pub fn tables(&self) -> Vec<&Table> {
        self.state()
            .entry
            .section
            .children
            .iter()
            .filter_map(|element| match element {
                SectionElement::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }

    /// The node immediately after this one in document order, or `None`
    /// on the last node. Repeated calls on the last node stay `None`.
    pub fn next(&self) -> Option<OutlineNode> {
        self.at(self.position + 1)
    }

    /// The node immediately before this one in document order. Position 0
    /// has no predecessor; the unsigned index makes the underflow case
    /// unrepresentable and `checked_sub` keeps it a plain `None`.
    pub fn prev(&self) -> Option<OutlineNode> {
        self.at(self.position.checked_sub(1)?)
    }

    fn at(&self, position: usize) -> Option<OutlineNode> {
        (position < self.seq.nodes.len()).then(|| OutlineNode {
            seq: Arc::clone(&self.seq),
            position,
        })
    }

    /// Every entry nested under this one: the run of following nodes whose
    /// level stays strictly greater than this node's own, stopping at the
    /// first node at or above it or at the end of the document.
    ///
    /// Hierarchy is derived from the level sequence alone (nothing stores
    /// parent/child pointers) and the walk is redone on every call. Level
    /// gaps (a 1 directly followed by a 3) are legal; the skipped level is
    /// simply absent from that branch.
    pub fn children(&self) -> OutlineCollection {
        let mut members = Vec::new();
        let mut cursor = self.next();
        while let Some(node) = cursor {
            if node.level() <= self.level() {
                break;
            }
            cursor = node.next();
            members.push(node);
        }
        OutlineCollection::from_nodes(members)
    }

    /// The nearest preceding node with a strictly lower level, or `None`
    /// for top-level nodes.
    pub fn parent(&self) -> Option<OutlineNode> {
        let mut cursor = self.prev();
        while let Some(node) = cursor {
            if node.level() < self.level() {
                return Some(node);
            }
            cursor = node.prev();
        }
        None
    }
}

impl PartialEq for OutlineNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.seq, &other.seq) && self.position == other.position
    }
}

impl Eq for OutlineNode {}

impl fmt::Debug for OutlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineNode")
            .field("position", &self.position)
            .field("level", &self.level())
            .field("title", &self.title())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Headline, OutlineEntry, ParsedDoc, Section, SectionElement, Table, TableRow};
    use crate::outline::{Document, OutlineQuery};
    use pretty_assertions::assert_eq;

    fn doc_with_levels(levels: &[(usize, &str)]) -> Document {
        let outlines = levels
            .iter()
            .map(|&(level, title)| OutlineEntry::new(Headline::new(title, level)))
            .collect();
        Document::from_parsed(ParsedDoc {
            outlines,
            ..ParsedDoc::default()
        })
    }

    #[test]
    fn test_next_moves_one_position_forward() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b"), (1, "c")]);
        let first = doc.item(0).unwrap();

        let next = first.next().unwrap();
        assert_eq!(next.position(), 1);
        assert_eq!(next.title(), "b");
    }

    #[test]
    fn test_next_prev_roundtrip_returns_same_node() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b"), (1, "c")]);
        let node = doc.item(1).unwrap();

        assert_eq!(node.next().unwrap().prev().unwrap(), node);
    }

    #[test]
    fn test_next_on_last_node_is_none_and_idempotent() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b")]);
        let last = doc.last().unwrap();

        assert_eq!(last.next(), None);
        assert_eq!(last.next(), None);
    }

    #[test]
    fn test_prev_on_first_node_is_none() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b")]);
        assert_eq!(doc.first().unwrap().prev(), None);
    }

    #[test]
    fn test_children_collects_strictly_deeper_run() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b"), (1, "c")]);

        let children = doc.item(0).unwrap().children();
        assert_eq!(children.len(), 1);
        assert_eq!(children.first().unwrap().title(), "b");

        assert_eq!(doc.item(2).unwrap().children().len(), 0);
    }

    #[test]
    fn test_children_spans_level_gap() {
        let doc = doc_with_levels(&[(1, "a"), (3, "deep")]);

        let children = doc.item(0).unwrap().children();
        assert_eq!(children.len(), 1);
        assert_eq!(children.first().unwrap().level(), 3);
    }

    #[test]
    fn test_children_includes_whole_subtree() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b"), (3, "c"), (2, "d"), (1, "e")]);

        let children = doc.item(0).unwrap().children();
        let titles: Vec<_> = children.iter().map(|n| n.title().to_string()).collect();
        assert_eq!(titles, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_children_of_last_node_is_empty() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b")]);
        assert!(doc.last().unwrap().children().is_empty());
    }

    #[test]
    fn test_children_invariant_all_members_deeper() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b"), (4, "c"), (3, "d"), (1, "e")]);
        let node = doc.item(0).unwrap();

        for child in &node.children() {
            assert!(child.level() > node.level());
        }
    }

    #[test]
    fn test_parent_is_nearest_strictly_lower_level() {
        let doc = doc_with_levels(&[(1, "a"), (2, "b"), (3, "c"), (2, "d")]);

        assert_eq!(doc.item(2).unwrap().parent().unwrap().title(), "b");
        assert_eq!(doc.item(3).unwrap().parent().unwrap().title(), "a");
        assert_eq!(doc.item(0).unwrap().parent(), None);
    }

    #[test]
    fn test_tables_filters_section_elements_in_order() {
        let section = Section::new(vec![
            SectionElement::Table(Table::new(vec![TableRow::new(["first"])])),
            SectionElement::Paragraph {
                text: "between".to_string(),
            },
            SectionElement::Table(Table::new(vec![TableRow::new(["second"])])),
        ]);
        let doc = Document::from_parsed(ParsedDoc {
            outlines: vec![OutlineEntry::with_section(Headline::new("a", 1), section)],
            ..ParsedDoc::default()
        });

        let node = doc.first().unwrap();
        let tables = node.tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows[0].cells[0], "first");
        assert_eq!(tables[1].rows[0].cells[0], "second");
    }

    #[test]
    fn test_tags_copied_at_build_time() {
        let entry = OutlineEntry::new(Headline::new("tagged", 1).with_tags(["work"]));
        let doc = Document::from_parsed(ParsedDoc {
            outlines: vec![entry],
            ..ParsedDoc::default()
        });

        let node = doc.first().unwrap();
        assert!(node.has_tag("work"));
        assert!(!node.has_tag("WORK"));
        assert_eq!(node.tags().len(), 1);
    }

    #[test]
    fn test_nodes_from_different_documents_are_not_equal() {
        let a = doc_with_levels(&[(1, "same")]);
        let b = doc_with_levels(&[(1, "same")]);

        assert_ne!(a.first().unwrap(), b.first().unwrap());
    }

    #[test]
    fn test_entry_export_view_matches_input() {
        let entry = OutlineEntry::new(Headline::new("Export me", 2).with_tags(["x"]));
        let doc = Document::from_parsed(ParsedDoc {
            outlines: vec![entry.clone()],
            ..ParsedDoc::default()
        });

        assert_eq!(doc.first().unwrap().entry(), &entry);
    }
}
