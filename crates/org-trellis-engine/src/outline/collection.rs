use thiserror::Error;

use super::OutlineQuery;
use super::node::OutlineNode;

/// Positional access beyond the end of a collection. Recoverable by the
/// caller; indexes are never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("outline index {index} out of range (length {len})")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Ordered, index-addressable list of outline nodes.
///
/// Filter queries return new collections whose members are handles into
/// the same underlying document; nothing is copied beyond the handles and
/// original order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineCollection {
    nodes: Vec<OutlineNode>,
}

impl OutlineCollection {
    pub(crate) fn from_nodes(nodes: Vec<OutlineNode>) -> Self {
        Self { nodes }
    }

    /// Iterate members in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, OutlineNode> {
        self.nodes.iter()
    }
}

impl OutlineQuery for OutlineCollection {
    fn nodes(&self) -> &[OutlineNode] {
        &self.nodes
    }
}

impl FromIterator<OutlineNode> for OutlineCollection {
    fn from_iter<T: IntoIterator<Item = OutlineNode>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for OutlineCollection {
    type Item = OutlineNode;
    type IntoIter = std::vec::IntoIter<OutlineNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a OutlineCollection {
    type Item = &'a OutlineNode;
    type IntoIter = std::slice::Iter<'a, OutlineNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Headline, OutlineEntry, ParsedDoc, Section, SectionElement, Table, TableRow,
    };
    use crate::outline::Document;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample_document() -> Document {
        let mut entries = vec![
            OutlineEntry::new(Headline::new("Projects", 1).with_tags(["work"])),
            OutlineEntry::new(Headline::new("Trellis", 2).with_tags(["work", "rust"])),
            OutlineEntry::new(Headline::new("Garden", 1).with_tags(["home"])),
            OutlineEntry::new(Headline::new("Trellis", 2)),
        ];
        entries[1].section = Section::new(vec![SectionElement::Table(Table::new(vec![
            TableRow::new(["task", "state"]),
        ]))]);
        Document::from_parsed(ParsedDoc {
            outlines: entries,
            ..ParsedDoc::default()
        })
    }

    #[test]
    fn test_item_in_range_returns_node() {
        let doc = sample_document();
        assert_eq!(doc.item(2).unwrap().title(), "Garden");
    }

    #[test]
    fn test_item_out_of_range_is_typed_error() {
        let doc = sample_document();
        assert_eq!(doc.item(4), Err(IndexOutOfRange { index: 4, len: 4 }));
        assert_eq!(doc.item(99), Err(IndexOutOfRange { index: 99, len: 4 }));
    }

    #[test]
    fn test_first_and_last_on_empty_collection_are_none() {
        let doc = Document::from_parsed(ParsedDoc::default());
        assert_eq!(doc.first(), None);
        assert_eq!(doc.last(), None);
        assert!(doc.is_empty());
    }

    #[rstest]
    #[case(1, vec!["Projects", "Garden"])]
    #[case(2, vec!["Trellis", "Trellis"])]
    #[case(7, vec![])]
    fn test_find_by_level_returns_exact_matches(
        #[case] level: usize,
        #[case] expected: Vec<&str>,
    ) {
        let doc = sample_document();
        let titles: Vec<_> = doc
            .find_by_level(level)
            .iter()
            .map(|n| n.title().to_string())
            .collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_find_by_tag_is_case_sensitive() {
        let doc = sample_document();
        assert_eq!(doc.find_by_tag("work").len(), 2);
        assert_eq!(doc.find_by_tag("WORK").len(), 0);
        assert_eq!(doc.find_by_tag("rust").len(), 1);
    }

    #[test]
    fn test_find_by_title_matches_exactly_not_substring() {
        let doc = sample_document();
        assert_eq!(doc.find_by_title("Trellis").len(), 2);
        assert_eq!(doc.find_by_title("Trell").len(), 0);
        assert_eq!(doc.find_by_title("trellis").len(), 0);
    }

    #[test]
    fn test_find_preserves_document_order() {
        let doc = sample_document();
        let positions: Vec<_> = doc.find_by_level(2).iter().map(|n| n.position()).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn test_tables_concatenates_in_member_order() {
        let doc = sample_document();
        let tables = doc.tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[0].cells, vec!["task", "state"]);
    }

    #[test]
    fn test_filtered_collection_supports_further_queries() {
        let doc = sample_document();
        let work = doc.find_by_tag("work");
        assert_eq!(work.find_by_level(2).len(), 1);
    }

    #[test]
    fn test_iteration_yields_document_order() {
        let doc = sample_document();
        let titles: Vec<_> = doc.outline().iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["Projects", "Trellis", "Garden", "Trellis"]);
    }
}
