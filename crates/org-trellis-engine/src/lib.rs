pub mod io;
pub mod models;
pub mod outline;
pub mod parsing;

// Re-export key types for easier usage
pub use io::{FsSource, SourceError, SourceProvider};
pub use models::{
    Headline, Keyword, NamedBlock, OutlineEntry, ParsedDoc, Section, SectionElement, Table,
    TableRow,
};
pub use outline::{Document, IndexOutOfRange, LoadError, OutlineCollection, OutlineNode, OutlineQuery};
pub use parsing::{OutlineParser, ParseError};
