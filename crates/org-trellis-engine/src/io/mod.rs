use std::path::{Path, PathBuf};

use org_trellis_config::Config;
use relative_path::{RelativePath, RelativePathBuf};
use thiserror::Error;
use tracing::trace;

/// Failure to obtain source text for a locator. Any of these aborts a
/// document load; a failed fetch never degrades to an empty document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source not found: {0}")]
    NotFound(PathBuf),
    #[error("source unreadable: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("source is not valid UTF-8: {0}")]
    BadEncoding(PathBuf),
    #[error("invalid source root: {0}")]
    InvalidRoot(PathBuf),
}

/// Yields full source text for a locator.
///
/// The outline model consumes this boundary and never goes to the
/// filesystem on its own; anything that can hand back a string for a
/// relative locator can feed a document load.
pub trait SourceProvider {
    fn fetch(&self, locator: &RelativePath) -> Result<String, SourceError>;
}

/// Filesystem-backed source provider rooted at a validated directory.
pub struct FsSource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsSource {
    /// The root must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SourceError> {
        Self::with_extensions(root, vec!["org".to_string()])
    }

    /// As [`new`](Self::new), with an explicit set of document file
    /// extensions recognised by [`scan`](Self::scan).
    pub fn with_extensions(
        root: impl Into<PathBuf>,
        extensions: Vec<String>,
    ) -> Result<Self, SourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::InvalidRoot(root));
        }
        Ok(Self { root, extensions })
    }

    /// Wire the provider from workspace configuration.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Self::with_extensions(config.source_root.clone(), config.extensions.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover every outline document under the root, as locators
    /// relative to it, sorted by path.
    pub fn scan(&self) -> Result<Vec<RelativePathBuf>, SourceError> {
        let mut found = Vec::new();
        self.scan_dir(&self.root, &mut found)?;
        found.sort();
        trace!(count = found.len(), root = %self.root.display(), "scanned source root");
        Ok(found)
    }

    fn scan_dir(&self, dir: &Path, found: &mut Vec<RelativePathBuf>) -> Result<(), SourceError> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                self.scan_dir(&path, found)?;
            } else if self.matches_extension(&path)
                && let Ok(relative) = path.strip_prefix(&self.root)
                && let Ok(locator) = RelativePathBuf::from_path(relative)
            {
                found.push(locator);
            }
        }
        Ok(())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

impl SourceProvider for FsSource {
    fn fetch(&self, locator: &RelativePath) -> Result<String, SourceError> {
        let path = locator.to_path(&self.root);
        if !path.exists() {
            return Err(SourceError::NotFound(path));
        }
        let bytes = std::fs::read(&path)?;
        trace!(%locator, bytes = bytes.len(), "fetched source");
        String::from_utf8(bytes).map_err(|_| SourceError::BadEncoding(path))
    }
}
