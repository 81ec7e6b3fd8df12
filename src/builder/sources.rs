//! Source file discovery.
//!
//! Build descriptions don't list their sources by hand; they ask for every
//! file with a given suffix below their directory. The result is sorted so
//! repeated runs on the same tree describe the build in the same order.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Files whose name starts with this marker are skipped. They are pulled in
/// conditionally by other sources.
pub const EXCLUDE_MARKER: char = '_';

/// Errors from source discovery.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no sources matching {suffixes:?} found in {}", root.display())]
    NoSources { root: PathBuf, suffixes: Vec<String> },

    #[error("source directory {} does not exist", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to walk {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// What to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    /// File name suffixes to keep, e.g. `.cxx`
    pub suffixes: Vec<String>,
    /// Optional subdirectory of the root to search instead
    pub subdir: Option<PathBuf>,
    /// Descend into subdirectories
    pub recursive: bool,
}

impl SourceQuery {
    /// Recursive query for the given suffixes.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SourceQuery {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            subdir: None,
            recursive: true,
        }
    }

    /// Search a subdirectory instead of the root.
    pub fn in_subdir(mut self, subdir: impl Into<PathBuf>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    /// Only look at the search directory itself.
    pub fn non_recursive(mut self) -> Self {
        self.recursive = false;
        self
    }

    fn matches(&self, file_name: &str) -> bool {
        !file_name.starts_with(EXCLUDE_MARKER)
            && self.suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
    }
}

/// Find matching files below `root` (or `root/subdir`).
///
/// Returned paths are relative to the search directory, sorted and free of
/// duplicates. Finding nothing is an error.
pub fn gather_sources(root: &Path, query: &SourceQuery) -> Result<Vec<PathBuf>, SourceError> {
    let search_root = match &query.subdir {
        Some(subdir) => root.join(subdir),
        None => root.to_path_buf(),
    };

    if !search_root.is_dir() {
        return Err(SourceError::NotADirectory(search_root));
    }

    let mut walker = WalkDir::new(&search_root).follow_links(true);
    if !query.recursive {
        walker = walker.max_depth(1);
    }

    let mut sources: Vec<PathBuf> = Vec::new();

    for entry in walker {
        let entry = entry.map_err(|source| SourceError::Walk {
            path: search_root.clone(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!("skipping non UTF-8 file name {}", entry.path().display());
            continue;
        };

        if !query.matches(name) {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(&search_root)
            .unwrap_or(entry.path())
            .to_path_buf();

        // sorted insertion keeps the list deterministic and deduplicated
        if let Err(pos) = sources.binary_search(&rel) {
            sources.insert(pos, rel);
        }
    }

    if sources.is_empty() {
        return Err(SourceError::NoSources {
            root: search_root,
            suffixes: query.suffixes.clone(),
        });
    }

    tracing::debug!(
        "found {} sources in {}",
        sources.len(),
        search_root.display()
    );

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cxx_project;

    #[test]
    fn test_gather_sorted_and_filtered() {
        let tmp = cxx_project();
        let sources = gather_sources(tmp.path(), &SourceQuery::new([".cxx"]).in_subdir("src")).unwrap();

        assert_eq!(
            sources,
            vec![
                PathBuf::from("Init.cxx"),
                PathBuf::from("fs/File.cxx"),
                PathBuf::from("net/IPAddress.cxx"),
                PathBuf::from("net/Socket.cxx"),
            ]
        );
    }

    #[test]
    fn test_gather_multiple_suffixes() {
        let tmp = cxx_project();
        let headers = gather_sources(
            tmp.path(),
            &SourceQuery::new([".hxx", ".h"]).in_subdir("include"),
        )
        .unwrap();

        assert_eq!(
            headers,
            vec![
                PathBuf::from("Init.hxx"),
                PathBuf::from("net/Socket.hxx"),
                PathBuf::from("proc/pidfd.h"),
            ]
        );
    }

    #[test]
    fn test_overlapping_suffixes_do_not_duplicate() {
        let tmp = cxx_project();
        let sources = gather_sources(
            tmp.path(),
            &SourceQuery::new([".cxx", "xx", "Socket.cxx"]).in_subdir("src"),
        )
        .unwrap();

        assert_eq!(sources.len(), 4);
    }

    #[test]
    fn test_non_recursive() {
        let tmp = cxx_project();
        let sources = gather_sources(
            tmp.path(),
            &SourceQuery::new([".cxx"]).in_subdir("src").non_recursive(),
        )
        .unwrap();

        assert_eq!(sources, vec![PathBuf::from("Init.cxx")]);
    }

    #[test]
    fn test_no_sources_is_an_error() {
        let tmp = cxx_project();
        let err = gather_sources(tmp.path(), &SourceQuery::new([".rs"])).unwrap_err();
        assert!(matches!(err, SourceError::NoSources { .. }));
        assert!(err.to_string().contains("no sources matching"));
    }

    #[test]
    fn test_missing_directory() {
        let tmp = cxx_project();
        let err = gather_sources(tmp.path(), &SourceQuery::new([".cxx"]).in_subdir("nope"))
            .unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory(_)));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let tmp = cxx_project();
        let query = SourceQuery::new([".cxx", ".hxx"]);
        let first = gather_sources(tmp.path(), &query).unwrap();
        let second = gather_sources(tmp.path(), &query).unwrap();
        assert_eq!(first, second);
        assert!(first.contains(&PathBuf::from("include/net/Socket.hxx")));
    }
}
