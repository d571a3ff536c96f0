use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::coordinate::Coordinate;

/// Files discovered per coordinate
///
/// Only ever grows. The same path arriving from several views is stored once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFileSet {
    entries: BTreeMap<Coordinate, BTreeSet<PathBuf>>,
}

impl ResolvedFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the file was not yet recorded for this coordinate
    pub fn insert(&mut self, coordinate: Coordinate, file: impl Into<PathBuf>) -> bool {
        self.entries.entry(coordinate).or_default().insert(file.into())
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.entries.contains_key(coordinate)
    }

    pub fn files(&self, coordinate: &Coordinate) -> Option<&BTreeSet<PathBuf>> {
        self.entries.get(coordinate)
    }

    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coordinate, &BTreeSet<PathBuf>)> {
        self.entries.iter()
    }

    /// Number of coordinates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedupes_by_path() {
        let coordinate: Coordinate = "g:a:1".parse().unwrap();
        let mut set = ResolvedFileSet::new();

        assert!(set.insert(coordinate.clone(), "/repo/a-1.pom"));
        assert!(!set.insert(coordinate.clone(), "/repo/a-1.pom"));
        assert!(set.insert(coordinate.clone(), "/repo/a-1.jar"));

        assert_eq!(set.len(), 1);
        assert_eq!(set.file_count(), 2);
        assert_eq!(set.files(&coordinate).map(BTreeSet::len), Some(2));
        assert!(set.contains(&coordinate));
    }

    #[test]
    fn test_empty_set() {
        let set = ResolvedFileSet::new();
        assert!(set.is_empty());
        assert_eq!(set.file_count(), 0);
    }
}
