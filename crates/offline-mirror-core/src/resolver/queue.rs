use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

/// Descriptor files waiting to be walked for parents and imports
///
/// A file moves from `pending` to `visited` once and is never handed out
/// again, which is what stops self-referencing and circular parent chains.
#[derive(Debug, Default)]
pub struct DescriptorQueue {
    pending: BTreeSet<PathBuf>,
    visited: HashSet<PathBuf>,
}

impl DescriptorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, file: impl Into<PathBuf>) {
        self.pending.insert(file.into());
    }

    /// Drop pending entries that were already visited
    ///
    /// Returns true when nothing is left to process.
    pub fn prune(&mut self) -> bool {
        let visited = &self.visited;
        self.pending.retain(|file| !visited.contains(file));
        self.pending.is_empty()
    }

    /// Take everything currently pending, marking each entry visited
    pub fn take_batch(&mut self) -> Vec<PathBuf> {
        let batch = std::mem::take(&mut self.pending);
        batch
            .into_iter()
            .filter(|file| self.visited.insert(file.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_marks_visited() {
        let mut queue = DescriptorQueue::new();
        queue.enqueue("a.pom");
        queue.enqueue("b.pom");

        let batch = queue.take_batch();
        assert_eq!(batch.len(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.visited_count(), 2);
    }

    #[test]
    fn test_visited_entries_are_never_returned_again() {
        let mut queue = DescriptorQueue::new();
        queue.enqueue("a.pom");
        assert_eq!(queue.take_batch(), vec![PathBuf::from("a.pom")]);

        queue.enqueue("a.pom");
        assert!(queue.prune());
        assert!(queue.take_batch().is_empty());
    }

    #[test]
    fn test_prune_keeps_new_entries() {
        let mut queue = DescriptorQueue::new();
        queue.enqueue("a.pom");
        queue.take_batch();

        queue.enqueue("a.pom");
        queue.enqueue("b.pom");
        assert!(!queue.prune());
        assert_eq!(queue.take_batch(), vec![PathBuf::from("b.pom")]);
        assert_eq!(queue.visited_count(), 2);
    }
}
