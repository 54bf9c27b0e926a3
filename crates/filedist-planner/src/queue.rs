//! Min-ordered queue of storage nodes.
//!
//! Entries are snapshots of a node's ordering key taken at insertion time.
//! After a node is mutated its entry must be rebuilt with
//! [`NodeEntry::snapshot`] before it goes back into the queue.

use filedist_core::StorageNode;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Queue entry for one node, ordered so that the preferred node is smallest:
/// fewest bytes assigned, then most capacity left, then name.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    index: usize,
    bytes_assigned: u64,
    capacity_remaining: u64,
    name: String,
}

impl NodeEntry {
    /// Capture the current key of `node`, stored at `index` in the owning slice
    pub fn snapshot(index: usize, node: &StorageNode) -> Self {
        Self {
            index,
            bytes_assigned: node.bytes_assigned(),
            capacity_remaining: node.capacity_remaining(),
            name: node.name().to_string(),
        }
    }

    /// Position of the node in the slice the queue was built from
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Ord for NodeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes_assigned
            .cmp(&other.bytes_assigned)
            .then_with(|| other.capacity_remaining.cmp(&self.capacity_remaining))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for NodeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeEntry {}

/// Priority queue yielding the least-loaded node first
#[derive(Debug, Default)]
pub struct NodeQueue {
    heap: BinaryHeap<Reverse<NodeEntry>>,
}

impl NodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue holding one entry per node
    pub fn from_nodes(nodes: &[StorageNode]) -> Self {
        let heap = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| Reverse(NodeEntry::snapshot(index, node)))
            .collect();
        Self { heap }
    }

    pub fn insert(&mut self, entry: NodeEntry) {
        self.heap.push(Reverse(entry));
    }

    /// Remove and return the preferred node
    pub fn extract_min(&mut self) -> Option<NodeEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Start examining candidates for one file.
    ///
    /// Entries taken through the returned [`Checkout`] stay in it and return
    /// to the queue when the checkout is dropped.
    pub fn checkout(&mut self) -> Checkout<'_> {
        Checkout {
            queue: self,
            held: Vec::new(),
        }
    }
}

/// Scoped view over a [`NodeQueue`] that returns examined nodes on drop
pub struct Checkout<'q> {
    queue: &'q mut NodeQueue,
    held: Vec<NodeEntry>,
}

impl Checkout<'_> {
    /// Move the next preferred node out of the queue into this checkout and
    /// return its index
    pub fn next_candidate(&mut self) -> Option<usize> {
        let entry = self.queue.extract_min()?;
        let index = entry.index();
        self.held.push(entry);
        Some(index)
    }

    /// Re-key the most recent candidate after its node changed
    pub fn refresh_last(&mut self, node: &StorageNode) {
        if let Some(last) = self.held.last_mut() {
            *last = NodeEntry::snapshot(last.index, node);
        }
    }

    /// Number of candidates taken so far
    pub fn examined(&self) -> usize {
        self.held.len()
    }
}

impl Drop for Checkout<'_> {
    fn drop(&mut self) {
        for entry in self.held.drain(..) {
            self.queue.insert(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedist_core::Workload;

    fn loaded(name: &str, capacity: u64, assigned: u64) -> StorageNode {
        let mut node = StorageNode::new(name, capacity);
        if assigned > 0 {
            let mut file = Workload::new("seed.bin", assigned);
            assert!(node.accept(&mut file));
        }
        node
    }

    fn drain_names(queue: &mut NodeQueue) -> Vec<String> {
        let mut names = Vec::new();
        while let Some(entry) = queue.extract_min() {
            names.push(entry.name().to_string());
        }
        names
    }

    #[test]
    fn test_least_assigned_first() {
        let nodes = vec![
            loaded("node1", 100, 50),
            loaded("node2", 100, 10),
            loaded("node3", 100, 30),
        ];
        let mut queue = NodeQueue::from_nodes(&nodes);

        assert_eq!(drain_names(&mut queue), vec!["node2", "node3", "node1"]);
    }

    #[test]
    fn test_more_capacity_breaks_ties() {
        let nodes = vec![
            StorageNode::new("node1", 10),
            StorageNode::new("node2", 300),
            StorageNode::new("node3", 0),
        ];
        let mut queue = NodeQueue::from_nodes(&nodes);

        assert_eq!(drain_names(&mut queue), vec!["node2", "node1", "node3"]);
    }

    #[test]
    fn test_name_breaks_remaining_ties() {
        let nodes = vec![
            StorageNode::new("charlie", 10),
            StorageNode::new("alpha", 10),
            StorageNode::new("bravo", 10),
        ];
        let mut queue = NodeQueue::from_nodes(&nodes);

        assert_eq!(drain_names(&mut queue), vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_zero_capacity_nodes_order_by_name() {
        let nodes = vec![loaded("node2", 50, 50), loaded("node1", 50, 50)];
        let mut queue = NodeQueue::from_nodes(&nodes);

        let first = queue.extract_min().unwrap();
        assert_eq!(first.name(), "node1");
        assert_eq!(first.index(), 1);
    }

    #[test]
    fn test_checkout_returns_held_entries() {
        let nodes = vec![StorageNode::new("node1", 10), StorageNode::new("node2", 20)];
        let mut queue = NodeQueue::from_nodes(&nodes);

        {
            let mut checkout = queue.checkout();
            while checkout.next_candidate().is_some() {}
            assert_eq!(checkout.examined(), 2);
        }

        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_checkout_reorders_refreshed_entry() {
        let mut nodes = vec![StorageNode::new("node1", 100), StorageNode::new("node2", 100)];
        let mut queue = NodeQueue::from_nodes(&nodes);

        {
            let mut checkout = queue.checkout();
            let index = checkout.next_candidate().unwrap();
            assert_eq!(nodes[index].name(), "node1");

            let mut file = Workload::new("a.bin", 40);
            assert!(nodes[index].accept(&mut file));
            checkout.refresh_last(&nodes[index]);
        }

        assert_eq!(queue.extract_min().unwrap().name(), "node2");
        assert_eq!(queue.extract_min().unwrap().name(), "node1");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_abandoned_checkout_loses_no_node() {
        let nodes = vec![
            StorageNode::new("node1", 10),
            StorageNode::new("node2", 20),
            StorageNode::new("node3", 30),
        ];
        let mut queue = NodeQueue::from_nodes(&nodes);

        {
            let mut checkout = queue.checkout();
            assert!(checkout.next_candidate().is_some());
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(drain_names(&mut queue), vec!["node3", "node2", "node1"]);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = NodeQueue::new();
        assert!(queue.extract_min().is_none());
        assert!(queue.checkout().next_candidate().is_none());
        assert_eq!(queue.len(), 0);
    }
}
