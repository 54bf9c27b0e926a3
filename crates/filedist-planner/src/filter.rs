use crate::types::FilterResult;
use filedist_core::{StorageNode, Workload};

/// Filter predicate trait
pub trait FilterPredicate: Send + Sync {
    /// Decide whether `node` may take `workload` right now
    fn filter(&self, workload: &Workload, node: &StorageNode) -> FilterResult;

    /// Name of the filter
    fn name(&self) -> &str;
}

/// Node must have at least the file's size left
pub struct CapacityFits;

impl FilterPredicate for CapacityFits {
    fn filter(&self, workload: &Workload, node: &StorageNode) -> FilterResult {
        if !node.can_fit(workload.size()) {
            return FilterResult::fail(
                node.name(),
                format!(
                    "Insufficient capacity: requested {} bytes, available {} bytes",
                    workload.size(),
                    node.capacity_remaining()
                ),
            );
        }

        FilterResult::pass(node.name())
    }

    fn name(&self) -> &str {
        "CapacityFits"
    }
}

/// Get default filter predicates
pub fn default_filters() -> Vec<Box<dyn FilterPredicate>> {
    vec![Box::new(CapacityFits)]
}
