use crate::filter::{default_filters, FilterPredicate};
use crate::queue::NodeQueue;
use crate::{PlannerError, Result};
use filedist_core::{StorageNode, Workload};
use tracing::debug;

/// Places one file at a time on the least-loaded node that passes every filter
pub struct AssignmentEngine {
    filters: Vec<Box<dyn FilterPredicate>>,
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentEngine {
    /// Create an engine using the default filters
    pub fn new() -> Self {
        Self::with_filters(default_filters())
    }

    pub fn with_filters(filters: Vec<Box<dyn FilterPredicate>>) -> Self {
        Self { filters }
    }

    /// Place `workload` on a node drawn from `queue`.
    ///
    /// `queue` must have been built from `nodes`. Returns the index of the
    /// chosen node, or `None` when no node accepts the file. Every node taken
    /// out of the queue is back in it when this returns, including on error.
    pub fn assign(
        &self,
        queue: &mut NodeQueue,
        nodes: &mut [StorageNode],
        workload: &mut Workload,
    ) -> Result<Option<usize>> {
        if let Some(node) = workload.assigned_node() {
            return Err(PlannerError::already_assigned(workload.name(), node));
        }

        let mut checkout = queue.checkout();

        while let Some(index) = checkout.next_candidate() {
            let Some(node) = nodes.get_mut(index) else {
                return Err(PlannerError::internal_error(format!(
                    "Queued node index {} is out of range",
                    index
                )));
            };

            if !self.passes_filters(workload, node) {
                continue;
            }

            if !node.accept(workload) {
                return Err(PlannerError::internal_error(format!(
                    "Node {} passed all filters but refused file {}",
                    node.name(),
                    workload.name()
                )));
            }

            checkout.refresh_last(node);
            debug!(
                "File {} placed on node {} after examining {} nodes",
                workload.name(),
                node.name(),
                checkout.examined()
            );
            return Ok(Some(index));
        }

        debug!(
            "File {} fits none of {} examined nodes",
            workload.name(),
            checkout.examined()
        );
        Ok(None)
    }

    fn passes_filters(&self, workload: &Workload, node: &StorageNode) -> bool {
        for filter in &self.filters {
            let result = filter.filter(workload, node);
            if !result.passed {
                debug!(
                    "Node {} filtered out by {}: {}",
                    result.node_name,
                    filter.name(),
                    result.reason.unwrap_or_default()
                );
                return false;
            }
        }
        true
    }
}
