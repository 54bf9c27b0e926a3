use crate::engine::AssignmentEngine;
use crate::queue::NodeQueue;
use crate::{PlannerError, Result};
use filedist_core::{FiledistError, StorageNode, Workload};
use std::collections::HashSet;
use tracing::{info, warn};

/// Marker written for files no node could take
pub const DEFAULT_UNASSIGNED_SENTINEL: &str = "NULL";

/// Configuration for the planner
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Destination written for files that were not placed
    pub unassigned_sentinel: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            unassigned_sentinel: DEFAULT_UNASSIGNED_SENTINEL.to_string(),
        }
    }
}

/// Batch planner: places a whole set of files largest-first
pub struct Planner {
    config: PlannerConfig,
    engine: AssignmentEngine,
}

impl Planner {
    /// Create a new planner with the default assignment engine
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_engine(config, AssignmentEngine::new())
    }

    pub fn with_engine(config: PlannerConfig, engine: AssignmentEngine) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run one planning pass over `nodes` and `workloads`.
    ///
    /// Files that fit nowhere are left unassigned; only invalid input or a
    /// broken queue invariant produce an error.
    pub fn plan(&self, mut nodes: Vec<StorageNode>, mut workloads: Vec<Workload>) -> Result<Plan> {
        self.validate(&nodes, &workloads)?;

        info!(
            "Planning {} files across {} nodes",
            workloads.len(),
            nodes.len()
        );

        if nodes.is_empty() {
            warn!("No nodes available; every file will be unassigned");
        }

        // Stable, so equal sizes keep their input order
        workloads.sort_by(|a, b| b.size().cmp(&a.size()));

        let mut queue = NodeQueue::from_nodes(&nodes);

        for workload in workloads.iter_mut() {
            match self.engine.assign(&mut queue, &mut nodes, workload)? {
                Some(index) => {
                    info!(
                        "Assigned file {} ({} bytes) to node {}",
                        workload.name(),
                        workload.size(),
                        nodes[index].name()
                    );
                }
                None => {
                    warn!(
                        "No node can accept file {} ({} bytes)",
                        workload.name(),
                        workload.size()
                    );
                }
            }

            if queue.len() != nodes.len() {
                return Err(PlannerError::internal_error(format!(
                    "Node queue holds {} entries for {} nodes",
                    queue.len(),
                    nodes.len()
                )));
            }
        }

        let plan = Plan {
            nodes,
            workloads,
            sentinel: self.config.unassigned_sentinel.clone(),
        };

        info!(
            "Planned {} bytes across {} nodes, {} of {} files unassigned",
            plan.assigned_bytes(),
            plan.nodes.len(),
            plan.unassigned().count(),
            plan.workloads.len()
        );

        Ok(plan)
    }

    /// Reject duplicate names and nodes that would read as the sentinel
    fn validate(&self, nodes: &[StorageNode], workloads: &[Workload]) -> Result<()> {
        let mut seen = HashSet::new();
        for node in nodes {
            if node.name() == self.config.unassigned_sentinel {
                return Err(FiledistError::reserved_name(node.name()).into());
            }
            if !seen.insert(node.name()) {
                return Err(FiledistError::duplicate_name("node", node.name()).into());
            }
        }

        let mut seen = HashSet::new();
        for workload in workloads {
            if !seen.insert(workload.name()) {
                return Err(FiledistError::duplicate_name("file", workload.name()).into());
            }
        }

        Ok(())
    }
}

/// Outcome of one planning pass
#[derive(Debug, Clone)]
pub struct Plan {
    nodes: Vec<StorageNode>,
    workloads: Vec<Workload>,
    sentinel: String,
}

impl Plan {
    /// Nodes in input order, with their final load
    pub fn nodes(&self) -> &[StorageNode] {
        &self.nodes
    }

    /// Files in processing order (largest first)
    pub fn workloads(&self) -> &[Workload] {
        &self.workloads
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn node(&self, name: &str) -> Option<&StorageNode> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// Destination name for `workload`, or the sentinel
    pub fn destination<'a>(&'a self, workload: &'a Workload) -> &'a str {
        workload.assigned_node().unwrap_or(self.sentinel.as_str())
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &Workload> {
        self.workloads.iter().filter(|w| !w.is_assigned())
    }

    pub fn assigned_to<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Workload> {
        self.workloads
            .iter()
            .filter(move |w| w.assigned_node() == Some(node))
    }

    /// Total bytes placed on all nodes, widened since the sum can exceed `u64`
    pub fn assigned_bytes(&self) -> u128 {
        self.nodes
            .iter()
            .map(|n| u128::from(n.bytes_assigned()))
            .sum()
    }

    /// `(file, destination-or-sentinel)` pairs in processing order
    pub fn table(&self) -> Vec<(&str, &str)> {
        self.workloads
            .iter()
            .map(|w| (w.name(), self.destination(w)))
            .collect()
    }
}
