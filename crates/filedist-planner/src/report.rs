//! Rendering a [`Plan`] as a text table, a node summary or JSON

use crate::planner::Plan;
use crate::{PlannerError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Output encoding for the assignment table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<file> <node-or-sentinel>` per line
    #[default]
    Table,
    /// A single [`PlanReport`] document
    Json,
}

/// One file and where it went
#[derive(Debug, Serialize)]
pub struct AssignmentRecord<'a> {
    pub file: &'a str,
    pub size: u64,
    /// `None` when unassigned
    pub node: Option<&'a str>,
}

/// Final state of one node
#[derive(Debug, Serialize)]
pub struct NodeSummary<'a> {
    pub name: &'a str,
    pub capacity: u64,
    pub capacity_remaining: u64,
    pub bytes_assigned: u64,
    pub files_assigned: u64,
}

#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub sentinel: &'a str,
    pub assignments: Vec<AssignmentRecord<'a>>,
    pub nodes: Vec<NodeSummary<'a>>,
}

impl<'a> PlanReport<'a> {
    pub fn from_plan(plan: &'a Plan) -> Self {
        let assignments = plan
            .workloads()
            .iter()
            .map(|w| AssignmentRecord {
                file: w.name(),
                size: w.size(),
                node: w.assigned_node(),
            })
            .collect();

        Self {
            sentinel: plan.sentinel(),
            assignments,
            nodes: node_summaries(plan),
        }
    }
}

/// Node summaries ordered by node name
pub fn node_summaries(plan: &Plan) -> Vec<NodeSummary<'_>> {
    let mut summaries: Vec<NodeSummary<'_>> = plan
        .nodes()
        .iter()
        .map(|n| NodeSummary {
            name: n.name(),
            capacity: n.capacity(),
            capacity_remaining: n.capacity_remaining(),
            bytes_assigned: n.bytes_assigned(),
            files_assigned: n.files_assigned(),
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(b.name));
    summaries
}

/// Write one `<file> <destination>` line per file in processing order
pub fn write_table<W: Write>(plan: &Plan, out: &mut W) -> io::Result<()> {
    for (file, destination) in plan.table() {
        writeln!(out, "{} {}", file, destination)?;
    }
    Ok(())
}

/// Write `<node> <remaining> <assigned-bytes> <files>` per node
pub fn write_summary<W: Write>(plan: &Plan, out: &mut W) -> io::Result<()> {
    for summary in node_summaries(plan) {
        writeln!(
            out,
            "{} {} {} {}",
            summary.name, summary.capacity_remaining, summary.bytes_assigned, summary.files_assigned
        )?;
    }
    Ok(())
}

pub fn render<W: Write>(plan: &Plan, format: OutputFormat, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Table => write_table(plan, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &PlanReport::from_plan(plan))?;
            writeln!(out)
        }
    }
}

/// Render `plan` to the file at `output`, or to stdout when `None`
pub fn write_plan(plan: &Plan, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let destination = path.display().to_string();
            let file =
                File::create(path).map_err(|e| PlannerError::output(destination.clone(), e))?;
            let mut out = BufWriter::new(file);
            render(plan, format, &mut out)
                .and_then(|_| out.flush())
                .map_err(|e| PlannerError::output(destination.clone(), e))?;
            info!("Wrote plan for {} files to {}", plan.workloads().len(), destination);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render(plan, format, &mut out)
                .and_then(|_| out.flush())
                .map_err(|e| PlannerError::output("stdout", e))?;
        }
    }
    Ok(())
}
