//! Filedist Planner - Batch placement of files onto storage nodes
//!
//! This crate provides:
//! - A min-ordered node queue (least assigned bytes, then most room left)
//! - Filter predicates deciding whether a node can take a file
//! - The per-file assignment engine
//! - The largest-first batch planner and plan reporting

pub mod engine;
pub mod error;
pub mod filter;
pub mod planner;
pub mod queue;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use engine::AssignmentEngine;
pub use error::{PlannerError, Result};
pub use planner::{Plan, Planner, PlannerConfig, DEFAULT_UNASSIGNED_SENTINEL};
pub use report::{write_plan, OutputFormat, PlanReport};
pub use types::FilterResult;
