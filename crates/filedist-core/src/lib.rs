//! Filedist Core - Data model and input handling for the filedist planner
//!
//! This crate provides:
//! - Storage node and file (workload) types
//! - Error types with miette diagnostics
//! - Parsing of the line-oriented node and file sources

pub mod error;
pub mod input;
pub mod types;

// Re-export commonly used types
pub use error::{FiledistError, Result};
pub use input::{load_nodes, load_workloads, parse_nodes, parse_workloads, InputKind};
pub use types::{StorageNode, Workload};
