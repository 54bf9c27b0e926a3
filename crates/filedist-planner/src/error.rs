// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Planner error type
#[derive(Error, Debug, Diagnostic)]
pub enum PlannerError {
    /// Input rejected before planning
    #[error(transparent)]
    #[diagnostic(transparent)]
    Core(#[from] filedist_core::FiledistError),

    /// Writing the plan failed
    #[error("Failed to write plan to {destination}")]
    #[diagnostic(
        code(planner::output_error),
        help("Check that the output location is writable")
    )]
    Output {
        #[allow(unused)]
        destination: String,
        #[source]
        source: std::io::Error,
    },

    /// The file already has a destination
    #[error("File {file} is already assigned to node {node}")]
    #[diagnostic(
        code(planner::already_assigned),
        help("Each file is placed once; plan from freshly loaded inputs")
    )]
    AlreadyAssigned {
        #[allow(unused)]
        file: String,
        #[allow(unused)]
        node: String,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    #[diagnostic(
        code(planner::internal_error),
        help("This is likely a bug. Please report it")
    )]
    InternalError {
        #[allow(unused)]
        message: String,
    },
}

/// Result type for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Create an Output error
    pub fn output(destination: impl Into<String>, source: std::io::Error) -> Self {
        Self::Output {
            destination: destination.into(),
            source,
        }
    }

    /// Create an AlreadyAssigned error
    pub fn already_assigned(file: impl Into<String>, node: impl Into<String>) -> Self {
        Self::AlreadyAssigned {
            file: file.into(),
            node: node.into(),
        }
    }

    /// Create an InternalError
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
