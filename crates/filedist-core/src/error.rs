// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Core error type for filedist input handling
#[derive(Error, Debug, Diagnostic)]
pub enum FiledistError {
    /// Input source could not be read
    #[error("Cannot read {kind} input from '{path}'")]
    #[diagnostic(
        code(filedist::io_error),
        help("Check that the path exists and is readable")
    )]
    Io {
        #[allow(unused)]
        kind: String,
        #[allow(unused)]
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in an input source
    #[error("Malformed {kind} entry at {path}:{line}: {reason}")]
    #[diagnostic(
        code(filedist::parse_error),
        help("Each entry must be '<name> <bytes>' where bytes is a non-negative integer; lines starting with '#' are comments")
    )]
    Parse {
        #[allow(unused)]
        kind: String,
        #[allow(unused)]
        path: String,
        #[allow(unused)]
        line: usize,
        #[allow(unused)]
        reason: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    /// The same name was declared twice
    #[error("Duplicate {kind} name: {name}")]
    #[diagnostic(
        code(filedist::duplicate_name),
        help("Every {kind} must have a unique name")
    )]
    DuplicateName {
        #[allow(unused)]
        kind: String,
        #[allow(unused)]
        name: String,
    },

    /// A node name collides with the unassigned marker
    #[error("Node name '{name}' is reserved as the unassigned marker")]
    #[diagnostic(
        code(filedist::reserved_name),
        help("Rename the node or choose a different marker with --sentinel")
    )]
    ReservedName {
        #[allow(unused)]
        name: String,
    },
}

/// Result type alias for filedist core operations
pub type Result<T> = std::result::Result<T, FiledistError>;

impl FiledistError {
    /// Create an Io error
    pub fn io(kind: impl Into<String>, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            kind: kind.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a Parse error pointing at `span` inside `text`
    pub fn parse(
        kind: impl Into<String>,
        path: impl Into<String>,
        text: &str,
        line: usize,
        span: (usize, usize),
        reason: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self::Parse {
            kind: kind.into(),
            src: NamedSource::new(path.clone(), text.to_string()),
            path,
            line,
            reason: reason.into(),
            span: span.into(),
        }
    }

    /// Create a DuplicateName error
    pub fn duplicate_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a ReservedName error
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FiledistError::duplicate_name("node", "node1");
        assert!(matches!(err, FiledistError::DuplicateName { .. }));
        assert_eq!(err.to_string(), "Duplicate node name: node1");

        let err = FiledistError::parse("file", "files.txt", "a x\n", 1, (2, 1), "invalid size");
        assert!(matches!(err, FiledistError::Parse { line: 1, .. }));
        assert_eq!(
            err.to_string(),
            "Malformed file entry at files.txt:1: invalid size"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = FiledistError::io("nodes", "nodes.txt", source);
        assert_eq!(err.to_string(), "Cannot read nodes input from 'nodes.txt'");
        assert!(std::error::Error::source(&err).is_some());
    }
}
