//! Line-oriented `<name> <bytes>` sources for nodes and files

use crate::error::{FiledistError, Result};
use crate::types::{StorageNode, Workload};
use std::path::Path;
use tracing::debug;

/// Which of the two input sources is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Nodes,
    Files,
}

impl InputKind {
    fn source_label(self) -> &'static str {
        match self {
            InputKind::Nodes => "nodes",
            InputKind::Files => "files",
        }
    }

    fn entry_label(self) -> &'static str {
        match self {
            InputKind::Nodes => "node",
            InputKind::Files => "file",
        }
    }
}

/// A parsed `<name> <bytes>` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub bytes: u64,
    /// 1-based line number in the source
    pub line: usize,
}

/// Parse every entry in `text`, skipping blank lines and `#` comments.
///
/// `path` only labels diagnostics; nothing is read from disk.
pub fn parse_entries(kind: InputKind, path: &str, text: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut offset = 0;

    for (idx, raw) in text.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += raw.len();

        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_no = idx + 1;
        let fail = |at: usize, len: usize, reason: String| {
            FiledistError::parse(
                kind.entry_label(),
                path,
                text,
                line_no,
                (line_start + at, len),
                reason,
            )
        };

        let tokens = tokens(line);
        let (name, value) = match tokens.as_slice() {
            [(_, name), (at, value)] => (*name, (*at, *value)),
            [(at, name)] => {
                return Err(fail(*at, name.len(), format!("missing size after '{}'", name)));
            }
            [_, _, (at, extra), ..] => {
                return Err(fail(*at, extra.len(), format!("unexpected field '{}'", extra)));
            }
            [] => continue,
        };

        let bytes = value.1.parse::<u64>().map_err(|e| {
            fail(
                value.0,
                value.1.len(),
                format!("invalid size '{}': {}", value.1, e),
            )
        })?;

        entries.push(Entry {
            name: name.to_string(),
            bytes,
            line: line_no,
        });
    }

    debug!(
        "Parsed {} {} entries from {}",
        entries.len(),
        kind.entry_label(),
        path
    );

    Ok(entries)
}

/// Whitespace-separated fields with their byte offset inside `line`
fn tokens(line: &str) -> Vec<(usize, &str)> {
    let mut fields = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                fields.push((s, &line[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        fields.push((s, &line[s..]));
    }

    fields
}

/// Parse a node source held in memory
pub fn parse_nodes(path: &str, text: &str) -> Result<Vec<StorageNode>> {
    Ok(parse_entries(InputKind::Nodes, path, text)?
        .into_iter()
        .map(|e| StorageNode::new(e.name, e.bytes))
        .collect())
}

/// Parse a file source held in memory
pub fn parse_workloads(path: &str, text: &str) -> Result<Vec<Workload>> {
    Ok(parse_entries(InputKind::Files, path, text)?
        .into_iter()
        .map(|e| Workload::new(e.name, e.bytes))
        .collect())
}

fn read_source(kind: InputKind, path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| FiledistError::io(kind.source_label(), path.display().to_string(), e))
}

/// Read and parse the node source at `path`
pub fn load_nodes(path: impl AsRef<Path>) -> Result<Vec<StorageNode>> {
    let path = path.as_ref();
    let text = read_source(InputKind::Nodes, path)?;
    parse_nodes(&path.display().to_string(), &text)
}

/// Read and parse the file source at `path`
pub fn load_workloads(path: impl AsRef<Path>) -> Result<Vec<Workload>> {
    let path = path.as_ref();
    let text = read_source(InputKind::Files, path)?;
    parse_workloads(&path.display().to_string(), &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# nodes\n\nnode1 100\n   # indented comment\nnode2\t250\n  \n";
        let nodes = parse_nodes("nodes.txt", text).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name(), "node1");
        assert_eq!(nodes[0].capacity(), 100);
        assert_eq!(nodes[1].name(), "node2");
        assert_eq!(nodes[1].capacity_remaining(), 250);
    }

    #[test]
    fn test_parse_records_line_numbers() {
        let text = "# header\r\na.bin 10\r\n\r\nb.bin 0\r\n";
        let entries = parse_entries(InputKind::Files, "files.txt", text).unwrap();

        assert_eq!(
            entries,
            vec![
                Entry { name: "a.bin".to_string(), bytes: 10, line: 2 },
                Entry { name: "b.bin".to_string(), bytes: 0, line: 4 },
            ]
        );
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let files = parse_workloads("files.txt", "a.bin 5").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size(), 5);
        assert!(!files[0].is_assigned());
    }

    #[test]
    fn test_parse_rejects_missing_size() {
        let err = parse_nodes("nodes.txt", "node1 10\nnode2\n").unwrap_err();
        match err {
            FiledistError::Parse { line, reason, span, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("missing size"));
                assert_eq!(span.offset(), 9);
                assert_eq!(span.len(), 5);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_size() {
        let err = parse_workloads("files.txt", "a.bin -3\n").unwrap_err();
        match err {
            FiledistError::Parse { line, reason, span, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("invalid size '-3'"));
                assert_eq!(span.offset(), 6);
                assert_eq!(span.len(), 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_size_span_after_multibyte_name() {
        let err = parse_workloads("files.txt", "ok 1\n  résumé.bin\tx2\n").unwrap_err();
        match err {
            FiledistError::Parse { line, reason, span, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("invalid size 'x2'"));
                assert_eq!(span.offset(), 20);
                assert_eq!(span.len(), 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let err = parse_workloads("files.txt", "a.bin 3 extra\n").unwrap_err();
        assert!(matches!(err, FiledistError::Parse { .. }));
        assert!(err.to_string().contains("unexpected field 'extra'"));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# files").unwrap();
        writeln!(file, "movie.mkv 700").unwrap();
        writeln!(file, "notes.txt 3").unwrap();

        let files = load_workloads(file.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name(), "movie.mkv");
        assert_eq!(files[1].size(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_nodes(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, FiledistError::Io { .. }));
    }
}
