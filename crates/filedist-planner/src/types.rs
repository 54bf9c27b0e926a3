/// Result of filtering a node for one file
#[derive(Debug, Clone)]
pub struct FilterResult {
    /// Node name
    pub node_name: String,
    /// Whether the node passed the filter
    pub passed: bool,
    /// Reason for failure (if any)
    pub reason: Option<String>,
}

impl FilterResult {
    /// Create a passing filter result
    pub fn pass(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            passed: true,
            reason: None,
        }
    }

    /// Create a failing filter result
    pub fn fail(node_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            passed: false,
            reason: Some(reason.into()),
        }
    }
}
