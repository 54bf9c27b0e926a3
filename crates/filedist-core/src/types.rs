
/// A storage destination with finite remaining capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNode {
    name: String,
    capacity: u64,
    capacity_remaining: u64,
    bytes_assigned: u64,
    files_assigned: u64,
}

impl StorageNode {
    /// Create a node with nothing assigned yet
    pub fn new(name: impl Into<String>, capacity: u64) -> Self {
        Self {
            name: name.into(),
            capacity,
            capacity_remaining: capacity,
            bytes_assigned: 0,
            files_assigned: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capacity declared in the node source
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn capacity_remaining(&self) -> u64 {
        self.capacity_remaining
    }

    pub fn bytes_assigned(&self) -> u64 {
        self.bytes_assigned
    }

    pub fn files_assigned(&self) -> u64 {
        self.files_assigned
    }

    /// Whether the node has room for `size` more bytes
    pub fn can_fit(&self, size: u64) -> bool {
        self.capacity_remaining >= size
    }

    /// Place `workload` on this node.
    ///
    /// Returns `false` and leaves both sides untouched when the workload does
    /// not fit or already has a destination.
    pub fn accept(&mut self, workload: &mut Workload) -> bool {
        if workload.assigned_node.is_some() || !self.can_fit(workload.size) {
            return false;
        }

        self.capacity_remaining -= workload.size;
        self.bytes_assigned += workload.size;
        self.files_assigned += 1;
        workload.assigned_node = Some(self.name.clone());
        true
    }
}

/// A fixed-size file waiting for a destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    name: String,
    size: u64,
    assigned_node: Option<String>,
}

impl Workload {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            assigned_node: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Name of the node this workload was placed on, if any
    pub fn assigned_node(&self) -> Option<&str> {
        self.assigned_node.as_deref()
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_node.is_some()
    }
}
