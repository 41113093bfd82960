use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// How a new point is placed relative to the existing ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertPolicy {
    /// Keep insertion order.
    #[default]
    Append,
    /// Keep the points ordered by ascending x, equal x in insertion order.
    SortedByX,
    /// A point with an x already present overwrites that point's y in place.
    ReplaceOnDuplicateX,
    /// A point with an x already present replaces that point, which is removed
    /// and the new one appended.
    Bijective,
}

/// Storage strategy of a trace: ordering policy plus optional capacity.
///
/// With a capacity the trace behaves as a ring buffer: inserting into a full
/// trace first evicts the oldest point (the lowest x for sorted storage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStorage {
    pub policy: InsertPolicy,
    pub capacity: Option<usize>,
}

impl TraceStorage {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn ring_buffer(capacity: usize) -> Self {
        Self {
            policy: InsertPolicy::Append,
            capacity: Some(capacity),
        }
    }

    pub fn sorted() -> Self {
        Self {
            policy: InsertPolicy::SortedByX,
            capacity: None,
        }
    }

    pub fn with_policy(mut self, policy: InsertPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self.capacity {
            Some(0) => Err(ChartError::InvalidCapacity),
            _ => Ok(()),
        }
    }
}
