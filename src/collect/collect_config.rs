use serde::{Deserialize, Serialize};

/// What happens when a capped buffer is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Reject the element with `AggregateError::CapacityExceeded`.
    #[default]
    Fail,
    /// Keep the first `max_items` elements and drop the rest.
    Truncate,
}

/// Buffer configuration for the collect aggregate.
///
/// - `max_items` caps the number of stored elements. `None` (the default)
///   means unbounded: a very large group will hold every element in memory.
/// - `overflow` only matters when `max_items` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    pub max_items: Option<usize>,
    pub overflow: OverflowPolicy,
}

impl CollectConfig {
    /// Create default (unbounded) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(max_items: Option<usize>, overflow: OverflowPolicy) -> Self {
        Self { max_items, overflow }
    }

    pub fn unbounded() -> Self {
        Self { max_items: None, overflow: OverflowPolicy::default() }
    }

    /// Convenience: cap the buffer at `limit` elements.
    pub fn capped(limit: usize, overflow: OverflowPolicy) -> Self {
        Self { max_items: Some(limit), overflow }
    }

    pub fn is_bounded(&self) -> bool {
        self.max_items.is_some()
    }
}
