//! World configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`World`](crate::World).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Label attached to the world's log events (e.g. `"simulation"`).
    pub name: String,
    /// Number of component types to preallocate registry and store slots for.
    pub component_capacity: usize,
    /// Emit a `trace` event for every query scan.
    pub trace_queries: bool,
}

impl WorldConfig {
    /// Create a config with the given name and default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Override the component-type preallocation hint.
    #[must_use]
    pub fn with_component_capacity(mut self, capacity: usize) -> Self {
        self.component_capacity = capacity;
        self
    }

    /// Enable or disable per-query trace events.
    #[must_use]
    pub fn with_trace_queries(mut self, enabled: bool) -> Self {
        self.trace_queries = enabled;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: "world".to_string(),
            component_capacity: 32,
            trace_queries: true,
        }
    }
}
