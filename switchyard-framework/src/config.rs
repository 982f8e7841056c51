use serde::{Deserialize, Serialize};

/// Routes deeper than this are rejected, and lookups deeper than this miss.
pub const DEFAULT_MAX_SEGMENTS: usize = 128;

/// Router behaviour that is fixed when the router is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Maximum number of segments in a registered route or a looked-up path
    pub max_segments: usize,
    /// Clean `.`/`..` segments out of lookup paths before matching
    pub normalize_lookups: bool,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    pub fn normalize_lookups(mut self, normalize_lookups: bool) -> Self {
        self.normalize_lookups = normalize_lookups;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            max_segments: DEFAULT_MAX_SEGMENTS,
            normalize_lookups: true,
        }
    }
}
