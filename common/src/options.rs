use serde::{Deserialize, Serialize};

/// Knobs for model construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Largest number of mine placements enumerated for one constraint before
    /// construction gives up with `CombinatorialBlowup`.
    pub max_candidates: u64,
    /// Prune `Mine` from cells with no revealed cell around them while the
    /// tables are computed.
    pub reduce_isolated: bool,
}

impl ModelOptions {
    pub const DEFAULT_MAX_CANDIDATES: u64 = 1 << 21;

    pub fn with_max_candidates(mut self, max_candidates: u64) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn with_reduce_isolated(mut self, reduce_isolated: bool) -> Self {
        self.reduce_isolated = reduce_isolated;
        self
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            max_candidates: Self::DEFAULT_MAX_CANDIDATES,
            reduce_isolated: true,
        }
    }
}
