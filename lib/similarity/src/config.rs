use serde::{Deserialize, Serialize};
use subx_core::{Error, Result};

/// Result caps and search bounds for the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum candidates returned by single-target requests
    #[serde(default = "default_single_top_n")]
    pub single_top_n: usize,
    /// Maximum combinations returned by multi-target requests
    #[serde(default = "default_multi_top_n")]
    pub multi_top_n: usize,
    /// Per-target shortlist size feeding the combination search
    #[serde(default = "default_shortlist_k")]
    pub shortlist_k: usize,
    /// Upper bound on targets in one multi-target request
    #[serde(default = "default_max_targets")]
    pub max_targets: usize,
}

fn default_single_top_n() -> usize {
    20
}

fn default_multi_top_n() -> usize {
    10
}

fn default_shortlist_k() -> usize {
    5
}

fn default_max_targets() -> usize {
    6
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            single_top_n: default_single_top_n(),
            multi_top_n: default_multi_top_n(),
            shortlist_k: default_shortlist_k(),
            max_targets: default_max_targets(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("single_top_n", self.single_top_n),
            ("multi_top_n", self.multi_top_n),
            ("shortlist_k", self.shortlist_k),
            ("max_targets", self.max_targets),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        // shortlist_k ^ max_targets combinations are enumerated
        let space = (self.shortlist_k as u128).checked_pow(self.max_targets as u32);
        if space.map_or(true, |s| s > 1_000_000) {
            return Err(Error::InvalidConfig(format!(
                "shortlist_k={} with max_targets={} exceeds the combination budget",
                self.shortlist_k, self.max_targets
            )));
        }
        Ok(())
    }
}
