use serde::{Deserialize, Serialize};

use curaios_common::confidence::DEFAULT_FUZZY_THRESHOLD;

/// `[resolver]` section of the application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Minimum similarity for the fuzzy tier.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    /// Ask the LLM for a richer query after deterministic composition.
    #[serde(default = "default_expand_queries")]
    pub expand_queries: bool,
}

fn default_fuzzy_threshold() -> f64  { DEFAULT_FUZZY_THRESHOLD }
fn default_expand_queries()  -> bool { true }

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            expand_queries: default_expand_queries(),
        }
    }
}
