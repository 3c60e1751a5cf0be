//! Exploration budget sent with every deep research request.

use serde::{Deserialize, Serialize};

const fn default_max_steps() -> u32 {
    15
}

const fn default_max_search_iterations() -> u32 {
    3
}

const fn default_max_query_num() -> u32 {
    3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResearchConfig {
    /// Maximum browser agent steps per search.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Maximum plan → search → reflect iterations.
    #[serde(default = "default_max_search_iterations")]
    pub max_search_iterations: u32,

    /// Maximum queries generated per iteration.
    #[serde(default = "default_max_query_num")]
    pub max_query_num: u32,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            max_search_iterations: default_max_search_iterations(),
            max_query_num: default_max_query_num(),
        }
    }
}
