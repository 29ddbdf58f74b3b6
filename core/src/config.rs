use crate::types::Seed;
use serde::{Deserialize, Serialize};

/// Settings for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: Seed,
    /// Sequences with more items than this are written as JSON Lines.
    pub jsonl_threshold: usize,
    /// Log a progress line every N records in the large datasets. 0 disables.
    pub progress_interval: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            jsonl_threshold: 10_000,
            progress_interval: 1_000,
        }
    }
}

/// Caps applied by the query layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    /// Top-N returned by the flow listing.
    pub max_flows: usize,
    /// Prefix returned by the per-state record listings.
    pub max_records: usize,
    /// Flow prefix summed by the demographics breakdown. This is an
    /// approximation: records past the prefix never contribute.
    pub breakdown_sample: usize,
    pub network_edge_limit: usize,
    /// Gravity-network edges need a magnitude strictly above this.
    pub network_min_flow: u64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_flows: 100,
            max_records: 1_000,
            breakdown_sample: 10_000,
            network_edge_limit: 150,
            network_min_flow: 1_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub generator: GeneratorConfig,
    pub limits: QueryLimits,
}

impl DashboardConfig {
    /// Load from a JSON file. Missing sections and fields keep their defaults.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        if config.limits.max_flows == 0 || config.limits.max_records == 0 {
            anyhow::bail!("{path}: query limits must be non-zero");
        }
        Ok(config)
    }

    /// Defaults with progress logging turned off.
    pub fn default_test() -> Self {
        Self {
            generator: GeneratorConfig {
                seed: 42,
                progress_interval: 0,
                ..GeneratorConfig::default()
            },
            limits: QueryLimits::default(),
        }
    }
}
