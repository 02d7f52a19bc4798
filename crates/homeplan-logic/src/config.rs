//! Generator tunables.
//!
//! Every knob the pipeline reads lives here so a caller can tighten or
//! relax a policy without touching the algorithms. `Default` reproduces
//! the stock behaviour.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable parameters for layout generation and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Attempts before giving up.
    pub max_attempts: u32,
    /// Most connected components a valid layout may have.
    pub max_components: usize,
    /// Edge-coincidence tolerance for the shared-edge test, in plan units.
    pub edge_tolerance: f32,
    /// Position tolerance for linking stairs across floors, in plan units.
    pub stair_tolerance: f32,
    /// Lower bound of the random split ratio.
    pub split_ratio_min: f32,
    /// Upper bound of the random split ratio.
    pub split_ratio_max: f32,
    /// A leaf is split only while both sides exceed this multiple of the minimum room size.
    pub splittable_factor: f32,
    /// Hard cap on partitioner loop iterations per zone.
    pub max_split_iterations: usize,
    /// Smallest acceptable kitchen as a fraction of the requested area.
    pub kitchen_min_fraction: f32,
    /// Wall-clock budget for the whole retry loop.
    #[serde(default)]
    pub time_budget: Option<Duration>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            max_components: 4,
            edge_tolerance: 0.1,
            stair_tolerance: 5.0,
            split_ratio_min: 0.4,
            split_ratio_max: 0.6,
            splittable_factor: 1.8,
            max_split_iterations: 100,
            kitchen_min_fraction: 0.8,
            time_budget: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_max_components(mut self, components: usize) -> Self {
        self.max_components = components;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_policy() {
        let c = GeneratorConfig::default();
        assert_eq!(c.max_attempts, 100);
        assert_eq!(c.max_components, 4);
        assert!(c.split_ratio_min < c.split_ratio_max);
        assert!(c.time_budget.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let c = GeneratorConfig::default()
            .with_max_attempts(3)
            .with_max_components(1)
            .with_time_budget(Duration::from_millis(5));
        assert_eq!(c.max_attempts, 3);
        assert_eq!(c.max_components, 1);
        assert_eq!(c.time_budget, Some(Duration::from_millis(5)));
    }
}
