use anyhow::{Context, Result};
use gridworld::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub min_delta: Continous,
    pub gamma: Continous,
}

/// A grid world and the planner parameters to solve it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub grid: GridWorldConfig,
    pub planner: PlannerConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            grid: GridWorldConfig {
                shape: (50, 50),
                start: (0, 0),
                terminals: vec![(4, 3), (4, 4)],
                rewards: vec![(4, 3, -1.), (4, 4, 1.)],
            },
            planner: PlannerConfig {
                min_delta: 1e-15,
                gamma: 0.9,
            },
        }
    }
}

impl Scenario {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Invalid scenario")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;

        Self::from_json(&s).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
