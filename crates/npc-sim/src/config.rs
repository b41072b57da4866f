//! Simulation configuration, loaded from YAML and overridden by command-line flags.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use clap::ValueEnum;
use npc_nav::Vec2;
use serde::{Deserialize, Serialize};

/// Which decision engine drives the villager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// A single behavior tree.
    #[default]
    Bt,
    /// Priority state machine whose Alive state owns a behavior tree.
    Hybrid,
    /// Explicit state machine with a death/exhaustion guard.
    Fsm,
    /// Goal-oriented action planning.
    Goap,
}

impl Engine {
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Bt => "bt",
            Engine::Hybrid => "hybrid",
            Engine::Fsm => "fsm",
            Engine::Goap => "goap",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub engine: Engine,

    /// Number of simulation steps.
    pub ticks: u64,

    /// Seconds of simulated time per step.
    pub dt: f32,

    /// Seconds in one in-game day. Action durations and need decay scale with it.
    pub day_length: f32,

    pub seed: u64,

    pub villager: VillagerConfig,

    pub needs: NeedsConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            ticks: 6_000,
            dt: 0.1,
            day_length: 60.0,
            seed: 0,
            villager: VillagerConfig::default(),
            needs: NeedsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VillagerConfig {
    pub health: f32,
    pub hunger: f32,
    pub fatigue: f32,
    pub food: i32,
    pub speed: f32,
    pub position: Vec2,
    pub bed: Vec2,
    pub bush: Vec2,
}

impl Default for VillagerConfig {
    fn default() -> Self {
        Self {
            health: 100.0,
            hunger: 0.0,
            fatigue: 0.0,
            food: 2,
            speed: 3.5,
            position: Vec2::ZERO,
            bed: Vec2::new(8.0, 0.0),
            bush: Vec2::new(-10.0, 6.0),
        }
    }
}

/// Need growth per in-game day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsConfig {
    pub hunger_per_day: f32,
    pub fatigue_per_day: f32,
    /// Health lost per day while hunger is maxed out.
    pub starvation_per_day: f32,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            hunger_per_day: 120.0,
            fatigue_per_day: 100.0,
            starvation_per_day: 120.0,
        }
    }
}

impl SimConfig {
    /// Load from a YAML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: SimConfig = serde_yaml::from_str(text).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.dt.is_finite() && self.dt > 0.0,
            "dt must be positive, got {}",
            self.dt
        );
        ensure!(
            self.day_length.is_finite() && self.day_length > 0.0,
            "day_length must be positive, got {}",
            self.day_length
        );
        ensure!(
            self.villager.speed >= 0.0,
            "villager.speed must not be negative"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SimConfig::from_yaml("engine: goap\nvillager:\n  food: 0\n").unwrap();
        assert_eq!(config.engine, Engine::Goap);
        assert_eq!(config.villager.food, 0);
        assert_eq!(config.villager.health, 100.0);
        assert_eq!(config.ticks, 6_000);
        assert_eq!(config.needs.hunger_per_day, 120.0);
    }

    #[test]
    fn rejects_non_positive_time_step() {
        assert!(SimConfig::from_yaml("dt: 0").is_err());
        assert!(SimConfig::from_yaml("day_length: -1").is_err());
    }

    #[test]
    fn positions_are_xy_maps() {
        let config = SimConfig::from_yaml("villager:\n  bed: { x: 1.5, y: -2 }\n").unwrap();
        assert_eq!(config.villager.bed, Vec2::new(1.5, -2.0));
    }
}
