//! YAML scenario loading: seed, tick cadence, snapshot settings, and the
//! household's starting balances.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::MAX_DISCOUNT_PCT;
use crate::world::World;

fn default_dt_secs() -> f64 {
    1.0
}

fn default_snapshot_interval_ticks() -> u64 {
    30
}

fn default_coins_rate() -> f64 {
    0.05
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_dt_secs")]
    pub dt_secs: f64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
    #[serde(default)]
    pub starting: StartingState,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartingState {
    #[serde(default)]
    pub resources: StartingResources,
    #[serde(default)]
    pub base_rates: StartingRates,
    #[serde(default)]
    pub discount_pct: f64,
    #[serde(default)]
    pub pollution_level: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartingResources {
    #[serde(default)]
    pub sun: f64,
    #[serde(default)]
    pub water: f64,
    #[serde(default)]
    pub wind: f64,
    #[serde(default)]
    pub coins: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartingRates {
    #[serde(default)]
    pub sun: f64,
    #[serde(default)]
    pub water: f64,
    #[serde(default)]
    pub wind: f64,
    #[serde(default = "default_coins_rate")]
    pub coins: f64,
}

impl Default for StartingRates {
    fn default() -> Self {
        Self {
            sun: 0.0,
            water: 0.0,
            wind: 0.0,
            coins: default_coins_rate(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("dt_secs must be positive, got {0}")]
    NonPositiveDt(f64),
    #[error("starting discount must be within 0..={MAX_DISCOUNT_PCT}, got {0}")]
    DiscountOutOfRange(f64),
    #[error("starting pollution level must be within 0..=100, got {0}")]
    PollutionOutOfRange(f64),
    #[error("starting resources must be non-negative")]
    NegativeResources,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.dt_secs <= 0.0 {
            return Err(ScenarioError::NonPositiveDt(self.dt_secs));
        }
        if !(0.0..=MAX_DISCOUNT_PCT).contains(&self.starting.discount_pct) {
            return Err(ScenarioError::DiscountOutOfRange(self.starting.discount_pct));
        }
        if !(0.0..=100.0).contains(&self.starting.pollution_level) {
            return Err(ScenarioError::PollutionOutOfRange(
                self.starting.pollution_level,
            ));
        }
        let resources = &self.starting.resources;
        if resources.sun < 0.0 || resources.water < 0.0 || resources.wind < 0.0
            || resources.coins < 0.0
        {
            return Err(ScenarioError::NegativeResources);
        }
        Ok(())
    }

    pub fn build_world(&self) -> World {
        let mut world = World::new(self.dt_secs);
        world.resources.sun = self.starting.resources.sun;
        world.resources.water = self.starting.resources.water;
        world.resources.wind = self.starting.resources.wind;
        world.resources.coins = self.starting.resources.coins;
        world.base_rates.sun = self.starting.base_rates.sun;
        world.base_rates.water = self.starting.base_rates.water;
        world.base_rates.wind = self.starting.base_rates.wind;
        world.base_rates.coins = self.starting.base_rates.coins;
        world.discount_pct = self.starting.discount_pct;
        world.pollution.level = self.starting.pollution_level;
        world
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(300)
    }
}
