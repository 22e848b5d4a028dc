//! The single mutable session aggregate: resources, rates, grid, owned
//! counts, pollution, weather, missions, and the scheduled-task queue.
//! Systems and commands mutate it under the engine's tick ordering; the
//! presentation layer only ever sees `WorldSnapshot`.

use serde::Serialize;

use crate::catalog::{self, ItemCost, ItemKey, OwnedCounts};
use crate::clock::{self, WeatherEvent, WeatherKind};
use crate::grid::{Grid, Tile, TileId};
use crate::missions::{self, MissionState};
use crate::tasks::TaskQueue;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ResourceStock {
    pub sun: f64,
    pub water: f64,
    pub wind: f64,
    pub coins: f64,
}

impl ResourceStock {
    pub fn clamp_non_negative(&mut self) {
        self.sun = self.sun.max(0.0);
        self.water = self.water.max(0.0);
        self.wind = self.wind.max(0.0);
        self.coins = self.coins.max(0.0);
    }

    pub fn can_afford(&self, cost: &ItemCost) -> bool {
        self.sun >= cost.sun
            && self.water >= cost.water
            && self.wind >= cost.wind
            && self.coins >= cost.coins
    }

    /// Affordability must be checked first; balances stay non-negative.
    pub fn deduct(&mut self, cost: &ItemCost) {
        self.sun -= cost.sun;
        self.water -= cost.water;
        self.wind -= cost.wind;
        self.coins -= cost.coins;
        self.clamp_non_negative();
    }
}

/// Signed per-second rates; used for base rates and the effective rates
/// left by the economy system after the multiplier pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Rates {
    pub sun: f64,
    pub water: f64,
    pub wind: f64,
    pub coins: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PollutionState {
    /// Clamped to [0, 100] after every tick.
    pub level: f64,
    /// Running accumulator; may be negative (net cleaning).
    pub rate_per_sec: f64,
}

pub struct World {
    tick: u64,
    elapsed_secs: f64,
    dt_secs: f64,
    pub(crate) resources: ResourceStock,
    pub(crate) base_rates: Rates,
    pub(crate) effective_rates: Rates,
    pub(crate) discount_pct: f64,
    pub(crate) renewables_unlocked: bool,
    pub(crate) weather: WeatherEvent,
    pub(crate) weather_roll_countdown: f64,
    pub(crate) grid: Grid,
    pub(crate) owned: OwnedCounts,
    pub(crate) pending_placement: Option<ItemKey>,
    pub(crate) just_placed: Option<TileId>,
    pub(crate) pollution: PollutionState,
    pub(crate) missions: Vec<MissionState>,
    pub(crate) tasks: TaskQueue,
}

impl World {
    pub fn new(dt_secs: f64) -> Self {
        Self {
            tick: 0,
            elapsed_secs: 0.0,
            dt_secs,
            resources: ResourceStock::default(),
            base_rates: Rates::default(),
            effective_rates: Rates::default(),
            discount_pct: 0.0,
            renewables_unlocked: false,
            weather: WeatherEvent::clear(),
            weather_roll_countdown: clock::WEATHER_ROLL_INTERVAL_SECS,
            grid: Grid::default(),
            owned: OwnedCounts::default(),
            pending_placement: None,
            just_placed: None,
            pollution: PollutionState::default(),
            missions: missions::initial_states(),
            tasks: TaskQueue::default(),
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn dt_secs(&self) -> f64 {
        self.dt_secs
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt_secs;
    }

    /// Seconds per weather-roll interval expressed in ticks, at least 1.
    pub(crate) fn secs_to_ticks(&self, secs: f64) -> u64 {
        ((secs / self.dt_secs).round() as u64).max(1)
    }

    pub fn resources(&self) -> &ResourceStock {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceStock {
        &mut self.resources
    }

    pub fn base_rates(&self) -> &Rates {
        &self.base_rates
    }

    pub fn base_rates_mut(&mut self) -> &mut Rates {
        &mut self.base_rates
    }

    pub fn effective_rates(&self) -> &Rates {
        &self.effective_rates
    }

    pub fn discount_pct(&self) -> f64 {
        self.discount_pct
    }

    /// Additive, never above the cap, never reduced here; reductions only
    /// happen through the timed-restore task.
    pub(crate) fn raise_discount(&mut self, delta_pct: f64) {
        self.discount_pct = (self.discount_pct + delta_pct).min(catalog::MAX_DISCOUNT_PCT);
    }

    pub fn renewables_unlocked(&self) -> bool {
        self.renewables_unlocked
    }

    pub fn weather(&self) -> &WeatherEvent {
        &self.weather
    }

    /// Overrides the active weather event, e.g. from a scripted story
    /// beat. The regular countdown resumes once it runs out.
    pub fn force_weather(&mut self, kind: WeatherKind, duration_secs: f64) {
        self.weather = WeatherEvent {
            kind,
            duration_secs,
            remaining_secs: duration_secs,
        };
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn owned(&self) -> &OwnedCounts {
        &self.owned
    }

    pub fn pending_placement(&self) -> Option<ItemKey> {
        self.pending_placement
    }

    pub fn just_placed(&self) -> Option<TileId> {
        self.just_placed
    }

    pub fn pollution(&self) -> &PollutionState {
        &self.pollution
    }

    pub fn pollution_mut(&mut self) -> &mut PollutionState {
        &mut self.pollution
    }

    pub fn missions(&self) -> &[MissionState] {
        &self.missions
    }

    pub fn is_day(&self) -> bool {
        clock::is_day(self.elapsed_secs)
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let catalog_entries = catalog::visible_items(&self.owned)
            .into_iter()
            .map(|def| {
                let cost = def.cost.discounted(self.discount_pct);
                CatalogSnapshot {
                    key: def.key,
                    display: def.display,
                    cost,
                    affordable: self.resources.can_afford(&cost),
                    owned: self.owned.count(def.key),
                }
            })
            .collect();
        let owned = catalog::ALL_ITEMS
            .iter()
            .filter(|key| self.owned.count(**key) > 0)
            .map(|key| OwnedSnapshot {
                item: *key,
                count: self.owned.count(*key),
            })
            .collect();
        let missions = self
            .missions
            .iter()
            .map(|state| MissionSnapshot {
                key: state.key,
                display: missions::definition(state.key).display,
                completed: state.completed,
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            elapsed_secs: self.elapsed_secs,
            is_day: self.is_day(),
            phase_percent: clock::phase_percent(self.elapsed_secs),
            resources: self.resources,
            base_rates: self.base_rates,
            effective_rates: self.effective_rates,
            discount_pct: self.discount_pct,
            renewables_unlocked: self.renewables_unlocked,
            weather: self.weather.clone(),
            pollution: self.pollution,
            pending_placement: self.pending_placement,
            just_placed: self.just_placed,
            tiles: self.grid.tiles().to_vec(),
            owned,
            missions,
            catalog: catalog_entries,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnedSnapshot {
    pub item: ItemKey,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionSnapshot {
    pub key: &'static str,
    pub display: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub key: ItemKey,
    pub display: &'static str,
    pub cost: ItemCost,
    pub affordable: bool,
    pub owned: u32,
}

/// Read-only view handed to the presentation layer after every tick.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub elapsed_secs: f64,
    pub is_day: bool,
    pub phase_percent: f64,
    pub resources: ResourceStock,
    pub base_rates: Rates,
    pub effective_rates: Rates,
    pub discount_pct: f64,
    pub renewables_unlocked: bool,
    pub weather: WeatherEvent,
    pub pollution: PollutionState,
    pub pending_placement: Option<ItemKey>,
    pub just_placed: Option<TileId>,
    pub tiles: Vec<Tile>,
    pub owned: Vec<OwnedSnapshot>,
    pub missions: Vec<MissionSnapshot>,
    pub catalog: Vec<CatalogSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_catalog_visibility_and_affordability() {
        let mut world = World::new(1.0);
        world.resources.coins = 5.0;
        let snap = world.snapshot("test");

        assert_eq!(snap.scenario, "test");
        assert!(snap.is_day);
        assert_eq!(snap.tiles.len(), 49);
        assert!(snap.owned.is_empty());

        let coal = snap
            .catalog
            .iter()
            .find(|entry| entry.key == ItemKey::Coal)
            .expect("coal is visible at start");
        assert!(coal.affordable);
        let floor = snap
            .catalog
            .iter()
            .find(|entry| entry.key == ItemKey::Floor)
            .expect("floor insulation is visible at start");
        assert!(floor.affordable);
        assert!(snap.catalog.iter().all(|entry| entry.key != ItemKey::Pellet));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let world = World::new(1.0);
        let json = serde_json::to_string(&world.snapshot("test")).unwrap();
        assert!(json.contains("\"weather\""));
        assert!(json.contains("\"none\""));
        assert!(json.contains("\"missions\""));
    }
}
