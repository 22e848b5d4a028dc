//! Player intents and story-layer capabilities. Every invalid operation
//! is a silent rejection: the world is untouched and the caller gets
//! `false` back, never an error.

use crate::catalog::{self, ItemKey, PlacementRule, MAX_DISCOUNT_PCT};
use crate::grid::TileId;
use crate::missions;
use crate::tasks::TaskAction;
use crate::world::World;

// Canonical pollution-rate deltas for the heating chain (the source had
// two diverging sets; this one is authoritative, see DESIGN.md).
const COAL_POLLUTION_RATE: f64 = 0.4;
const PELLET_POLLUTION_DELTA: f64 = -0.25;
const GAS_POLLUTION_DELTA: f64 = -0.1;

// Base-rate floors applied when pellet heating unlocks renewables.
const PELLET_SUN_FLOOR: f64 = 1.0 / 12.0;
const PELLET_WIND_FLOOR: f64 = 1.0 / 16.0;
const PELLET_WATER_FLOOR: f64 = 1.0 / 18.0;
const PELLET_COINS_RATE: f64 = 0.03;

/// Purchase algorithm. Heating-chain items only reserve a pending
/// placement after paying; all other items take effect immediately and,
/// unless they are interior upgrades, still await a tile click. A newer
/// placeable purchase silently supersedes an existing pending placement.
pub fn purchase(world: &mut World, key: ItemKey) -> bool {
    let def = catalog::definition(key);
    if !catalog::is_visible(key, world.owned()) {
        return false;
    }
    if def.single_purchase && world.owned().count(key) > 0 {
        return false;
    }
    let cost = def.cost.discounted(world.discount_pct());
    if !world.resources().can_afford(&cost) {
        return false;
    }
    world.resources.deduct(&cost);

    if key.is_heating_chain() {
        world.pending_placement = Some(key);
        return true;
    }

    world.owned.increment(key);
    apply_purchase_effect(world, key);
    missions::evaluate(world);
    if def.placement != PlacementRule::None {
        world.pending_placement = Some(key);
    }
    true
}

fn apply_purchase_effect(world: &mut World, key: ItemKey) {
    let effect = catalog::definition(key).effect;
    world.base_rates.coins += effect.coins_rate;
    world.base_rates.sun += effect.sun_rate;
    world.pollution.rate_per_sec += effect.pollution_rate;
    if effect.discount_pct > 0.0 {
        world.raise_discount(effect.discount_pct);
    }
    // Periodic bonuses start at placement, once an owning tile exists.
}

/// Commits the pending item to a tile. Illegal targets leave the pending
/// placement and the grid untouched.
pub fn place_on_tile(world: &mut World, target: TileId) -> bool {
    let Some(item) = world.pending_placement() else {
        return false;
    };
    if !world.grid.placement_legal(item, target) {
        return false;
    }

    match item {
        ItemKey::Coal => {
            set_entity(world, target, item);
            world.owned.increment(ItemKey::Coal);
            world.pollution.rate_per_sec += COAL_POLLUTION_RATE;
        }
        ItemKey::Pellet => {
            replace_home_entity(world, target, item);
            world.owned.reset(ItemKey::Coal);
            world.owned.increment(ItemKey::Pellet);
            world.pollution.rate_per_sec += PELLET_POLLUTION_DELTA;
            world.renewables_unlocked = true;
            world.base_rates.sun = world.base_rates.sun.max(PELLET_SUN_FLOOR);
            world.base_rates.wind = world.base_rates.wind.max(PELLET_WIND_FLOOR);
            world.base_rates.water = world.base_rates.water.max(PELLET_WATER_FLOOR);
            world.base_rates.coins = PELLET_COINS_RATE;
        }
        ItemKey::Gas => {
            replace_home_entity(world, target, item);
            world.owned.reset(ItemKey::Pellet);
            world.owned.increment(ItemKey::Gas);
            world.pollution.rate_per_sec += GAS_POLLUTION_DELTA;
            world.base_rates.coins = world.base_rates.coins.min(PELLET_COINS_RATE);
        }
        _ => {
            // Owned count and immediate effects landed at purchase time.
            set_entity(world, target, item);
            if let Some(periodic) = catalog::definition(item).effect.periodic_coins {
                let every = world.secs_to_ticks(periodic.every_secs);
                world.tasks.schedule_recurring(
                    world.tick() + every,
                    every,
                    Some(target),
                    TaskAction::GrantCoins {
                        amount: periodic.amount,
                    },
                );
            }
        }
    }

    world.pending_placement = None;
    world.just_placed = Some(target);
    world
        .tasks
        .schedule_at(world.tick() + 1, TaskAction::ClearJustPlaced);
    if item.is_heating_chain() {
        missions::evaluate(world);
    }
    true
}

fn set_entity(world: &mut World, target: TileId, item: ItemKey) {
    if let Some(tile) = world.grid.tile_mut(target) {
        tile.entity = Some(item);
    }
}

/// Forward-only heating swap: whatever occupied the home slot is gone,
/// along with any scheduled effects it owned.
fn replace_home_entity(world: &mut World, target: TileId, item: ItemKey) {
    world.tasks.cancel_owned(target);
    set_entity(world, target, item);
}

/// Clears the pending placement with no further side effects; the cost
/// already paid is not refunded.
pub fn cancel_pending_placement(world: &mut World) {
    world.pending_placement = None;
}

// Story-layer capabilities: invoked by external narrative content, never
// by core logic.

pub fn grant_coins(world: &mut World, amount: f64) {
    world.resources.coins = (world.resources.coins + amount).max(0.0);
}

pub fn add_pollution_instant(world: &mut World, delta: f64) {
    world.pollution.level = (world.pollution.level + delta).clamp(0.0, 100.0);
}

/// Sets the global discount for a limited window, then restores the
/// previous percentage via a scheduled task.
pub fn set_global_discount(world: &mut World, pct: f64, seconds: f64) {
    let previous = world.discount_pct();
    world.discount_pct = pct.clamp(0.0, MAX_DISCOUNT_PCT);
    let fire_at = world.tick() + world.secs_to_ticks(seconds);
    world
        .tasks
        .schedule_at(fire_at, TaskAction::RestoreDiscount { pct: previous });
}
