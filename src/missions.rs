//! Fixed mission table and one-shot reward evaluation.
//!
//! Missions are checked after every owned-count change; a completed
//! mission stays completed and its reward is granted exactly once, even
//! if the predicate later turns false again (the heating chain zeroes
//! its predecessor's count).

use serde::Serialize;

use crate::catalog::{ItemKey, OwnedCounts};
use crate::world::World;

#[derive(Debug, Clone, Copy)]
pub enum MissionReward {
    Coins(f64),
    /// Instant delta to the pollution level, clamped to [0, 100].
    PollutionLevel(f64),
}

pub struct MissionDefinition {
    pub key: &'static str,
    pub display: &'static str,
    pub predicate: fn(&OwnedCounts) -> bool,
    pub reward: MissionReward,
}

fn coal_placed(owned: &OwnedCounts) -> bool {
    owned.count(ItemKey::Coal) >= 1
}

fn pellet_owned(owned: &OwnedCounts) -> bool {
    owned.count(ItemKey::Pellet) >= 1
}

fn forest_owned(owned: &OwnedCounts) -> bool {
    owned.count(ItemKey::Forest) >= 1
}

pub const MISSIONS: &[MissionDefinition] = &[
    MissionDefinition {
        key: "first-steps",
        display: "Fire up the old stove",
        predicate: coal_placed,
        reward: MissionReward::Coins(10.0),
    },
    MissionDefinition {
        key: "eco-choice",
        display: "Switch to pellet heating",
        predicate: pellet_owned,
        reward: MissionReward::PollutionLevel(-20.0),
    },
    MissionDefinition {
        key: "green-lungs",
        display: "Plant a forest patch",
        predicate: forest_owned,
        reward: MissionReward::PollutionLevel(-30.0),
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct MissionState {
    pub key: &'static str,
    pub completed: bool,
}

pub fn initial_states() -> Vec<MissionState> {
    MISSIONS
        .iter()
        .map(|def| MissionState {
            key: def.key,
            completed: false,
        })
        .collect()
}

pub fn definition(key: &str) -> &'static MissionDefinition {
    MISSIONS
        .iter()
        .find(|def| def.key == key)
        .expect("mission states are built from the mission table")
}

/// Flips newly satisfied missions to completed and grants their rewards.
pub fn evaluate(world: &mut World) {
    for index in 0..world.missions.len() {
        if world.missions[index].completed {
            continue;
        }
        let def = definition(world.missions[index].key);
        if !(def.predicate)(&world.owned) {
            continue;
        }
        world.missions[index].completed = true;
        match def.reward {
            MissionReward::Coins(amount) => world.resources.coins += amount,
            MissionReward::PollutionLevel(delta) => {
                world.pollution.level = (world.pollution.level + delta).clamp(0.0, 100.0);
            }
        }
    }
}
