//! Static upgrade catalog: item definitions, the prerequisite graph,
//! the visibility filter, and discount-adjusted pricing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discounts accumulate additively but never past this ceiling.
pub const MAX_DISCOUNT_PCT: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKey {
    Coal,
    Pellet,
    Gas,
    Floor,
    Thermostat,
    Heatpump,
    Inverter,
    Grid,
    Solar,
    Echarger,
    Forest,
}

impl ItemKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKey::Coal => "coal",
            ItemKey::Pellet => "pellet",
            ItemKey::Gas => "gas",
            ItemKey::Floor => "floor",
            ItemKey::Thermostat => "thermostat",
            ItemKey::Heatpump => "heatpump",
            ItemKey::Inverter => "inverter",
            ItemKey::Grid => "grid",
            ItemKey::Solar => "solar",
            ItemKey::Echarger => "echarger",
            ItemKey::Forest => "forest",
        }
    }

    /// The coal -> pellet -> gas chain shares the home tile's single
    /// heating slot and replaces forward-only.
    pub fn is_heating_chain(self) -> bool {
        matches!(self, ItemKey::Coal | ItemKey::Pellet | ItemKey::Gas)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ITEMS
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

pub const ALL_ITEMS: &[ItemKey] = &[
    ItemKey::Coal,
    ItemKey::Pellet,
    ItemKey::Gas,
    ItemKey::Floor,
    ItemKey::Thermostat,
    ItemKey::Heatpump,
    ItemKey::Inverter,
    ItemKey::Grid,
    ItemKey::Solar,
    ItemKey::Echarger,
    ItemKey::Forest,
];

/// Per-purchase counters. Heating-chain successors zero their
/// predecessor's count when they take over the home slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OwnedCounts {
    counts: HashMap<ItemKey, u32>,
}

impl OwnedCounts {
    pub fn count(&self, key: ItemKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, key: ItemKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn reset(&mut self, key: ItemKey) {
        self.counts.remove(&key);
    }
}

/// Cost map with implicit zero for absent resources; a zero here means
/// "free in that resource", never "unconstrained".
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ItemCost {
    pub sun: f64,
    pub water: f64,
    pub wind: f64,
    pub coins: f64,
}

impl ItemCost {
    pub const FREE: ItemCost = ItemCost {
        sun: 0.0,
        water: 0.0,
        wind: 0.0,
        coins: 0.0,
    };

    /// Component-wise `ceil(cost * (1 - pct/100))`.
    pub fn discounted(&self, discount_pct: f64) -> ItemCost {
        let factor = 1.0 - discount_pct.clamp(0.0, MAX_DISCOUNT_PCT) / 100.0;
        ItemCost {
            sun: (self.sun * factor).ceil(),
            water: (self.water * factor).ceil(),
            wind: (self.wind * factor).ceil(),
            coins: (self.coins * factor).ceil(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementRule {
    /// Interior upgrade, no tile interaction.
    None,
    HomeOnly,
    AnyEmptyOrHome,
}

/// One-shot mutation applied when a purchase lands. Heating-chain items
/// carry no catalog effect; their placement semantics live in the
/// placement commit.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseEffect {
    pub coins_rate: f64,
    pub sun_rate: f64,
    pub pollution_rate: f64,
    pub discount_pct: f64,
    pub periodic_coins: Option<PeriodicCoins>,
}

#[derive(Debug, Clone, Copy)]
pub struct PeriodicCoins {
    pub amount: f64,
    pub every_secs: f64,
}

impl PurchaseEffect {
    pub const NONE: PurchaseEffect = PurchaseEffect {
        coins_rate: 0.0,
        sun_rate: 0.0,
        pollution_rate: 0.0,
        discount_pct: 0.0,
        periodic_coins: None,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct ItemDefinition {
    pub key: ItemKey,
    pub display: &'static str,
    pub cost: ItemCost,
    pub prerequisites: &'static [ItemKey],
    pub single_purchase: bool,
    pub placement: PlacementRule,
    pub effect: PurchaseEffect,
}

pub const ITEMS: &[ItemDefinition] = &[
    ItemDefinition {
        key: ItemKey::Coal,
        display: "Coal Stove",
        cost: ItemCost::FREE,
        prerequisites: &[],
        single_purchase: true,
        placement: PlacementRule::HomeOnly,
        effect: PurchaseEffect::NONE,
    },
    ItemDefinition {
        key: ItemKey::Pellet,
        display: "Pellet Heating",
        cost: ItemCost {
            sun: 0.0,
            water: 0.0,
            wind: 0.0,
            coins: 10.0,
        },
        prerequisites: &[ItemKey::Coal],
        single_purchase: true,
        placement: PlacementRule::HomeOnly,
        effect: PurchaseEffect::NONE,
    },
    ItemDefinition {
        key: ItemKey::Gas,
        display: "Gas Condensing Boiler",
        cost: ItemCost {
            sun: 0.0,
            water: 0.0,
            wind: 0.0,
            coins: 25.0,
        },
        prerequisites: &[ItemKey::Pellet],
        single_purchase: true,
        placement: PlacementRule::HomeOnly,
        effect: PurchaseEffect::NONE,
    },
    ItemDefinition {
        key: ItemKey::Floor,
        display: "Floor Insulation",
        cost: ItemCost {
            sun: 0.0,
            water: 0.0,
            wind: 0.0,
            coins: 5.0,
        },
        prerequisites: &[],
        single_purchase: true,
        placement: PlacementRule::None,
        effect: PurchaseEffect {
            coins_rate: 0.1,
            sun_rate: 0.0,
            pollution_rate: 0.0,
            discount_pct: 0.0,
            periodic_coins: None,
        },
    },
    ItemDefinition {
        key: ItemKey::Thermostat,
        display: "Smart Thermostat",
        cost: ItemCost {
            sun: 0.0,
            water: 0.0,
            wind: 0.0,
            coins: 8.0,
        },
        prerequisites: &[],
        single_purchase: true,
        placement: PlacementRule::None,
        effect: PurchaseEffect {
            coins_rate: 0.1,
            sun_rate: 0.0,
            pollution_rate: 0.0,
            discount_pct: 0.0,
            periodic_coins: None,
        },
    },
    ItemDefinition {
        key: ItemKey::Heatpump,
        display: "Heat Pump",
        cost: ItemCost {
            sun: 10.0,
            water: 0.0,
            wind: 0.0,
            coins: 40.0,
        },
        prerequisites: &[ItemKey::Gas],
        single_purchase: true,
        placement: PlacementRule::AnyEmptyOrHome,
        effect: PurchaseEffect {
            coins_rate: 0.0,
            sun_rate: 0.0,
            pollution_rate: -0.05,
            discount_pct: 0.0,
            periodic_coins: None,
        },
    },
    ItemDefinition {
        key: ItemKey::Inverter,
        display: "Inverter",
        cost: ItemCost {
            sun: 5.0,
            water: 0.0,
            wind: 0.0,
            coins: 20.0,
        },
        prerequisites: &[],
        single_purchase: true,
        placement: PlacementRule::AnyEmptyOrHome,
        effect: PurchaseEffect::NONE,
    },
    ItemDefinition {
        key: ItemKey::Grid,
        display: "Grid Connection",
        cost: ItemCost {
            sun: 0.0,
            water: 0.0,
            wind: 0.0,
            coins: 35.0,
        },
        prerequisites: &[ItemKey::Inverter],
        single_purchase: true,
        placement: PlacementRule::AnyEmptyOrHome,
        effect: PurchaseEffect {
            coins_rate: 0.05,
            sun_rate: 0.0,
            pollution_rate: 0.0,
            discount_pct: 5.0,
            periodic_coins: None,
        },
    },
    ItemDefinition {
        key: ItemKey::Solar,
        display: "Solar Panel",
        cost: ItemCost {
            sun: 15.0,
            water: 0.0,
            wind: 0.0,
            coins: 30.0,
        },
        prerequisites: &[ItemKey::Inverter],
        single_purchase: false,
        placement: PlacementRule::AnyEmptyOrHome,
        effect: PurchaseEffect {
            coins_rate: 0.0,
            sun_rate: 0.25,
            pollution_rate: 0.0,
            discount_pct: 0.0,
            periodic_coins: None,
        },
    },
    ItemDefinition {
        key: ItemKey::Echarger,
        display: "EV Charger",
        cost: ItemCost {
            sun: 0.0,
            water: 0.0,
            wind: 10.0,
            coins: 45.0,
        },
        prerequisites: &[ItemKey::Grid],
        single_purchase: true,
        placement: PlacementRule::AnyEmptyOrHome,
        effect: PurchaseEffect {
            coins_rate: 0.0,
            sun_rate: 0.0,
            pollution_rate: 0.0,
            discount_pct: 0.0,
            periodic_coins: Some(PeriodicCoins {
                amount: 2.0,
                every_secs: 30.0,
            }),
        },
    },
    ItemDefinition {
        key: ItemKey::Forest,
        display: "Forest Patch",
        cost: ItemCost {
            sun: 0.0,
            water: 20.0,
            wind: 0.0,
            coins: 15.0,
        },
        prerequisites: &[],
        single_purchase: false,
        placement: PlacementRule::AnyEmptyOrHome,
        effect: PurchaseEffect {
            coins_rate: 0.0,
            sun_rate: 0.0,
            pollution_rate: -0.5,
            discount_pct: 0.0,
            periodic_coins: None,
        },
    },
];

pub fn definition(key: ItemKey) -> &'static ItemDefinition {
    ITEMS
        .iter()
        .find(|def| def.key == key)
        .expect("catalog covers every item key")
}

/// Catalog filter, re-evaluated on every owned-count change. Superseded
/// heating systems disappear; prerequisite-gated items stay hidden until
/// every prerequisite is owned.
pub fn is_visible(key: ItemKey, owned: &OwnedCounts) -> bool {
    match key {
        ItemKey::Coal if owned.count(ItemKey::Pellet) > 0 || owned.count(ItemKey::Gas) > 0 => {
            return false;
        }
        ItemKey::Pellet if owned.count(ItemKey::Gas) > 0 => return false,
        _ => {}
    }
    definition(key)
        .prerequisites
        .iter()
        .all(|dep| owned.count(*dep) > 0)
}

pub fn visible_items(owned: &OwnedCounts) -> Vec<&'static ItemDefinition> {
    ITEMS
        .iter()
        .filter(|def| is_visible(def.key, owned))
        .collect()
}
