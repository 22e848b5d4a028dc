//! Last system in the tick: re-asserts the numeric invariants.

use anyhow::Result;

use crate::{
    catalog::MAX_DISCOUNT_PCT,
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

pub struct BookkeepingSystem;

impl BookkeepingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BookkeepingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BookkeepingSystem {
    fn name(&self) -> &str {
        "bookkeeping"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        world.resources.clamp_non_negative();
        world.pollution.level = world.pollution.level.clamp(0.0, 100.0);
        world.discount_pct = world.discount_pct.clamp(0.0, MAX_DISCOUNT_PCT);
        Ok(())
    }
}
