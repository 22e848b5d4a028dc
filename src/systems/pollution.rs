//! Pollution accumulator: one clamped integration step per tick. The
//! rate itself only moves through placement deltas and purchase effects.

use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

pub struct PollutionSystem;

impl PollutionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PollutionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PollutionSystem {
    fn name(&self) -> &str {
        "pollution"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let next = world.pollution.level + world.pollution.rate_per_sec * ctx.dt_secs;
        world.pollution.level = next.clamp(0.0, 100.0);
        Ok(())
    }
}
