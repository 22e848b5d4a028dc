//! Resource production: composes the multiplier pipeline over the base
//! rates and applies the result once per tick.

use anyhow::Result;

use crate::{
    clock,
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{Rates, World},
};

pub struct EconomySystem;

impl EconomySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EconomySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EconomySystem {
    fn name(&self) -> &str {
        "economy"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let dt = ctx.dt_secs;
        let day_night = clock::day_night_multipliers(world.is_day());
        let weather = clock::weather_multipliers(world.weather().kind);
        // Coins always accrue; sun/water/wind are dead until renewables
        // are unlocked, whatever their base rates say.
        let gate = if world.renewables_unlocked() { 1.0 } else { 0.0 };
        let base = *world.base_rates();

        let effective = Rates {
            sun: gate * base.sun * day_night.sun * weather.sun,
            water: gate * base.water * day_night.water * weather.water,
            wind: gate * base.wind * day_night.wind * weather.wind,
            coins: base.coins * day_night.coins * weather.coins,
        };
        world.effective_rates = effective;

        world.resources.sun += effective.sun * dt;
        world.resources.water += effective.water * dt;
        world.resources.wind += effective.wind * dt;
        world.resources.coins += effective.coins * dt;
        world.resources.clamp_non_negative();
        Ok(())
    }
}
