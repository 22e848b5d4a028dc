//! Weather state machine: countdown while an event is active, periodic
//! roll while the sky is clear. Must be registered ahead of the economy
//! so rates see this tick's multipliers.

use anyhow::Result;
use rand::Rng;

use crate::{
    clock::{self, WeatherEvent, WeatherKind},
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

pub struct WeatherSystem;

impl WeatherSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WeatherSystem {
    fn name(&self) -> &str {
        "weather"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let dt = ctx.dt_secs;

        if world.weather.is_active() {
            world.weather.remaining_secs -= dt;
            if world.weather.remaining_secs <= 0.0 {
                world.weather = WeatherEvent::clear();
            }
        }

        // The roll cadence keeps running under an active event; draws
        // are only taken while the sky is clear.
        world.weather_roll_countdown -= dt;
        if world.weather_roll_countdown <= 0.0 {
            world.weather_roll_countdown += clock::WEATHER_ROLL_INTERVAL_SECS;
            if !world.weather.is_active() {
                let roll: f64 = rng.gen();
                let kind = clock::draw(roll, world.is_day());
                if kind != WeatherKind::None {
                    world.weather = WeatherEvent::begin(kind);
                }
            }
        }

        Ok(())
    }
}
