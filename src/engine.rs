//! Tick orchestration. Systems run in registration order inside one
//! tick, which is what guarantees the economy reads the weather
//! multipliers resolved earlier in the same tick.

use std::path::PathBuf;

use anyhow::Result;

use crate::{
    rng::{RngManager, SystemRng},
    snapshot::SnapshotWriter,
    world::{World, WorldSnapshot},
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub snapshot_interval_ticks: u64,
    pub snapshot_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            snapshot_writer: SnapshotWriter::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_ticks,
            ),
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    snapshot_writer: SnapshotWriter,
    settings: EngineSettings,
}

impl Engine {
    /// Advances the world by exactly one tick.
    pub fn tick(&mut self, world: &mut World) -> Result<()> {
        let current_tick = world.tick();
        for system in &mut self.systems {
            let mut rng_stream = self.rng.stream(system.name());
            let ctx = SystemContext {
                tick: current_tick,
                dt_secs: world.dt_secs(),
                scenario_name: &self.settings.scenario_name,
            };
            system.run(&ctx, world, &mut rng_stream)?;
        }
        world.advance_time();
        self.snapshot_writer
            .maybe_write(world, &self.settings.scenario_name)?;
        Ok(())
    }

    pub fn run(&mut self, world: &mut World, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick(world)?;
        }
        Ok(())
    }

    pub fn run_with_hook(
        &mut self,
        world: &mut World,
        ticks: u64,
        mut hook: impl FnMut(WorldSnapshot),
    ) -> Result<()> {
        for _ in 0..ticks {
            self.tick(world)?;
            hook(world.snapshot(&self.settings.scenario_name));
        }
        Ok(())
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }

    pub fn snapshot(&self, world: &World) -> WorldSnapshot {
        world.snapshot(&self.settings.scenario_name)
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub dt_secs: f64,
    pub scenario_name: &'a str,
}

pub trait System: Send + Sync {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut SystemRng<'_>)
        -> Result<()>;
}
