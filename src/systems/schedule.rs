//! Applies due scheduled tasks. Runs after the weather roll and before
//! the economy, so coins granted this tick join this tick's balance.

use anyhow::Result;

use crate::{
    catalog::MAX_DISCOUNT_PCT,
    engine::{System, SystemContext},
    rng::SystemRng,
    tasks::TaskAction,
    world::World,
};

pub struct ScheduleSystem;

impl ScheduleSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScheduleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ScheduleSystem {
    fn name(&self) -> &str {
        "schedule"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for task in world.tasks.take_due(ctx.tick) {
            match task.action {
                TaskAction::GrantCoins { amount } => {
                    world.resources.coins += amount;
                }
                TaskAction::RestoreDiscount { pct } => {
                    world.discount_pct = pct.clamp(0.0, MAX_DISCOUNT_PCT);
                }
                TaskAction::ClearJustPlaced => {
                    world.just_placed = None;
                }
            }
        }
        Ok(())
    }
}
