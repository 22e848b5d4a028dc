//! Scheduled one-shot and recurring effects, evaluated once per tick.
//!
//! This replaces the original ad hoc interval timers: every delayed
//! effect is an explicit `(fire_at_tick, action)` entry that dies with
//! the session, and entries tied to a placed entity are canceled when
//! that entity is replaced.

use crate::grid::TileId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskAction {
    GrantCoins { amount: f64 },
    RestoreDiscount { pct: f64 },
    ClearJustPlaced,
}

#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub fire_at_tick: u64,
    pub every_ticks: Option<u64>,
    pub owner: Option<TileId>,
    pub action: TaskAction,
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tasks: Vec<ScheduledTask>,
}

impl TaskQueue {
    pub fn schedule_at(&mut self, fire_at_tick: u64, action: TaskAction) {
        self.tasks.push(ScheduledTask {
            fire_at_tick,
            every_ticks: None,
            owner: None,
            action,
        });
    }

    pub fn schedule_recurring(
        &mut self,
        first_fire_tick: u64,
        every_ticks: u64,
        owner: Option<TileId>,
        action: TaskAction,
    ) {
        self.tasks.push(ScheduledTask {
            fire_at_tick: first_fire_tick,
            every_ticks: Some(every_ticks.max(1)),
            owner,
            action,
        });
    }

    /// Drops every entry owned by `tile`. Called when the tile's entity
    /// is replaced so no effect outlives its source.
    pub fn cancel_owned(&mut self, tile: TileId) {
        self.tasks.retain(|task| task.owner != Some(tile));
    }

    /// Removes and returns the entries due at `tick`; recurring entries
    /// are re-queued for their next slot.
    pub fn take_due(&mut self, tick: u64) -> Vec<ScheduledTask> {
        let mut due = Vec::new();
        let mut keep = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.drain(..) {
            if task.fire_at_tick <= tick {
                if let Some(every) = task.every_ticks {
                    let mut next = task.clone();
                    next.fire_at_tick = tick + every;
                    keep.push(next);
                }
                due.push(task);
            } else {
                keep.push(task);
            }
        }
        self.tasks = keep;
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut queue = TaskQueue::default();
        queue.schedule_at(5, TaskAction::GrantCoins { amount: 2.0 });
        assert!(queue.take_due(4).is_empty());
        let due = queue.take_due(5);
        assert_eq!(due.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn recurring_reschedules_itself() {
        let mut queue = TaskQueue::default();
        queue.schedule_recurring(30, 30, None, TaskAction::GrantCoins { amount: 2.0 });
        assert_eq!(queue.take_due(30).len(), 1);
        assert_eq!(queue.len(), 1);
        assert!(queue.take_due(59).is_empty());
        assert_eq!(queue.take_due(60).len(), 1);
    }

    #[test]
    fn cancel_owned_drops_only_that_tile() {
        let mut queue = TaskQueue::default();
        let a = TileId { x: 1, y: 1 };
        let b = TileId { x: 2, y: 2 };
        queue.schedule_recurring(10, 10, Some(a), TaskAction::GrantCoins { amount: 1.0 });
        queue.schedule_recurring(10, 10, Some(b), TaskAction::GrantCoins { amount: 1.0 });
        queue.cancel_owned(a);
        assert_eq!(queue.len(), 1);
        let due = queue.take_due(10);
        assert_eq!(due[0].owner, Some(b));
    }
}
