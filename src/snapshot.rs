//! Periodic JSON checkpoints of the world, one file per interval tick.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::world::{World, WorldSnapshot};

#[derive(Serialize)]
struct SnapshotFile {
    captured_at: String,
    snapshot: WorldSnapshot,
}

pub struct SnapshotWriter {
    dir: PathBuf,
    interval_ticks: u64,
}

impl SnapshotWriter {
    /// `interval_ticks == 0` disables writing entirely.
    pub fn new(dir: &Path, interval_ticks: u64) -> Self {
        Self {
            dir: dir.to_path_buf(),
            interval_ticks,
        }
    }

    pub fn maybe_write(&self, world: &World, scenario: &str) -> Result<Option<PathBuf>> {
        if self.interval_ticks == 0 || world.tick() % self.interval_ticks != 0 {
            return Ok(None);
        }
        let dir = self.dir.join(scenario);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create snapshot dir {}", dir.display()))?;
        let path = dir.join(format!("tick_{:06}.json", world.tick()));
        let file = SnapshotFile {
            captured_at: chrono::Utc::now().to_rfc3339(),
            snapshot: world.snapshot(scenario),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_only_on_interval_ticks() {
        let temp = tempdir().unwrap();
        let writer = SnapshotWriter::new(temp.path(), 5);
        let mut world = World::new(1.0);
        assert!(writer.maybe_write(&world, "test").unwrap().is_some());
        for _ in 0..4 {
            world.advance_time();
            assert!(writer.maybe_write(&world, "test").unwrap().is_none());
        }
        world.advance_time();
        let path = writer.maybe_write(&world, "test").unwrap().unwrap();
        assert!(path.ends_with("test/tick_000005.json"));
        let data = std::fs::read_to_string(path).unwrap();
        assert!(data.contains("\"scenario\": \"test\""));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let temp = tempdir().unwrap();
        let writer = SnapshotWriter::new(temp.path(), 0);
        let world = World::new(1.0);
        assert!(writer.maybe_write(&world, "test").unwrap().is_none());
    }
}
