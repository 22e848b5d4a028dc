//! The 7x7 placement grid with its single home tile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemKey;

pub const GRID_SIZE: u32 = 7;
pub const HOME_TILE: TileId = TileId { x: 3, y: 3 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

impl FromStr for TileId {
    type Err = ();

    /// Parses the `x-y` form used by the tile routes, e.g. `3-3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once('-').ok_or(())?;
        let x = x.parse::<u32>().map_err(|_| ())?;
        let y = y.parse::<u32>().map_err(|_| ())?;
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(());
        }
        Ok(TileId { x, y })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tile {
    pub id: TileId,
    pub home: bool,
    pub entity: Option<ItemKey>,
}

#[derive(Debug, Clone)]
pub struct Grid {
    tiles: Vec<Tile>,
}

impl Default for Grid {
    fn default() -> Self {
        let mut tiles = Vec::with_capacity((GRID_SIZE * GRID_SIZE) as usize);
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let id = TileId { x, y };
                tiles.push(Tile {
                    id,
                    home: id == HOME_TILE,
                    entity: None,
                });
            }
        }
        Self { tiles }
    }
}

impl Grid {
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        if id.x >= GRID_SIZE || id.y >= GRID_SIZE {
            return None;
        }
        self.tiles.get((id.y * GRID_SIZE + id.x) as usize)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        if id.x >= GRID_SIZE || id.y >= GRID_SIZE {
            return None;
        }
        self.tiles.get_mut((id.y * GRID_SIZE + id.x) as usize)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn home_entity(&self) -> Option<ItemKey> {
        self.tile(HOME_TILE).and_then(|tile| tile.entity)
    }

    /// Placement legality for a pending item. Coal needs an empty home
    /// slot; its successors replace whatever heats the home; everything
    /// else needs an empty tile (home included, while it is still empty).
    pub fn placement_legal(&self, item: ItemKey, target: TileId) -> bool {
        let Some(tile) = self.tile(target) else {
            return false;
        };
        match item {
            ItemKey::Coal => tile.home && tile.entity.is_none(),
            ItemKey::Pellet | ItemKey::Gas => tile.home,
            _ => tile.entity.is_none(),
        }
    }
}
